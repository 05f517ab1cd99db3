//! Timer identifiers handed to the host.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TimerToken(pub u32);

/// What a scheduled timer does when it fires.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerKind {
    /// Swap a clone slot for its real page.
    Snap,
    /// Re-enable the track transition after a snap.
    Reenable,
    /// Deferred re-settle after mount.
    Settle,
}

/// Monotonic allocator for timer tokens.
/// Tokens are never reused within one carousel, so a late callback carrying an
/// old token can always be told apart from the current one.
#[derive(Default, Debug)]
pub struct TokenAllocator {
    next: u32,
}

impl TokenAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc(&mut self) -> TimerToken {
        let id = TimerToken(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic() {
        let mut alloc = TokenAllocator::new();
        assert_eq!(alloc.alloc(), TimerToken(0));
        assert_eq!(alloc.alloc(), TimerToken(1));
        assert_eq!(alloc.alloc(), TimerToken(2));
    }
}
