//! Slot indexing over real pages and boundary clones.
//!
//! Bounded tracks have one slot per real page. Infinite tracks have
//! `page_count + 2` slots: `[clone-last, page0 .. pageN-1, clone-first]`.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::config::LoopMode;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PageTrack {
    pub mode: LoopMode,
    pub page_count: usize,
}

/// Which real page a clone slot stands in for.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloneSlot {
    /// Slot 0, showing the last real page.
    Leading,
    /// Slot `page_count + 1`, showing the first real page.
    Trailing,
}

/// Slide index ranges to duplicate around the real slides.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ClonePlan {
    /// Copies inserted before the first real slide.
    pub leading: Range<usize>,
    /// Copies appended after the last real slide.
    pub trailing: Range<usize>,
}

impl ClonePlan {
    /// Each clone spans a full page of slides so percentage offsets stay
    /// aligned when the last real page is partial.
    pub fn for_slides(slide_count: usize, items_per_page: usize) -> Self {
        let span = items_per_page.min(slide_count);
        ClonePlan {
            leading: slide_count - span..slide_count,
            trailing: 0..span,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.leading.is_empty() && self.trailing.is_empty()
    }
}

impl PageTrack {
    pub fn new(mode: LoopMode, page_count: usize) -> Self {
        Self { mode, page_count }
    }

    pub fn is_empty(&self) -> bool {
        self.page_count == 0
    }

    /// Number of addressable slots, clones included.
    pub fn slot_count(&self) -> usize {
        match self.mode {
            LoopMode::Bounded => self.page_count,
            LoopMode::Infinite if self.page_count == 0 => 0,
            LoopMode::Infinite => self.page_count + 2,
        }
    }

    /// Slot shown right after mount.
    pub fn initial_slot(&self) -> usize {
        match self.mode {
            LoopMode::Bounded => 0,
            LoopMode::Infinite => 1,
        }
    }

    /// Slots that hold real pages.
    pub fn real_slots(&self) -> Range<usize> {
        match self.mode {
            LoopMode::Bounded => 0..self.page_count,
            LoopMode::Infinite => 1..self.page_count + 1,
        }
    }

    /// Clamp a requested slot into the addressable range.
    pub fn resolve(&self, target: i64) -> Option<usize> {
        let slots = self.slot_count();
        if slots == 0 {
            return None;
        }
        Some(target.clamp(0, slots as i64 - 1) as usize)
    }

    /// Real slot on this track for `slot` as it was placed on `placed`.
    ///
    /// Clones are recognised against `placed` and mapped to the page they
    /// show; real pages beyond this track's last page clamp to it.
    pub fn carry_over(&self, placed: &PageTrack, slot: usize) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        if let Some(clone) = placed.clone_at(slot) {
            return Some(self.clone_target(clone));
        }
        let page = placed.display_page(slot).min(self.page_count - 1);
        Some(self.slot_for_page(page))
    }

    pub fn clone_at(&self, slot: usize) -> Option<CloneSlot> {
        if self.mode != LoopMode::Infinite || self.is_empty() {
            return None;
        }
        if slot == 0 {
            Some(CloneSlot::Leading)
        } else if slot == self.page_count + 1 {
            Some(CloneSlot::Trailing)
        } else {
            None
        }
    }

    /// Real slot a clone snaps back to.
    pub fn clone_target(&self, clone: CloneSlot) -> usize {
        match clone {
            CloneSlot::Leading => self.page_count,
            CloneSlot::Trailing => 1,
        }
    }

    /// Zero-based real page shown at `slot`.
    pub fn display_page(&self, slot: usize) -> usize {
        match self.mode {
            LoopMode::Bounded => slot.min(self.page_count.saturating_sub(1)),
            LoopMode::Infinite => match self.clone_at(slot) {
                Some(CloneSlot::Leading) => self.page_count - 1,
                Some(CloneSlot::Trailing) => 0,
                None => slot.saturating_sub(1).min(self.page_count.saturating_sub(1)),
            },
        }
    }

    /// Slot an indicator for real page `page` navigates to.
    pub fn slot_for_page(&self, page: usize) -> usize {
        match self.mode {
            LoopMode::Bounded => page,
            LoopMode::Infinite => page + 1,
        }
    }
}
