//! Input contracts for the controller.
//!
//! Hosts translate their native events (mouse, touch, clicks, resizes, timer
//! callbacks) into these values. The controller never sees where an input
//! came from.

use serde::{Deserialize, Serialize};

use crate::gesture::Point;
use crate::ids::TimerToken;
use crate::layout::Viewport;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// A normalized pointer sample in client coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerInput {
    pub kind: PointerKind,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
}

impl PointerInput {
    pub fn down(x: f32, y: f32) -> Self {
        Self {
            kind: PointerKind::Down,
            x,
            y,
        }
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self {
            kind: PointerKind::Move,
            x,
            y,
        }
    }

    pub fn up() -> Self {
        Self {
            kind: PointerKind::Up,
            x: 0.0,
            y: 0.0,
        }
    }

    pub fn cancel() -> Self {
        Self {
            kind: PointerKind::Cancel,
            x: 0.0,
            y: 0.0,
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Everything a host can ask of a carousel, for batch-style drivers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CarouselCommand {
    Mount,
    GoToPage { slot: i64 },
    Next,
    Prev,
    ActivateIndicator { page: usize },
    Resize { viewport: Viewport },
    Pointer { input: PointerInput },
    TimerFired { token: TimerToken },
    Destroy,
}
