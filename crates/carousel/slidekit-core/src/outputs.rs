//! Output contracts from the controller.
//!
//! Outputs carry the host mutations for one operation, in the order they must
//! be applied, plus a separate list of semantic events. Adapters (DOM, tests)
//! apply effects and forward events.

use serde::{Deserialize, Serialize};

use crate::gesture::Axis;
use crate::ids::{TimerKind, TimerToken};
use crate::indicators::IndicatorPatch;
use crate::layout::{SlideSizing, TrackOffset};
use crate::track::ClonePlan;

/// One host mutation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Size every slide, clones included.
    SizeSlides { sizing: SlideSizing },
    /// Replace the boundary clones with copies of these slide ranges.
    SpliceClones { plan: ClonePlan },
    /// Move the track.
    Translate { offset: TrackOffset },
    /// Enable (`true`) or disable the track transition.
    SetTransition { enabled: bool },
    SetGrabbing { grabbing: bool },
    /// Suppress the browser's default handling of the event being processed.
    PreventDefault,
    /// Size the track to the height of real slide `slide`.
    FitHeight { slide: usize },
    Indicators { patch: IndicatorPatch },
    /// Drop transform, transition, clones and sizing; show a plain grid.
    ResetToGrid,
    ScheduleTimer {
        token: TimerToken,
        delay_ms: u32,
        kind: TimerKind,
    },
    CancelTimer { token: TimerToken },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    Next,
    Prev,
}

/// Discrete semantic signals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum CarouselEvent {
    PageChanged {
        from: usize,
        to: usize,
        display_page: usize,
    },
    /// A navigation request arrived while a boundary snap was pending.
    NavigationDropped { requested: i64 },
    SnapStarted { from_slot: usize, to_slot: usize },
    SnapCompleted { slot: usize },
    AxisLocked { axis: Axis },
    SwipeCommitted { direction: SwipeDirection },
    SwipeCancelled { dx: f32 },
    Parked,
    Destroyed,
}

/// Outputs returned by every controller operation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub effects: Vec<Effect>,
    #[serde(default)]
    pub events: Vec<CarouselEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.effects.clear();
        self.events.clear();
    }

    #[inline]
    pub fn push_effect(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    #[inline]
    pub fn push_event(&mut self, event: CarouselEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty() && self.events.is_empty()
    }

    /// Last translate effect, if any.
    pub fn last_offset(&self) -> Option<TrackOffset> {
        self.effects.iter().rev().find_map(|e| match e {
            Effect::Translate { offset } => Some(*offset),
            _ => None,
        })
    }

    pub fn prevents_default(&self) -> bool {
        self.effects.iter().any(|e| matches!(e, Effect::PreventDefault))
    }

    pub fn scheduled_timers(&self) -> impl Iterator<Item = (TimerToken, u32, TimerKind)> + '_ {
        self.effects.iter().filter_map(|e| match e {
            Effect::ScheduleTimer {
                token,
                delay_ms,
                kind,
            } => Some((*token, *delay_ms, *kind)),
            _ => None,
        })
    }
}
