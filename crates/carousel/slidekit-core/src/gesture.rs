//! Drag tracking with an early, sticky axis decision.
//!
//! A session starts on pointer down. Once movement leaves the dead zone the
//! axis is locked for the rest of the session: horizontal drags belong to the
//! carousel, vertical drags are left to the page.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct DragSession {
    start: Point,
    current: Point,
    axis: Option<Axis>,
}

impl DragSession {
    fn dx(&self) -> f32 {
        self.current.x - self.start.x
    }

    fn dy(&self) -> f32 {
        self.current.y - self.start.y
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
enum GestureState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Result of feeding one move sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MoveOutcome {
    /// No session is active.
    Ignored,
    /// Still inside the dead zone.
    Undecided,
    /// Horizontal drag; the carousel should follow `dx` and suppress native
    /// scrolling.
    Track { dx: f32, locked_now: bool },
    /// Vertical drag; the page keeps the gesture.
    Ceded { locked_now: bool },
}

/// Result of ending a session.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ReleaseOutcome {
    /// No session was active.
    Ignored,
    /// The session ended without a horizontal lock.
    Released,
    /// A horizontal drag ended with total travel `dx`.
    Horizontal { dx: f32 },
}

#[derive(Clone, Debug)]
pub struct GestureTracker {
    state: GestureState,
    dead_zone: f32,
}

impl GestureTracker {
    pub fn new(dead_zone: f32) -> Self {
        Self {
            state: GestureState::Idle,
            dead_zone,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging(_))
    }

    pub fn axis(&self) -> Option<Axis> {
        match &self.state {
            GestureState::Dragging(s) => s.axis,
            GestureState::Idle => None,
        }
    }

    /// Begin a session at `at`, replacing any session still open.
    pub fn press(&mut self, at: Point) {
        self.state = GestureState::Dragging(DragSession {
            start: at,
            current: at,
            axis: None,
        });
    }

    pub fn motion(&mut self, at: Point) -> MoveOutcome {
        let GestureState::Dragging(session) = &mut self.state else {
            return MoveOutcome::Ignored;
        };
        session.current = at;

        let mut locked_now = false;
        if session.axis.is_none() {
            let ax = session.dx().abs();
            let ay = session.dy().abs();
            if ax > self.dead_zone || ay > self.dead_zone {
                session.axis = Some(if ax > ay {
                    Axis::Horizontal
                } else {
                    Axis::Vertical
                });
                locked_now = true;
            }
        }

        match session.axis {
            None => MoveOutcome::Undecided,
            Some(Axis::Horizontal) => MoveOutcome::Track {
                dx: session.dx(),
                locked_now,
            },
            Some(Axis::Vertical) => MoveOutcome::Ceded { locked_now },
        }
    }

    pub fn release(&mut self) -> ReleaseOutcome {
        match std::mem::take(&mut self.state) {
            GestureState::Idle => ReleaseOutcome::Ignored,
            GestureState::Dragging(session) => match session.axis {
                Some(Axis::Horizontal) => ReleaseOutcome::Horizontal { dx: session.dx() },
                _ => ReleaseOutcome::Released,
            },
        }
    }

    /// Drop the session without a navigation decision. Returns whether one
    /// was active.
    pub fn abort(&mut self) -> bool {
        !matches!(std::mem::take(&mut self.state), GestureState::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dead_zone_defers_the_decision() {
        let mut g = GestureTracker::new(10.0);
        g.press(Point::new(100.0, 100.0));
        assert_eq!(g.motion(Point::new(106.0, 104.0)), MoveOutcome::Undecided);
        assert_eq!(g.axis(), None);
        assert_eq!(
            g.motion(Point::new(115.0, 104.0)),
            MoveOutcome::Track {
                dx: 15.0,
                locked_now: true
            }
        );
    }

    #[test]
    fn horizontal_lock_is_sticky() {
        let mut g = GestureTracker::new(10.0);
        g.press(Point::new(0.0, 0.0));
        g.motion(Point::new(-20.0, 3.0));
        assert_eq!(g.axis(), Some(Axis::Horizontal));
        let out = g.motion(Point::new(-22.0, 90.0));
        assert_eq!(
            out,
            MoveOutcome::Track {
                dx: -22.0,
                locked_now: false
            }
        );
        assert_eq!(g.axis(), Some(Axis::Horizontal));
    }

    #[test]
    fn vertical_lock_cedes_and_releases_without_dx() {
        let mut g = GestureTracker::new(10.0);
        g.press(Point::new(0.0, 0.0));
        assert_eq!(
            g.motion(Point::new(4.0, 30.0)),
            MoveOutcome::Ceded { locked_now: true }
        );
        assert_eq!(
            g.motion(Point::new(200.0, 31.0)),
            MoveOutcome::Ceded { locked_now: false }
        );
        assert_eq!(g.release(), ReleaseOutcome::Released);
        assert!(!g.is_dragging());
    }

    #[test]
    fn diagonal_tie_locks_vertical() {
        let mut g = GestureTracker::new(10.0);
        g.press(Point::new(0.0, 0.0));
        g.motion(Point::new(12.0, 12.0));
        assert_eq!(g.axis(), Some(Axis::Vertical));
    }

    #[test]
    fn idle_ignores_motion_and_release() {
        let mut g = GestureTracker::new(10.0);
        assert_eq!(g.motion(Point::new(1.0, 1.0)), MoveOutcome::Ignored);
        assert_eq!(g.release(), ReleaseOutcome::Ignored);
        assert!(!g.abort());
    }
}
