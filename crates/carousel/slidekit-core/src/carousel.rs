//! The carousel controller.
//!
//! One `Carousel` owns all state for one mounted carousel. Every public
//! operation clears and refills an internal [`Outputs`] buffer and returns a
//! reference to it; hosts apply the effects in order.

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::config::{CarouselConfig, LoopMode};
use crate::error::CarouselError;
use crate::gesture::{Axis, GestureTracker, MoveOutcome, ReleaseOutcome};
use crate::ids::{TimerKind, TimerToken, TokenAllocator};
use crate::indicators::{IndicatorPatch, IndicatorRenderer, IndicatorSet};
use crate::inputs::{CarouselCommand, PointerInput, PointerKind};
use crate::layout::{self, Layout, Viewport};
use crate::outputs::{CarouselEvent, Effect, Outputs, SwipeDirection};
use crate::track::{ClonePlan, CloneSlot, PageTrack};

/// Boundary-snap progress.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SnapPhase {
    #[default]
    Idle,
    /// Parked on a clone slot, waiting to swap to the real page it shows.
    SnapPending { token: TimerToken, clone: CloneSlot },
    /// Swapped; waiting to re-enable the transition.
    Reenabling { token: TimerToken },
}

/// Read-only snapshot for hosts and tests.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CarouselState {
    pub current_slot: usize,
    pub display_page: usize,
    pub items_per_page: usize,
    pub page_count: usize,
    pub slot_count: usize,
    pub is_transitioning: bool,
    pub snap: SnapPhase,
    pub dragging: bool,
    pub axis: Option<Axis>,
    pub mounted: bool,
    pub parked: bool,
}

#[derive(Debug)]
pub struct Carousel {
    config: CarouselConfig,
    slide_count: usize,
    viewport: Viewport,

    current: usize,
    /// Page count of the layout `current` was placed under.
    placed_pages: usize,
    snap: SnapPhase,
    gesture: GestureTracker,
    indicators: IndicatorRenderer,
    tokens: TokenAllocator,
    settle_token: Option<TimerToken>,
    /// Items per page the current clones were spliced for.
    spliced_for: Option<usize>,
    resettle_after_snap: bool,

    mounted: bool,
    destroyed: bool,
    parked: bool,

    outputs: Outputs,
}

impl Carousel {
    pub fn new(
        config: CarouselConfig,
        slide_count: usize,
        viewport: Viewport,
    ) -> Result<Self, CarouselError> {
        config.validate()?;
        viewport.validate()?;
        let dead_zone = config.drag_dead_zone_px;
        let mut carousel = Self {
            config,
            slide_count,
            viewport,
            current: 0,
            placed_pages: 0,
            snap: SnapPhase::Idle,
            gesture: GestureTracker::new(dead_zone),
            indicators: IndicatorRenderer::new(),
            tokens: TokenAllocator::new(),
            settle_token: None,
            spliced_for: None,
            resettle_after_snap: false,
            mounted: false,
            destroyed: false,
            parked: false,
            outputs: Outputs::default(),
        };
        let track = carousel.track();
        carousel.place(track.initial_slot(), &track);
        Ok(carousel)
    }

    // ----- queries -----

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn layout(&self) -> Layout {
        layout::compute_layout(
            self.slide_count,
            self.viewport.width,
            self.config.mobile_max_width,
        )
    }

    pub fn track(&self) -> PageTrack {
        PageTrack::new(self.config.mode, self.layout().page_count)
    }

    pub fn is_mobile(&self) -> bool {
        layout::is_mobile(self.viewport.width, self.config.mobile_max_width)
    }

    pub fn current_slot(&self) -> usize {
        self.current
    }

    pub fn display_page(&self) -> usize {
        self.track().display_page(self.current)
    }

    pub fn is_transitioning(&self) -> bool {
        self.snap != SnapPhase::Idle
    }

    pub fn snap_phase(&self) -> SnapPhase {
        self.snap
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted && !self.destroyed
    }

    pub fn is_parked(&self) -> bool {
        self.parked
    }

    pub fn gesture_axis(&self) -> Option<Axis> {
        self.gesture.axis()
    }

    pub fn rendered_indicators(&self) -> Option<&IndicatorSet> {
        self.indicators.rendered()
    }

    pub fn outputs(&self) -> &Outputs {
        &self.outputs
    }

    pub fn state(&self) -> CarouselState {
        let layout = self.layout();
        let track = self.track();
        CarouselState {
            current_slot: self.current,
            display_page: track.display_page(self.current),
            items_per_page: layout.items_per_page,
            page_count: layout.page_count,
            slot_count: track.slot_count(),
            is_transitioning: self.is_transitioning(),
            snap: self.snap,
            dragging: self.gesture.is_dragging(),
            axis: self.gesture.axis(),
            mounted: self.is_mounted(),
            parked: self.parked,
        }
    }

    // ----- operations -----

    /// Initial settle. Splices clones, positions the track on the first real
    /// page, renders indicators and schedules the deferred re-settle.
    pub fn mount(&mut self) -> &Outputs {
        self.outputs.clear();
        self.do_mount();
        &self.outputs
    }

    /// Navigate to `slot` (clamped, or wrapped through clones in infinite
    /// mode). Dropped while a boundary snap is pending.
    pub fn go_to_page(&mut self, slot: i64) -> &Outputs {
        self.outputs.clear();
        if self.accepts_navigation() {
            self.navigate(slot);
        }
        &self.outputs
    }

    pub fn next(&mut self) -> &Outputs {
        self.go_to_page(self.current as i64 + 1)
    }

    pub fn prev(&mut self) -> &Outputs {
        self.go_to_page(self.current as i64 - 1)
    }

    /// Indicator for real page `page` was activated.
    pub fn activate_indicator(&mut self, page: usize) -> &Outputs {
        self.outputs.clear();
        self.do_activate_indicator(page);
        &self.outputs
    }

    /// Record new measurements without moving anything.
    pub fn observe_viewport(&mut self, viewport: Viewport) -> Result<(), CarouselError> {
        viewport.validate()?;
        self.viewport = viewport;
        Ok(())
    }

    /// New measurements followed by a re-settle.
    pub fn resize(&mut self, viewport: Viewport) -> &Outputs {
        self.outputs.clear();
        self.do_resize(viewport);
        &self.outputs
    }

    pub fn pointer(&mut self, input: PointerInput) -> &Outputs {
        self.outputs.clear();
        self.do_pointer(input);
        &self.outputs
    }

    /// A timer scheduled through [`Effect::ScheduleTimer`] expired.
    pub fn timer_fired(&mut self, token: TimerToken) -> &Outputs {
        self.outputs.clear();
        self.do_timer_fired(token);
        &self.outputs
    }

    /// Cancel pending timers and stop reacting to anything.
    pub fn destroy(&mut self) -> &Outputs {
        self.outputs.clear();
        self.do_destroy();
        &self.outputs
    }

    /// Apply a batch of commands in order and return the combined outputs.
    pub fn update(&mut self, commands: impl IntoIterator<Item = CarouselCommand>) -> &Outputs {
        self.outputs.clear();
        for command in commands {
            match command {
                CarouselCommand::Mount => self.do_mount(),
                CarouselCommand::GoToPage { slot } => {
                    if self.accepts_navigation() {
                        self.navigate(slot);
                    }
                }
                CarouselCommand::Next => {
                    if self.accepts_navigation() {
                        self.navigate(self.current as i64 + 1);
                    }
                }
                CarouselCommand::Prev => {
                    if self.accepts_navigation() {
                        self.navigate(self.current as i64 - 1);
                    }
                }
                CarouselCommand::ActivateIndicator { page } => self.do_activate_indicator(page),
                CarouselCommand::Resize { viewport } => self.do_resize(viewport),
                CarouselCommand::Pointer { input } => self.do_pointer(input),
                CarouselCommand::TimerFired { token } => self.do_timer_fired(token),
                CarouselCommand::Destroy => self.do_destroy(),
            }
        }
        &self.outputs
    }

    // ----- internals -----

    fn accepts_navigation(&self) -> bool {
        self.is_mounted() && !self.parked
    }

    fn should_park(&self) -> bool {
        self.config.desktop_grid && !self.is_mobile()
    }

    fn do_mount(&mut self) {
        if self.destroyed || self.mounted {
            return;
        }
        self.mounted = true;
        if self.should_park() {
            self.park();
        } else {
            let track = self.track();
            self.place(track.initial_slot(), &track);
            self.navigate(track.initial_slot() as i64);
        }
        if let Some(delay_ms) = self.config.settle_delay_ms {
            let token = self.tokens.alloc();
            self.settle_token = Some(token);
            self.outputs.push_effect(Effect::ScheduleTimer {
                token,
                delay_ms,
                kind: TimerKind::Settle,
            });
        }
        debug!(
            "carousel mounted: slides={} mode={:?} parked={}",
            self.slide_count, self.config.mode, self.parked
        );
    }

    fn do_activate_indicator(&mut self, page: usize) {
        if !self.accepts_navigation() {
            return;
        }
        let track = self.track();
        if page >= track.page_count {
            trace!("indicator {page} out of range ({} pages)", track.page_count);
            return;
        }
        self.navigate(track.slot_for_page(page) as i64);
    }

    fn do_resize(&mut self, viewport: Viewport) {
        if let Err(err) = self.observe_viewport(viewport) {
            warn!("ignoring resize: {err}");
            return;
        }
        if !self.is_mounted() {
            return;
        }

        if self.gesture.is_dragging() && !self.is_mobile() {
            self.gesture.abort();
            self.outputs.push_effect(Effect::SetTransition { enabled: true });
            self.outputs.push_effect(Effect::SetGrabbing { grabbing: false });
        }

        if self.should_park() {
            if !self.parked {
                self.park();
            }
            return;
        }
        if self.parked {
            self.unpark();
            return;
        }

        if self.is_transitioning() {
            debug!("resize during boundary snap; re-settle deferred");
            self.resettle_after_snap = true;
            return;
        }
        self.resettle();
    }

    fn do_pointer(&mut self, input: PointerInput) {
        if !self.accepts_navigation() {
            return;
        }
        match input.kind {
            PointerKind::Down => {
                if !self.config.gestures_enabled || !self.is_mobile() || self.track().is_empty() {
                    return;
                }
                self.gesture.press(input.point());
                self.outputs.push_effect(Effect::SetTransition { enabled: false });
                self.outputs.push_effect(Effect::SetGrabbing { grabbing: true });
            }
            PointerKind::Move => {
                if !self.is_mobile() {
                    return;
                }
                match self.gesture.motion(input.point()) {
                    MoveOutcome::Ignored | MoveOutcome::Undecided => {}
                    MoveOutcome::Track { dx, locked_now } => {
                        if locked_now {
                            self.axis_locked(Axis::Horizontal);
                        }
                        self.outputs.push_effect(Effect::PreventDefault);
                        let offset = layout::drag_offset(
                            self.current,
                            self.viewport.container_width,
                            self.config.gap_ratio,
                            dx,
                        );
                        self.outputs.push_effect(Effect::Translate { offset });
                    }
                    MoveOutcome::Ceded { locked_now } => {
                        if locked_now {
                            self.axis_locked(Axis::Vertical);
                        }
                    }
                }
            }
            PointerKind::Up | PointerKind::Cancel => match self.gesture.release() {
                ReleaseOutcome::Ignored => {}
                ReleaseOutcome::Released => {
                    self.outputs.push_effect(Effect::SetTransition { enabled: true });
                    self.outputs.push_effect(Effect::SetGrabbing { grabbing: false });
                }
                ReleaseOutcome::Horizontal { dx } => {
                    self.outputs.push_effect(Effect::SetTransition { enabled: true });
                    self.outputs.push_effect(Effect::SetGrabbing { grabbing: false });
                    self.finish_swipe(dx);
                }
            },
        }
    }

    fn axis_locked(&mut self, axis: Axis) {
        trace!("drag axis locked: {axis:?}");
        self.outputs.push_event(CarouselEvent::AxisLocked { axis });
    }

    fn finish_swipe(&mut self, dx: f32) {
        if dx.abs() > self.config.swipe_threshold_px {
            let (direction, target) = if dx < 0.0 {
                (SwipeDirection::Next, self.current as i64 + 1)
            } else {
                (SwipeDirection::Prev, self.current as i64 - 1)
            };
            self.outputs
                .push_event(CarouselEvent::SwipeCommitted { direction });
            self.navigate(target);
        } else {
            // The live drag left the track off-page; put it back.
            self.outputs.push_event(CarouselEvent::SwipeCancelled { dx });
            self.navigate(self.current as i64);
        }
    }

    fn do_timer_fired(&mut self, token: TimerToken) {
        if !self.is_mounted() {
            trace!("timer {token:?} fired after teardown; ignored");
            return;
        }
        match self.snap {
            SnapPhase::SnapPending { token: pending, clone } if pending == token => {
                self.complete_snap(clone);
            }
            SnapPhase::Reenabling { token: pending } if pending == token => {
                self.snap = SnapPhase::Idle;
                self.outputs.push_effect(Effect::SetTransition { enabled: true });
                self.outputs.push_event(CarouselEvent::SnapCompleted { slot: self.current });
                if std::mem::take(&mut self.resettle_after_snap) {
                    self.resettle();
                }
            }
            _ if self.settle_token == Some(token) => {
                self.settle_token = None;
                if self.parked {
                    return;
                }
                if self.is_transitioning() {
                    self.resettle_after_snap = true;
                } else {
                    self.resettle();
                }
            }
            _ => trace!("stale timer {token:?} ignored"),
        }
    }

    fn do_destroy(&mut self) {
        if self.destroyed {
            return;
        }
        for token in self.pending_tokens() {
            self.outputs.push_effect(Effect::CancelTimer { token });
        }
        self.snap = SnapPhase::Idle;
        self.settle_token = None;
        self.resettle_after_snap = false;
        self.gesture.abort();
        self.destroyed = true;
        self.mounted = false;
        self.outputs.push_event(CarouselEvent::Destroyed);
        debug!("carousel destroyed");
    }

    fn pending_tokens(&self) -> Vec<TimerToken> {
        let snap = match self.snap {
            SnapPhase::Idle => None,
            SnapPhase::SnapPending { token, .. } | SnapPhase::Reenabling { token } => Some(token),
        };
        snap.into_iter().chain(self.settle_token).collect()
    }

    /// The single path that moves the track.
    fn navigate(&mut self, requested: i64) {
        if self.is_transitioning() {
            debug!("navigation to {requested} dropped during boundary snap");
            self.outputs
                .push_event(CarouselEvent::NavigationDropped { requested });
            return;
        }

        let layout = self.layout();
        let track = PageTrack::new(self.config.mode, layout.page_count);
        let Some(slot) = track.resolve(requested) else {
            self.render_indicators(&track);
            return;
        };

        let from = self.current;
        self.place(slot, &track);
        self.position(layout, &track);

        if from != slot {
            self.outputs.push_event(CarouselEvent::PageChanged {
                from,
                to: slot,
                display_page: track.display_page(slot),
            });
        }
        if let Some(clone) = track.clone_at(slot) {
            self.start_snap(clone, &track);
        }
    }

    /// Size slides, splice clones if needed, translate, fit height and render
    /// indicators for the current slot.
    fn position(&mut self, layout: Layout, track: &PageTrack) {
        self.outputs.push_effect(Effect::SizeSlides {
            sizing: layout::slide_sizing(layout.items_per_page, self.config.slide_margin_percent),
        });
        if self.config.mode == LoopMode::Infinite
            && self.spliced_for != Some(layout.items_per_page)
        {
            self.spliced_for = Some(layout.items_per_page);
            self.outputs.push_effect(Effect::SpliceClones {
                plan: ClonePlan::for_slides(self.slide_count, layout.items_per_page),
            });
        }
        self.outputs.push_effect(Effect::Translate {
            offset: layout::track_offset(
                self.current,
                layout,
                self.viewport.container_width,
                self.config.gap_ratio,
            ),
        });
        if self.config.fit_height && self.is_mobile() {
            let slide = track.display_page(self.current) * layout.items_per_page;
            self.outputs.push_effect(Effect::FitHeight { slide });
        }
        self.render_indicators(track);
    }

    fn render_indicators(&mut self, track: &PageTrack) {
        let desired = IndicatorSet::build(track, self.current);
        self.push_indicator_patch(desired);
    }

    fn push_indicator_patch(&mut self, desired: IndicatorSet) {
        let patch = self.indicators.render(desired);
        if patch != IndicatorPatch::Unchanged {
            self.outputs.push_effect(Effect::Indicators { patch });
        }
    }

    fn start_snap(&mut self, clone: CloneSlot, track: &PageTrack) {
        let token = self.tokens.alloc();
        let target = track.clone_target(clone);
        self.snap = SnapPhase::SnapPending { token, clone };
        self.outputs.push_effect(Effect::ScheduleTimer {
            token,
            delay_ms: self.config.snap_delay_ms,
            kind: TimerKind::Snap,
        });
        self.outputs.push_event(CarouselEvent::SnapStarted {
            from_slot: self.current,
            to_slot: target,
        });
        debug!("boundary snap scheduled: {} -> {target}", self.current);
    }

    fn complete_snap(&mut self, clone: CloneSlot) {
        let layout = self.layout();
        // The page count may have changed while the snap was pending, so the
        // real slot is resolved against the current track.
        let track = PageTrack::new(self.config.mode, layout.page_count);
        let slot = if track.is_empty() { 0 } else { track.clone_target(clone) };
        let from = self.current;
        self.place(slot, &track);

        self.outputs.push_effect(Effect::SetTransition { enabled: false });
        self.position(layout, &track);
        if from != slot {
            self.outputs.push_event(CarouselEvent::PageChanged {
                from,
                to: slot,
                display_page: track.display_page(slot),
            });
        }

        let token = self.tokens.alloc();
        self.snap = SnapPhase::Reenabling { token };
        self.outputs.push_effect(Effect::ScheduleTimer {
            token,
            delay_ms: self.config.snap_reenable_ms,
            kind: TimerKind::Reenable,
        });
    }

    /// Re-apply layout for the current page, pulled into the real range.
    fn resettle(&mut self) {
        let placed = PageTrack::new(self.config.mode, self.placed_pages);
        let target = self.track().carry_over(&placed, self.current).unwrap_or(0);
        self.navigate(target as i64);
    }

    fn place(&mut self, slot: usize, track: &PageTrack) {
        self.current = slot;
        self.placed_pages = track.page_count;
    }

    fn park(&mut self) {
        self.parked = true;
        self.gesture.abort();
        if let SnapPhase::SnapPending { token, .. } | SnapPhase::Reenabling { token } = self.snap {
            self.outputs.push_effect(Effect::CancelTimer { token });
        }
        self.snap = SnapPhase::Idle;
        self.resettle_after_snap = false;
        self.spliced_for = None;
        let track = self.track();
        self.place(track.initial_slot(), &track);
        self.outputs.push_effect(Effect::ResetToGrid);
        self.push_indicator_patch(IndicatorSet::default());
        self.outputs.push_event(CarouselEvent::Parked);
        debug!("carousel parked as grid");
    }

    fn unpark(&mut self) {
        self.parked = false;
        let track = self.track();
        self.place(track.initial_slot(), &track);
        self.outputs.push_effect(Effect::SetTransition { enabled: true });
        self.navigate(track.initial_slot() as i64);
    }
}
