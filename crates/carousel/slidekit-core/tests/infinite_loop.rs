use slidekit_core::{
    Carousel, CarouselConfig, CarouselEvent, ClonePlan, Effect, PointerInput, SnapPhase,
    TimerKind, TimerToken, TrackOffset, Viewport,
};

fn desktop() -> Viewport {
    Viewport::new(1440.0, 1200.0)
}

fn mobile() -> Viewport {
    Viewport::new(390.0, 360.0)
}

fn infinite(slides: usize, viewport: Viewport) -> Carousel {
    let cfg = CarouselConfig {
        settle_delay_ms: None,
        ..CarouselConfig::infinite()
    };
    let mut c = Carousel::new(cfg, slides, viewport).unwrap();
    c.mount();
    c
}

fn snap_token(c: &Carousel) -> TimerToken {
    match c.snap_phase() {
        SnapPhase::SnapPending { token, .. } | SnapPhase::Reenabling { token } => token,
        SnapPhase::Idle => panic!("no snap pending"),
    }
}

#[test]
fn four_slides_on_desktop_start_on_first_real_page() {
    let c = infinite(4, desktop());
    let state = c.state();
    assert_eq!(state.page_count, 2);
    assert_eq!(state.slot_count, 4);
    assert_eq!(state.current_slot, 1);
    assert_eq!(state.display_page, 0);
}

#[test]
fn mount_splices_page_sized_clones() {
    let cfg = CarouselConfig {
        settle_delay_ms: None,
        ..CarouselConfig::infinite()
    };
    let mut c = Carousel::new(cfg, 5, desktop()).unwrap();
    let out = c.mount().clone();
    assert!(out.effects.contains(&Effect::SpliceClones {
        plan: ClonePlan {
            leading: 3..5,
            trailing: 0..2
        }
    }));
    assert_eq!(out.last_offset(), Some(TrackOffset::Percent(-100.0)));
}

#[test]
fn forward_swipe_from_last_page_wraps_to_first() {
    let mut c = infinite(3, mobile());
    c.go_to_page(3);
    assert_eq!(c.display_page(), 2);

    c.pointer(PointerInput::down(300.0, 200.0));
    c.pointer(PointerInput::moved(260.0, 201.0));
    c.pointer(PointerInput::moved(200.0, 203.0));
    let out = c.pointer(PointerInput::up()).clone();

    // Parked on the trailing clone, which displays the first page.
    assert_eq!(c.current_slot(), 4);
    assert!(c.is_transitioning());
    assert_eq!(c.rendered_indicators().unwrap().active_page(), Some(0));
    let timers: Vec<_> = out.scheduled_timers().collect();
    assert_eq!(timers.len(), 1);
    assert_eq!(timers[0].1, 350);
    assert_eq!(timers[0].2, TimerKind::Snap);

    let out = c.timer_fired(timers[0].0).clone();
    assert_eq!(c.current_slot(), 1);
    assert_eq!(c.rendered_indicators().unwrap().active_page(), Some(0));
    assert_eq!(out.effects[0], Effect::SetTransition { enabled: false });
    assert_eq!(out.last_offset(), Some(TrackOffset::Pixels(-378.0)));
    let reenable: Vec<_> = out.scheduled_timers().collect();
    assert_eq!(reenable.len(), 1);
    assert_eq!(reenable[0].1, 10);
    assert!(c.is_transitioning());

    let out = c.timer_fired(reenable[0].0).clone();
    assert!(!c.is_transitioning());
    assert!(out.effects.contains(&Effect::SetTransition { enabled: true }));
    assert!(out.events.contains(&CarouselEvent::SnapCompleted { slot: 1 }));
}

#[test]
fn backward_from_first_page_wraps_to_last() {
    let mut c = infinite(4, desktop());
    c.prev();
    assert_eq!(c.current_slot(), 0);
    assert_eq!(c.display_page(), 1);
    let token = snap_token(&c);
    c.timer_fired(token);
    assert_eq!(c.current_slot(), 2);
    assert_eq!(c.display_page(), 1);
}

#[test]
fn navigation_is_dropped_while_snapping() {
    let mut c = infinite(4, desktop());
    c.next();
    c.next();
    assert_eq!(c.current_slot(), 3);
    let out = c.go_to_page(1).clone();
    assert_eq!(c.current_slot(), 3);
    assert!(out
        .events
        .contains(&CarouselEvent::NavigationDropped { requested: 1 }));
    assert!(out.last_offset().is_none());
}

#[test]
fn indicators_target_real_slots() {
    let mut c = infinite(6, desktop());
    c.activate_indicator(2);
    assert_eq!(c.current_slot(), 3);
    assert!(!c.is_transitioning());
}

#[test]
fn resize_during_snap_is_deferred_until_snap_finishes() {
    let mut c = infinite(4, mobile());
    c.go_to_page(0);
    let snap = snap_token(&c);

    let out = c.resize(Viewport::new(400.0, 380.0)).clone();
    assert!(out.last_offset().is_none());
    assert_eq!(c.current_slot(), 0);

    c.timer_fired(snap);
    assert_eq!(c.current_slot(), 4);
    let reenable = snap_token(&c);
    let out = c.timer_fired(reenable).clone();
    assert!(!c.is_transitioning());
    assert_eq!(out.last_offset(), Some(TrackOffset::Pixels(-4.0 * 399.0)));
}

#[test]
fn stale_snap_token_is_ignored() {
    let mut c = infinite(4, desktop());
    c.go_to_page(3);
    let token = snap_token(&c);
    c.timer_fired(token);
    assert!(c.timer_fired(token).is_empty());
    assert!(c.timer_fired(TimerToken(999)).is_empty());
}

#[test]
fn destroy_mid_snap_leaves_index_untouched() {
    let mut c = infinite(4, desktop());
    c.go_to_page(3);
    let token = snap_token(&c);
    c.destroy();
    assert!(c.timer_fired(token).is_empty());
    assert_eq!(c.current_slot(), 3);
    assert!(!c.is_transitioning());
}

#[test]
fn desktop_grid_parks_and_resumes() {
    let cfg = CarouselConfig {
        desktop_grid: true,
        settle_delay_ms: None,
        ..CarouselConfig::infinite()
    };
    let mut c = Carousel::new(cfg, 4, desktop()).unwrap();
    let out = c.mount().clone();
    assert!(c.is_parked());
    assert!(out.effects.contains(&Effect::ResetToGrid));
    assert!(c.go_to_page(2).is_empty());

    let out = c.resize(mobile()).clone();
    assert!(!c.is_parked());
    assert_eq!(c.current_slot(), 1);
    assert!(out
        .effects
        .iter()
        .any(|e| matches!(e, Effect::SpliceClones { .. })));

    c.resize(desktop());
    assert!(c.is_parked());
    assert_eq!(c.rendered_indicators().unwrap().len(), 0);
}

#[test]
fn resize_to_fewer_pages_keeps_last_page() {
    let mut c = infinite(5, mobile());
    c.go_to_page(4);
    assert_eq!(c.display_page(), 3);

    // slot 4 falls past the two-page track; it must not read as a clone
    c.resize(desktop());
    let state = c.state();
    assert_eq!(state.page_count, 2);
    assert_eq!(state.current_slot, 2);
    assert_eq!(state.display_page, 1);
    assert!(!state.is_transitioning);
}

#[test]
fn backward_wrap_survives_page_count_change_mid_snap() {
    let mut c = infinite(4, mobile());
    c.prev();
    assert_eq!(c.current_slot(), 0);

    c.resize(desktop());
    let token = snap_token(&c);
    c.timer_fired(token);
    assert_eq!(c.current_slot(), 2);
    assert_eq!(c.display_page(), 1);

    let reenable = snap_token(&c);
    c.timer_fired(reenable);
    let state = c.state();
    assert_eq!(state.page_count, 2);
    assert_eq!(state.current_slot, 2);
    assert_eq!(state.display_page, 1);
    assert_eq!(state.snap, SnapPhase::Idle);
}
