use slidekit_core::{
    Axis, Carousel, CarouselConfig, CarouselEvent, Effect, PointerInput, SwipeDirection,
    TrackOffset, Viewport,
};

fn mobile() -> Viewport {
    Viewport::new(390.0, 300.0)
}

fn carousel(slides: usize) -> Carousel {
    let cfg = CarouselConfig {
        gap_ratio: 0.0,
        settle_delay_ms: None,
        ..CarouselConfig::default()
    };
    let mut c = Carousel::new(cfg, slides, mobile()).unwrap();
    c.mount();
    c
}

fn drag(c: &mut Carousel, path: &[(f32, f32)]) {
    let (x0, y0) = path[0];
    c.pointer(PointerInput::down(x0, y0));
    for &(x, y) in &path[1..] {
        c.pointer(PointerInput::moved(x, y));
    }
    c.pointer(PointerInput::up());
}

#[test]
fn left_swipe_past_threshold_advances() {
    let mut c = carousel(4);
    drag(&mut c, &[(200.0, 100.0), (185.0, 101.0), (120.0, 102.0)]);
    assert_eq!(c.current_slot(), 1);
}

#[test]
fn right_swipe_goes_back() {
    let mut c = carousel(4);
    c.go_to_page(2);
    drag(&mut c, &[(100.0, 100.0), (130.0, 100.0), (190.0, 100.0)]);
    assert_eq!(c.current_slot(), 1);
}

#[test]
fn short_drags_never_change_page() {
    for dx in [-50.0f32, -30.0, -11.0, 11.0, 30.0, 50.0] {
        let mut c = carousel(4);
        c.go_to_page(1);
        drag(&mut c, &[(200.0, 100.0), (200.0 + dx, 100.0)]);
        assert_eq!(c.current_slot(), 1, "dx={dx}");
    }
}

#[test]
fn swipe_past_the_edge_stays_on_edge() {
    let mut c = carousel(2);
    drag(&mut c, &[(100.0, 100.0), (120.0, 100.0), (200.0, 100.0)]);
    assert_eq!(c.current_slot(), 0);
}

#[test]
fn horizontal_moves_track_the_pointer_and_suppress_scroll() {
    let mut c = carousel(4);
    c.go_to_page(1);
    c.pointer(PointerInput::down(200.0, 100.0));
    let out = c.pointer(PointerInput::moved(180.0, 102.0)).clone();
    assert!(out.prevents_default());
    assert_eq!(out.last_offset(), Some(TrackOffset::Pixels(-320.0)));
    assert!(out.events.contains(&CarouselEvent::AxisLocked {
        axis: Axis::Horizontal
    }));

    let out = c.pointer(PointerInput::moved(150.0, 103.0)).clone();
    assert_eq!(out.last_offset(), Some(TrackOffset::Pixels(-350.0)));
    assert!(out.events.is_empty());
}

#[test]
fn vertical_drags_are_left_to_the_page() {
    let mut c = carousel(4);
    c.pointer(PointerInput::down(200.0, 100.0));
    let out = c.pointer(PointerInput::moved(203.0, 140.0)).clone();
    assert!(!out.prevents_default());
    assert!(out.last_offset().is_none());
    assert_eq!(c.gesture_axis(), Some(Axis::Vertical));

    // Large horizontal travel later in the session does not steal it.
    let out = c.pointer(PointerInput::moved(20.0, 150.0)).clone();
    assert!(!out.prevents_default());
    assert_eq!(c.gesture_axis(), Some(Axis::Vertical));
    c.pointer(PointerInput::up());
    assert_eq!(c.current_slot(), 0);
}

#[test]
fn horizontal_lock_survives_later_vertical_travel() {
    let mut c = carousel(4);
    c.pointer(PointerInput::down(200.0, 100.0));
    c.pointer(PointerInput::moved(170.0, 105.0));
    let out = c.pointer(PointerInput::moved(130.0, 400.0)).clone();
    assert!(out.prevents_default());
    assert_eq!(c.gesture_axis(), Some(Axis::Horizontal));
    let out = c.pointer(PointerInput::up()).clone();
    assert!(out.events.contains(&CarouselEvent::SwipeCommitted {
        direction: SwipeDirection::Next
    }));
    assert_eq!(c.current_slot(), 1);
}

#[test]
fn press_disables_transition_and_release_restores_it() {
    let mut c = carousel(3);
    let out = c.pointer(PointerInput::down(10.0, 10.0)).clone();
    assert_eq!(
        out.effects,
        vec![
            Effect::SetTransition { enabled: false },
            Effect::SetGrabbing { grabbing: true }
        ]
    );
    let out = c.pointer(PointerInput::cancel()).clone();
    assert_eq!(
        out.effects,
        vec![
            Effect::SetTransition { enabled: true },
            Effect::SetGrabbing { grabbing: false }
        ]
    );
    assert!(c.pointer(PointerInput::up()).is_empty());
}

#[test]
fn desktop_viewport_ignores_gestures() {
    let mut c = carousel(4);
    c.resize(Viewport::new(1280.0, 1200.0));
    assert!(c.pointer(PointerInput::down(10.0, 10.0)).is_empty());
}

#[test]
fn disabled_gestures_ignore_presses() {
    let cfg = CarouselConfig {
        gestures_enabled: false,
        ..CarouselConfig::default()
    };
    let mut c = Carousel::new(cfg, 4, mobile()).unwrap();
    c.mount();
    assert!(c.pointer(PointerInput::down(10.0, 10.0)).is_empty());
}

#[test]
fn resize_to_desktop_ends_an_active_drag() {
    let mut c = carousel(4);
    c.pointer(PointerInput::down(200.0, 100.0));
    c.pointer(PointerInput::moved(150.0, 100.0));
    let out = c.resize(Viewport::new(1280.0, 1200.0)).clone();
    assert!(out.effects.contains(&Effect::SetTransition { enabled: true }));
    assert!(!c.state().dragging);
    assert!(c.pointer(PointerInput::up()).is_empty());
    assert_eq!(c.current_slot(), 0);
}
