//! Mouse and touch events folded into core pointer inputs.

use slidekit_core::{PointerInput, PointerKind};
use wasm_bindgen::JsCast;
use web_sys::{Event, MouseEvent, TouchEvent};

/// DOM event types the gesture listeners subscribe to.
pub const POINTER_EVENTS: [&str; 8] = [
    "touchstart",
    "touchmove",
    "touchend",
    "touchcancel",
    "mousedown",
    "mousemove",
    "mouseup",
    "mouseleave",
];

fn kind_for(event_type: &str) -> Option<PointerKind> {
    Some(match event_type {
        "touchstart" | "mousedown" => PointerKind::Down,
        "touchmove" | "mousemove" => PointerKind::Move,
        "touchend" | "mouseup" => PointerKind::Up,
        "touchcancel" | "mouseleave" => PointerKind::Cancel,
        _ => return None,
    })
}

/// Normalize a DOM mouse/touch event. Returns `None` for events that carry no
/// usable pointer (secondary mouse buttons, empty touch lists on down/move).
pub fn pointer_from_event(event: &Event) -> Option<PointerInput> {
    let kind = kind_for(&event.type_())?;

    if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
        if kind == PointerKind::Down && mouse.button() != 0 {
            return None;
        }
        return Some(PointerInput {
            kind,
            x: mouse.client_x() as f32,
            y: mouse.client_y() as f32,
        });
    }

    if let Some(touch_event) = event.dyn_ref::<TouchEvent>() {
        return match kind {
            PointerKind::Up | PointerKind::Cancel => Some(PointerInput {
                kind,
                x: 0.0,
                y: 0.0,
            }),
            PointerKind::Down | PointerKind::Move => {
                let touch = touch_event.touches().item(0)?;
                Some(PointerInput {
                    kind,
                    x: touch.client_x() as f32,
                    y: touch.client_y() as f32,
                })
            }
        };
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_types_map_to_kinds() {
        assert_eq!(kind_for("touchstart"), Some(PointerKind::Down));
        assert_eq!(kind_for("mousemove"), Some(PointerKind::Move));
        assert_eq!(kind_for("touchend"), Some(PointerKind::Up));
        assert_eq!(kind_for("mouseleave"), Some(PointerKind::Cancel));
        assert_eq!(kind_for("click"), None);
        assert!(POINTER_EVENTS.iter().all(|t| kind_for(t).is_some()));
    }
}
