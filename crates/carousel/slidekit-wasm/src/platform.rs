//! Browser probing: measurements and platform quirks.

use slidekit_core::Viewport;
use web_sys::{HtmlElement, Window};

/// iOS Safari needs `gesture*` events suppressed and a passive `touchstart`.
pub fn is_ios(window: &Window) -> bool {
    let Ok(ua) = window.navigator().user_agent() else {
        return false;
    };
    ["iPad", "iPhone", "iPod"].iter().any(|d| ua.contains(d))
}

pub fn viewport_width(window: &Window) -> f32 {
    window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0) as f32
}

pub fn measure(window: &Window, container: &HtmlElement) -> Viewport {
    Viewport::new(viewport_width(window), container.offset_width().max(0) as f32)
}
