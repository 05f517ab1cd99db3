//! Mount options accepted from JS.

use serde::{Deserialize, Serialize};
use slidekit_core::CarouselConfig;

/// Class names and selectors used to locate carousel parts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    /// Carousel roots; also the element that receives gestures and whose
    /// width is the page width.
    pub root: String,
    pub track: String,
    pub slide: String,
    pub controls: String,
    pub arrow_left: String,
    pub arrow_right: String,
    /// Indicator mount point, looked up inside `controls` when present.
    pub dots: String,
    pub indicator_class: String,
    pub active_class: String,
    pub clone_class: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            root: ".carousel".into(),
            track: ".carousel-track".into(),
            slide: ".carousel-slide".into(),
            controls: ".carousel-controls".into(),
            arrow_left: ".carousel-arrow-left".into(),
            arrow_right: ".carousel-arrow-right".into(),
            dots: ".carousel-dots".into(),
            indicator_class: "carousel-dot".into(),
            active_class: "active".into(),
            clone_class: "clone".into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MountOptions {
    pub selectors: Selectors,
    pub config: CarouselConfig,
    /// Roots inside an element matching this selector get no gestures.
    pub gesture_exclusion: Option<String>,
    /// Re-dispatch core events on the root as `slidekit:<event>` DOM events.
    pub emit_dom_events: bool,
}
