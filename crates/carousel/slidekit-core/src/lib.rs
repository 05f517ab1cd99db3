//! SlideKit Core (host-agnostic)
//!
//! Paging, drag-gesture and boundary-snap logic for content carousels. The
//! controller never touches a DOM, a clock or a timer: hosts feed it viewport
//! measurements, pointer samples and timer expirations, and apply the
//! [`Effect`]s it returns. See `slidekit-wasm` for the browser host.

pub mod carousel;
pub mod config;
pub mod error;
pub mod gesture;
pub mod ids;
pub mod indicators;
pub mod inputs;
pub mod layout;
pub mod outputs;
pub mod track;

// Re-exports for consumers (adapters)
pub use carousel::{Carousel, CarouselState, SnapPhase};
pub use config::{CarouselConfig, LoopMode};
pub use error::CarouselError;
pub use gesture::{Axis, GestureTracker, Point};
pub use ids::{TimerKind, TimerToken};
pub use indicators::{Indicator, IndicatorPatch, IndicatorRenderer, IndicatorSet};
pub use inputs::{CarouselCommand, PointerInput, PointerKind};
pub use layout::{compute_layout, Layout, SlideSizing, TrackOffset, Viewport};
pub use outputs::{CarouselEvent, Effect, Outputs, SwipeDirection};
pub use track::{ClonePlan, CloneSlot, PageTrack};
