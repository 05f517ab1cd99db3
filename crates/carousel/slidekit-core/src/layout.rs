//! Paging math: items per page, page counts, slide sizing and track offsets.
//!
//! Everything here is a pure function of its arguments. Callers recompute on
//! every navigation because the viewport can change between calls.

use serde::{Deserialize, Serialize};

use crate::error::CarouselError;

/// Host measurements, in CSS pixels.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Window inner width, used for the breakpoint.
    pub width: f32,
    /// Width of the element that clips the track.
    pub container_width: f32,
}

impl Viewport {
    pub fn new(width: f32, container_width: f32) -> Self {
        Self {
            width,
            container_width,
        }
    }

    pub fn validate(&self) -> Result<(), CarouselError> {
        let ok = |v: f32| v.is_finite() && v >= 0.0;
        if ok(self.width) && ok(self.container_width) {
            Ok(())
        } else {
            Err(CarouselError::InvalidViewport {
                width: self.width,
                container_width: self.container_width,
            })
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub items_per_page: usize,
    pub page_count: usize,
}

#[inline]
pub fn is_mobile(viewport_width: f32, mobile_max_width: f32) -> bool {
    viewport_width <= mobile_max_width
}

pub fn items_per_page(viewport_width: f32, mobile_max_width: f32) -> usize {
    if is_mobile(viewport_width, mobile_max_width) {
        1
    } else {
        2
    }
}

pub fn compute_layout(slide_count: usize, viewport_width: f32, mobile_max_width: f32) -> Layout {
    let items_per_page = items_per_page(viewport_width, mobile_max_width);
    Layout {
        items_per_page,
        page_count: slide_count.div_ceil(items_per_page),
    }
}

/// Flex sizing applied to every slide element.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlideSizing {
    pub flex_basis_percent: f32,
    pub max_width_percent: f32,
}

impl SlideSizing {
    pub fn flex_css(&self) -> String {
        format!("0 0 {}%", self.flex_basis_percent)
    }

    pub fn max_width_css(&self) -> String {
        format!("{}%", self.max_width_percent)
    }
}

pub fn slide_sizing(items_per_page: usize, margin_percent: f32) -> SlideSizing {
    let basis = 100.0 / items_per_page.max(1) as f32;
    SlideSizing {
        flex_basis_percent: basis,
        max_width_percent: basis - margin_percent,
    }
}

/// Horizontal position of the track.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "snake_case")]
pub enum TrackOffset {
    Pixels(f32),
    Percent(f32),
}

impl TrackOffset {
    pub fn to_css(&self) -> String {
        match *self {
            TrackOffset::Pixels(px) => format!("translateX({}px)", normalize_zero(px)),
            TrackOffset::Percent(pct) => format!("translateX({}%)", normalize_zero(pct)),
        }
    }
}

fn normalize_zero(v: f32) -> f32 {
    if v == 0.0 {
        0.0
    } else {
        v
    }
}

/// Width of one page stride in pixels when a single item is shown.
#[inline]
pub fn page_stride_px(container_width: f32, gap_ratio: f32) -> f32 {
    container_width + container_width * gap_ratio
}

/// Settled offset for `index` in the (possibly clone-augmented) slot array.
///
/// Single-item pages are positioned in pixels with a fixed gutter; two-item
/// pages rely on each slide being exactly half the track and move in whole
/// track widths.
pub fn track_offset(index: usize, layout: Layout, container_width: f32, gap_ratio: f32) -> TrackOffset {
    if layout.items_per_page == 1 {
        TrackOffset::Pixels(-(index as f32) * page_stride_px(container_width, gap_ratio))
    } else {
        TrackOffset::Percent(-(100.0 * index as f32))
    }
}

/// Offset while a horizontal drag is tracking the pointer.
pub fn drag_offset(index: usize, container_width: f32, gap_ratio: f32, dx: f32) -> TrackOffset {
    TrackOffset::Pixels(-(index as f32) * page_stride_px(container_width, gap_ratio) + dx)
}
