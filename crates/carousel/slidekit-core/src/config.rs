//! Per-mount configuration for a carousel.

use serde::{Deserialize, Serialize};

use crate::error::CarouselError;

/// How navigation behaves at the ends of the page sequence.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopMode {
    /// Requests past either end settle on the nearest real page.
    #[default]
    Bounded,
    /// Boundary clones are spliced around the real pages and the carousel
    /// wraps through them.
    Infinite,
}

/// Tunables for one carousel mount.
///
/// Every field has a default so hosts can pass partial JSON objects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub mode: LoopMode,

    /// Viewports at or below this width are "mobile": one item per page and
    /// gestures enabled.
    pub mobile_max_width: f32,

    /// Movement (px, either axis) before the drag axis is decided.
    pub drag_dead_zone_px: f32,
    /// Horizontal travel (px) a released drag must exceed to change page.
    pub swipe_threshold_px: f32,

    /// Inter-page gutter as a fraction of the container width, used for the
    /// pixel offset when one item is shown per page.
    pub gap_ratio: f32,
    /// Percentage points subtracted from each slide's max width.
    pub slide_margin_percent: f32,

    /// Delay before a clone slot is swapped for its real page.
    pub snap_delay_ms: u32,
    /// Delay before transitions are re-enabled after the swap.
    pub snap_reenable_ms: u32,
    /// One-shot re-settle after mount, for content that sizes late.
    /// `None` disables it.
    pub settle_delay_ms: Option<u32>,

    /// CSS transition applied to the track while not dragging.
    pub transition: String,

    pub gestures_enabled: bool,
    /// Size the track to the current slide height on mobile viewports.
    pub fit_height: bool,
    /// Park the carousel as a plain grid on desktop viewports.
    pub desktop_grid: bool,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            mode: LoopMode::Bounded,
            mobile_max_width: 1024.0,
            drag_dead_zone_px: 10.0,
            swipe_threshold_px: 50.0,
            gap_ratio: 0.05,
            slide_margin_percent: 5.0,
            snap_delay_ms: 350,
            snap_reenable_ms: 10,
            settle_delay_ms: Some(100),
            transition: "transform 0.3s ease-out".to_string(),
            gestures_enabled: true,
            fit_height: false,
            desktop_grid: false,
        }
    }
}

impl CarouselConfig {
    pub fn infinite() -> Self {
        Self {
            mode: LoopMode::Infinite,
            ..Self::default()
        }
    }

    /// Reject values that would make layout or gesture math meaningless.
    pub fn validate(&self) -> Result<(), CarouselError> {
        if !self.mobile_max_width.is_finite() || self.mobile_max_width <= 0.0 {
            return Err(CarouselError::InvalidConfig {
                field: "mobile_max_width",
                reason: format!("must be a positive width, got {}", self.mobile_max_width),
            });
        }
        for (field, value) in [
            ("drag_dead_zone_px", self.drag_dead_zone_px),
            ("swipe_threshold_px", self.swipe_threshold_px),
            ("slide_margin_percent", self.slide_margin_percent),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CarouselError::InvalidConfig {
                    field,
                    reason: format!("must be finite and non-negative, got {value}"),
                });
            }
        }
        if !(0.0..1.0).contains(&self.gap_ratio) {
            return Err(CarouselError::InvalidConfig {
                field: "gap_ratio",
                reason: format!("must lie in [0, 1), got {}", self.gap_ratio),
            });
        }
        if self.slide_margin_percent >= 50.0 {
            return Err(CarouselError::InvalidConfig {
                field: "slide_margin_percent",
                reason: format!(
                    "must leave room for two slides per page, got {}",
                    self.slide_margin_percent
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: CarouselConfig =
            serde_json::from_str(r#"{ "mode": "infinite", "slide_margin_percent": 10 }"#).unwrap();
        assert_eq!(cfg.mode, LoopMode::Infinite);
        assert_eq!(cfg.slide_margin_percent, 10.0);
        assert_eq!(cfg.mobile_max_width, 1024.0);
        assert_eq!(cfg.snap_delay_ms, 350);
        assert_eq!(cfg.settle_delay_ms, Some(100));
    }

    #[test]
    fn rejects_out_of_range_gap() {
        let cfg = CarouselConfig {
            gap_ratio: 1.5,
            ..CarouselConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(matches!(
            err,
            CarouselError::InvalidConfig {
                field: "gap_ratio",
                ..
            }
        ));
    }

    #[test]
    fn rejects_negative_threshold() {
        let cfg = CarouselConfig {
            swipe_threshold_px: -1.0,
            ..CarouselConfig::default()
        };
        assert!(cfg.validate().is_err());
        assert!(CarouselConfig::default().validate().is_ok());
    }
}
