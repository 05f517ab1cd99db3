//! Page indicators ("dots") and their render step.

use serde::{Deserialize, Serialize};

use crate::track::PageTrack;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    /// Zero-based real page.
    pub page: usize,
    /// Slot passed to `go_to_page` when activated.
    pub target_slot: usize,
    pub active: bool,
    pub label: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub indicators: Vec<Indicator>,
}

impl IndicatorSet {
    /// One indicator per real page, with the page shown at `slot` active.
    pub fn build(track: &PageTrack, slot: usize) -> Self {
        if track.is_empty() {
            return Self::default();
        }
        let current = track.display_page(slot);
        let indicators = (0..track.page_count)
            .map(|page| Indicator {
                page,
                target_slot: track.slot_for_page(page),
                active: page == current,
                label: format!("Go to slide {}", page + 1),
            })
            .collect();
        Self { indicators }
    }

    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }

    pub fn active_page(&self) -> Option<usize> {
        self.indicators.iter().position(|i| i.active)
    }

    fn same_targets(&self, other: &IndicatorSet) -> bool {
        self.len() == other.len()
            && self
                .indicators
                .iter()
                .zip(&other.indicators)
                .all(|(a, b)| a.target_slot == b.target_slot)
    }
}

/// Minimal change that brings the host's indicators up to date.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum IndicatorPatch {
    Unchanged,
    SetActive {
        previous: Option<usize>,
        current: usize,
    },
    Rebuild(IndicatorSet),
}

/// Remembers the last rendered set so repeated renders are idempotent.
#[derive(Clone, Debug, Default)]
pub struct IndicatorRenderer {
    rendered: Option<IndicatorSet>,
}

impl IndicatorRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rendered(&self) -> Option<&IndicatorSet> {
        self.rendered.as_ref()
    }

    pub fn render(&mut self, desired: IndicatorSet) -> IndicatorPatch {
        let patch = match &self.rendered {
            Some(prev) if *prev == desired => IndicatorPatch::Unchanged,
            Some(prev) if prev.same_targets(&desired) => match desired.active_page() {
                Some(current) => IndicatorPatch::SetActive {
                    previous: prev.active_page(),
                    current,
                },
                None => IndicatorPatch::Rebuild(desired.clone()),
            },
            _ => IndicatorPatch::Rebuild(desired.clone()),
        };
        self.rendered = Some(desired);
        patch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoopMode;

    #[test]
    fn infinite_indicators_offset_by_leading_clone() {
        let track = PageTrack::new(LoopMode::Infinite, 3);
        let set = IndicatorSet::build(&track, 4);
        assert_eq!(set.len(), 3);
        assert_eq!(set.active_page(), Some(0));
        assert_eq!(set.indicators[2].target_slot, 3);
        assert_eq!(set.indicators[2].label, "Go to slide 3");
    }

    #[test]
    fn render_diffs_against_previous() {
        let track = PageTrack::new(LoopMode::Bounded, 3);
        let mut r = IndicatorRenderer::new();
        assert!(matches!(
            r.render(IndicatorSet::build(&track, 0)),
            IndicatorPatch::Rebuild(_)
        ));
        assert_eq!(
            r.render(IndicatorSet::build(&track, 0)),
            IndicatorPatch::Unchanged
        );
        assert_eq!(
            r.render(IndicatorSet::build(&track, 2)),
            IndicatorPatch::SetActive {
                previous: Some(0),
                current: 2
            }
        );
        let shrunk = PageTrack::new(LoopMode::Bounded, 2);
        assert!(matches!(
            r.render(IndicatorSet::build(&shrunk, 1)),
            IndicatorPatch::Rebuild(_)
        ));
    }

    #[test]
    fn empty_track_renders_empty_set() {
        let track = PageTrack::new(LoopMode::Bounded, 0);
        let mut r = IndicatorRenderer::new();
        assert_eq!(
            r.render(IndicatorSet::build(&track, 0)),
            IndicatorPatch::Rebuild(IndicatorSet::default())
        );
        assert_eq!(r.render(IndicatorSet::default()), IndicatorPatch::Unchanged);
    }
}
