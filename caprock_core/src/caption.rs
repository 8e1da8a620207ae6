// Copyright 2026 the Caprock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timed caption spans and the active caption track.
//!
//! A [`CaptionTrack`] holds the list the engine is currently displaying. The
//! list is replaced wholesale when new captions arrive and is never mutated
//! in place, so a lookup always sees a consistent snapshot.

use alloc::string::String;
use alloc::vec::Vec;

use serde::Deserialize;

/// A timed text span.
///
/// `start` and `end` are in seconds relative to video playback time. The
/// `start <= end` invariant is assumed from upstream, not validated here.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Caption {
    /// Playback time at which the caption becomes visible, inclusive.
    pub start: f64,
    /// Playback time at which the caption stops being visible, inclusive.
    pub end: f64,
    /// The text to display.
    pub text: String,
}

/// The ordered list of captions currently driving the overlay.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CaptionTrack {
    captions: Vec<Caption>,
}

impl CaptionTrack {
    /// Creates an empty track.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            captions: Vec::new(),
        }
    }

    /// Replaces the entire caption list.
    ///
    /// The previous list is discarded; there is no merging.
    pub fn replace(&mut self, captions: Vec<Caption>) {
        self.captions = captions;
    }

    /// Removes all captions.
    pub fn clear(&mut self) {
        self.captions.clear();
    }

    /// Returns the caption active at `time`, if any.
    ///
    /// Scans in list order for the first caption whose half-open
    /// `[start, end)` interval contains `time`; a shared boundary between
    /// back-to-back captions therefore belongs to the later one. When no
    /// half-open interval matches, a second scan treats `end` as inclusive,
    /// so the final caption (and any caption with no successor at its end)
    /// still displays through its last instant. When intervals overlap
    /// (malformed input), the first in list order wins — that is an
    /// assumption about upstream data, not a guaranteed contract. An empty
    /// track always returns `None`.
    #[must_use]
    pub fn active_at(&self, time: f64) -> Option<&Caption> {
        self.captions
            .iter()
            .find(|caption| caption.start <= time && time < caption.end)
            .or_else(|| {
                self.captions
                    .iter()
                    .find(|caption| caption.start <= time && time <= caption.end)
            })
    }

    /// Returns the number of captions in the track.
    #[must_use]
    pub fn len(&self) -> usize {
        self.captions.len()
    }

    /// Returns whether the track is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.captions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString as _;
    use alloc::vec;

    use super::*;

    fn caption(start: f64, end: f64, text: &str) -> Caption {
        Caption {
            start,
            end,
            text: text.to_string(),
        }
    }

    #[test]
    fn empty_track_has_no_active_caption() {
        let track = CaptionTrack::new();
        assert_eq!(track.active_at(0.0), None);
        assert!(track.is_empty());
    }

    #[test]
    fn lookup_is_inclusive_at_both_ends() {
        let mut track = CaptionTrack::new();
        track.replace(vec![caption(1.0, 2.0, "mid")]);

        assert!(track.active_at(0.999).is_none());
        assert_eq!(track.active_at(1.0).map(|c| c.text.as_str()), Some("mid"));
        assert_eq!(track.active_at(1.5).map(|c| c.text.as_str()), Some("mid"));
        assert_eq!(track.active_at(2.0).map(|c| c.text.as_str()), Some("mid"));
        assert!(track.active_at(2.001).is_none());
    }

    #[test]
    fn shared_boundary_belongs_to_the_later_caption() {
        let mut track = CaptionTrack::new();
        track.replace(vec![caption(0.0, 2.0, "Hi"), caption(2.0, 4.0, "Bye")]);

        assert_eq!(track.active_at(1.5).map(|c| c.text.as_str()), Some("Hi"));
        // 2.0 is the shared boundary; the later caption's start wins the tie.
        assert_eq!(track.active_at(2.0).map(|c| c.text.as_str()), Some("Bye"));
        assert_eq!(track.active_at(2.5).map(|c| c.text.as_str()), Some("Bye"));
        // The final caption has no successor, so its end stays inclusive.
        assert_eq!(track.active_at(4.0).map(|c| c.text.as_str()), Some("Bye"));
        assert!(track.active_at(4.001).is_none());
    }

    #[test]
    fn overlapping_intervals_resolve_deterministically() {
        let mut track = CaptionTrack::new();
        track.replace(vec![
            caption(0.0, 10.0, "first"),
            caption(1.0, 3.0, "second"),
        ]);

        assert_eq!(track.active_at(2.0).map(|c| c.text.as_str()), Some("first"));
    }

    #[test]
    fn replace_discards_previous_list() {
        let mut track = CaptionTrack::new();
        track.replace(vec![caption(0.0, 1.0, "old")]);
        track.replace(vec![caption(5.0, 6.0, "new")]);

        assert_eq!(track.len(), 1);
        assert!(track.active_at(0.5).is_none());
        assert_eq!(track.active_at(5.5).map(|c| c.text.as_str()), Some("new"));
    }
}
