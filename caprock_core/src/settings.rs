// Copyright 2026 the Caprock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Presentation settings for the overlay.
//!
//! The engine holds exactly one [`OverlaySettings`] snapshot at a time. It is
//! loaded once at initialization from the persistent store (or defaulted when
//! the store has no record) and atomically replaced by an update command; no
//! partial merge is ever visible to the renderers.

use alloc::string::String;

use serde::{Deserialize, Serialize};

/// A flat record of the overlay's presentation knobs.
///
/// Field names serialize in camelCase to match the stored JSON document and
/// the inbound settings message. Missing fields fall back to the
/// [`Default`] values, so partially-populated stored documents still load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlaySettings {
    /// Signed adjustment in seconds added to playback time before caption
    /// lookup.
    pub sync_offset: f64,
    /// Caption font size in pixels.
    pub font_size: f64,
    /// Caption text color (any CSS color value).
    pub font_color: String,
    /// Whether the caption background is drawn at all.
    pub background: bool,
    /// Background color used when [`background`](Self::background) is on.
    pub background_color: String,
    /// Caption font family.
    pub font_family: String,
    /// Vertical offset in pixels from the video's bottom edge up to the
    /// caption anchor.
    pub bottom_offset: f64,
    /// Whether the caption text carries a drop shadow.
    pub text_shadow: bool,
    /// Shadow color used when [`text_shadow`](Self::text_shadow) is on.
    pub text_shadow_color: String,
    /// Vertical padding around the caption text, in pixels.
    pub vertical_padding: f64,
    /// Horizontal padding around the caption text, in pixels.
    pub horizontal_padding: f64,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            sync_offset: 0.0,
            font_size: 22.0,
            font_color: String::from("#ffffff"),
            background: true,
            background_color: String::from("rgba(0, 0, 0, 0.7)"),
            font_family: String::from("Arial, sans-serif"),
            bottom_offset: 60.0,
            text_shadow: true,
            text_shadow_color: String::from("#000000"),
            vertical_padding: 4.0,
            horizontal_padding: 12.0,
        }
    }
}

impl OverlaySettings {
    /// Returns the sync offset if it passes the validity check, else zero.
    ///
    /// A non-finite offset (NaN, ±∞) from a malformed message or stored
    /// document is treated as no adjustment rather than propagated into the
    /// caption lookup.
    #[must_use]
    pub fn effective_sync_offset(&self) -> f64 {
        if self.sync_offset.is_finite() {
            self.sync_offset
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_finite_offsets_collapse_to_zero() {
        let mut settings = OverlaySettings::default();

        settings.sync_offset = f64::NAN;
        assert_eq!(settings.effective_sync_offset(), 0.0);

        settings.sync_offset = f64::INFINITY;
        assert_eq!(settings.effective_sync_offset(), 0.0);

        settings.sync_offset = -1.25;
        assert_eq!(settings.effective_sync_offset(), -1.25);
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let settings: OverlaySettings =
            serde_json::from_str(r#"{"fontSize": 30.0, "background": false}"#)
                .expect("partial document should deserialize");

        assert_eq!(settings.font_size, 30.0);
        assert!(!settings.background);
        assert_eq!(settings.font_color, "#ffffff");
        assert_eq!(settings.bottom_offset, 60.0);
    }
}
