// Copyright 2026 the Caprock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Derivation of a CSS declaration block from a settings snapshot.
//!
//! [`StyleBlock::derive`] is a pure function of [`OverlaySettings`]; it holds
//! no hidden state, so reapplying it after a settings update fully describes
//! the new presentation. Backends iterate
//! [`declarations`](StyleBlock::declarations) and set each property on the
//! content node.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::settings::OverlaySettings;

/// The derived presentation block for the overlay content node.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleBlock {
    /// Caption text color.
    pub color: String,
    /// Font size with unit, e.g. `22px`.
    pub font_size: String,
    /// Font family list.
    pub font_family: String,
    /// Shorthand vertical/horizontal padding, e.g. `4px 12px`.
    pub padding: String,
    /// Computed text shadow: a fixed-offset dark shadow in the configured
    /// color when enabled, otherwise `none`.
    pub text_shadow: String,
    /// Computed background: the configured color when the toggle is on,
    /// otherwise fully transparent.
    pub background: String,
}

impl StyleBlock {
    /// Derives the presentation block for the given settings.
    #[must_use]
    pub fn derive(settings: &OverlaySettings) -> Self {
        let text_shadow = if settings.text_shadow {
            format!("1px 1px 2px {}", settings.text_shadow_color)
        } else {
            String::from("none")
        };
        let background = if settings.background {
            settings.background_color.clone()
        } else {
            String::from("transparent")
        };

        Self {
            color: settings.font_color.clone(),
            font_size: format!("{}px", settings.font_size),
            font_family: settings.font_family.clone(),
            padding: format!(
                "{}px {}px",
                settings.vertical_padding, settings.horizontal_padding
            ),
            text_shadow,
            background,
        }
    }

    /// Returns the full list of CSS property/value pairs to apply.
    ///
    /// Includes the fixed declarations every overlay carries: centered bold
    /// text, preserved whitespace with honored line breaks, line-height 1.4,
    /// word wrapping, and a width cap near the viewport width so narrow
    /// viewports do not overflow.
    #[must_use]
    pub fn declarations(&self) -> Vec<(&'static str, String)> {
        let mut decls = Vec::with_capacity(13);
        decls.push(("color", self.color.clone()));
        decls.push(("font-size", self.font_size.clone()));
        decls.push(("font-family", self.font_family.clone()));
        decls.push(("padding", self.padding.clone()));
        decls.push(("text-shadow", self.text_shadow.clone()));
        decls.push(("background", self.background.clone()));
        decls.push(("text-align", String::from("center")));
        decls.push(("white-space", String::from("pre-wrap")));
        decls.push(("font-weight", String::from("bold")));
        decls.push(("line-height", String::from("1.4")));
        decls.push(("overflow-wrap", String::from("break-word")));
        decls.push(("max-width", String::from("90vw")));
        decls.push(("display", String::from("inline-block")));
        decls
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString as _;

    use super::*;

    #[test]
    fn background_toggle_off_is_transparent_regardless_of_color() {
        let settings = OverlaySettings {
            background: false,
            background_color: "#ff00ff".to_string(),
            ..OverlaySettings::default()
        };
        let block = StyleBlock::derive(&settings);
        assert_eq!(block.background, "transparent");
    }

    #[test]
    fn background_toggle_on_uses_configured_color() {
        let settings = OverlaySettings {
            background: true,
            background_color: "rgba(10, 20, 30, 0.5)".to_string(),
            ..OverlaySettings::default()
        };
        let block = StyleBlock::derive(&settings);
        assert_eq!(block.background, "rgba(10, 20, 30, 0.5)");
    }

    #[test]
    fn shadow_toggle_controls_computed_shadow() {
        let mut settings = OverlaySettings {
            text_shadow: true,
            text_shadow_color: "#112233".to_string(),
            ..OverlaySettings::default()
        };
        assert_eq!(
            StyleBlock::derive(&settings).text_shadow,
            "1px 1px 2px #112233"
        );

        settings.text_shadow = false;
        assert_eq!(StyleBlock::derive(&settings).text_shadow, "none");
    }

    #[test]
    fn declarations_carry_fixed_presentation() {
        let block = StyleBlock::derive(&OverlaySettings::default());
        let decls = block.declarations();

        let get = |name: &str| {
            decls
                .iter()
                .find(|(prop, _)| *prop == name)
                .map(|(_, value)| value.as_str())
        };
        assert_eq!(get("font-size"), Some("22px"));
        assert_eq!(get("padding"), Some("4px 12px"));
        assert_eq!(get("white-space"), Some("pre-wrap"));
        assert_eq!(get("max-width"), Some("90vw"));
        assert_eq!(get("text-align"), Some("center"));
    }
}
