// Copyright 2026 the Caprock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inbound command protocol.
//!
//! Commands arrive as JSON objects with a `type` discriminator; every command
//! produces exactly one [`CommandResponse`]. Payload fields deserialize as
//! `Option` so the dispatch layer can report a precise missing-field error
//! instead of a bare parse failure, and anything with an unrecognized `type`
//! collapses into [`Command::Unknown`] for the default error response.
//!
//! `UPDATE_SUBTITLES`, `TOGGLE_SUBTITLES`, and `DESTROY_SUBTITLES` are named
//! here because the surrounding system reserves them, but this engine answers
//! them with the default unknown-command response.

use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::caption::Caption;
use crate::settings::OverlaySettings;
use crate::target::TargetDescriptor;

/// Error text for a settings update without a settings payload.
pub const ERR_MISSING_SETTINGS: &str = "Missing settings data";
/// Error text for an add command without a target or caption payload.
pub const ERR_MISSING_SUBTITLES: &str = "Missing target or captions data";
/// Default error text for commands this engine does not handle.
pub const ERR_UNKNOWN_COMMAND: &str = "Unknown message type";

/// A decoded inbound command.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    /// Attach an overlay to a target video with a caption list.
    #[serde(rename = "ADD_SUBTITLES")]
    AddSubtitles {
        /// Which video to attach to. Required; `None` is a protocol error.
        #[serde(default)]
        target: Option<TargetDescriptor>,
        /// The caption list. Required; `None` is a protocol error.
        #[serde(default)]
        captions: Option<Vec<Caption>>,
    },
    /// Replace the settings snapshot.
    #[serde(rename = "UPDATE_SUBTITLE_SETTINGS")]
    UpdateSubtitleSettings {
        /// The new settings. Required; `None` is a protocol error.
        #[serde(default)]
        settings: Option<OverlaySettings>,
    },
    /// Reserved for the surrounding system; answered with the default error.
    #[serde(rename = "UPDATE_SUBTITLES")]
    UpdateSubtitles,
    /// Reserved for the surrounding system; answered with the default error.
    #[serde(rename = "TOGGLE_SUBTITLES")]
    ToggleSubtitles,
    /// Reserved for the surrounding system; answered with the default error.
    #[serde(rename = "DESTROY_SUBTITLES")]
    DestroySubtitles,
    /// Anything with an unrecognized `type` discriminator.
    #[serde(other)]
    Unknown,
}

impl Command {
    /// Decodes a command from its JSON text.
    ///
    /// Malformed JSON and unknown `type` values both decode to
    /// [`Command::Unknown`]; the protocol answers them identically, with the
    /// default error response and no state change.
    #[must_use]
    pub fn parse(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or(Self::Unknown)
    }
}

/// The single response every command produces.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CommandResponse {
    /// Whether the command was applied.
    pub success: bool,
    /// Present exactly when `success` is `false`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CommandResponse {
    /// A success response.
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    /// A failure response with the given error text.
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }

    /// Encodes the response as JSON text.
    #[must_use]
    pub fn to_json(&self) -> String {
        // A two-field struct of primitives cannot fail to serialize.
        serde_json::to_string(self).unwrap_or_else(|_| String::from(r#"{"success":false}"#))
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString as _;

    use super::*;

    #[test]
    fn add_subtitles_decodes_target_and_captions() {
        let command = Command::parse(
            r#"{
                "type": "ADD_SUBTITLES",
                "target": {"frameId": 3, "videoId": "v2"},
                "captions": [{"start": 0.0, "end": 2.0, "text": "Hi"}]
            }"#,
        );

        let Command::AddSubtitles { target, captions } = command else {
            panic!("wrong variant: {command:?}");
        };
        let target = target.expect("target should be present");
        assert_eq!(target.frame_id, Some(3));
        assert_eq!(target.video_id.as_deref(), Some("v2"));
        assert_eq!(target.video_index, None);
        let captions = captions.expect("captions should be present");
        assert_eq!(captions.len(), 1);
        assert_eq!(captions[0].text, "Hi");
    }

    #[test]
    fn missing_payload_fields_decode_to_none() {
        let command = Command::parse(r#"{"type": "ADD_SUBTITLES"}"#);
        assert_eq!(
            command,
            Command::AddSubtitles {
                target: None,
                captions: None
            }
        );

        let command = Command::parse(r#"{"type": "UPDATE_SUBTITLE_SETTINGS"}"#);
        assert_eq!(command, Command::UpdateSubtitleSettings { settings: None });
    }

    #[test]
    fn reserved_and_unknown_types_decode_without_error() {
        assert_eq!(
            Command::parse(r#"{"type": "TOGGLE_SUBTITLES"}"#),
            Command::ToggleSubtitles
        );
        assert_eq!(
            Command::parse(r#"{"type": "DESTROY_SUBTITLES", "extra": 1}"#),
            Command::DestroySubtitles
        );
        assert_eq!(
            Command::parse(r#"{"type": "SOMETHING_ELSE"}"#),
            Command::Unknown
        );
        assert_eq!(Command::parse("not json at all"), Command::Unknown);
    }

    #[test]
    fn settings_payload_round_trips_camel_case() {
        let command = Command::parse(
            r##"{
                "type": "UPDATE_SUBTITLE_SETTINGS",
                "settings": {"syncOffset": -0.5, "backgroundColor": "#123456"}
            }"##,
        );
        let Command::UpdateSubtitleSettings { settings } = command else {
            panic!("wrong variant: {command:?}");
        };
        let settings = settings.expect("settings should be present");
        assert_eq!(settings.sync_offset, -0.5);
        assert_eq!(settings.background_color, "#123456");
    }

    #[test]
    fn responses_serialize_with_optional_error() {
        assert_eq!(CommandResponse::ok().to_json(), r#"{"success":true}"#);
        assert_eq!(
            CommandResponse::failure(ERR_MISSING_SETTINGS).to_json(),
            r#"{"success":false,"error":"Missing settings data"}"#.to_string()
        );
    }
}
