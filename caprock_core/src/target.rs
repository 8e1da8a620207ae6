// Copyright 2026 the Caprock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Target descriptors and video resolution.
//!
//! A [`TargetDescriptor`] identifies which document and which video within it
//! an overlay should attach to. The frame/document fields are routing
//! metadata for the transport — by the time the engine runs, the message has
//! already been delivered to the right document, so resolution only ever
//! looks at videos the host enumerates locally.

use alloc::string::String;

use serde::Deserialize;

use crate::host::OverlayHost;

/// Identifies the video element an overlay should attach to.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TargetDescriptor {
    /// Frame the transport routed this message to. Carried through, unused
    /// here.
    pub frame_id: Option<i64>,
    /// Document the transport routed this message to. Carried through,
    /// unused here.
    pub document_id: Option<String>,
    /// Positional index into the document-order video list.
    pub video_index: Option<usize>,
    /// Exact element id of the target video. Takes precedence over
    /// [`video_index`](Self::video_index).
    pub video_id: Option<String>,
}

/// Resolves the target video among the host's candidates.
///
/// Precedence: an exact [`video_id`](TargetDescriptor::video_id) match, then
/// the [`video_index`](TargetDescriptor::video_index) position, then the
/// first video in document order. An id or index that matches nothing falls
/// through to the next rule; resolution returns `None` only when the
/// document has no videos at all.
pub fn resolve_video<H: OverlayHost>(host: &H, target: &TargetDescriptor) -> Option<H::Video> {
    let videos = host.videos();

    if let Some(wanted) = target.video_id.as_deref() {
        if let Some(video) = videos
            .iter()
            .find(|video| host.video_dom_id(video).as_deref() == Some(wanted))
        {
            return Some(video.clone());
        }
    }

    if let Some(index) = target.video_index {
        if let Some(video) = videos.get(index) {
            return Some(video.clone());
        }
    }

    videos.first().cloned()
}
