// Copyright 2026 the Caprock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host contract for platform integrations.
//!
//! Caprock splits platform-specific work into *backend* crates. A backend
//! provides one [`OverlayHost`] implementation that exposes the pieces the
//! controller needs from the document substrate:
//!
//! - **Video enumeration** — the candidate `<video>` elements in document
//!   order, plus per-video id, geometry, and playback-time reads.
//!
//! - **Render surface** — creation and teardown of the isolated mount node,
//!   style application, anchoring, and caption text updates.
//!
//! - **Document state** — whether a fullscreen element is active, and
//!   mounting the surface into the normal or fullscreen container.
//!
//! Event subscription (timing ticks, resize, scroll, fullscreen changes) is
//! deliberately *not* part of the trait: listener setup and lifecycle differ
//! fundamentally across substrates, so backends wire their own listeners and
//! call back into the controller, the same way a frame loop drives a
//! presenter.
//!
//! # Event loop pseudocode
//!
//! A typical backend wires its listeners like this:
//!
//! ```rust,ignore
//! video.on("timeupdate", || controller.update_content(&mut host));
//! window.on("resize", || controller.update_position(&mut host));
//! window.on("scroll", || controller.update_position(&mut host));
//! document.on("fullscreenchange", || controller.fullscreen_changed(&mut host));
//! ```
//!
//! Geometry reads and surface operations are fallible because elements can
//! detach from the document between the event that triggered an update and
//! the update itself; the controller catches [`HostError`] at each operation
//! boundary instead of letting it escape into the event dispatch.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;

use crate::geometry::ViewportFrame;
use crate::style::StyleBlock;

/// A failure reported by the platform substrate.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// The element involved is no longer attached to the document.
    #[error("element is no longer attached to the document")]
    Detached,
    /// A platform call failed; the payload is the platform's own diagnostic.
    #[error("platform call failed: {0}")]
    Platform(String),
}

/// Where the render surface is mounted in the document tree.
///
/// The surface is reachable from exactly one parent at a time; re-mounting
/// moves it rather than duplicating it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MountPoint {
    /// The normal document container (the body).
    Normal,
    /// The subtree of the active fullscreen element. Content outside that
    /// subtree is not composited on top of fullscreen output.
    Fullscreen,
}

/// The document substrate a backend exposes to the overlay controller.
///
/// `Video` is a non-owning handle: the controller never creates or destroys
/// the underlying element, it only reads geometry and playback time through
/// the host. `Surface` is exclusively owned by the controller; the host
/// releases its platform resources in
/// [`destroy_surface`](Self::destroy_surface).
pub trait OverlayHost {
    /// Non-owning handle to a candidate video element.
    type Video: Clone;
    /// The isolated render surface (mount node + content node).
    type Surface;

    /// Returns all candidate videos in document order.
    fn videos(&self) -> Vec<Self::Video>;

    /// Returns the element id of a video, or `None` when it has none.
    fn video_dom_id(&self, video: &Self::Video) -> Option<String>;

    /// Measures a video's on-screen box together with the page scroll
    /// offsets, as one fallible read.
    fn viewport_frame(&self, video: &Self::Video) -> Result<ViewportFrame, HostError>;

    /// Returns the video's current playback time in seconds.
    fn playback_time(&self, video: &Self::Video) -> f64;

    /// Creates a new, unmounted render surface.
    fn create_surface(&mut self) -> Result<Self::Surface, HostError>;

    /// Removes the surface from the document and releases its resources.
    fn destroy_surface(&mut self, surface: &mut Self::Surface);

    /// Applies a derived style block to the surface's content node.
    fn apply_style(&mut self, surface: &mut Self::Surface, style: &StyleBlock);

    /// Places the surface so its bottom-center point sits at `anchor`
    /// (page coordinates).
    fn place(&mut self, surface: &mut Self::Surface, anchor: Point) -> Result<(), HostError>;

    /// Shows the given caption text on the surface.
    fn show_text(&mut self, surface: &mut Self::Surface, text: &str);

    /// Clears the caption text and hides the content node.
    fn clear_text(&mut self, surface: &mut Self::Surface);

    /// Returns whether the document currently has an active fullscreen
    /// element.
    fn fullscreen_active(&self) -> bool;

    /// Mounts (or re-mounts) the surface into the given container.
    fn mount(&mut self, surface: &mut Self::Surface, point: MountPoint) -> Result<(), HostError>;
}
