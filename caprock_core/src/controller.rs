// Copyright 2026 the Caprock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The overlay lifecycle state machine.
//!
//! One [`OverlayController`] exists per document/frame and exclusively owns
//! the mutable overlay state: the caption track, the resolved video handle,
//! the render surface, the recorded fullscreen flag, and the settings
//! snapshot. There is no static state, so multiple controllers (multi-frame
//! pages) coexist safely.
//!
//! All operations are synchronous; the host's single-threaded event dispatch
//! guarantees two of them never run concurrently. The one asynchronous step
//! in the system — loading settings from the persistent store — happens in
//! the dispatch layer before [`init`](OverlayController::init) is called.
//! Every surface-dependent operation guards on existence, so a destroy
//! issued while that load is pending cannot crash when the load resolves
//! against a torn-down controller.

use alloc::vec::Vec;

use log::{debug, warn};

use crate::caption::{Caption, CaptionTrack};
use crate::error::OverlayError;
use crate::geometry::anchor_for;
use crate::host::{MountPoint, OverlayHost};
use crate::settings::OverlaySettings;
use crate::style::StyleBlock;
use crate::target::{TargetDescriptor, resolve_video};

/// Owns one overlay's state and drives it through its lifecycle.
pub struct OverlayController<H: OverlayHost> {
    track: CaptionTrack,
    video: Option<H::Video>,
    surface: Option<H::Surface>,
    fullscreen: bool,
    settings: Option<OverlaySettings>,
}

impl<H: OverlayHost> Default for OverlayController<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: OverlayHost> core::fmt::Debug for OverlayController<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OverlayController")
            .field("captions", &self.track.len())
            .field("has_video", &self.video.is_some())
            .field("has_surface", &self.surface.is_some())
            .field("fullscreen", &self.fullscreen)
            .field("has_settings", &self.settings.is_some())
            .finish()
    }
}

impl<H: OverlayHost> OverlayController<H> {
    /// Creates a controller with no captions, no video, and no surface.
    #[must_use]
    pub fn new() -> Self {
        Self {
            track: CaptionTrack::new(),
            video: None,
            surface: None,
            fullscreen: false,
            settings: None,
        }
    }

    /// Initializes the overlay for a target video and caption list.
    ///
    /// `settings` is the result of the dispatch layer's store load: `Some`
    /// replaces the snapshot, `None` (the load failed and was logged
    /// upstream) leaves the current snapshot alone — on a first init that
    /// means settings stay unset and style/position/content updates are
    /// no-ops until an update command arrives.
    ///
    /// Re-initialization is idempotent: any existing surface is torn down
    /// before the new one is built, so exactly one overlay ever exists per
    /// controller.
    ///
    /// # Errors
    ///
    /// [`OverlayError::TargetNotFound`] when the document has no videos;
    /// [`OverlayError::Host`] when surface construction or mounting fails.
    /// On error no surface is left behind.
    pub fn init(
        &mut self,
        host: &mut H,
        target: &TargetDescriptor,
        captions: Vec<Caption>,
        settings: Option<OverlaySettings>,
    ) -> Result<(), OverlayError> {
        self.track.replace(captions);
        if let Some(settings) = settings {
            self.settings = Some(settings);
        }

        // Idempotent re-init: never leave two overlays for one controller,
        // and never report a resolution left over from a previous init.
        self.teardown_surface(host);
        self.video = None;

        let Some(video) = resolve_video(host, target) else {
            warn!("overlay init: no matching video element found");
            return Err(OverlayError::TargetNotFound);
        };
        self.video = Some(video);
        self.fullscreen = host.fullscreen_active();

        let mut surface = host.create_surface()?;
        let point = if self.fullscreen {
            MountPoint::Fullscreen
        } else {
            MountPoint::Normal
        };
        if let Err(err) = host.mount(&mut surface, point) {
            host.destroy_surface(&mut surface);
            return Err(err.into());
        }
        self.surface = Some(surface);

        self.reapply_style(host);
        self.update_position(host);
        self.update_content(host);
        debug!("overlay init: surface mounted ({} captions)", self.track.len());
        Ok(())
    }

    /// Atomically replaces the settings snapshot.
    ///
    /// If a surface exists, synchronously reapplies styles, then recomputes
    /// position, then content — in that order, because style changes
    /// (padding, font size) affect the rendered box the position math
    /// implicitly depends on. With no surface the settings are simply stored
    /// for the next initialization.
    pub fn update_settings(&mut self, host: &mut H, settings: OverlaySettings) {
        self.settings = Some(settings);
        if self.surface.is_some() {
            self.reapply_style(host);
            self.update_position(host);
            self.update_content(host);
        }
    }

    /// Recomputes the overlay's screen position from the video's current
    /// geometry.
    ///
    /// Returns `false` when there is nothing to do (no surface, video, or
    /// settings yet) or when measurement fails. A failed measurement is
    /// logged and leaves the overlay at its last known position; it never
    /// panics into the caller's event dispatch.
    pub fn update_position(&mut self, host: &mut H) -> bool {
        match self.try_update_position(host) {
            Ok(updated) => updated,
            Err(err) => {
                warn!("overlay position update failed: {err}");
                false
            }
        }
    }

    fn try_update_position(&mut self, host: &mut H) -> Result<bool, OverlayError> {
        let (Some(video), Some(surface), Some(settings)) = (
            self.video.as_ref(),
            self.surface.as_mut(),
            self.settings.as_ref(),
        ) else {
            return Ok(false);
        };

        let frame = host.viewport_frame(video)?;
        let anchor = anchor_for(&frame, settings.bottom_offset);
        host.place(surface, anchor)?;
        Ok(true)
    }

    /// Selects and displays the caption for the video's current playback
    /// time.
    ///
    /// Adds the settings' sync offset (non-finite offsets count as zero),
    /// looks the adjusted time up in the track (a boundary shared by two
    /// captions belongs to the later one), and shows the active text — or
    /// clears and hides the content node when no caption is active. Returns
    /// `false` when there is nothing to do yet.
    pub fn update_content(&mut self, host: &mut H) -> bool {
        let (Some(video), Some(surface), Some(settings)) = (
            self.video.as_ref(),
            self.surface.as_mut(),
            self.settings.as_ref(),
        ) else {
            return false;
        };

        let time = host.playback_time(video) + settings.effective_sync_offset();
        match self.track.active_at(time) {
            Some(caption) => host.show_text(surface, &caption.text),
            None => host.clear_text(surface),
        }
        true
    }

    /// Reacts to a (normalized) fullscreen-change notification.
    ///
    /// Queries the current fullscreen state; when it differs from the
    /// recorded flag, re-mounts the surface into the fullscreen element's
    /// subtree (entering) or the normal container (exiting), then recomputes
    /// position. Elements outside a fullscreen element's subtree are not
    /// composited on top of fullscreen content, which is why the surface
    /// moves rather than staying put.
    pub fn fullscreen_changed(&mut self, host: &mut H) {
        let active = host.fullscreen_active();
        if active == self.fullscreen {
            return;
        }
        self.fullscreen = active;

        if let Some(surface) = self.surface.as_mut() {
            let point = if active {
                MountPoint::Fullscreen
            } else {
                MountPoint::Normal
            };
            if let Err(err) = host.mount(surface, point) {
                warn!("overlay fullscreen re-mount failed: {err}");
            }
        }
        self.update_position(host);
    }

    /// Tears the overlay down.
    ///
    /// Destroys the surface if one exists, clears the caption track and the
    /// video handle, and resets the fullscreen flag. Safe to call at any
    /// time, including before initialization or twice in a row.
    pub fn destroy(&mut self, host: &mut H) {
        self.teardown_surface(host);
        self.track.clear();
        self.video = None;
        self.fullscreen = false;
        debug!("overlay destroyed");
    }

    /// Returns the resolved video handle, if initialization succeeded.
    #[must_use]
    pub fn video(&self) -> Option<&H::Video> {
        self.video.as_ref()
    }

    /// Returns whether a render surface currently exists.
    #[must_use]
    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    /// Returns the current settings snapshot, if one has been loaded.
    #[must_use]
    pub fn settings(&self) -> Option<&OverlaySettings> {
        self.settings.as_ref()
    }

    /// Returns the recorded fullscreen state.
    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn reapply_style(&mut self, host: &mut H) {
        if let (Some(surface), Some(settings)) =
            (self.surface.as_mut(), self.settings.as_ref())
        {
            host.apply_style(surface, &StyleBlock::derive(settings));
        }
    }

    fn teardown_surface(&mut self, host: &mut H) {
        if let Some(mut surface) = self.surface.take() {
            host.destroy_surface(&mut surface);
        }
    }
}
