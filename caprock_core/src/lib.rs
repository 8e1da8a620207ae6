// Copyright 2026 the Caprock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core engine for time-synchronized caption overlays.
//!
//! `caprock_core` owns everything about a caption overlay that is not a
//! browser API: the caption data model, the settings snapshot and its derived
//! presentation, target-video resolution, anchor geometry, the overlay
//! lifecycle state machine, and the inbound command protocol. It is `no_std`
//! compatible (with `alloc`) so the whole engine is testable on native
//! targets against a fake host.
//!
//! # Architecture
//!
//! The engine reacts to two kinds of input: commands from an external
//! controller and events from the host document:
//!
//! ```text
//!   Command ──► dispatch ──► OverlayController::{init, update_settings}
//!                                     │
//!   timeupdate ───────────────► update_content ──► OverlayHost::show_text
//!   resize / scroll ──────────► update_position ──► OverlayHost::place
//!   fullscreen change ────────► fullscreen_changed ──► OverlayHost::mount
//! ```
//!
//! **[`caption`]** — Timed caption spans and the wholesale-replaced
//! [`CaptionTrack`](caption::CaptionTrack) with first-match time lookup.
//!
//! **[`settings`]** — The flat [`OverlaySettings`](settings::OverlaySettings)
//! snapshot, loaded once from persistent storage and replaced atomically.
//!
//! **[`style`]** — Pure derivation of a CSS declaration block from a
//! settings snapshot.
//!
//! **[`target`]** — [`TargetDescriptor`](target::TargetDescriptor) and the
//! id > index > first resolution walk over the host's videos.
//!
//! **[`geometry`]** — Viewport measurement and bottom-center anchor math in
//! page coordinates.
//!
//! **[`controller`]** — The [`OverlayController`](controller::OverlayController)
//! state machine that owns the caption track, the resolved video handle, the
//! render surface, and the fullscreen flag.
//!
//! **[`host`]** — The [`OverlayHost`](host::OverlayHost) trait that platform
//! backends implement to expose videos, surfaces, and document state.
//!
//! **[`protocol`]** — The `type`-tagged inbound command set and its
//! responses.
//!
//! **[`error`]** — The engine error taxonomy. Every public operation catches
//! at its own boundary; errors never escape into a host event callback.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod caption;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod host;
pub mod protocol;
pub mod settings;
pub mod style;
pub mod target;
