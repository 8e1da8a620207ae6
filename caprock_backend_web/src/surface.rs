// Copyright 2026 the Caprock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The DOM render surface.
//!
//! A [`DomSurface`] is one mount `<div>` holding one content `<div>`. The
//! mount sits at maximal stacking priority with pointer events disabled, and
//! carries the fixed bottom-center transform so placement is a plain top/left
//! write. Content lives behind a shadow root where `attachShadow` is
//! available, keeping host-page styles out and overlay styles in; when it is
//! not (or the host page blocks it), the content node is appended directly
//! and every declaration is applied with `!important` priority instead.

use alloc::format;

use caprock_core::geometry::MOUNT_TRANSFORM;
use caprock_core::host::HostError;
use caprock_core::style::StyleBlock;
use kurbo::Point;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, HtmlElement, ShadowRoot, ShadowRootInit, ShadowRootMode};

/// The mount node's element id, also the namespace for the no-shadow
/// fallback.
const MOUNT_ID: &str = "caprock-overlay";

/// The isolated render surface: mount node, isolation boundary, content node.
pub struct DomSurface {
    mount: HtmlElement,
    content: HtmlElement,
    /// `Some` when the isolation boundary is a shadow root; `None` means the
    /// inline `!important` fallback is in effect.
    shadow: Option<ShadowRoot>,
}

impl DomSurface {
    /// Builds an unmounted surface in `document`.
    pub(crate) fn create(document: &Document) -> Result<Self, HostError> {
        let mount: HtmlElement = document
            .create_element("div")
            .map_err(js_error)?
            .unchecked_into();
        mount.set_id(MOUNT_ID);
        let style = mount.style();
        let _ = style.set_property("position", "absolute");
        let _ = style.set_property("top", "0");
        let _ = style.set_property("left", "0");
        // Never occluded by page content, never intercepting its input.
        let _ = style.set_property("z-index", "2147483647");
        let _ = style.set_property("pointer-events", "none");
        let _ = style.set_property("transform", MOUNT_TRANSFORM);

        let content: HtmlElement = document
            .create_element("div")
            .map_err(js_error)?
            .unchecked_into();
        let _ = content.style().set_property("display", "none");

        let shadow = match mount.attach_shadow(&ShadowRootInit::new(ShadowRootMode::Open)) {
            Ok(root) => {
                root.append_child(&content).map_err(js_error)?;
                Some(root)
            }
            Err(err) => {
                log::debug!("attachShadow unavailable, falling back to inline styles: {err:?}");
                mount.append_child(&content).map_err(js_error)?;
                None
            }
        };

        Ok(Self {
            mount,
            content,
            shadow,
        })
    }

    /// Returns whether the shadow-root isolation boundary is in effect.
    #[must_use]
    pub fn is_isolated(&self) -> bool {
        self.shadow.is_some()
    }

    /// Applies a derived style block to the content node.
    pub(crate) fn apply_style(&self, block: &StyleBlock) {
        let style = self.content.style();
        for (property, value) in block.declarations() {
            // Without a shadow boundary the host page's stylesheet can win
            // the cascade, so the fallback pins every declaration.
            let priority = if self.shadow.is_some() { "" } else { "important" };
            let _ = style.set_property_with_priority(property, &value, priority);
        }
    }

    /// Moves the mount so its bottom-center pins to `anchor` (page
    /// coordinates).
    pub(crate) fn set_anchor(&self, anchor: Point) {
        let style = self.mount.style();
        let _ = style.set_property("left", &format!("{}px", anchor.x));
        let _ = style.set_property("top", &format!("{}px", anchor.y));
    }

    /// Shows caption text.
    pub(crate) fn show_text(&self, text: &str) {
        self.content.set_text_content(Some(text));
        let _ = self.content.style().set_property("display", "inline-block");
    }

    /// Clears the text and hides the content node.
    pub(crate) fn clear_text(&self) {
        self.content.set_text_content(None);
        let _ = self.content.style().set_property("display", "none");
    }

    /// Re-appends the mount under `parent`.
    ///
    /// `appendChild` moves a node that is already in the tree, so the mount
    /// is always reachable from exactly one parent.
    pub(crate) fn mount_into(&self, parent: &Element) -> Result<(), HostError> {
        parent.append_child(&self.mount).map_err(js_error)?;
        Ok(())
    }

    /// Detaches the mount (and with it the boundary and content node) from
    /// the document.
    pub(crate) fn remove(&self) {
        self.mount.remove();
    }
}

impl core::fmt::Debug for DomSurface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomSurface")
            .field("mount", &"HtmlElement")
            .field("isolated", &self.shadow.is_some())
            .finish()
    }
}

/// Converts a thrown JS value into a [`HostError`] diagnostic.
pub(crate) fn js_error(value: JsValue) -> HostError {
    HostError::Platform(format!("{value:?}"))
}
