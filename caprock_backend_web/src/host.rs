// Copyright 2026 the Caprock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`OverlayHost`] over a live browser document.

use alloc::string::String;
use alloc::vec::Vec;

use caprock_core::geometry::ViewportFrame;
use caprock_core::host::{HostError, MountPoint, OverlayHost};
use caprock_core::style::StyleBlock;
use kurbo::{Point, Rect};
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{Document, Element, HtmlVideoElement, Window};

use crate::surface::{DomSurface, js_error};

/// Vendor-prefixed fallback for the fullscreen element query, for engines
/// that predate the unprefixed API.
const WEBKIT_FULLSCREEN_ELEMENT: &str = "webkitFullscreenElement";

/// The browser-document substrate.
pub struct WebHost {
    window: Window,
    document: Document,
}

impl WebHost {
    /// Binds to the current page's window and document.
    pub fn from_page() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        Ok(Self { window, document })
    }

    /// Returns the active fullscreen element, checking the vendor-prefixed
    /// property when the standard one reports none.
    fn fullscreen_element(&self) -> Option<Element> {
        if let Some(element) = self.document.fullscreen_element() {
            return Some(element);
        }
        let prefixed = js_sys::Reflect::get(
            self.document.as_ref(),
            &JsValue::from_str(WEBKIT_FULLSCREEN_ELEMENT),
        )
        .ok()?;
        prefixed.dyn_into().ok()
    }
}

impl OverlayHost for WebHost {
    type Video = HtmlVideoElement;
    type Surface = DomSurface;

    fn videos(&self) -> Vec<HtmlVideoElement> {
        let collection = self.document.get_elements_by_tag_name("video");
        (0..collection.length())
            .filter_map(|index| collection.item(index))
            .filter_map(|element| element.dyn_into().ok())
            .collect()
    }

    fn video_dom_id(&self, video: &HtmlVideoElement) -> Option<String> {
        let id = video.id();
        if id.is_empty() { None } else { Some(id) }
    }

    fn viewport_frame(&self, video: &HtmlVideoElement) -> Result<ViewportFrame, HostError> {
        if !video.is_connected() {
            return Err(HostError::Detached);
        }
        let rect = video.get_bounding_client_rect();
        let scroll_x = self.window.page_x_offset().map_err(js_error)?;
        let scroll_y = self.window.page_y_offset().map_err(js_error)?;
        Ok(ViewportFrame {
            rect: Rect::new(rect.left(), rect.top(), rect.right(), rect.bottom()),
            scroll: Point::new(scroll_x, scroll_y),
        })
    }

    fn playback_time(&self, video: &HtmlVideoElement) -> f64 {
        video.current_time()
    }

    fn create_surface(&mut self) -> Result<DomSurface, HostError> {
        DomSurface::create(&self.document)
    }

    fn destroy_surface(&mut self, surface: &mut DomSurface) {
        surface.remove();
    }

    fn apply_style(&mut self, surface: &mut DomSurface, style: &StyleBlock) {
        surface.apply_style(style);
    }

    fn place(&mut self, surface: &mut DomSurface, anchor: Point) -> Result<(), HostError> {
        surface.set_anchor(anchor);
        Ok(())
    }

    fn show_text(&mut self, surface: &mut DomSurface, text: &str) {
        surface.show_text(text);
    }

    fn clear_text(&mut self, surface: &mut DomSurface) {
        surface.clear_text();
    }

    fn fullscreen_active(&self) -> bool {
        self.fullscreen_element().is_some()
    }

    fn mount(&mut self, surface: &mut DomSurface, point: MountPoint) -> Result<(), HostError> {
        let parent: Element = match point {
            // A fullscreen notification can race the element going away;
            // fall back to the body rather than failing the re-mount.
            MountPoint::Fullscreen => self
                .fullscreen_element()
                .or_else(|| self.document.body().map(Element::from))
                .ok_or(HostError::Detached)?,
            MountPoint::Normal => self.document.body().map(Element::from).ok_or_else(|| {
                HostError::Platform(String::from("document has no body"))
            })?,
        };
        surface.mount_into(&parent)
    }
}

impl core::fmt::Debug for WebHost {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WebHost")
            .field("document", &"Document")
            .finish()
    }
}
