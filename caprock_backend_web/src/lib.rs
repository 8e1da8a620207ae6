// Copyright 2026 the Caprock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for caprock.
//!
//! This crate binds the [`caprock_core`] overlay engine to a live browser
//! document:
//!
//! - [`WebHost`]: the [`OverlayHost`] implementation over `Window`/`Document`
//! - [`DomSurface`]: shadow-DOM isolated render surface
//! - [`ListenerSet`]: retained event listeners and the `ResizeObserver`
//! - [`CaptionEngine`]: the `wasm_bindgen` entry point, one per document
//!
//! Build with: `wasm-pack build --target web caprock_backend_web`
//!
//! The JS glue (a content script) constructs one [`CaptionEngine`] and
//! forwards each transport message to
//! [`handle_message`](CaptionEngine::handle_message), which returns a
//! `Promise` resolving to the response object.

#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

mod dispatch;
mod host;
mod listeners;
mod logging;
mod store;
mod surface;

pub use host::WebHost;
pub use listeners::ListenerSet;
pub use surface::DomSurface;

use alloc::rc::Rc;
use core::cell::RefCell;

use caprock_core::controller::OverlayController;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

/// Everything the engine owns for one document, shared with the listener
/// closures through an `Rc<RefCell<..>>`.
pub(crate) struct EngineState {
    pub(crate) host: WebHost,
    pub(crate) controller: OverlayController<WebHost>,
    pub(crate) listeners: Option<ListenerSet>,
}

/// The caption overlay engine for one document.
///
/// Holds the controller, the host, and the currently attached listeners.
/// One instance exists per document/frame; nothing here is static, so
/// multiple frames each run their own engine without contention.
#[wasm_bindgen]
pub struct CaptionEngine {
    inner: Rc<RefCell<EngineState>>,
}

#[wasm_bindgen]
impl CaptionEngine {
    /// Creates an engine bound to the current page's window and document.
    ///
    /// Also installs the console logger (a no-op if one is already
    /// installed, e.g. by a second engine in another frame of the same
    /// module instance).
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<CaptionEngine, JsValue> {
        logging::init();
        let host = WebHost::from_page()?;
        Ok(Self {
            inner: Rc::new(RefCell::new(EngineState {
                host,
                controller: OverlayController::new(),
                listeners: None,
            })),
        })
    }

    /// Handles one transport message and returns a `Promise` resolving to
    /// the response object.
    ///
    /// The message is expected to be a plain object with a `type`
    /// discriminator; anything else resolves to the default unknown-command
    /// error response. The promise only suspends for the settings-store read
    /// during `ADD_SUBTITLES`; every other command completes synchronously
    /// under the hood.
    #[wasm_bindgen(js_name = handleMessage)]
    pub fn handle_message(&self, message: JsValue) -> js_sys::Promise {
        let inner = Rc::clone(&self.inner);
        future_to_promise(async move {
            let command = dispatch::decode_message(&message);
            let response = dispatch::handle(&inner, command).await;
            dispatch::encode_response(&response)
        })
    }

    /// Tears the overlay down and detaches all listeners.
    pub fn destroy(&self) {
        let mut state = self.inner.borrow_mut();
        state.listeners = None;
        let EngineState {
            ref mut host,
            ref mut controller,
            ..
        } = *state;
        controller.destroy(host);
    }

    /// Returns whether an overlay surface is currently mounted.
    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.inner.borrow().controller.has_surface()
    }
}

impl core::fmt::Debug for CaptionEngine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("CaptionEngine")
            .field("controller", &state.controller)
            .field("listeners_attached", &state.listeners.is_some())
            .finish()
    }
}
