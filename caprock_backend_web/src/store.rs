// Copyright 2026 the Caprock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Persistent settings store binding.
//!
//! Settings live under one key in `chrome.storage.local`, as a JSON
//! document. The store is read-only from the engine's perspective: the
//! surrounding system writes it, the engine loads it once per
//! initialization. This is the engine's only suspension point.

use caprock_core::settings::OverlaySettings;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen_futures::JsFuture;

/// Storage key the surrounding system writes settings under.
const SETTINGS_KEY: &str = "subtitleSettings";

// Direct binding instead of a web_sys interface: the extension storage API
// is not part of the web platform surface.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["chrome", "storage", "local"], js_name = get, catch)]
    fn storage_get(key: &str) -> Result<js_sys::Promise, JsValue>;
}

/// Loads the settings snapshot from persistent storage.
///
/// Returns `Some(settings)` on a successful read — with defaults when the
/// key is absent or its document is malformed — and `None` when the store
/// itself cannot be queried (API missing, promise rejected). The caller
/// treats `None` as "leave settings unset and continue".
pub(crate) async fn load_settings() -> Option<OverlaySettings> {
    let promise = match storage_get(SETTINGS_KEY) {
        Ok(promise) => promise,
        Err(err) => {
            log::warn!("settings store unavailable: {err:?}");
            return None;
        }
    };
    let result = match JsFuture::from(promise).await {
        Ok(result) => result,
        Err(err) => {
            log::warn!("settings load failed: {err:?}");
            return None;
        }
    };

    let value = js_sys::Reflect::get(&result, &JsValue::from_str(SETTINGS_KEY)).ok()?;
    if value.is_undefined() || value.is_null() {
        log::debug!("no stored settings, using defaults");
        return Some(OverlaySettings::default());
    }

    let json = js_sys::JSON::stringify(&value).ok()?;
    let json: alloc::string::String = json.into();
    match serde_json::from_str(&json) {
        Ok(settings) => Some(settings),
        Err(err) => {
            log::warn!("stored settings malformed, using defaults: {err}");
            Some(OverlaySettings::default())
        }
    }
}
