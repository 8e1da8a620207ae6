// Copyright 2026 the Caprock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Message dispatch: transport JSON in, one response out.
//!
//! This is the thin layer the spec's command table lives in. It validates
//! payloads, performs the one asynchronous step (the settings-store read for
//! `ADD_SUBTITLES`), and forwards to the controller. Errors become
//! `success: false` responses here; nothing propagates to the transport as a
//! rejection except a response object that itself cannot be built.

use alloc::rc::Rc;
use alloc::string::{String, ToString as _};
use core::cell::RefCell;

use caprock_core::protocol::{
    Command, CommandResponse, ERR_MISSING_SETTINGS, ERR_MISSING_SUBTITLES, ERR_UNKNOWN_COMMAND,
};
use wasm_bindgen::JsValue;

use crate::listeners::ListenerSet;
use crate::{EngineState, store};

/// Decodes a transport message into a [`Command`].
///
/// The message is a structured-cloneable JS object; it is round-tripped
/// through JSON text so the core protocol types do the decoding. Anything
/// that does not stringify decodes as [`Command::Unknown`].
pub(crate) fn decode_message(message: &JsValue) -> Command {
    match js_sys::JSON::stringify(message) {
        Ok(json) => Command::parse(&String::from(json)),
        Err(_) => Command::Unknown,
    }
}

/// Encodes a response for the transport.
pub(crate) fn encode_response(response: &CommandResponse) -> Result<JsValue, JsValue> {
    js_sys::JSON::parse(&response.to_json())
}

/// Routes one command and produces its response.
pub(crate) async fn handle(
    engine: &Rc<RefCell<EngineState>>,
    command: Command,
) -> CommandResponse {
    match command {
        Command::AddSubtitles { target, captions } => {
            let (Some(target), Some(captions)) = (target, captions) else {
                return CommandResponse::failure(ERR_MISSING_SUBTITLES);
            };

            // The only suspension point in the engine. The state is not
            // borrowed across this await, so a concurrent destroy cannot
            // deadlock or crash a late-resolving load.
            let settings = store::load_settings().await;

            let mut state = engine.borrow_mut();
            // Detach before re-init so listener closures never stack.
            state.listeners = None;
            let init_result = {
                let EngineState {
                    ref mut host,
                    ref mut controller,
                    ..
                } = *state;
                controller.init(host, &target, captions, settings)
            };
            match init_result {
                Ok(()) => {
                    let Some(video) = state.controller.video().cloned() else {
                        return CommandResponse::failure("No video resolved after init");
                    };
                    match ListenerSet::attach(engine, &video) {
                        Ok(set) => {
                            state.listeners = Some(set);
                            CommandResponse::ok()
                        }
                        Err(err) => {
                            log::warn!("listener attach failed: {err:?}");
                            CommandResponse::failure("Failed to attach document listeners")
                        }
                    }
                }
                Err(err) => CommandResponse::failure(err.to_string()),
            }
        }
        Command::UpdateSubtitleSettings { settings } => {
            let Some(settings) = settings else {
                return CommandResponse::failure(ERR_MISSING_SETTINGS);
            };
            let mut state = engine.borrow_mut();
            let EngineState {
                ref mut host,
                ref mut controller,
                ..
            } = *state;
            controller.update_settings(host, settings);
            CommandResponse::ok()
        }
        Command::UpdateSubtitles
        | Command::ToggleSubtitles
        | Command::DestroySubtitles
        | Command::Unknown => CommandResponse::failure(ERR_UNKNOWN_COMMAND),
    }
}

