// Copyright 2026 the Caprock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event wiring between the document and the overlay controller.
//!
//! A [`ListenerSet`] owns every closure the engine registers: `timeupdate`
//! on the video drives content sync, window `resize`/`scroll` and a
//! `ResizeObserver` on the video drive position sync, and the four
//! vendor-prefixed fullscreen-change event names all feed the controller's
//! one logical fullscreen signal. Dropping the set removes every listener
//! and disconnects the observer, so re-initialization cannot stack handlers.
//!
//! Handlers borrow the shared engine state only for the duration of one
//! synchronous callback; the browser's single-threaded dispatch guarantees
//! no two of them overlap.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, EventTarget, HtmlVideoElement, ResizeObserver};

use crate::EngineState;

/// Every event name that signals a fullscreen transition, across vendor
/// prefixes. All of them funnel into the same controller signal.
const FULLSCREEN_EVENTS: [&str; 4] = [
    "fullscreenchange",
    "webkitfullscreenchange",
    "mozfullscreenchange",
    "MSFullscreenChange",
];

type EventClosure = Closure<dyn FnMut(Event)>;

/// One registered listener, retained so it can be removed on teardown.
struct Handler {
    target: EventTarget,
    event: &'static str,
    closure: EventClosure,
}

/// The set of listeners attached for one overlay lifetime.
pub struct ListenerSet {
    handlers: Vec<Handler>,
    observer: Option<ResizeObserver>,
    /// Kept alive for the observer; dropped together with it.
    observer_closure: Option<Closure<dyn FnMut()>>,
}

impl ListenerSet {
    /// Attaches the full listener set for `video`.
    ///
    /// `engine` is the shared state the closures borrow when events fire;
    /// this function itself never borrows it.
    pub(crate) fn attach(
        engine: &Rc<RefCell<EngineState>>,
        video: &HtmlVideoElement,
    ) -> Result<Self, JsValue> {
        let mut set = Self {
            handlers: Vec::new(),
            observer: None,
            observer_closure: None,
        };

        let window: EventTarget = web_sys::window()
            .ok_or_else(|| JsValue::from_str("no window"))?
            .into();
        let document: EventTarget = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?
            .into();
        let video_target: EventTarget = video.clone().into();

        // Content follows the playback clock.
        set.add(
            &video_target,
            "timeupdate",
            make_handler(engine, |state| {
                let EngineState {
                    ref mut host,
                    ref mut controller,
                    ..
                } = *state;
                controller.update_content(host);
            }),
        )?;

        // Position follows layout and scrolling.
        for event in ["resize", "scroll"] {
            set.add(
                &window,
                event,
                make_handler(engine, |state| {
                    let EngineState {
                        ref mut host,
                        ref mut controller,
                        ..
                    } = *state;
                    controller.update_position(host);
                }),
            )?;
        }

        // One logical fullscreen signal from all vendor spellings.
        for event in FULLSCREEN_EVENTS {
            set.add(
                &document,
                event,
                make_handler(engine, |state| {
                    let EngineState {
                        ref mut host,
                        ref mut controller,
                        ..
                    } = *state;
                    controller.fullscreen_changed(host);
                }),
            )?;
        }

        // The page going away is a teardown, not an update. Listeners are
        // not detached here; the document is being discarded anyway.
        set.add(
            &window,
            "beforeunload",
            make_handler(engine, |state| {
                let EngineState {
                    ref mut host,
                    ref mut controller,
                    ..
                } = *state;
                controller.destroy(host);
            }),
        )?;

        // The video's own box can change without a window resize (player
        // chrome, theater mode); observe it directly.
        let observer_engine = Rc::clone(engine);
        let observer_closure = Closure::wrap(Box::new(move || {
            if let Ok(mut state) = observer_engine.try_borrow_mut() {
                let EngineState {
                    ref mut host,
                    ref mut controller,
                    ..
                } = *state;
                controller.update_position(host);
            }
        }) as Box<dyn FnMut()>);
        let observer = ResizeObserver::new(observer_closure.as_ref().unchecked_ref())?;
        observer.observe(video);
        set.observer = Some(observer);
        set.observer_closure = Some(observer_closure);

        Ok(set)
    }

    fn add(
        &mut self,
        target: &EventTarget,
        event: &'static str,
        closure: EventClosure,
    ) -> Result<(), JsValue> {
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        self.handlers.push(Handler {
            target: target.clone(),
            event,
            closure,
        });
        Ok(())
    }
}

impl Drop for ListenerSet {
    fn drop(&mut self) {
        for handler in &self.handlers {
            let _ = handler.target.remove_event_listener_with_callback(
                handler.event,
                handler.closure.as_ref().unchecked_ref(),
            );
        }
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
        // The observer callback must outlive the disconnect, not the set.
        drop(self.observer_closure.take());
    }
}

impl core::fmt::Debug for ListenerSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListenerSet")
            .field("handlers", &self.handlers.len())
            .field("observing", &self.observer.is_some())
            .finish()
    }
}

/// Wraps a state-borrowing callback in a JS event closure.
fn make_handler(
    engine: &Rc<RefCell<EngineState>>,
    callback: impl Fn(&mut EngineState) + 'static,
) -> EventClosure {
    let engine = Rc::clone(engine);
    Closure::wrap(Box::new(move |_event: Event| {
        // A handler firing while the state is already borrowed would mean
        // re-entrant dispatch; skip rather than panic.
        if let Ok(mut state) = engine.try_borrow_mut() {
            callback(&mut state);
        }
    }) as Box<dyn FnMut(_)>)
}
