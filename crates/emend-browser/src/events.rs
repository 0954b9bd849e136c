//! Window and document event wiring.
//!
//! Thin wrappers over `gloo_events::EventListener`; dropping the returned
//! listener detaches the handler.

use gloo_events::{EventListener, EventListenerOptions, EventListenerPhase};
use wasm_bindgen::JsCast;
use web_sys::{BeforeUnloadEvent, EventTarget, KeyboardEvent};

/// Run `callback` on every Escape press.
pub fn on_escape(target: &EventTarget, mut callback: impl FnMut() + 'static) -> EventListener {
    EventListener::new(target, "keydown", move |event| {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        if event.key() == "Escape" {
            callback();
        }
    })
}

/// Run `callback` on every click.
pub fn on_click(target: &EventTarget, mut callback: impl FnMut() + 'static) -> EventListener {
    EventListener::new(target, "click", move |_event| callback())
}

/// Prompt before the page unloads whenever `prompt` returns a message.
pub fn on_before_unload(
    target: &EventTarget,
    prompt: impl Fn() -> Option<&'static str> + 'static,
) -> EventListener {
    EventListener::new_with_options(
        target,
        "beforeunload",
        EventListenerOptions {
            phase: EventListenerPhase::Bubble,
            passive: false,
        },
        move |event| {
            let Some(message) = prompt() else {
                return;
            };
            event.prevent_default();
            if let Some(event) = event.dyn_ref::<BeforeUnloadEvent>() {
                event.set_return_value(message);
            }
        },
    )
}
