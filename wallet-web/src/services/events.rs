//! Page Events as Adapter Signals
//!
//! Ready maps to the configured one-shot event (window `load` by default),
//! ProviderChanged to the recurring wallet change event.

use lib_adapter::{AdapterConfig, Signal, SignalSource, Subscription};
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Event};

const LOAD_EVENT: &str = "load";

pub struct WindowSignals {
    ready_event: String,
    change_event: String,
}

impl WindowSignals {
    pub fn new(config: &AdapterConfig) -> Self {
        Self {
            ready_event: config.ready_event.clone(),
            change_event: config.change_event.clone(),
        }
    }

    fn event_name(&self, signal: Signal) -> &str {
        match signal {
            Signal::Ready => &self.ready_event,
            Signal::ProviderChanged => &self.change_event,
        }
    }
}

/// `load` has already fired once the document is complete; listening for it
/// then would wait forever.
fn load_already_fired(event: &str) -> bool {
    event == LOAD_EVENT
        && web_sys::window()
            .and_then(|window| window.document())
            .map(|document| document.ready_state() == "complete")
            .unwrap_or(false)
}

impl SignalSource for WindowSignals {
    fn subscribe(&self, signal: Signal, handler: Box<dyn Fn()>) -> Subscription {
        let event = self.event_name(signal).to_string();

        if signal == Signal::Ready && load_already_fired(&event) {
            log::debug!("Document already loaded, signalling ready now");
            handler();
            return Subscription::noop();
        }

        let Some(window) = web_sys::window() else {
            log::warn!("No window available, {} events will not be observed", event);
            return Subscription::noop();
        };

        let closure = Closure::<dyn Fn(Event)>::new(move |_: Event| handler());

        let options = AddEventListenerOptions::new();
        options.set_once(signal == Signal::Ready);

        if let Err(e) = window.add_event_listener_with_callback_and_add_event_listener_options(
            &event,
            closure.as_ref().unchecked_ref(),
            &options,
        ) {
            log::error!("Failed to listen for {}: {:?}", event, e);
            return Subscription::noop();
        }

        log::debug!("Listening for window {} events", event);
        Subscription::new(move || {
            let _ = window.remove_event_listener_with_callback(&event, closure.as_ref().unchecked_ref());
            drop(closure);
        })
    }
}
