//! Wallet state management
//!
//! Mirrors the adapter's session into Leptos signals so views re-render on
//! every transition. Commands are forwarded to the adapter on the local
//! executor.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use lib_adapter::{
    ChangeListener, ListenerTask, ObserverId, ProviderDescriptor, ProviderRegistry, SessionState, Signal,
    SignalSource, Subscription, WalletAdapter,
};

use crate::services::config::load_config;
use crate::services::events::WindowSignals;
use crate::services::wallet::WindowEnvironment;

/// Global wallet context
#[derive(Clone, Copy)]
pub struct WalletContext {
    pub session: RwSignal<SessionState>,
    /// Ids of the providers injected into the page.
    pub present: RwSignal<Vec<String>>,
    adapter: StoredValue<WalletAdapter, LocalStorage>,
}

impl WalletContext {
    fn new(adapter: WalletAdapter) -> Self {
        Self {
            session: RwSignal::new(adapter.snapshot()),
            present: RwSignal::new(adapter.detect_present()),
            adapter: StoredValue::new_local(adapter),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.session.with(|state| state.is_connected())
    }

    pub fn is_connecting(&self) -> bool {
        self.session.with(|state| state.is_connecting())
    }

    pub fn account(&self) -> Option<String> {
        self.session.with(|state| state.account().map(|s| s.to_string()))
    }

    pub fn provider(&self) -> Option<String> {
        self.session.with(|state| state.active_provider_id().map(|s| s.to_string()))
    }

    pub fn error_message(&self) -> Option<String> {
        self.session.with(|state| state.error_message())
    }

    /// Every registered provider, installed or not.
    pub fn providers(&self) -> Vec<ProviderDescriptor> {
        self.adapter
            .with_value(|adapter| adapter.registry().iter().cloned().collect())
    }

    pub fn display_name(&self, provider_id: &str) -> String {
        self.adapter.with_value(|adapter| adapter.display_name(provider_id))
    }

    pub fn is_present(&self, provider_id: &str) -> bool {
        self.present.with(|ids| ids.iter().any(|id| id == provider_id))
    }

    pub fn connect(&self, provider_id: String) {
        let adapter = self.adapter.get_value();
        let present = self.present;
        spawn_local(async move {
            adapter.connect(&provider_id).await;
            let _ = present.try_set(adapter.detect_present());
        });
    }

    pub fn disconnect(&self) {
        let adapter = self.adapter.get_value();
        let present = self.present;
        spawn_local(async move {
            adapter.disconnect().await;
            let _ = present.try_set(adapter.detect_present());
        });
    }
}

/// Everything the page registers with the adapter and the signal source.
/// Dropping it removes the session observer and detaches all listeners.
struct WalletBindings {
    adapter: WalletAdapter,
    observer: ObserverId,
    _presence: Vec<Subscription>,
    listener: Option<ChangeListener>,
}

impl WalletBindings {
    fn attach(
        source: &dyn SignalSource,
        adapter: WalletAdapter,
        on_session: impl Fn(&SessionState) + 'static,
        on_presence: impl Fn(Vec<String>) + 'static,
    ) -> (Self, ListenerTask) {
        let observer = adapter.subscribe(on_session);

        // wallets inject themselves after startup; recheck on every page signal
        let on_presence: Rc<dyn Fn(Vec<String>)> = Rc::new(on_presence);
        let presence: Vec<Subscription> = [Signal::Ready, Signal::ProviderChanged]
            .into_iter()
            .map(|signal| {
                let adapter = adapter.clone();
                let on_presence = Rc::clone(&on_presence);
                source.subscribe(signal, Box::new(move || on_presence(adapter.detect_present())))
            })
            .collect();

        let (listener, task) = ChangeListener::attach(source, adapter.clone());

        (
            Self {
                adapter,
                observer,
                _presence: presence,
                listener: Some(listener),
            },
            task,
        )
    }
}

impl Drop for WalletBindings {
    fn drop(&mut self) {
        self.adapter.unsubscribe(self.observer);
        if let Some(listener) = self.listener.take() {
            listener.teardown();
        }
        log::debug!("Wallet bindings released");
    }
}

/// Build the adapter, attach the page change listener, and provide the
/// context to the component tree.
pub fn provide_wallet_context() -> WalletContext {
    let config = load_config();
    let adapter = WalletAdapter::new(&config, Rc::new(WindowEnvironment)).unwrap_or_else(|e| {
        log::error!("{}, falling back to the built-in registry", e);
        WalletAdapter::with_registry(ProviderRegistry::aleo(), Rc::new(WindowEnvironment))
    });

    let context = WalletContext::new(adapter.clone());
    let (session, present) = (context.session, context.present);

    let (bindings, task) = WalletBindings::attach(
        &WindowSignals::new(&config),
        adapter,
        move |state| {
            let _ = session.try_set(state.clone());
        },
        move |ids| {
            let _ = present.try_set(ids);
        },
    );
    spawn_local(task.run());

    let bindings = StoredValue::new_local(Some(bindings));
    on_cleanup(move || {
        drop(bindings.try_update_value(|slot| slot.take()).flatten());
    });

    provide_context(context);
    context
}

pub fn use_wallet_context() -> WalletContext {
    expect_context::<WalletContext>()
}
