//! # Wallet Adapter
//!
//! The surface handed to a rendering layer: a read-only session snapshot,
//! change notifications, and three commands (`connect`, `disconnect`,
//! `list_present_providers`).
//!
//! ```rust
//! use std::rc::Rc;
//! use lib_adapter::{AdapterConfig, SessionStatus, StaticEnvironment, WalletAdapter};
//!
//! # futures::executor::block_on(async {
//! let adapter = WalletAdapter::new(&AdapterConfig::default(), Rc::new(StaticEnvironment::new())).unwrap();
//! let state = adapter.connect("fox").await;
//! assert_eq!(state.status(), SessionStatus::Error);
//! # });
//! ```

use std::rc::Rc;

use crate::config::AdapterConfig;
use crate::environment::Environment;
use crate::error::Result;
use crate::negotiator::ConnectionNegotiator;
use crate::prober::CapabilityProber;
use crate::registry::{ProviderDescriptor, ProviderRegistry};
use crate::session::{ObserverId, Session, SessionState};

/// Cheaply clonable handle; clones share one session.
#[derive(Clone)]
pub struct WalletAdapter {
    negotiator: Rc<ConnectionNegotiator>,
}

impl WalletAdapter {
    pub fn new(config: &AdapterConfig, environment: Rc<dyn Environment>) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_registry(config.registry(), environment))
    }

    pub fn with_registry(registry: ProviderRegistry, environment: Rc<dyn Environment>) -> Self {
        let prober = CapabilityProber::new(Rc::new(registry), environment);
        let negotiator = ConnectionNegotiator::new(prober, Rc::new(Session::new()));
        Self {
            negotiator: Rc::new(negotiator),
        }
    }

    pub fn snapshot(&self) -> SessionState {
        self.negotiator.session().snapshot()
    }

    /// Call `observer` after every session change.
    pub fn subscribe(&self, observer: impl Fn(&SessionState) + 'static) -> ObserverId {
        self.negotiator.session().subscribe(observer)
    }

    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        self.negotiator.session().unsubscribe(id)
    }

    pub async fn connect(&self, provider_id: &str) -> SessionState {
        self.negotiator.connect(provider_id).await
    }

    pub async fn disconnect(&self) -> SessionState {
        self.negotiator.disconnect().await
    }

    pub async fn reconcile(&self) -> SessionState {
        self.negotiator.reconcile().await
    }

    /// Ids of the providers currently injected, in registry order.
    pub fn detect_present(&self) -> Vec<String> {
        self.negotiator.prober().detect_present()
    }

    pub fn list_present_providers(&self) -> Vec<ProviderDescriptor> {
        let registry = self.registry();
        self.detect_present()
            .iter()
            .filter_map(|id| registry.get(id).cloned())
            .collect()
    }

    pub fn registry(&self) -> &ProviderRegistry {
        self.negotiator.prober().registry()
    }

    pub fn display_name(&self, provider_id: &str) -> String {
        self.registry().display_name(provider_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use serde_json::Value;

    use crate::capability::Method;
    use crate::environment::StaticEnvironment;
    use crate::error::{AdapterError, ErrorKind, ProviderFault};
    use crate::session::SessionStatus;
    use crate::testing::ScriptedCapability;

    fn adapter(env: StaticEnvironment) -> WalletAdapter {
        WalletAdapter::new(&AdapterConfig::default(), Rc::new(env)).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = AdapterConfig {
            providers: Vec::new(),
            ..AdapterConfig::default()
        };
        let result = WalletAdapter::new(&config, Rc::new(StaticEnvironment::new()));
        assert!(matches!(result, Err(AdapterError::Config(_))));
    }

    #[test]
    fn test_list_present_providers() {
        let a = adapter(
            StaticEnvironment::new()
                .with("soter", ScriptedCapability::new())
                .with("foxwallet", ScriptedCapability::new()),
        );
        let present: Vec<String> = a.list_present_providers().into_iter().map(|p| p.display_name).collect();
        assert_eq!(present, vec!["Fox Wallet", "Soter Wallet"]);
    }

    #[tokio::test]
    async fn test_connect_missing_fox_wallet() {
        let a = adapter(StaticEnvironment::new());
        let state = a.connect("fox").await;
        assert_eq!(state.status(), SessionStatus::Error);
        assert_eq!(
            state.error_message().as_deref(),
            Some("fox wallet not found. Please install the extension.")
        );
    }

    #[tokio::test]
    async fn test_leo_user_rejection() {
        let a = adapter(StaticEnvironment::new().with(
            "leo",
            ScriptedCapability::new().rejects(Method::Connect, ProviderFault::new("user rejected")),
        ));
        let state = a.connect("leo").await;
        assert_eq!(state.error().map(|e| e.kind()), Some(ErrorKind::ProviderRejected));
        assert!(state.error_message().unwrap().contains("user rejected"));
    }

    #[tokio::test]
    async fn test_connect_then_disconnect_round_trip() {
        let a = adapter(StaticEnvironment::new().with(
            "puzzle",
            ScriptedCapability::new()
                .returns(Method::Connect, Value::Null)
                .returns(Method::GetAccount, Value::String("aleo1puzzle".into()))
                .returns(Method::Disconnect, Value::Null),
        ));

        let connected = a.connect("puzzle").await;
        assert_eq!(a.snapshot(), connected);
        assert_eq!(a.display_name(connected.active_provider_id().unwrap()), "Puzzle Wallet");

        assert_eq!(a.disconnect().await, SessionState::Disconnected);
        assert_eq!(a.snapshot().account(), None);
    }

    #[tokio::test]
    async fn test_clones_share_session_and_observers() {
        let a = adapter(StaticEnvironment::new().with("soter", ScriptedCapability::connected("aleo1soter")));
        let b = a.clone();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = a.subscribe(move |state| sink.borrow_mut().push(state.clone()));

        b.reconcile().await;
        assert!(a.snapshot().is_connected());
        assert_eq!(seen.borrow().len(), 1);

        assert!(b.unsubscribe(id));
        b.disconnect().await;
        assert_eq!(seen.borrow().len(), 1);
    }
}
