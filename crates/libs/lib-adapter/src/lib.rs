//! # Wallet Adapter Core
//!
//! Discovers browser-injected wallet providers, detects an existing session,
//! and negotiates connect/disconnect through whatever methods each provider
//! happens to expose.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌───────────────────┐   ┌──────────────────────┐   ┌───────────────┐
//! │   Registry   │──▶│ Capability Prober │──▶│ Connection Negotiator│──▶│ Session State │
//! └──────────────┘   └───────────────────┘   └──────────────────────┘   └───────────────┘
//!                              ▲                                                │
//!                              │                                                ▼
//!                     ┌─────────────────┐                              observers (UI)
//!                     │ Change Listener │◀── ready / walletchange signals
//!                     └─────────────────┘
//! ```
//!
//! ## Modules
//!
//! - **registry**: provider ids, display names, global keys
//! - **capability**: the optional-method view of an injected object
//! - **environment**: global-namespace lookup (`window` in browsers, a map elsewhere)
//! - **prober**: presence, `isConnected`, account lookup
//! - **negotiator**: serialized connect / disconnect / reconcile transitions
//! - **session**: the single [`SessionState`] and its observers
//! - **listener**: ready/change signals → reconcile
//! - **adapter**: [`WalletAdapter`], the handle given to the rendering layer
//!
//! ## Threading
//!
//! Everything here is single-threaded (`Rc`, `RefCell`, `?Send` futures),
//! matching the page event loop it runs on. Suspension happens only while a
//! provider call is awaited.
//!
//! ## Testing
//!
//! ```bash
//! cargo test -p lib-adapter
//! ```

pub mod adapter;
pub mod capability;
pub mod config;
pub mod environment;
pub mod error;
pub mod listener;
pub mod negotiator;
pub mod prober;
pub mod registry;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use adapter::WalletAdapter;
pub use capability::{Capability, Method};
pub use config::AdapterConfig;
pub use environment::{Environment, StaticEnvironment};
pub use error::{AdapterError, ErrorKind, ProviderFault, Result};
pub use listener::{ChangeListener, ListenerTask, Signal, SignalSource, Subscription};
pub use registry::{ProviderDescriptor, ProviderRegistry};
pub use session::{ObserverId, SessionState, SessionStatus};
