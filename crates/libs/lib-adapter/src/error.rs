//! # Adapter Error Handling
//!
//! This module defines [`AdapterError`], the single error type used by every
//! component of the adapter. It follows the `thiserror` pattern for ergonomic
//! error handling.
//!
//! ## Error Categories
//!
//! 1. **Lookup Errors** - the requested provider cannot be resolved
//!    - [`UnknownProvider`](AdapterError::UnknownProvider) → id is not in the registry
//!    - [`ProviderAbsent`](AdapterError::ProviderAbsent) → no capability object injected
//!
//! 2. **Capability Errors** - the provider is present but cannot do what we need
//!    - [`CapabilityMissing`](AdapterError::CapabilityMissing) → none of the connect methods exist
//!    - [`ProviderRejected`](AdapterError::ProviderRejected) → the provider call threw or rejected
//!    - [`Interrupted`](AdapterError::Interrupted) → the connect future was dropped mid-flight
//!
//! 3. **Setup Errors**
//!    - [`Config`](AdapterError::Config) → invalid [`AdapterConfig`](crate::config::AdapterConfig)
//!
//! ## Propagation
//!
//! Transition errors never escape the negotiator: they are folded into
//! [`SessionState::Error`](crate::session::SessionState::Error). That is why
//! the type is `Clone + PartialEq` instead of wrapping foreign error sources.
//!
//! ```rust
//! use lib_adapter::error::{AdapterError, ErrorKind};
//!
//! let err = AdapterError::ProviderAbsent("fox".to_string());
//! assert_eq!(err.kind(), ErrorKind::ProviderAbsent);
//! assert_eq!(err.to_string(), "fox wallet not found. Please install the extension.");
//! ```

use std::fmt;

use thiserror::Error;

/// Convenience type alias for `Result<T, AdapterError>`.
pub type Result<T> = std::result::Result<T, AdapterError>;

/// Adapter-wide error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
    /// The id does not name any registered provider.
    #[error("Unknown wallet type: {0}")]
    UnknownProvider(String),

    /// The provider is registered but nothing was injected at its global key.
    #[error("{0} wallet not found. Please install the extension.")]
    ProviderAbsent(String),

    /// The provider exposes none of the connect methods.
    #[error("no connect method on {provider} wallet")]
    CapabilityMissing { provider: String },

    /// A capability call threw or rejected. The message is passed through
    /// from the provider when it supplied one.
    #[error("{0}")]
    ProviderRejected(String),

    /// A connect attempt was dropped before it settled.
    #[error("Connection attempt to {0} wallet was abandoned")]
    Interrupted(String),

    /// Configuration failed validation.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Discriminant of [`AdapterError`] for callers that only branch on the taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnknownProvider,
    ProviderAbsent,
    CapabilityMissing,
    ProviderRejected,
    Interrupted,
    Config,
}

impl AdapterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AdapterError::UnknownProvider(_) => ErrorKind::UnknownProvider,
            AdapterError::ProviderAbsent(_) => ErrorKind::ProviderAbsent,
            AdapterError::CapabilityMissing { .. } => ErrorKind::CapabilityMissing,
            AdapterError::ProviderRejected(_) => ErrorKind::ProviderRejected,
            AdapterError::Interrupted(_) => ErrorKind::Interrupted,
            AdapterError::Config(_) => ErrorKind::Config,
        }
    }

    /// Build a [`ProviderRejected`](AdapterError::ProviderRejected) from a
    /// fault, falling back to a generic message naming the provider.
    pub fn rejected(provider: &str, fault: ProviderFault) -> Self {
        let message = fault
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("Failed to connect to {} wallet", provider));
        AdapterError::ProviderRejected(message)
    }
}

/// What a capability object reports when one of its methods throws or rejects.
///
/// Hosts fill `message` from the thrown value when it carries one; bare
/// rejections (`reject()`, `throw undefined`) leave it empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderFault {
    pub message: Option<String>,
}

impl ProviderFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    pub fn silent() -> Self {
        Self::default()
    }
}

impl fmt::Display for ProviderFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => f.write_str(message),
            None => f.write_str("provider call rejected without a message"),
        }
    }
}

impl std::error::Error for ProviderFault {}
