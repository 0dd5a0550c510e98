//! # Adapter Configuration
//!
//! Which providers to probe and which page events drive the change listener.
//! Every field has a default, so an empty JSON object is a valid config:
//!
//! ```rust
//! use lib_adapter::config::AdapterConfig;
//!
//! let config = AdapterConfig::from_json(r#"{ "changeEvent": "aleo:walletchange" }"#).unwrap();
//! assert_eq!(config.ready_event, "load");
//! assert_eq!(config.change_event, "aleo:walletchange");
//! assert_eq!(config.providers.len(), 5);
//! ```
//!
//! Configuration is validated on load to fail fast if misconfigured.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{AdapterError, Result};
use crate::registry::{default_providers, ProviderDescriptor, ProviderRegistry};

pub const DEFAULT_READY_EVENT: &str = "load";
pub const DEFAULT_CHANGE_EVENT: &str = "walletchange";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdapterConfig {
    /// Providers in probing order.
    pub providers: Vec<ProviderDescriptor>,
    /// One-shot "environment ready" event.
    pub ready_event: String,
    /// Recurring "provider state may have changed" event.
    pub change_event: String,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            providers: default_providers(),
            ready_event: DEFAULT_READY_EVENT.to_string(),
            change_event: DEFAULT_CHANGE_EVENT.to_string(),
        }
    }
}

impl AdapterConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| AdapterError::Config(format!("invalid JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.providers.is_empty() {
            return Err(AdapterError::Config("at least one provider must be registered".to_string()));
        }

        let mut seen = HashSet::new();
        for provider in &self.providers {
            if provider.id.trim().is_empty() {
                return Err(AdapterError::Config("provider id must not be blank".to_string()));
            }
            if provider.global_key.trim().is_empty() {
                return Err(AdapterError::Config(format!(
                    "provider {} has a blank global key",
                    provider.id
                )));
            }
            if !seen.insert(provider.id.as_str()) {
                return Err(AdapterError::Config(format!("duplicate provider id: {}", provider.id)));
            }
        }

        if self.ready_event.trim().is_empty() || self.change_event.trim().is_empty() {
            return Err(AdapterError::Config("event names must not be blank".to_string()));
        }

        Ok(())
    }

    pub fn registry(&self) -> ProviderRegistry {
        ProviderRegistry::new(self.providers.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AdapterConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.registry(), ProviderRegistry::aleo());
    }

    #[test]
    fn test_from_json_custom_providers() {
        let config = AdapterConfig::from_json(
            r#"{ "providers": [ { "id": "shield", "displayName": "Shield Wallet", "globalKey": "shield" } ] }"#,
        )
        .unwrap();
        assert_eq!(config.providers.len(), 1);
        assert_eq!(config.change_event, DEFAULT_CHANGE_EVENT);
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        let err = AdapterConfig::from_json("{ providers: ").unwrap_err();
        assert!(matches!(err, AdapterError::Config(_)));
    }

    #[test]
    fn test_validate_rules() {
        let mut config = AdapterConfig::default();
        config.providers.push(ProviderDescriptor::new("leo", "Leo Again", "leo2"));
        assert_eq!(
            config.validate(),
            Err(AdapterError::Config("duplicate provider id: leo".to_string()))
        );

        let config = AdapterConfig {
            providers: vec![ProviderDescriptor::new("leo", "Leo Wallet", " ")],
            ..AdapterConfig::default()
        };
        assert!(config.validate().is_err());

        let config = AdapterConfig {
            providers: Vec::new(),
            ..AdapterConfig::default()
        };
        assert!(config.validate().is_err());

        let config = AdapterConfig {
            ready_event: String::new(),
            ..AdapterConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
