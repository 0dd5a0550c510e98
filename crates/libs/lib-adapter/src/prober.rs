//! # Capability Prober
//!
//! Observes the environment: which registered providers are injected, whether
//! one reports an existing session, and what account it exposes.
//!
//! Probing never fails. A missing method or a rejecting call means "unknown",
//! which callers treat as "not connected" / "no account".

use std::rc::Rc;

use serde_json::Value;

use crate::capability::{
    account_from_value, first_available, is_truthy, Capability, Method, ACCOUNTS_PROPERTY,
    ACCOUNT_METHODS,
};
use crate::environment::Environment;
use crate::error::{AdapterError, ProviderFault, Result};
use crate::registry::ProviderRegistry;

pub struct CapabilityProber {
    registry: Rc<ProviderRegistry>,
    environment: Rc<dyn Environment>,
}

impl CapabilityProber {
    pub fn new(registry: Rc<ProviderRegistry>, environment: Rc<dyn Environment>) -> Self {
        Self {
            registry,
            environment,
        }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Ids of registered providers with a capability object, in registry order.
    pub fn detect_present(&self) -> Vec<String> {
        let present: Vec<String> = self
            .registry
            .iter()
            .filter(|p| self.environment.capability(&p.global_key).is_some())
            .map(|p| p.id.clone())
            .collect();

        for id in &present {
            tracing::info!(provider = %id, "{} detected", self.registry.display_name(id));
        }
        if present.is_empty() {
            tracing::debug!(registered = self.registry.len(), "No wallet providers detected");
        }
        present
    }

    /// Resolve the capability object for a registered provider id.
    pub fn capability(&self, provider_id: &str) -> Result<Rc<dyn Capability>> {
        let descriptor = self
            .registry
            .get(provider_id)
            .ok_or_else(|| AdapterError::UnknownProvider(provider_id.to_string()))?;
        self.environment
            .capability(&descriptor.global_key)
            .ok_or_else(|| AdapterError::ProviderAbsent(provider_id.to_string()))
    }

    /// Ask the provider whether it already holds a session.
    ///
    /// Absent providers, a missing `isConnected` and rejections all yield `false`.
    pub async fn is_connected(&self, provider_id: &str) -> bool {
        let Ok(capability) = self.capability(provider_id) else {
            return false;
        };
        if !capability.has_method(Method::IsConnected) {
            tracing::debug!(provider = %provider_id, "isConnected not exposed, assuming disconnected");
            return false;
        }
        match capability.call(Method::IsConnected).await {
            Ok(value) => is_truthy(&value),
            Err(fault) => {
                tracing::warn!(provider = %provider_id, error = %fault, "Error checking wallet connection");
                false
            }
        }
    }

    /// Current account of the provider, if it will tell us.
    pub async fn fetch_account(&self, provider_id: &str) -> Option<String> {
        let capability = self.capability(provider_id).ok()?;
        resolve_account(provider_id, capability.as_ref()).await
    }
}

/// Account lookup for probing: any failure is logged and reads as "no account".
pub(crate) async fn resolve_account(provider_id: &str, capability: &dyn Capability) -> Option<String> {
    match lookup_account(provider_id, capability).await {
        Ok(account) => account,
        Err(fault) => {
            tracing::warn!(provider = %provider_id, error = %fault, "Account retrieval failed");
            None
        }
    }
}

/// `getAccount`, then `getAddress`, then the first entry of an `accounts` list.
///
/// A missing method or a non-address result is `Ok(None)`; a rejecting call
/// is returned to the caller.
pub(crate) async fn lookup_account(
    provider_id: &str,
    capability: &dyn Capability,
) -> std::result::Result<Option<String>, ProviderFault> {
    if let Some(method) = first_available(capability, ACCOUNT_METHODS) {
        let value = capability.call(method).await?;
        let account = account_from_value(&value);
        if account.is_none() {
            tracing::debug!(provider = %provider_id, method = method.js_name(), "Account method returned no address");
        }
        return Ok(account);
    }

    match capability.property(ACCOUNTS_PROPERTY) {
        Some(list @ Value::Array(_)) => Ok(account_from_value(&list)),
        _ => {
            tracing::warn!(provider = %provider_id, "Cannot retrieve account from {} wallet", provider_id);
            Ok(None)
        }
    }
}
