//! # Provider Registry
//!
//! Static table of the wallet providers the adapter knows about, each mapped
//! to the global key its extension injects a capability object under.
//!
//! Registry order matters: [`reconcile`](crate::negotiator::ConnectionNegotiator::reconcile)
//! walks providers in this order and the first connected one wins.

use serde::{Deserialize, Serialize};

/// One registered wallet provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderDescriptor {
    /// Stable id, the only identifier used for the provider anywhere.
    pub id: String,
    pub display_name: String,
    /// Key in the page's global namespace (e.g. `window.foxwallet`).
    pub global_key: String,
}

impl ProviderDescriptor {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        global_key: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            global_key: global_key.into(),
        }
    }
}

/// Ordered, immutable list of [`ProviderDescriptor`]s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderRegistry {
    providers: Vec<ProviderDescriptor>,
}

impl ProviderRegistry {
    pub fn new(providers: Vec<ProviderDescriptor>) -> Self {
        Self { providers }
    }

    /// The Aleo wallets, with the generic `window.aleo` provider last.
    pub fn aleo() -> Self {
        Self::new(default_providers())
    }

    pub fn get(&self, id: &str) -> Option<&ProviderDescriptor> {
        self.providers.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProviderDescriptor> {
        self.providers.iter()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Human-readable name for `id`.
    ///
    /// Unregistered ids get a capitalized fallback (`"ledger"` → `"Ledger Wallet"`).
    pub fn display_name(&self, id: &str) -> String {
        if let Some(provider) = self.get(id) {
            return provider.display_name.clone();
        }
        let mut chars = id.chars();
        match chars.next() {
            Some(first) => format!("{}{} Wallet", first.to_uppercase(), chars.as_str()),
            None => "Unknown Wallet".to_string(),
        }
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::aleo()
    }
}

pub(crate) fn default_providers() -> Vec<ProviderDescriptor> {
    vec![
        ProviderDescriptor::new("leo", "Leo Wallet", "leo"),
        ProviderDescriptor::new("fox", "Fox Wallet", "foxwallet"),
        ProviderDescriptor::new("puzzle", "Puzzle Wallet", "puzzle"),
        ProviderDescriptor::new("soter", "Soter Wallet", "soter"),
        ProviderDescriptor::new("aleo", "Aleo Wallet", "aleo"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aleo_registry_order() {
        let registry = ProviderRegistry::aleo();
        let ids: Vec<&str> = registry.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["leo", "fox", "puzzle", "soter", "aleo"]);
    }

    #[test]
    fn test_fox_uses_foxwallet_key() {
        let registry = ProviderRegistry::aleo();
        let fox = registry.get("fox").unwrap();
        assert_eq!(fox.global_key, "foxwallet");
        assert!(registry.get("foxwallet").is_none());
    }

    #[test]
    fn test_display_name() {
        let registry = ProviderRegistry::aleo();
        assert_eq!(registry.display_name("soter"), "Soter Wallet");
        assert_eq!(registry.display_name("ledger"), "Ledger Wallet");
        assert_eq!(registry.display_name(""), "Unknown Wallet");
    }

    #[test]
    fn test_descriptor_json_shape() {
        let json = serde_json::to_value(ProviderDescriptor::new("fox", "Fox Wallet", "foxwallet")).unwrap();
        assert_eq!(json["globalKey"], "foxwallet");
        assert_eq!(json["displayName"], "Fox Wallet");
    }
}
