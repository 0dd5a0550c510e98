//! # Capability Objects
//!
//! A wallet extension injects an untyped object whose method set varies from
//! provider to provider. The adapter never assumes a shape: it asks whether a
//! [`Method`] is present and only then calls it.
//!
//! Every member is optional and every call may reject. Results come back as
//! `serde_json::Value` so hosts can hand over whatever the provider returned.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ProviderFault;

/// Methods the adapter knows how to probe for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    IsConnected,
    GetAccount,
    GetAddress,
    Connect,
    RequestAccounts,
    Enable,
    Disconnect,
    Logout,
}

impl Method {
    /// Member name on the injected JavaScript object.
    pub fn js_name(&self) -> &'static str {
        match self {
            Method::IsConnected => "isConnected",
            Method::GetAccount => "getAccount",
            Method::GetAddress => "getAddress",
            Method::Connect => "connect",
            Method::RequestAccounts => "requestAccounts",
            Method::Enable => "enable",
            Method::Disconnect => "disconnect",
            Method::Logout => "logout",
        }
    }
}

/// Connect candidates, highest priority first.
pub const CONNECT_METHODS: &[Method] = &[Method::Connect, Method::RequestAccounts, Method::Enable];

/// Account retrieval candidates, tried before [`ACCOUNTS_PROPERTY`].
pub const ACCOUNT_METHODS: &[Method] = &[Method::GetAccount, Method::GetAddress];

pub const DISCONNECT_METHODS: &[Method] = &[Method::Disconnect, Method::Logout];

/// List property read when no account method exists.
pub const ACCOUNTS_PROPERTY: &str = "accounts";

/// Structural view of an injected wallet object.
///
/// Implementations are single-threaded: browser handles are not `Send`.
#[async_trait(?Send)]
pub trait Capability {
    /// Whether the object currently exposes `method` as something callable.
    fn has_method(&self, method: Method) -> bool;

    /// Invoke `method` and await its result (sync results count as resolved).
    async fn call(&self, method: Method) -> Result<Value, ProviderFault>;

    /// Read a plain data property. Absent properties are `None`.
    fn property(&self, _name: &str) -> Option<Value> {
        None
    }
}

/// First method of `candidates` the capability exposes.
pub fn first_available(capability: &dyn Capability, candidates: &[Method]) -> Option<Method> {
    candidates
        .iter()
        .copied()
        .find(|method| capability.has_method(*method))
}

/// JavaScript truthiness of a call result.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Interpret a call or property value as an account address.
///
/// Accepts a string or the first element of a list of strings.
pub fn account_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => items.first().and_then(account_from_value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedCapability;
    use serde_json::json;

    #[test]
    fn test_first_available_respects_priority() {
        let cap = ScriptedCapability::new()
            .returns(Method::Enable, Value::Null)
            .returns(Method::RequestAccounts, Value::Null);
        assert_eq!(first_available(&cap, CONNECT_METHODS), Some(Method::RequestAccounts));
        assert_eq!(first_available(&cap, DISCONNECT_METHODS), None);
    }

    #[test]
    fn test_is_truthy() {
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!("yes")));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!({})));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&Value::Null));
    }

    #[test]
    fn test_account_from_value() {
        assert_eq!(account_from_value(&json!("aleo1abc")), Some("aleo1abc".into()));
        assert_eq!(account_from_value(&json!(["aleo1abc", "aleo1def"])), Some("aleo1abc".into()));
        assert_eq!(account_from_value(&json!([])), None);
        assert_eq!(account_from_value(&json!("")), None);
        assert_eq!(account_from_value(&json!({ "address": "aleo1abc" })), None);
    }
}
