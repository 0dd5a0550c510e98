//! Browser Wallet Interop via wasm-bindgen
//!
//! Wraps the objects Aleo wallet extensions inject into `window` so the
//! adapter core can probe and call them. Nothing here knows which wallet is
//! which; the registry in the core maps ids to global keys.

use std::rc::Rc;

use async_trait::async_trait;
use js_sys::{Function, Promise, Reflect};
use lib_adapter::{Capability, Environment, Method, ProviderFault};
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

// ============================================================================
// CAPABILITY OBJECT
// ============================================================================

/// A wallet object found at `window[global_key]`.
pub struct JsCapability {
    global_key: String,
    object: JsValue,
}

impl JsCapability {
    pub fn new(global_key: impl Into<String>, object: JsValue) -> Self {
        Self {
            global_key: global_key.into(),
            object,
        }
    }

    fn member(&self, name: &str) -> Option<JsValue> {
        Reflect::get(&self.object, &JsValue::from_str(name))
            .ok()
            .filter(|value| !value.is_undefined() && !value.is_null())
    }

    fn function(&self, method: Method) -> Option<Function> {
        self.member(method.js_name())?.dyn_into::<Function>().ok()
    }
}

#[async_trait(?Send)]
impl Capability for JsCapability {
    fn has_method(&self, method: Method) -> bool {
        self.function(method).is_some()
    }

    async fn call(&self, method: Method) -> Result<Value, ProviderFault> {
        let function = self.function(method).ok_or_else(|| {
            ProviderFault::new(format!("{}.{} is not a function", self.global_key, method.js_name()))
        })?;

        // `this` must be the wallet object; some extensions rely on it.
        let returned = function.call0(&self.object).map_err(fault_from_js)?;

        // Promise.resolve() passes promises through and wraps plain values,
        // so sync and async providers settle the same way.
        let settled = JsFuture::from(Promise::resolve(&returned))
            .await
            .map_err(fault_from_js)?;

        Ok(to_json(&settled))
    }

    fn property(&self, name: &str) -> Option<Value> {
        self.member(name).map(|value| to_json(&value))
    }
}

/// Convert a settled JS value into JSON; values serde cannot read become
/// their string form, or null.
fn to_json(value: &JsValue) -> Value {
    if value.is_undefined() || value.is_null() {
        return Value::Null;
    }
    serde_wasm_bindgen::from_value(value.clone())
        .unwrap_or_else(|_| value.as_string().map(Value::String).unwrap_or(Value::Null))
}

/// Extract a message from whatever the provider threw.
fn fault_from_js(thrown: JsValue) -> ProviderFault {
    if let Some(error) = thrown.dyn_ref::<js_sys::Error>() {
        return ProviderFault::new(String::from(error.message()));
    }
    if let Some(message) = thrown.as_string() {
        return ProviderFault::new(message);
    }
    Reflect::get(&thrown, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
        .map(ProviderFault::new)
        .unwrap_or_else(ProviderFault::silent)
}

// ============================================================================
// GLOBAL NAMESPACE
// ============================================================================

/// Looks capability objects up on `window`.
pub struct WindowEnvironment;

impl Environment for WindowEnvironment {
    fn capability(&self, global_key: &str) -> Option<Rc<dyn Capability>> {
        let window = web_sys::window()?;
        let object = Reflect::get(&window, &JsValue::from_str(global_key)).ok()?;
        if !object.is_truthy() {
            return None;
        }
        Some(Rc::new(JsCapability::new(global_key, object)))
    }
}
