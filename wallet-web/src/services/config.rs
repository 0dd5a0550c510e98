//! Page-supplied adapter configuration
//!
//! A page may set `window.__WALLET_ADAPTER_CONFIG__` before the wasm module
//! starts, either as a JSON string or as a plain object.

use js_sys::Reflect;
use lib_adapter::{AdapterConfig, AdapterError};
use wasm_bindgen::JsValue;

pub const CONFIG_GLOBAL: &str = "__WALLET_ADAPTER_CONFIG__";

pub fn load_config() -> AdapterConfig {
    let Some(raw) = web_sys::window()
        .and_then(|window| Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)).ok())
        .filter(|value| !value.is_undefined() && !value.is_null())
    else {
        return AdapterConfig::default();
    };

    match parse(raw) {
        Ok(config) => {
            log::info!("Loaded adapter config with {} providers", config.providers.len());
            config
        }
        Err(e) => {
            log::warn!("{}, using defaults", e);
            AdapterConfig::default()
        }
    }
}

fn parse(raw: JsValue) -> Result<AdapterConfig, AdapterError> {
    if let Some(json) = raw.as_string() {
        return AdapterConfig::from_json(&json);
    }

    let config: AdapterConfig = serde_wasm_bindgen::from_value(raw)
        .map_err(|e| AdapterError::Config(format!("invalid {}: {}", CONFIG_GLOBAL, e)))?;
    config.validate()?;
    Ok(config)
}
