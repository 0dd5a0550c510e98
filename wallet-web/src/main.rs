//! Aleo Wallet Helper
//!
//! Browser front-end for the wallet adapter: detects injected Aleo wallets,
//! restores an existing session, and lets the user connect or disconnect.

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

pub mod app;
pub mod pages;
pub mod services;
pub mod state;

use app::App;

#[wasm_bindgen(start)]
pub fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Initialize logger
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Aleo wallet helper starting...");

    leptos::mount::mount_to_body(|| view! { <App/> });
}
