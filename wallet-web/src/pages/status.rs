//! Wallet Status Page - Show connected wallet info

use leptos::prelude::*;
use shared::utils::display_address;

use crate::state::wallet::use_wallet_context;

#[component]
pub fn StatusPage() -> impl IntoView {
    let wallet_ctx = use_wallet_context();

    let wallet_name = move || {
        wallet_ctx
            .provider()
            .map(|id| wallet_ctx.display_name(&id))
            .unwrap_or_default()
    };

    // connected without an account means the wallet never told us one
    let account = move || {
        wallet_ctx
            .account()
            .map(|a| display_address(&a))
            .unwrap_or_else(|| "Unavailable".to_string())
    };

    let on_disconnect = move |_| wallet_ctx.disconnect();

    view! {
        <div class="card">
            <p class="label">"Connected to:"</p>
            <p class="value">{wallet_name}</p>

            <p class="label">"Account:"</p>
            <p class="value address">{account}</p>

            <button class="btn btn-danger" on:click=on_disconnect>
                "Disconnect Wallet"
            </button>
        </div>
    }
}
