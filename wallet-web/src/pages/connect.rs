//! Connect Page - one button per registered Aleo wallet

use leptos::prelude::*;

use crate::state::wallet::use_wallet_context;

#[component]
pub fn ConnectPage() -> impl IntoView {
    let wallet_ctx = use_wallet_context();

    let buttons = wallet_ctx
        .providers()
        .into_iter()
        .map(|provider| {
            let id = provider.id.clone();
            let detected_id = provider.id.clone();
            let on_connect = move |_| wallet_ctx.connect(id.clone());

            view! {
                <button
                    class="btn wallet-btn"
                    disabled=move || wallet_ctx.is_connecting()
                    on:click=on_connect
                >
                    {format!("Connect {}", provider.display_name)}
                    {move || (!wallet_ctx.is_present(&detected_id)).then(|| view! {
                        <span class="wallet-missing">" (not detected)"</span>
                    })}
                </button>
            }
        })
        .collect_view();

    view! {
        <div class="card">
            <h2 class="card-title">"Connect Wallet"</h2>
            <div class="wallet-buttons">
                {buttons}
            </div>
            <Show when=move || wallet_ctx.is_connecting()>
                <p class="connecting-hint">
                    "Connecting... Please check your wallet extension for prompts."
                </p>
            </Show>
        </div>
    }
}
