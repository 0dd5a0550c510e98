//! Aleo Wallet Web App - Leptos Frontend

use leptos::prelude::*;

use crate::pages::{ConnectPage, StatusPage};
use crate::state::wallet::provide_wallet_context;

#[component]
pub fn App() -> impl IntoView {
    let wallet_ctx = provide_wallet_context();

    view! {
        <div class="app-container">
            <h1>"Aleo Wallet Integration"</h1>

            {move || wallet_ctx.error_message().map(|message| view! {
                <div class="error-message">{message}</div>
            })}

            <Show
                when=move || wallet_ctx.is_connected()
                fallback=|| view! { <ConnectPage/> }
            >
                <StatusPage/>
            </Show>

            <Troubleshooting/>
        </div>
    }
}

#[component]
fn Troubleshooting() -> impl IntoView {
    view! {
        <div class="card troubleshooting">
            <h3>"Troubleshooting"</h3>
            <ul>
                <li>"Make sure the wallet extension is installed and enabled"</li>
                <li>"Unlock the wallet before connecting"</li>
                <li>"Refresh the page after installing a new wallet"</li>
                <li>"Allow pop-ups so the wallet can ask for approval"</li>
            </ul>
        </div>
    }
}
