//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <span class="header-icon">"🗺"</span>
            <h1>"Address Map Navigator"</h1>
        </header>
    }
}
