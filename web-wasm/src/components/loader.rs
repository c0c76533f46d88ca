//! 処理中表示

use leptos::prelude::*;

#[component]
pub fn Loader(message: &'static str) -> impl IntoView {
    view! {
        <div class="loader">
            <div class="spinner"></div>
            <p class="loader-text">{message}</p>
        </div>
    }
}
