//! エラー表示コンポーネント

use leptos::prelude::*;

#[component]
pub fn ErrorMessage<F>(message: String, retry_text: &'static str, on_retry: F) -> impl IntoView
where
    F: Fn(()) + 'static + Clone + Send,
{
    view! {
        <div class="error-panel" role="alert">
            <div class="error-icon">"⚠"</div>
            <h3>"An Error Occurred"</h3>
            <p class="error-text">{message}</p>
            <button class="btn btn-primary" on:click=move |_| on_retry(())>
                {retry_text}
            </button>
        </div>
    }
}
