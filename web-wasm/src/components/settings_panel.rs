//! 設定パネルコンポーネント
//!
//! Gemini APIキーを入力し、localStorage に保存する。

use crate::storage;
use leptos::prelude::*;

#[component]
pub fn SettingsPanel(api_key: ReadSignal<String>, set_api_key: WriteSignal<String>) -> impl IntoView {
    let (status, set_status) = signal(String::new());

    let on_save = move |_| {
        let key = api_key.get_untracked();
        match storage::save_api_key(&key) {
            Ok(()) if key.trim().is_empty() => set_status.set("API key cleared".into()),
            Ok(()) => set_status.set("API key saved in this browser".into()),
            Err(e) => set_status.set(format!("Could not store the API key: {}", e)),
        }
    };

    view! {
        <div class="settings-panel">
            <div class="form-group">
                <label for="api-key">"Gemini API Key"</label>
                <input
                    type="password"
                    id="api-key"
                    placeholder="Enter your API key..."
                    prop:value=move || api_key.get()
                    on:input=move |ev| {
                        set_api_key.set(event_target_value(&ev));
                    }
                />
                <div class="api-actions">
                    <button class="btn btn-primary btn-small" on:click=on_save>
                        "Save"
                    </button>
                    <a
                        href="https://aistudio.google.com/app/apikey"
                        target="_blank"
                        rel="noopener noreferrer"
                        class="api-key-link"
                    >
                        "Get an API key →"
                    </a>
                </div>
                <div class="api-key-status">{move || status.get()}</div>
            </div>
        </div>
    }
}
