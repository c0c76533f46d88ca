//! アップロードエリアコンポーネント
//!
//! クリックで選択、またはドラッグ&ドロップ。先頭の1ファイルだけ扱う。

use leptos::prelude::*;
use web_sys::{DragEvent, File, HtmlInputElement};

#[component]
pub fn UploadArea<F>(api_key: ReadSignal<String>, on_file: F) -> impl IntoView
where
    F: Fn(File) + 'static + Clone + Send,
{
    let (is_dragover, set_is_dragover) = signal(false);
    let is_enabled = move || !api_key.get().trim().is_empty();

    let on_drop = {
        let on_file = on_file.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            ev.stop_propagation();
            set_is_dragover.set(false);

            if !is_enabled() {
                return;
            }
            if let Some(file) = ev.data_transfer().and_then(|dt| dt.files()).and_then(|files| files.get(0)) {
                on_file(file);
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        if is_enabled() {
            set_is_dragover.set(true);
        }
    };

    let on_dragleave = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(false);
    };

    let on_change = move |ev: web_sys::Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            on_file(file);
        }
        // 同じファイルを選び直しても change が発火するように
        input.set_value("");
    };

    view! {
        <label
            for="file-upload"
            class=move || {
                let mut classes = vec!["upload-area"];
                if is_dragover.get() {
                    classes.push("dragover");
                }
                if !is_enabled() {
                    classes.push("disabled");
                }
                classes.join(" ")
            }
            on:drop=on_drop
            on:dragenter=on_dragover
            on:dragover=on_dragover
            on:dragleave=on_dragleave
        >
            <Show
                when=is_enabled
                fallback=|| view! {
                    <div class="upload-icon">"🔑"</div>
                    <p>"Enter your Gemini API key above to upload a document"</p>
                }
            >
                <div class="upload-icon">"⬆"</div>
                <p><span class="accent">"Click to upload"</span>" or drag and drop"</p>
                <p class="text-muted">"PNG, JPG, or WEBP"</p>
            </Show>
            <input
                id="file-upload"
                name="file-upload"
                type="file"
                class="sr-only"
                accept="image/*"
                disabled=move || !is_enabled()
                on:change=on_change
            />
        </label>
    }
}
