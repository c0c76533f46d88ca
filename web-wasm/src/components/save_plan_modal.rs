//! 保存名入力ダイアログ

use leptos::prelude::*;
use web_sys::KeyboardEvent;

#[component]
pub fn SavePlanModal<FC, FS>(default_name: String, on_cancel: FC, on_save: FS) -> impl IntoView
where
    FC: Fn(()) + 'static + Clone + Send,
    FS: Fn(String) + 'static + Clone + Send,
{
    let (name, set_name) = signal(default_name);
    let is_blank = move || name.get().trim().is_empty();

    let submit = move || {
        let value = name.get_untracked();
        if !value.trim().is_empty() {
            on_save(value);
        }
    };

    let on_keydown = {
        let submit = submit.clone();
        move |ev: KeyboardEvent| {
            if ev.key() == "Enter" {
                submit();
            }
        }
    };

    let on_overlay_click = {
        let on_cancel = on_cancel.clone();
        move |_| on_cancel(())
    };

    view! {
        <div class="modal-overlay" role="dialog" aria-modal="true" on:click=on_overlay_click>
            <div class="modal" on:click=|ev| ev.stop_propagation()>
                <h2>"Save Your Plan"</h2>
                <p class="text-muted">"Enter a name for this address plan to save it for later."</p>
                <label for="plan-name">"Plan Name"</label>
                <input
                    type="text"
                    id="plan-name"
                    autofocus=true
                    prop:value=move || name.get()
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                    on:keydown=on_keydown
                />
                <div class="modal-actions">
                    <button class="btn btn-secondary" on:click=move |_| on_cancel(())>
                        "Cancel"
                    </button>
                    <button class="btn btn-primary" disabled=is_blank on:click=move |_| submit()>
                        "Save Plan"
                    </button>
                </div>
            </div>
        </div>
    }
}
