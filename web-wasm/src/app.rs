//! メインアプリケーションコンポーネント
//!
//! 状態は共通ライブラリの `AppState` を1つのシグナルで持つ。
//! 非同期処理は `begin_*` で状態を更新してから spawn し、完了時に `finish_*` を適用する。

use crate::api::gemini::GeminiFetchClient;
use crate::codec::CanvasCodec;
use crate::components::{
    address_table::AddressTable,
    error_message::ErrorMessage,
    header::Header,
    loader::Loader,
    save_plan_modal::SavePlanModal,
    saved_plans::SavedPlansList,
    settings_panel::SettingsPanel,
    upload_area::UploadArea,
};
use crate::storage::{self, plan_store};
use address_navigator_common::app::DELETE_CONFIRMATION;
use address_navigator_common::{run_extraction, run_save, AppState, Screen};
use chrono::{Local, Utc};
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::File;

#[component]
pub fn App() -> impl IntoView {
    let state = RwSignal::new(AppState::start(plan_store().list()));
    let (api_key, set_api_key) = signal(storage::load_api_key());

    // アップロード → 抽出
    let on_file = move |file: File| {
        if !state.try_update(|s| s.begin_extraction()).unwrap_or(false) {
            return;
        }
        let client = GeminiFetchClient::new(api_key.get_untracked().trim());
        spawn_local(async move {
            let outcome = run_extraction(&client, &CanvasCodec, &file).await;
            state.update(|s| s.finish_extraction(outcome));
        });
    };

    let on_open_save = move |_: ()| {
        state.update(|s| {
            s.open_save_prompt(Local::now().naive_local());
        });
    };

    let on_cancel_save = move |_: ()| state.update(|s| s.cancel_save_prompt());

    let on_confirm_save = move |name: String| {
        let Some(pending) = state.try_update(|s| s.begin_save(&name)).flatten() else {
            return;
        };
        spawn_local(async move {
            let outcome = run_save(&CanvasCodec, &plan_store(), pending, Utc::now()).await;
            state.update(|s| s.finish_save(outcome));
        });
    };

    let on_view = move |id: String| {
        state.update(|s| {
            s.view_plan(&id);
        });
    };

    let on_delete = move |id: String| {
        if !gloo::dialogs::confirm(DELETE_CONFIRMATION) {
            return;
        }
        let outcome = plan_store().delete(&id);
        if let Some(alert) = state.try_update(|s| s.finish_delete(outcome)).flatten() {
            gloo::dialogs::alert(&alert);
        }
    };

    let on_reset = move |_: ()| state.update(|s| s.reset());
    let on_retry = move |_: ()| state.update(|s| s.retry());
    let on_show_upload = move |_: ()| state.update(|s| s.show_upload());
    let on_show_saved_plans = move |_: ()| state.update(|s| s.show_saved_plans());

    let content = move || {
        state.with(|s| match s.screen() {
            Screen::Loading(message) | Screen::Saving(message) => {
                view! { <Loader message=message /> }.into_any()
            }
            Screen::Error(error) => view! {
                <ErrorMessage
                    message=error.message.clone()
                    retry_text=error.retry_label()
                    on_retry=on_retry
                />
            }
            .into_any(),
            Screen::Upload { can_show_saved_plans } => view! {
                <div class="upload-view">
                    <div class="intro">
                        <h2>"Upload New Address Plan"</h2>
                        <p class="text-muted">"Our AI will extract addresses and generate navigation links for you."</p>
                    </div>
                    <UploadArea api_key=api_key on_file=on_file />
                    {can_show_saved_plans.then(|| view! {
                        <div class="back-link">
                            <button class="btn btn-link" on:click=move |_| on_show_saved_plans(())>
                                "← Back to Saved Plans"
                            </button>
                        </div>
                    })}
                </div>
            }
            .into_any(),
            Screen::Results(plan) => view! {
                <AddressTable plan=plan.clone() on_reset=on_reset on_save=on_open_save />
            }
            .into_any(),
            Screen::SavedPlans(plans) => view! {
                <SavedPlansList
                    plans=plans.to_vec()
                    on_view=on_view
                    on_delete=on_delete
                    on_add_new=on_show_upload
                />
            }
            .into_any(),
            Screen::Empty => ().into_any(),
        })
    };

    let save_prompt = Memo::new(move |_| state.with(|s| s.save_prompt().map(str::to_string)));
    let year = js_sys::Date::new_0().get_full_year();

    view! {
        <div class="container">
            <Header />
            <SettingsPanel api_key=api_key set_api_key=set_api_key />
            <main class="main">{content}</main>
            <footer class="footer">
                <p>{format!("© {} Address Map Navigator. Powered by AI.", year)}</p>
            </footer>
            {move || save_prompt.get().map(|default_name| view! {
                <SavePlanModal
                    default_name=default_name
                    on_cancel=on_cancel_save
                    on_save=on_confirm_save
                />
            })}
        </div>
    }
}
