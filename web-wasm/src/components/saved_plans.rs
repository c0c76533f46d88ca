//! 保存済みプラン一覧

use address_navigator_common::SavedPlan;
use leptos::prelude::*;
use wasm_bindgen::JsValue;

/// 作成日をブラウザのロケールで表示
fn saved_on(created_at: &str) -> String {
    let date = js_sys::Date::new(&JsValue::from_str(created_at));
    String::from(date.to_locale_date_string("default", &JsValue::UNDEFINED))
}

#[component]
pub fn SavedPlansList<FV, FD, FA>(
    plans: Vec<SavedPlan>,
    on_view: FV,
    on_delete: FD,
    on_add_new: FA,
) -> impl IntoView
where
    FV: Fn(String) + 'static + Clone + Send,
    FD: Fn(String) + 'static + Clone + Send,
    FA: Fn(()) + 'static + Clone + Send,
{
    let is_empty = plans.is_empty();

    let cards = plans
        .into_iter()
        .map(|plan| {
            let on_view = on_view.clone();
            let on_delete = on_delete.clone();
            let view_id = plan.id.clone();
            let delete_id = plan.id.clone();
            view! {
                <div class="plan-card">
                    <img src=plan.image_preview_url alt=plan.name.clone() />
                    <div class="plan-card-body">
                        <h3 title=plan.name.clone()>{plan.name.clone()}</h3>
                        <p class="text-muted">{format!("{} addresses", plan.addresses.len())}</p>
                        <p class="text-small">{format!("Saved on: {}", saved_on(&plan.created_at))}</p>
                    </div>
                    <div class="plan-card-actions">
                        <button class="btn btn-primary" on:click=move |_| on_view(view_id.clone())>
                            "View"
                        </button>
                        <button class="btn btn-danger" title="Delete Plan" on:click=move |_| on_delete(delete_id.clone())>
                            "🗑"
                        </button>
                    </div>
                </div>
            }
        })
        .collect_view();

    let content = if is_empty {
        view! {
            <div class="empty-state">
                <h3>"No saved plans yet."</h3>
                <p class="text-muted">"Upload a document to get started."</p>
            </div>
        }
        .into_any()
    } else {
        view! { <div class="plan-grid">{cards}</div> }.into_any()
    };

    view! {
        <div class="saved-plans">
            <div class="saved-plans-header">
                <div>
                    <h2>"Saved Plans"</h2>
                    <p class="text-muted">"Select a plan to view its addresses or upload a new one."</p>
                </div>
                <button class="btn btn-primary" on:click=move |_| on_add_new(())>
                    "Upload New Plan"
                </button>
            </div>
            {content}
        </div>
    }
}
