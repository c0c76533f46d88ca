//! 抽出結果テーブル
//!
//! 各行は Google マップ検索へのリンク。

use address_navigator_common::{map_search_url, ActivePlan};
use leptos::prelude::*;

#[component]
pub fn AddressTable<FR, FS>(plan: ActivePlan, on_reset: FR, on_save: FS) -> impl IntoView
where
    FR: Fn(()) + 'static + Clone + Send,
    FS: Fn(()) + 'static + Clone + Send,
{
    let count = plan.addresses.len();
    let is_saved = plan.is_saved;

    let rows = plan
        .addresses
        .into_iter()
        .map(|address| {
            let href = map_search_url(&address);
            view! {
                <a class="address-row" href=href target="_blank" rel="noopener noreferrer">
                    <div class="address-street">
                        <span class="pin">"📍"</span>
                        <div>
                            <p class="street">{address.street}</p>
                            <p class="text-muted">{address.house_numbers}</p>
                        </div>
                    </div>
                    <div>{address.plz}</div>
                    <div class="address-city">
                        <span>{address.city}</span>
                        <span class="external">"↗"</span>
                    </div>
                </a>
            }
        })
        .collect_view();

    view! {
        <div class="results">
            <div class="results-side">
                <h3>"Extracted Addresses"</h3>
                <p class="text-muted">
                    {format!("{} addresses found. Click any row to open in Google Maps.", count)}
                </p>
                <img class="preview" src=plan.image_preview_url alt="Uploaded document" />
                <div class="results-actions">
                    {(!is_saved).then(|| view! {
                        <button class="btn btn-primary" on:click=move |_| on_save(())>
                            "Save Plan"
                        </button>
                    })}
                    <button class="btn btn-secondary" on:click=move |_| on_reset(())>
                        {if is_saved { "Back to Saved Plans" } else { "Start Over" }}
                    </button>
                </div>
            </div>
            <div class="address-table">
                <div class="address-header">
                    <div>"Street & House No."</div>
                    <div>"Postal Code"</div>
                    <div>"City"</div>
                </div>
                <div class="address-body">{rows}</div>
            </div>
        </div>
    }
}
