//! 画面のテキスト表示
//!
//! `Screen` をターミナル向けの文字列にする。出力は呼び出し側で行う。

use address_navigator_common::app::Screen;
use address_navigator_common::{map_search_url, ActivePlan, SavedPlan};
use chrono::DateTime;

/// 住所表（番号・住所・地図リンク）
pub fn render_addresses(plan: &ActivePlan) -> String {
    let mut out = format!("{}件の住所\n", plan.addresses.len());
    for (i, address) in plan.addresses.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}. {} {}, {} {}\n     {}\n",
            i + 1,
            address.street,
            address.house_numbers,
            address.plz,
            address.city,
            map_search_url(address)
        ));
    }
    out
}

/// 作成日（不正な値はそのまま）
pub fn format_created_at(created_at: &str) -> String {
    DateTime::parse_from_rfc3339(created_at)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| created_at.to_string())
}

/// 保存済みプラン一覧
pub fn render_saved_plans(plans: &[SavedPlan]) -> String {
    if plans.is_empty() {
        return "保存済みプランはありません。`address-nav extract <IMAGE>` で作成できます。\n".into();
    }

    let mut out = String::new();
    for plan in plans {
        out.push_str(&format!(
            "{}  {}  ({}件, {})\n",
            plan.id,
            plan.name,
            plan.addresses.len(),
            format_created_at(&plan.created_at)
        ));
    }
    out
}

pub fn render_screen(screen: Screen<'_>) -> String {
    match screen {
        Screen::Loading(message) | Screen::Saving(message) => format!("{}\n", message),
        Screen::Error(error) => format!("❌ {}\n", error.message),
        Screen::Upload { can_show_saved_plans } => {
            let mut out = String::from("画像を指定してください: address-nav extract <IMAGE>\n");
            if can_show_saved_plans {
                out.push_str("保存済みプラン: address-nav plans list\n");
            }
            out
        }
        Screen::Results(plan) => render_addresses(plan),
        Screen::SavedPlans(plans) => render_saved_plans(plans),
        Screen::Empty => String::new(),
    }
}
