//! サブコマンドの実行

use crate::cli::SaveMode;
use crate::codec::ImageFileCodec;
use crate::config::Config;
use crate::error::{NavigatorError, Result};
use crate::gemini::GeminiClient;
use crate::render::{render_saved_plans, render_screen};
use crate::storage::FileStore;
use address_navigator_common::app::{DELETE_CONFIRMATION, LOADING_MESSAGE, SAVING_MESSAGE};
use address_navigator_common::{AddressExtractor, Controller, PlanStore};
use chrono::{Local, Utc};
use dialoguer::{Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

type PlansController = Controller<(), ImageFileCodec, FileStore>;

fn plans_controller(data_dir: &Path) -> PlansController {
    Controller::new((), ImageFileCodec, PlanStore::new(FileStore::new(data_dir)))
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// 画像から抽出 → 表示 → 保存
pub async fn extract(config: &Config, data_dir: &Path, image: &Path, mode: SaveMode) -> Result<()> {
    if !image.is_file() {
        return Err(NavigatorError::FileNotFound(image.display().to_string()));
    }

    let client = GeminiClient::from_config(config)?;
    tracing::info!(model = client.model(), image = %image.display(), "starting extraction");
    let store = PlanStore::new(FileStore::new(data_dir));
    let mut controller = Controller::new(client, ImageFileCodec, store);

    println!("📍 address-nav - 住所抽出\n");
    extract_with(&mut controller, image, mode).await
}

/// コントローラを使った抽出・保存の流れ
pub async fn extract_with<X: AddressExtractor>(
    controller: &mut Controller<X, ImageFileCodec, FileStore>,
    image: &Path,
    mode: SaveMode,
) -> Result<()> {
    let pb = spinner(LOADING_MESSAGE);
    controller.upload_image(image).await;
    pb.finish_and_clear();

    if let Some(error) = controller.state().error() {
        return Err(NavigatorError::Failed(error.message.clone()));
    }
    print!("{}", render_screen(controller.state().screen()));

    if !controller.request_save(Local::now().naive_local()) {
        return Ok(());
    }
    let name = match mode {
        SaveMode::Skip => {
            controller.cancel_save();
            return Ok(());
        }
        SaveMode::Named(name) => name,
        SaveMode::Ask => match prompt_plan_name(controller.state().save_prompt().unwrap_or_default())? {
            Some(name) => name,
            None => {
                controller.cancel_save();
                return Ok(());
            }
        },
    };

    let pb = spinner(SAVING_MESSAGE);
    let started = controller.confirm_save(&name, Utc::now()).await;
    pb.finish_and_clear();

    if !started {
        return Err(NavigatorError::Failed("プラン名が空です".into()));
    }
    if let Some(error) = controller.state().error() {
        return Err(NavigatorError::Failed(error.message.clone()));
    }
    if let Some(plan) = controller.state().saved_plans().first() {
        println!("\n✔ プランを保存しました: {} (ID: {})", plan.name, plan.id);
    }
    Ok(())
}

/// 保存確認と名前入力。保存しないなら None
fn prompt_plan_name(default_name: &str) -> Result<Option<String>> {
    let save = Confirm::new()
        .with_prompt("Save this plan?")
        .default(true)
        .interact()?;
    if !save {
        return Ok(None);
    }

    let name: String = Input::new()
        .with_prompt("Plan name")
        .with_initial_text(default_name)
        .validate_with(|input: &String| {
            if input.trim().is_empty() {
                Err("name must not be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    Ok(Some(name))
}

pub fn list_plans(data_dir: &Path) -> Result<()> {
    let controller = plans_controller(data_dir);
    print!("{}", render_saved_plans(controller.state().saved_plans()));
    Ok(())
}

pub fn show_plan(data_dir: &Path, id: &str) -> Result<()> {
    let mut controller = plans_controller(data_dir);
    if !controller.view_plan(id) {
        return Err(NavigatorError::PlanNotFound(id.to_string()));
    }
    print!("{}", render_screen(controller.state().screen()));
    Ok(())
}

pub fn delete_plan(data_dir: &Path, id: &str, yes: bool) -> Result<()> {
    let mut controller = plans_controller(data_dir);
    let Some(plan) = controller.state().saved_plans().iter().find(|p| p.id == id) else {
        return Err(NavigatorError::PlanNotFound(id.to_string()));
    };
    let name = plan.name.clone();

    let confirmed = yes
        || Confirm::new()
            .with_prompt(format!("{} ({})", DELETE_CONFIRMATION, name))
            .default(false)
            .interact()?;

    if let Some(alert) = controller.delete_plan(id, || confirmed) {
        return Err(NavigatorError::Failed(alert));
    }
    if confirmed {
        println!("✔ 削除しました: {}", name);
    }
    Ok(())
}

pub fn configure(
    mut config: Config,
    set_api_key: Option<String>,
    set_model: Option<String>,
    show: bool,
) -> Result<()> {
    if let Some(key) = set_api_key {
        config.set_api_key(key)?;
        println!("✔ APIキーを設定しました");
    }

    if let Some(model) = set_model {
        config.set_model(model)?;
        println!("✔ モデルを設定しました");
    }

    if show {
        println!("設定:");
        println!("  モデル: {}", config.model);
        println!("  タイムアウト: {}秒", config.timeout_seconds);
        println!("  APIキー: {}", if config.get_api_key().is_ok() { "設定済み" } else { "未設定" });
        println!("  保存先: {}", config.resolve_data_dir(None)?.display());
    }
    Ok(())
}
