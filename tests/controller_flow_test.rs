//! 抽出 → 保存 → 一覧 → 削除 の一連の流れ（実画像処理・ファイルストア・固定の抽出結果）

use address_navigator::cli::SaveMode;
use address_navigator::codec::ImageFileCodec;
use address_navigator::commands::extract_with;
use address_navigator::error::NavigatorError;
use address_navigator::storage::FileStore;
use address_navigator_common::app::{Screen, View};
use address_navigator_common::image::decode_data_url;
use address_navigator_common::parser::{parse_addresses, user_facing_extraction_error};
use address_navigator_common::{Address, AddressExtractor, Controller, PlanStore, Result};
use image::{ImageFormat, Rgb, RgbImage};
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/// 固定のモデル応答テキストを返す
struct CannedExtractor(&'static str);

impl AddressExtractor for CannedExtractor {
    async fn extract_addresses(&self, base64_image: &str, mime_type: &str) -> Result<Vec<Address>> {
        assert_eq!(mime_type, "image/png");
        assert!(!base64_image.is_empty());
        parse_addresses(self.0).map_err(user_facing_extraction_error)
    }
}

const BERLIN: &str = r#"[{"plz":"10115","street":"Teststr.","houseNumbers":"1,2","city":"Berlin"}]"#;

fn scan(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("plan.png");
    let img = RgbImage::from_pixel(1600, 800, Rgb([240, 240, 240]));
    img.save_with_format(&path, ImageFormat::Png).expect("write png");
    path
}

fn controller(
    data_dir: &Path,
    response: &'static str,
) -> Controller<CannedExtractor, ImageFileCodec, FileStore> {
    Controller::new(
        CannedExtractor(response),
        ImageFileCodec,
        PlanStore::new(FileStore::new(data_dir)),
    )
}

#[tokio::test]
async fn test_end_to_end_with_files() {
    let dir = tempdir().unwrap();
    let image = scan(&dir);
    let data_dir = dir.path().join("data");

    let mut controller = controller(&data_dir, BERLIN);
    assert_eq!(controller.state().view(), View::Upload);

    extract_with(&mut controller, &image, SaveMode::Named("Plan A".into()))
        .await
        .unwrap();

    let Screen::SavedPlans(plans) = controller.state().screen() else {
        panic!("expected saved plans screen");
    };
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0].name, "Plan A");
    let numbers: Vec<&str> = plans[0].addresses.iter().map(|a| a.house_numbers.as_str()).collect();
    assert_eq!(numbers, vec!["1", "2"]);

    // サムネイルは 400x200 の JPEG
    let thumb = decode_data_url(&plans[0].image_preview_url).unwrap();
    assert_eq!(image::guess_format(&thumb).unwrap(), ImageFormat::Jpeg);
    let decoded = image::load_from_memory(&thumb).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (400, 200));

    // 再起動すると一覧画面から始まる
    let id = plans[0].id.clone();
    let mut restarted = self::controller(&data_dir, BERLIN);
    assert_eq!(restarted.state().view(), View::SavedPlans);

    assert!(restarted.delete_plan(&id, || true).is_none());
    assert!(restarted.state().saved_plans().is_empty());
    assert!(self::controller(&data_dir, BERLIN).state().saved_plans().is_empty());
}

#[tokio::test]
async fn test_skip_save_leaves_store_untouched() {
    let dir = tempdir().unwrap();
    let image = scan(&dir);
    let data_dir = dir.path().join("data");

    let mut controller = controller(&data_dir, BERLIN);
    extract_with(&mut controller, &image, SaveMode::Skip).await.unwrap();

    assert_eq!(controller.state().view(), View::Results);
    assert!(controller.state().save_prompt().is_none());
    assert!(controller.store().list().is_empty());
}

#[tokio::test]
async fn test_invalid_model_output_is_reported() {
    let dir = tempdir().unwrap();
    let image = scan(&dir);

    let mut controller = controller(&dir.path().join("data"), r#"[{"plz":"10115"}]"#);
    let result = extract_with(&mut controller, &image, SaveMode::Skip).await;

    match result {
        Err(NavigatorError::Failed(message)) => assert!(message.starts_with("Failed to extract addresses")),
        other => panic!("unexpected: {:?}", other),
    }
    assert!(controller.state().active_plan().is_none());
}
