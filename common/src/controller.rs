//! コントローラ
//!
//! `AppState` とサービス（抽出・画像・ストア）を持ち、非同期の一連の処理を順に実行する。
//! CLIとテストはこれを使う。WASM版は `run_extraction` / `run_save` を直接呼び、
//! 状態はシグナル側の `AppState` に反映する。

use crate::app::{AppState, PendingSave};
use crate::error::{Error, Result};
use crate::image::{split_data_url, DEFAULT_THUMBNAIL_QUALITY, THUMBNAIL_MAX_HEIGHT, THUMBNAIL_MAX_WIDTH};
use crate::services::{AddressExtractor, ImageCodec, KeyValueStore};
use crate::store::PlanStore;
use crate::types::{Address, SavedPlan};
use chrono::{DateTime, NaiveDateTime, Utc};

/// ファイル読み込み → AI抽出
///
/// 成功時は (プレビュー用Data URL, 抽出結果) を返す。行の展開は `AppState` が行う。
pub async fn run_extraction<X, C>(
    extractor: &X,
    codec: &C,
    source: &C::Source,
) -> Result<(String, Vec<Address>)>
where
    X: AddressExtractor,
    C: ImageCodec,
{
    let data_url = codec.encode_file(source).await?;
    let (mime_type, base64_image) = split_data_url(&data_url)
        .ok_or_else(|| Error::Decode("file could not be encoded as a data URL".into()))?;
    tracing::info!(mime_type, bytes = base64_image.len(), "extracting addresses");

    let addresses = extractor.extract_addresses(base64_image, mime_type).await?;
    Ok((data_url, addresses))
}

/// サムネイル生成 → プラン作成 → ストアへ追加
pub async fn run_save<C, K>(
    codec: &C,
    store: &PlanStore<K>,
    pending: PendingSave,
    now: DateTime<Utc>,
) -> Result<Vec<SavedPlan>>
where
    C: ImageCodec,
    K: KeyValueStore,
{
    let thumbnail = codec
        .make_thumbnail(
            &pending.image_preview_url,
            THUMBNAIL_MAX_WIDTH,
            THUMBNAIL_MAX_HEIGHT,
            DEFAULT_THUMBNAIL_QUALITY,
        )
        .await?;

    let plan = pending.into_plan(thumbnail, now, &store.list());
    tracing::info!(id = %plan.id, name = %plan.name, rows = plan.addresses.len(), "saving plan");
    store.add(plan)
}

/// アプリケーションコントローラ
pub struct Controller<X, C, K> {
    state: AppState,
    extractor: X,
    codec: C,
    store: PlanStore<K>,
}

impl<X, C, K: KeyValueStore> Controller<X, C, K> {
    /// 保存済みプランを読み込んで起動
    pub fn new(extractor: X, codec: C, store: PlanStore<K>) -> Self {
        let state = AppState::start(store.list());
        Self {
            state,
            extractor,
            codec,
            store,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &PlanStore<K> {
        &self.store
    }

    /// 保存名入力を開く
    pub fn request_save(&mut self, now: NaiveDateTime) -> bool {
        self.state.open_save_prompt(now)
    }

    pub fn cancel_save(&mut self) {
        self.state.cancel_save_prompt();
    }

    pub fn view_plan(&mut self, id: &str) -> bool {
        self.state.view_plan(id)
    }

    /// 確認のうえ削除
    ///
    /// 失敗時はアラート文言を返す（エラー表示には出さない）。
    pub fn delete_plan<F>(&mut self, id: &str, confirm: F) -> Option<String>
    where
        F: FnOnce() -> bool,
    {
        if !confirm() {
            return None;
        }
        let outcome = self.store.delete(id);
        self.state.finish_delete(outcome)
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }

    pub fn retry(&mut self) {
        self.state.retry();
    }

    pub fn show_upload(&mut self) {
        self.state.show_upload();
    }

    pub fn show_saved_plans(&mut self) {
        self.state.show_saved_plans();
    }
}

impl<X, C, K> Controller<X, C, K>
where
    X: AddressExtractor,
    C: ImageCodec,
    K: KeyValueStore,
{
    /// 画像をアップロードして抽出
    pub async fn upload_image(&mut self, source: &C::Source) {
        if !self.state.begin_extraction() {
            tracing::debug!("upload ignored while busy");
            return;
        }
        let outcome = run_extraction(&self.extractor, &self.codec, source).await;
        self.state.finish_extraction(outcome);
    }
}

impl<X, C, K> Controller<X, C, K>
where
    C: ImageCodec,
    K: KeyValueStore,
{
    /// 名前を確定して保存
    ///
    /// 名前が空、または保存できる状態でなければ何もせず false。
    pub async fn confirm_save(&mut self, name: &str, now: DateTime<Utc>) -> bool {
        let Some(pending) = self.state.begin_save(name) else {
            return false;
        };
        let outcome = run_save(&self.codec, &self.store, pending, now).await;
        self.state.finish_save(outcome);
        true
    }
}
