//! アプリケーション状態と状態遷移
//!
//! 画面（Upload / Results / SavedPlans）と、それに直交する Loading / Saving フラグ、
//! エラー表示、保存名入力ダイアログを1つの構造体で持つ。
//!
//! 非同期処理を挟む遷移は `begin_*` / `finish_*` に分かれている。
//! `begin_*` がフラグを立て、`finish_*` が成功・失敗どちらでも必ず下ろす。
//! 非同期呼び出しの間に可変借用を保持できないUI（Leptos）はこの2つで処理を挟む。

use crate::error::Error;
use crate::rows::expand_house_numbers;
use crate::types::{ActivePlan, Address, SavedPlan};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

pub const LOADING_MESSAGE: &str = "Analyzing document and extracting addresses...";
pub const SAVING_MESSAGE: &str = "Saving your plan...";
/// 保存失敗メッセージの接頭辞
pub const SAVE_FAILED_PREFIX: &str = "Save Failed:";
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this plan?";

/// 基本画面
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Upload,
    Results,
    SavedPlans,
}

/// エラー表示の種類（再試行ボタンの挙動が変わる）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 抽出・読み込み失敗。再試行でアップロード画面へ
    General,
    /// 保存失敗。再試行で結果画面に戻る
    Save,
}

/// エラー表示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
}

impl AppError {
    pub fn general(error: &Error) -> Self {
        Self {
            kind: ErrorKind::General,
            message: error.to_string(),
        }
    }

    pub fn save_failed(error: &Error) -> Self {
        let message = error.to_string();
        Self {
            kind: ErrorKind::Save,
            message: format!(
                "{} {}. Please try again.",
                SAVE_FAILED_PREFIX,
                message.trim_end_matches('.')
            ),
        }
    }

    pub fn is_save_failure(&self) -> bool {
        self.kind == ErrorKind::Save
    }

    pub fn retry_label(&self) -> &'static str {
        match self.kind {
            ErrorKind::General => "Upload a different image",
            ErrorKind::Save => "OK",
        }
    }
}

/// 描画すべき内容（優先順: Loading > Saving > Error > 画面）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen<'a> {
    Loading(&'static str),
    Saving(&'static str),
    Error(&'a AppError),
    Upload { can_show_saved_plans: bool },
    Results(&'a ActivePlan),
    SavedPlans(&'a [SavedPlan]),
    /// Results 画面だが表示するプランがない
    Empty,
}

/// 保存処理に渡すデータ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSave {
    pub name: String,
    pub addresses: Vec<Address>,
    pub image_preview_url: String,
}

impl PendingSave {
    /// 新しいプランを作成
    ///
    /// IDはミリ秒タイムスタンプ。既存IDと重なる間は1ずつ進める。
    pub fn into_plan(self, thumbnail_url: String, now: DateTime<Utc>, existing: &[SavedPlan]) -> SavedPlan {
        let mut millis = now.timestamp_millis();
        while existing.iter().any(|plan| plan.id == millis.to_string()) {
            millis += 1;
        }

        SavedPlan {
            id: millis.to_string(),
            name: self.name,
            addresses: self.addresses,
            image_preview_url: thumbnail_url,
            created_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// 保存ダイアログの既定名
pub fn default_plan_name(now: NaiveDateTime) -> String {
    format!("Plan - {}", now.format("%Y-%m-%d %H:%M:%S"))
}

/// アプリケーション状態
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    view: View,
    active_plan: Option<ActivePlan>,
    saved_plans: Vec<SavedPlan>,
    is_loading: bool,
    is_saving: bool,
    error: Option<AppError>,
    /// 保存名入力ダイアログ（開いていれば既定名）
    save_prompt: Option<String>,
}

impl AppState {
    /// 起動時の状態（保存済みがあれば一覧画面から）
    pub fn start(saved_plans: Vec<SavedPlan>) -> Self {
        let view = if saved_plans.is_empty() {
            View::Upload
        } else {
            View::SavedPlans
        };
        Self {
            view,
            saved_plans,
            ..Default::default()
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn active_plan(&self) -> Option<&ActivePlan> {
        self.active_plan.as_ref()
    }

    pub fn saved_plans(&self) -> &[SavedPlan] {
        &self.saved_plans
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_saving(&self) -> bool {
        self.is_saving
    }

    pub fn is_busy(&self) -> bool {
        self.is_loading || self.is_saving
    }

    pub fn error(&self) -> Option<&AppError> {
        self.error.as_ref()
    }

    pub fn save_prompt(&self) -> Option<&str> {
        self.save_prompt.as_deref()
    }

    pub fn screen(&self) -> Screen<'_> {
        if self.is_loading {
            return Screen::Loading(LOADING_MESSAGE);
        }
        if self.is_saving {
            return Screen::Saving(SAVING_MESSAGE);
        }
        if let Some(error) = &self.error {
            return Screen::Error(error);
        }

        match self.view {
            View::Upload => Screen::Upload {
                can_show_saved_plans: !self.saved_plans.is_empty(),
            },
            View::Results => match &self.active_plan {
                Some(plan) => Screen::Results(plan),
                None => Screen::Empty,
            },
            View::SavedPlans => Screen::SavedPlans(&self.saved_plans),
        }
    }

    // =============================================
    // アップロード → 抽出
    // =============================================

    /// 抽出開始。処理中なら false
    pub fn begin_extraction(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        self.is_loading = true;
        self.error = None;
        self.active_plan = None;
        true
    }

    /// 抽出完了
    ///
    /// 成功時は行を展開して結果画面へ。失敗時は画面をそのままにエラー表示。
    pub fn finish_extraction(&mut self, outcome: crate::Result<(String, Vec<Address>)>) {
        self.is_loading = false;

        match outcome {
            Ok((image_preview_url, addresses)) => {
                tracing::debug!(rows = addresses.len(), "extraction finished");
                self.active_plan = Some(ActivePlan {
                    addresses: expand_house_numbers(addresses),
                    image_preview_url,
                    is_saved: false,
                });
                self.view = View::Results;
            }
            Err(e) => {
                self.error = Some(AppError::general(&e));
            }
        }
    }

    // =============================================
    // 保存
    // =============================================

    /// 保存名入力ダイアログを開く（未保存の結果表示中のみ）
    pub fn open_save_prompt(&mut self, now: NaiveDateTime) -> bool {
        let unsaved = self.active_plan.as_ref().is_some_and(|plan| !plan.is_saved);
        if !unsaved || self.is_busy() {
            return false;
        }
        self.save_prompt = Some(default_plan_name(now));
        true
    }

    pub fn cancel_save_prompt(&mut self) {
        self.save_prompt = None;
    }

    /// 保存開始
    ///
    /// 名前は前後空白を除去する。空ならダイアログを開いたまま None。
    /// 保存済みプランの表示中も None（再保存しない）。
    pub fn begin_save(&mut self, name: &str) -> Option<PendingSave> {
        let name = name.trim();
        if name.is_empty() || self.is_busy() {
            return None;
        }
        let plan = self.active_plan.as_ref().filter(|plan| !plan.is_saved)?;

        let pending = PendingSave {
            name: name.to_string(),
            addresses: plan.addresses.clone(),
            image_preview_url: plan.image_preview_url.clone(),
        };
        self.save_prompt = None;
        self.is_saving = true;
        self.error = None;
        Some(pending)
    }

    /// 保存完了
    ///
    /// 失敗時は結果画面に戻り、表示中のプランを保持する。
    pub fn finish_save(&mut self, outcome: crate::Result<Vec<SavedPlan>>) {
        self.is_saving = false;

        match outcome {
            Ok(plans) => {
                self.saved_plans = plans;
                self.active_plan = None;
                self.view = View::SavedPlans;
            }
            Err(e) => {
                self.error = Some(AppError::save_failed(&e));
                self.view = View::Results;
            }
        }
    }

    // =============================================
    // 保存済みプラン
    // =============================================

    /// 保存済みプランを開く
    pub fn view_plan(&mut self, id: &str) -> bool {
        let Some(plan) = self.saved_plans.iter().find(|plan| plan.id == id) else {
            return false;
        };
        self.active_plan = Some(ActivePlan::from_saved(plan));
        self.view = View::Results;
        true
    }

    /// 削除結果を反映。失敗時はアラート文言を返す
    pub fn finish_delete(&mut self, outcome: crate::Result<Vec<SavedPlan>>) -> Option<String> {
        match outcome {
            Ok(plans) => {
                self.saved_plans = plans;
                None
            }
            Err(e) => Some(format!("Delete Failed: {}", e)),
        }
    }

    // =============================================
    // ナビゲーション
    // =============================================

    /// 結果画面から戻る
    pub fn reset(&mut self) {
        self.active_plan = None;
        self.error = None;
        self.is_loading = false;
        self.view = self.home_view();
    }

    /// エラー表示の再試行ボタン
    pub fn retry(&mut self) {
        if let Some(error) = self.error.take() {
            if !error.is_save_failure() {
                self.view = View::Upload;
            }
        }
    }

    pub fn show_upload(&mut self) {
        if self.is_busy() {
            return;
        }
        self.active_plan = None;
        self.view = View::Upload;
    }

    pub fn show_saved_plans(&mut self) {
        if self.is_busy() {
            return;
        }
        self.active_plan = None;
        self.view = View::SavedPlans;
    }

    fn home_view(&self) -> View {
        if self.saved_plans.is_empty() {
            View::Upload
        } else {
            View::SavedPlans
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn address(house_numbers: &str) -> Address {
        Address {
            plz: "10115".into(),
            street: "Teststr.".into(),
            house_numbers: house_numbers.into(),
            city: "Berlin".into(),
        }
    }

    fn saved(id: &str) -> SavedPlan {
        SavedPlan {
            id: id.into(),
            name: format!("Plan {}", id),
            addresses: vec![address("1")],
            image_preview_url: "data:image/jpeg;base64,AA".into(),
            created_at: "2026-10-18T10:00:00.000Z".into(),
        }
    }

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap()
    }

    fn with_results() -> AppState {
        let mut state = AppState::start(vec![]);
        assert!(state.begin_extraction());
        state.finish_extraction(Ok(("data:image/png;base64,AA".into(), vec![address("1,2")])));
        state
    }

    #[test]
    fn test_start_view() {
        assert_eq!(AppState::start(vec![]).view(), View::Upload);
        assert_eq!(AppState::start(vec![saved("1")]).view(), View::SavedPlans);
    }

    #[test]
    fn test_screen_precedence() {
        let mut state = with_results();
        state.error = Some(AppError::general(&Error::Extraction("x".into())));
        assert!(matches!(state.screen(), Screen::Error(_)));

        state.is_saving = true;
        assert_eq!(state.screen(), Screen::Saving(SAVING_MESSAGE));

        state.is_loading = true;
        assert_eq!(state.screen(), Screen::Loading(LOADING_MESSAGE));
    }

    #[test]
    fn test_extraction_success_expands_rows() {
        let state = with_results();
        assert_eq!(state.view(), View::Results);
        assert!(!state.is_loading());

        let plan = state.active_plan().unwrap();
        assert!(!plan.is_saved);
        let numbers: Vec<&str> = plan.addresses.iter().map(|a| a.house_numbers.as_str()).collect();
        assert_eq!(numbers, vec!["1", "2"]);
    }

    #[test]
    fn test_extraction_failure_shows_error() {
        let mut state = AppState::start(vec![]);
        assert!(state.begin_extraction());
        state.finish_extraction(Err(Error::Extraction("Failed".into())));

        assert!(!state.is_loading());
        assert!(state.active_plan().is_none());
        assert_eq!(state.view(), View::Upload);
        let error = state.error().unwrap();
        assert!(!error.is_save_failure());
        assert_eq!(error.retry_label(), "Upload a different image");
    }

    #[test]
    fn test_begin_extraction_gate() {
        let mut state = AppState::start(vec![]);
        assert!(state.begin_extraction());
        assert!(!state.begin_extraction());
    }

    #[test]
    fn test_save_prompt_default_name() {
        let mut state = with_results();
        assert!(state.open_save_prompt(noon()));
        assert_eq!(state.save_prompt(), Some("Plan - 2026-10-18 12:30:00"));

        state.cancel_save_prompt();
        assert!(state.save_prompt().is_none());
        assert_eq!(state.view(), View::Results);
    }

    #[test]
    fn test_save_prompt_requires_unsaved_plan() {
        let mut state = AppState::start(vec![saved("1")]);
        assert!(!state.open_save_prompt(noon()));

        assert!(state.view_plan("1"));
        assert!(!state.open_save_prompt(noon()));
    }

    #[test]
    fn test_begin_save_trims_and_rejects_empty() {
        let mut state = with_results();
        state.open_save_prompt(noon());

        assert!(state.begin_save("   ").is_none());
        assert!(state.save_prompt().is_some());
        assert!(!state.is_saving());

        let pending = state.begin_save("  Plan A ").unwrap();
        assert_eq!(pending.name, "Plan A");
        assert_eq!(pending.addresses.len(), 2);
        assert!(state.is_saving());
        assert!(state.save_prompt().is_none());
    }

    #[test]
    fn test_begin_save_ignores_saved_plan() {
        let mut state = AppState::start(vec![saved("1")]);
        assert!(state.view_plan("1"));

        assert!(state.begin_save("Copy").is_none());
        assert!(!state.is_saving());
        assert_eq!(state.view(), View::Results);
    }

    #[test]
    fn test_save_success() {
        let mut state = with_results();
        state.begin_save("Plan A").unwrap();
        state.finish_save(Ok(vec![saved("1")]));

        assert!(!state.is_saving());
        assert!(state.active_plan().is_none());
        assert_eq!(state.view(), View::SavedPlans);
        assert_eq!(state.saved_plans().len(), 1);
    }

    #[test]
    fn test_save_failure_keeps_results() {
        let mut state = with_results();
        state.begin_save("Plan A").unwrap();
        state.finish_save(Err(Error::Persistence(
            "Could not save the plan. The local storage might be full.".into(),
        )));

        let error = state.error().unwrap().clone();
        assert!(error.is_save_failure());
        assert!(error.message.starts_with(SAVE_FAILED_PREFIX));
        assert_eq!(
            error.message,
            "Save Failed: Could not save the plan. The local storage might be full. Please try again."
        );
        assert_eq!(error.retry_label(), "OK");
        assert!(state.active_plan().is_some());

        state.retry();
        assert!(state.error().is_none());
        assert_eq!(state.view(), View::Results);
        assert!(matches!(state.screen(), Screen::Results(_)));
    }

    #[test]
    fn test_general_retry_goes_to_upload() {
        let mut state = AppState::start(vec![saved("1")]);
        assert!(state.view_plan("1"));
        state.error = Some(AppError::general(&Error::Extraction("x".into())));

        state.retry();
        assert!(state.error().is_none());
        assert_eq!(state.view(), View::Upload);
    }

    #[test]
    fn test_view_plan() {
        let mut state = AppState::start(vec![saved("1"), saved("2")]);
        assert!(state.view_plan("2"));
        assert_eq!(state.view(), View::Results);
        assert!(state.active_plan().unwrap().is_saved);

        assert!(!state.view_plan("missing"));
    }

    #[test]
    fn test_reset() {
        let mut state = with_results();
        state.reset();
        assert_eq!(state.view(), View::Upload);
        assert!(state.active_plan().is_none());

        let mut state = AppState::start(vec![saved("1")]);
        state.view_plan("1");
        state.reset();
        assert_eq!(state.view(), View::SavedPlans);
    }

    #[test]
    fn test_finish_delete() {
        let mut state = AppState::start(vec![saved("1"), saved("2")]);
        assert!(state.finish_delete(Ok(vec![saved("2")])).is_none());
        assert_eq!(state.saved_plans().len(), 1);

        let alert = state.finish_delete(Err(Error::Persistence("Could not save the plan.".into())));
        assert_eq!(alert.as_deref(), Some("Delete Failed: Could not save the plan."));
        assert!(state.error().is_none());
        assert_eq!(state.saved_plans().len(), 1);
    }

    #[test]
    fn test_upload_screen_back_link() {
        let mut state = AppState::start(vec![saved("1")]);
        state.show_upload();
        assert_eq!(state.screen(), Screen::Upload { can_show_saved_plans: true });

        let state = AppState::start(vec![]);
        assert_eq!(state.screen(), Screen::Upload { can_show_saved_plans: false });
    }

    #[test]
    fn test_results_without_plan_is_empty() {
        let mut state = with_results();
        state.active_plan = None;
        assert_eq!(state.screen(), Screen::Empty);
    }

    #[test]
    fn test_into_plan_unique_id() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
        let millis = now.timestamp_millis();
        let existing = vec![saved(&millis.to_string()), saved(&(millis + 1).to_string())];

        let pending = PendingSave {
            name: "Plan A".into(),
            addresses: vec![address("1")],
            image_preview_url: "data:image/png;base64,AA".into(),
        };
        let plan = pending.into_plan("data:image/jpeg;base64,BB".into(), now, &existing);

        assert_eq!(plan.id, (millis + 2).to_string());
        assert_eq!(plan.name, "Plan A");
        assert_eq!(plan.image_preview_url, "data:image/jpeg;base64,BB");
        assert_eq!(plan.created_at, "2026-10-18T09:30:00.000Z");
    }
}
