//! 保存済みプランのストア
//!
//! 1つのキーに `SavedPlan` 配列全体をJSONで保存する。
//! 変更のたびに全体を読み込み・書き戻す（部分更新なし、楽観的排他なし）。

use crate::error::{Error, Result};
use crate::services::KeyValueStore;
use crate::types::SavedPlan;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// 保存先キー
pub const STORAGE_KEY: &str = "addressNavigator_savedPlans";

/// 書き込み拒否時のユーザー向けメッセージ
pub const PERSISTENCE_FAILED_MESSAGE: &str =
    "Could not save the plan. The local storage might be full.";

/// 読み込み失敗時のユーザー向けメッセージ
pub const READ_FAILED_MESSAGE: &str = "Could not read the saved plans from storage.";

fn parse_plans(raw: Option<&str>) -> Vec<SavedPlan> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    match serde_json::from_str(raw) {
        Ok(plans) => plans,
        Err(e) => {
            tracing::warn!(error = %e, "failed to parse saved plans, treating as empty");
            Vec::new()
        }
    }
}

/// プランの一覧・追加・削除
#[derive(Debug, Clone, Default)]
pub struct PlanStore<K> {
    backend: K,
}

impl<K: KeyValueStore> PlanStore<K> {
    pub fn new(backend: K) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &K {
        &self.backend
    }

    /// 保存済みプラン（新しい順）
    ///
    /// 未保存・読み込み失敗・破損データはいずれも空として扱う。
    pub fn list(&self) -> Vec<SavedPlan> {
        match self.backend.get(STORAGE_KEY) {
            Ok(raw) => parse_plans(raw.as_deref()),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read saved plans");
                Vec::new()
            }
        }
    }

    /// 先頭に追加して保存
    ///
    /// 読み込み・書き込みに失敗した場合は何も更新されていない。
    pub fn add(&self, plan: SavedPlan) -> Result<Vec<SavedPlan>> {
        let mut plans = self.load()?;
        plans.insert(0, plan);
        self.persist(&plans)?;
        Ok(plans)
    }

    /// IDが一致するプランを削除して保存（該当なしなら何もしない）
    pub fn delete(&self, id: &str) -> Result<Vec<SavedPlan>> {
        let mut plans = self.load()?;
        let before = plans.len();
        plans.retain(|plan| plan.id != id);

        if plans.len() != before {
            self.persist(&plans)?;
        }
        Ok(plans)
    }

    /// 全プランを削除
    pub fn clear(&self) -> Result<()> {
        self.backend.remove(STORAGE_KEY).map_err(|e| {
            tracing::error!(error = %e, "failed to clear saved plans");
            Error::Persistence(PERSISTENCE_FAILED_MESSAGE.into())
        })
    }

    /// 書き換え前の読み込み
    ///
    /// バックエンドの読み込み失敗はエラー（空一覧で上書きしない）。
    fn load(&self) -> Result<Vec<SavedPlan>> {
        let raw = self.backend.get(STORAGE_KEY).map_err(|e| {
            tracing::error!(error = %e, "failed to read saved plans before update");
            Error::Persistence(READ_FAILED_MESSAGE.into())
        })?;
        Ok(parse_plans(raw.as_deref()))
    }

    fn persist(&self, plans: &[SavedPlan]) -> Result<()> {
        let json = serde_json::to_string(plans)?;
        self.backend.set(STORAGE_KEY, &json).map_err(|e| {
            tracing::error!(error = %e, "failed to write saved plans");
            Error::Persistence(PERSISTENCE_FAILED_MESSAGE.into())
        })
    }
}

/// メモリ上のストア（テスト・プレビュー用）
///
/// `reject_writes` で容量超過などの書き込み拒否、`reject_reads` で読み込み失敗を再現できる。
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    reject_writes: Cell<bool>,
    reject_reads: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.set(reject);
    }

    pub fn set_reject_reads(&self, reject: bool) {
        self.reject_reads.set(reject);
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if self.reject_reads.get() {
            return Err(Error::Io(std::io::Error::other("permission denied")));
        }
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.reject_writes.get() {
            return Err(Error::Io(std::io::Error::other("quota exceeded")));
        }
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        if self.reject_writes.get() {
            return Err(Error::Io(std::io::Error::other("storage is read-only")));
        }
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
