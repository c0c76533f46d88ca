//! localStorage のキーバリューストア
//!
//! 保存済みプラン（`addressNavigator_savedPlans`）と APIキーを置く。

use crate::js_message;
use address_navigator_common::{Error, KeyValueStore, PlanStore, Result};
use web_sys::Storage;

pub const API_KEY_STORAGE_KEY: &str = "addressNavigator_apiKey";

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage(&self) -> Result<Storage> {
        web_sys::window()
            .ok_or_else(|| Error::Persistence("no window".into()))?
            .local_storage()
            .map_err(|e| Error::Persistence(js_message(&e)))?
            .ok_or_else(|| Error::Persistence("localStorage is not available".into()))
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|e| Error::Io(std::io::Error::other(js_message(&e))))
    }

    /// 容量超過（QuotaExceededError）はここでエラーになる
    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| Error::Io(std::io::Error::other(js_message(&e))))
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| Error::Io(std::io::Error::other(js_message(&e))))
    }
}

pub fn plan_store() -> PlanStore<BrowserStorage> {
    PlanStore::new(BrowserStorage)
}

pub fn load_api_key() -> String {
    BrowserStorage
        .get(API_KEY_STORAGE_KEY)
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// 空文字なら削除
pub fn save_api_key(api_key: &str) -> Result<()> {
    let api_key = api_key.trim();
    if api_key.is_empty() {
        BrowserStorage.remove(API_KEY_STORAGE_KEY)
    } else {
        BrowserStorage.set(API_KEY_STORAGE_KEY, api_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use address_navigator_common::{Address, SavedPlan};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_plans_round_trip_through_local_storage() {
        let store = plan_store();
        store.clear().unwrap();

        let plan = SavedPlan {
            id: "1760779800000".into(),
            name: "Plan A".into(),
            addresses: vec![Address {
                plz: "10115".into(),
                street: "Teststr.".into(),
                house_numbers: "1".into(),
                city: "Berlin".into(),
            }],
            image_preview_url: "data:image/jpeg;base64,AA".into(),
            created_at: "2026-10-18T09:30:00.000Z".into(),
        };
        store.add(plan.clone()).unwrap();
        assert_eq!(store.list(), vec![plan]);

        store.delete("1760779800000").unwrap();
        assert!(store.list().is_empty());
    }

    #[wasm_bindgen_test]
    fn test_api_key_blank_clears() {
        save_api_key("  key-123 ").unwrap();
        assert_eq!(load_api_key(), "key-123");

        save_api_key("").unwrap();
        assert_eq!(load_api_key(), "");
    }
}
