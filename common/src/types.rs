//! 住所・プランの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - Address: 抽出された1行
//! - SavedPlan: 保存済みプラン（ストレージに永続化）
//! - ActivePlan: 表示中のプラン（永続化しない）

use serde::{Deserialize, Serialize};

/// 抽出された住所1行
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub plz: String,              // 郵便番号
    pub street: String,           // 通り名
    pub house_numbers: String,    // 番地（展開前はカンマ区切りの複数値）
    pub city: String,             // 市町村
}

/// 名前付きで保存されたプラン
///
/// `addresses` は作成後に変更しない。編集は削除＋再作成で行う。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPlan {
    pub id: String,
    pub name: String,
    pub addresses: Vec<Address>,
    /// 縮小済みサムネイルのData URL
    pub image_preview_url: String,
    /// RFC 3339
    pub created_at: String,
}

/// 表示中のプラン
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePlan {
    pub addresses: Vec<Address>,
    pub image_preview_url: String,
    /// ストレージ由来ならtrue、新規抽出ならfalse
    pub is_saved: bool,
}

impl ActivePlan {
    pub fn from_saved(plan: &SavedPlan) -> Self {
        Self {
            addresses: plan.addresses.clone(),
            image_preview_url: plan.image_preview_url.clone(),
            is_saved: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_serialize_camel_case() {
        let address = Address {
            plz: "10115".to_string(),
            street: "Teststr.".to_string(),
            house_numbers: "1,2".to_string(),
            city: "Berlin".to_string(),
        };

        let json = serde_json::to_string(&address).expect("シリアライズ失敗");
        assert!(json.contains("\"houseNumbers\":\"1,2\""));
        assert!(json.contains("\"plz\":\"10115\""));
    }

    #[test]
    fn test_address_deserialize_missing_fields() {
        let json = r#"{"street": "Hauptstraße"}"#;

        let address: Address = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(address.street, "Hauptstraße");
        assert_eq!(address.plz, "");
        assert_eq!(address.house_numbers, "");
    }

    #[test]
    fn test_saved_plan_json_shape() {
        let plan = SavedPlan {
            id: "1760000000000".to_string(),
            name: "Plan A".to_string(),
            addresses: vec![Address::default()],
            image_preview_url: "data:image/jpeg;base64,AAAA".to_string(),
            created_at: "2026-10-18T09:30:00.000Z".to_string(),
        };

        let value = serde_json::to_value(&plan).expect("シリアライズ失敗");
        assert_eq!(value["imagePreviewUrl"], "data:image/jpeg;base64,AAAA");
        assert_eq!(value["createdAt"], "2026-10-18T09:30:00.000Z");
        assert_eq!(value["addresses"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_active_plan_from_saved() {
        let plan = SavedPlan {
            id: "1".to_string(),
            name: "Plan".to_string(),
            addresses: vec![Address { street: "A".into(), ..Default::default() }],
            image_preview_url: "data:image/jpeg;base64,AA".to_string(),
            created_at: String::new(),
        };

        let active = ActivePlan::from_saved(&plan);
        assert!(active.is_saved);
        assert_eq!(active.addresses, plan.addresses);
        assert_eq!(active.image_preview_url, plan.image_preview_url);
    }
}
