//! APIレスポンスパーサー
//!
//! 構造化出力のJSONテキストを検証して `Address` 配列に変換する。
//! 形式の崩れは修復せず、すべて抽出エラーとして扱う。

use crate::error::{Error, Result};
use crate::types::Address;
use serde_json::Value;

/// ユーザーに表示する抽出失敗メッセージ
pub const EXTRACTION_FAILED_MESSAGE: &str = "Failed to extract addresses from the image. The AI model may be temporarily unavailable or the image format is not supported.";

/// レスポンステキストをパース・検証
///
/// - 配列であること
/// - 各要素がオブジェクトで、空でない文字列の `street` を持つこと
///
/// `street` 以外の欠落項目は空文字として扱う。
///
/// # Returns
/// * `Err(Error::Extraction)` - 詳細メッセージ付き（ユーザー向けではない）
pub fn parse_addresses(text: &str) -> Result<Vec<Address>> {
    let value: Value = serde_json::from_str(text.trim())
        .map_err(|e| Error::Extraction(format!("response is not valid JSON: {}", e)))?;

    let Value::Array(items) = value else {
        return Err(Error::Extraction("response is not a JSON array".into()));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let has_street = item
                .get("street")
                .and_then(Value::as_str)
                .is_some_and(|street| !street.is_empty());
            if !has_street {
                return Err(Error::Extraction(format!(
                    "row {} has no street: {}",
                    index, item
                )));
            }

            serde_json::from_value(item)
                .map_err(|e| Error::Extraction(format!("row {} is malformed: {}", index, e)))
        })
        .collect()
}

/// 詳細エラーをログに残し、ユーザー向けの抽出エラーに置き換える
pub fn user_facing_extraction_error(error: Error) -> Error {
    tracing::error!(error = %error, "address extraction failed");
    Error::Extraction(EXTRACTION_FAILED_MESSAGE.into())
}
