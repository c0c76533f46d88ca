//! Gemini API のリクエスト/レスポンス型（CLI/WASM共通）
//!
//! HTTP送信は各プラットフォームが行う（CLI: reqwest、WASM: fetch）。

use crate::error::{Error, Result};
use crate::parser::parse_addresses;
use crate::prompts::{response_schema, EXTRACTION_PROMPT};
use crate::types::Address;
use serde::{Deserialize, Serialize};

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const RESPONSE_MIME_TYPE: &str = "application/json";

/// generateContent エンドポイント
pub fn endpoint(model: &str, api_key: &str) -> String {
    format!("{}/{}:generateContent?key={}", GEMINI_API_BASE, model, api_key)
}

/// Gemini APIリクエスト
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Text {
        text: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: serde_json::Value,
}

/// 住所抽出リクエストを作成（画像 → 指示文の順）
pub fn build_extraction_request(base64_image: &str, mime_type: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: mime_type.to_string(),
                        data: base64_image.to_string(),
                    },
                },
                Part::Text {
                    text: EXTRACTION_PROMPT.to_string(),
                },
            ],
        }],
        generation_config: GenerationConfig {
            response_mime_type: RESPONSE_MIME_TYPE.to_string(),
            response_schema: response_schema(),
        },
    }
}

/// Gemini APIレスポンス
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<ResponseContent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// 先頭候補の先頭パートのテキスト
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text = content.parts.first()?.text.as_deref()?;
        if text.trim().is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }

    /// レスポンスから住所配列を取り出す（詳細エラー）
    pub fn addresses(&self) -> Result<Vec<Address>> {
        let text = self
            .text()
            .ok_or_else(|| Error::Extraction("empty response from model".into()))?;
        parse_addresses(&text)
    }
}
