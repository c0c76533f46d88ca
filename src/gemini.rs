//! Gemini API クライアント（reqwest）

use crate::config::Config;
use crate::error::Result as CliResult;
use address_navigator_common::gemini::{build_extraction_request, endpoint, GenerateContentResponse};
use address_navigator_common::parser::user_facing_extraction_error;
use address_navigator_common::{AddressExtractor, Address, Error, Result};
use std::time::Duration;

/// 住所抽出クライアント
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, timeout: Duration) -> CliResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    /// 設定からクライアントを作成（APIキー未設定ならエラー）
    pub fn from_config(config: &Config) -> CliResult<Self> {
        let api_key = config.get_api_key()?;
        Self::new(api_key, config.model.clone(), Duration::from_secs(config.timeout_seconds))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// 1回だけリクエストし、詳細エラーを返す
    async fn request_addresses(&self, base64_image: &str, mime_type: &str) -> Result<Vec<Address>> {
        let request = build_extraction_request(base64_image, mime_type);
        tracing::debug!(model = %self.model, "sending generateContent request");

        let response = self
            .http
            .post(endpoint(&self.model, &self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Extraction(format!("request failed: {}", e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Extraction(format!("failed to read response body: {}", e)))?;

        decode_response(status, &body)
    }
}

impl AddressExtractor for GeminiClient {
    async fn extract_addresses(&self, base64_image: &str, mime_type: &str) -> Result<Vec<Address>> {
        self.request_addresses(base64_image, mime_type)
            .await
            .map_err(user_facing_extraction_error)
    }
}

/// ステータスとボディから住所配列を取り出す
pub fn decode_response(status: u16, body: &str) -> Result<Vec<Address>> {
    if !(200..300).contains(&status) {
        return Err(Error::Extraction(format!("gemini api failed with status {}: {}", status, body)));
    }

    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| Error::Extraction(format!("unexpected response shape: {}", e)))?;
    response.addresses()
}
