//! Gemini API連携（fetch）
//!
//! リクエスト/レスポンス型と検証は共通ライブラリのものを使う。

use crate::js_message;
use address_navigator_common::gemini::{build_extraction_request, endpoint, GenerateContentResponse, DEFAULT_MODEL};
use address_navigator_common::parser::user_facing_extraction_error;
use address_navigator_common::{Address, AddressExtractor, Error, Result};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

fn upstream(e: JsValue) -> Error {
    Error::Extraction(js_message(&e))
}

pub struct GeminiFetchClient {
    api_key: String,
    model: String,
}

impl GeminiFetchClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// 1回だけ送信（再試行なし）
    async fn call_gemini_api(&self, base64_image: &str, mime_type: &str) -> Result<Vec<Address>> {
        let body = serde_json::to_string(&build_extraction_request(base64_image, mime_type))?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(&body));

        let request = Request::new_with_str_and_init(&endpoint(&self.model, &self.api_key), &opts)
            .map_err(upstream)?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(upstream)?;

        let window = web_sys::window().ok_or_else(|| Error::Extraction("no window".into()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(upstream)?;
        let resp: Response = resp_value.dyn_into().map_err(upstream)?;

        if !resp.ok() {
            let text = JsFuture::from(resp.text().map_err(upstream)?)
                .await
                .ok()
                .and_then(|v| v.as_string())
                .unwrap_or_default();
            return Err(Error::Extraction(format!("API error {}: {}", resp.status(), text)));
        }

        let json = JsFuture::from(resp.json().map_err(upstream)?)
            .await
            .map_err(upstream)?;
        let response: GenerateContentResponse = serde_wasm_bindgen::from_value(json)
            .map_err(|e| Error::Extraction(format!("unexpected response shape: {}", e)))?;
        response.addresses()
    }
}

impl AddressExtractor for GeminiFetchClient {
    async fn extract_addresses(&self, base64_image: &str, mime_type: &str) -> Result<Vec<Address>> {
        self.call_gemini_api(base64_image, mime_type).await.map_err(|e| {
            web_sys::console::error_1(&format!("address extraction failed: {}", e).into());
            user_facing_extraction_error(e)
        })
    }
}
