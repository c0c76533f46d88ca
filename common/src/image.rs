//! 画像ユーティリティ（CLI/WASM共通）
//!
//! - Data URL の生成・分解
//! - サムネイル寸法の計算
//!
//! 実際のデコード・描画は各プラットフォームの `ImageCodec` 実装が行う。

use crate::error::{Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine};

/// サムネイルの最大幅（px）
pub const THUMBNAIL_MAX_WIDTH: u32 = 400;
/// サムネイルの最大高さ（px）
pub const THUMBNAIL_MAX_HEIGHT: u32 = 400;
/// サムネイルのJPEG品質 (0.0-1.0)
pub const DEFAULT_THUMBNAIL_QUALITY: f32 = 0.8;
/// サムネイルの出力形式
pub const THUMBNAIL_MIME_TYPE: &str = "image/jpeg";
/// MIMEタイプが読み取れない場合の既定値
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// バイト列を Data URL に変換
pub fn to_data_url(bytes: &[u8], mime_type: &str) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// Data URL を (MIMEタイプ, Base64データ) に分解
///
/// # Arguments
/// * `data_url` - "data:image/jpeg;base64,/9j/4AAQ..." 形式のData URL
///
/// # Returns
/// base64形式でないもの、`data:` で始まらないものは None
pub fn split_data_url(data_url: &str) -> Option<(&str, &str)> {
    let rest = data_url.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let mime_type = header.strip_suffix(";base64")?;
    let mime_type = mime_type.split(';').next().unwrap_or_default();

    if mime_type.is_empty() {
        Some((DEFAULT_MIME_TYPE, payload))
    } else {
        Some((mime_type, payload))
    }
}

/// Data URL をバイト列にデコード
pub fn decode_data_url(data_url: &str) -> Result<Vec<u8>> {
    let (_, payload) = split_data_url(data_url)
        .ok_or_else(|| Error::Decode("not a base64 data URL".into()))?;
    STANDARD
        .decode(payload.trim())
        .map_err(|e| Error::Decode(format!("invalid base64 payload: {}", e)))
}

/// 縦横比を保ったまま上限内に収まる寸法を計算
///
/// 横長（幅 >= 高さ）は幅で、縦長は高さで倍率を決める。縮小のみで、
/// 既に収まっている画像は元の寸法のまま返す。
pub fn thumbnail_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (width, height);
    }

    let factor = if width >= height {
        (max_width as f64 / width as f64).min(1.0)
    } else {
        (max_height as f64 / height as f64).min(1.0)
    };

    if factor >= 1.0 {
        return (width, height);
    }

    let scaled = |v: u32| ((v as f64 * factor).round() as u32).max(1);
    (scaled(width), scaled(height))
}

/// 0.0-1.0 の品質を JPEG エンコーダの 1-100 に変換
pub fn jpeg_quality(quality: f32) -> u8 {
    (quality.clamp(0.01, 1.0) * 100.0).round() as u8
}
