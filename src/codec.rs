//! 画像ファイルの読み込みとサムネイル生成（ネイティブ）

use address_navigator_common::image::{
    decode_data_url, jpeg_quality, thumbnail_dimensions, to_data_url, DEFAULT_MIME_TYPE,
    THUMBNAIL_MIME_TYPE,
};
use address_navigator_common::{Error, ImageCodec, Result};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use std::path::Path;

/// `image` クレートによる `ImageCodec` 実装
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageFileCodec;

impl ImageCodec for ImageFileCodec {
    type Source = Path;

    async fn encode_file(&self, path: &Path) -> Result<String> {
        let bytes = tokio::fs::read(path).await?;
        let mime_type = detect_mime_type(&bytes, path);
        tracing::debug!(path = %path.display(), mime_type, bytes = bytes.len(), "encoded image file");
        Ok(to_data_url(&bytes, mime_type))
    }

    async fn make_thumbnail(
        &self,
        data_url: &str,
        max_width: u32,
        max_height: u32,
        quality: f32,
    ) -> Result<String> {
        let bytes = decode_data_url(data_url)?;
        let jpeg = tokio::task::spawn_blocking(move || {
            render_thumbnail(&bytes, max_width, max_height, quality)
        })
        .await
        .map_err(|e| Error::Render(e.to_string()))??;

        Ok(to_data_url(&jpeg, THUMBNAIL_MIME_TYPE))
    }
}

/// MIMEタイプ判定（内容 → 拡張子 → 既定値）
pub fn detect_mime_type(bytes: &[u8], path: &Path) -> &'static str {
    if let Ok(format) = image::guess_format(bytes) {
        return format.to_mime_type();
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(image::ImageFormat::from_extension)
        .map(|format| format.to_mime_type())
        .unwrap_or(DEFAULT_MIME_TYPE)
}

/// 縮小してJPEGにエンコード
pub fn render_thumbnail(bytes: &[u8], max_width: u32, max_height: u32, quality: f32) -> Result<Vec<u8>> {
    let source = image::load_from_memory(bytes).map_err(|e| Error::Decode(e.to_string()))?;
    let (width, height) = thumbnail_dimensions(source.width(), source.height(), max_width, max_height);

    let resized = if (width, height) == (source.width(), source.height()) {
        source
    } else {
        source.resize_exact(width, height, FilterType::Triangle)
    };
    // JPEGはアルファなし
    let rgb = resized.to_rgb8();

    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, jpeg_quality(quality))
        .encode_image(&rgb)
        .map_err(|e| Error::Render(e.to_string()))?;
    Ok(out)
}
