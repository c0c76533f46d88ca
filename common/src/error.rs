//! エラー型定義

use thiserror::Error;

/// 共通エラー型
///
/// どのエラーもコントローラ境界で捕捉され、エラー表示かアラートに変換される。
#[derive(Error, Debug)]
pub enum Error {
    /// ファイル読み込み失敗
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// サムネイル元画像のデコード失敗
    #[error("Failed to load image for thumbnail creation: {0}")]
    Decode(String),

    /// 描画面・エンコーダの生成失敗
    #[error("Could not render thumbnail: {0}")]
    Render(String),

    /// AI抽出の失敗（ユーザー向けメッセージ）
    #[error("{0}")]
    Extraction(String),

    /// ストレージ書き込み拒否
    #[error("{0}")]
    Persistence(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = Error::Io(io_error);
        let display = format!("{}", error);
        assert!(display.contains("Failed to read file"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_error_display_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = Error::Json(json_error);
        assert!(format!("{}", error).contains("JSON error"));
    }

    #[test]
    fn test_user_facing_variants_show_message_only() {
        let error = Error::Persistence("Could not save the plan.".to_string());
        assert_eq!(format!("{}", error), "Could not save the plan.");

        let error = Error::Extraction("Failed to extract addresses.".to_string());
        assert_eq!(format!("{}", error), "Failed to extract addresses.");
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let error: Error = io_error.into();
        assert!(matches!(error, Error::Io(_)));
    }

    #[test]
    fn test_error_debug() {
        let error = Error::Decode("truncated".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("Decode"));
        assert!(debug.contains("truncated"));
    }
}
