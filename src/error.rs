use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavigatorError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。`address-nav config --set-api-key YOUR_KEY` で設定するか、GEMINI_API_KEY を指定してください")]
    MissingApiKey,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("プランが見つかりません: {0}")]
    PlanNotFound(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("HTTPエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Core(#[from] address_navigator_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    /// ユーザー向けメッセージをそのまま表示して終了
    #[error("{0}")]
    Failed(String),
}

impl From<dialoguer::Error> for NavigatorError {
    fn from(e: dialoguer::Error) -> Self {
        NavigatorError::Prompt(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, NavigatorError>;
