//! Address Navigator CLI
//!
//! ネイティブ版の画像処理・Gemini クライアント・ファイルストアとサブコマンド

pub mod cli;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod gemini;
pub mod render;
pub mod storage;
