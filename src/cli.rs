use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "address-nav")]
#[command(about = "スキャンした巡回計画から住所を抽出し、地図リンク付きで保存", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// プランの保存先ディレクトリ
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像から住所を抽出して表示
    Extract {
        /// スキャン画像のパス
        #[arg(required = true)]
        image: PathBuf,

        /// この名前で保存（確認なし）
        #[arg(short, long, conflicts_with = "no_save")]
        save: Option<String>,

        /// 保存しない
        #[arg(long)]
        no_save: bool,
    },

    /// 保存済みプランの管理
    Plans {
        #[command(subcommand)]
        command: PlansCommand,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// モデルを設定
        #[arg(long)]
        set_model: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Subcommand)]
pub enum PlansCommand {
    /// 一覧（新しい順）
    List,

    /// プランの住所と地図リンクを表示
    Show {
        id: String,
    },

    /// プランを削除
    Delete {
        id: String,

        /// 確認せずに削除
        #[arg(short, long)]
        yes: bool,
    },
}

/// 抽出後の保存方法
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveMode {
    /// 対話で確認
    Ask,
    Named(String),
    Skip,
}

impl SaveMode {
    pub fn from_flags(save: Option<String>, no_save: bool) -> Self {
        match (save, no_save) {
            (_, true) => SaveMode::Skip,
            (Some(name), false) => SaveMode::Named(name),
            (None, false) => SaveMode::Ask,
        }
    }
}
