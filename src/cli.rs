use crate::romaji::RomajiBackend;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "clinic-dir")]
#[command(about = "医療機関ディレクトリの重複判定・診療科判定・ローマ字変換ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// ローマ字変換バックエンド (kakasi/off)
    #[arg(long, default_value = "kakasi", global = true)]
    pub romaji_backend: RomajiBackend,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 施設ごとのフィンガープリントを出力
    Fingerprint {
        /// 入力JSONファイル（施設の配列）
        #[arg(required = true)]
        input: PathBuf,
    },

    /// 既存データとの重複を判定
    Check {
        /// 入力JSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 既存フィンガープリントのJSONファイル
        #[arg(short, long)]
        known: Option<PathBuf>,

        /// 入力内の重複も判定（先に出現したものを残す）
        #[arg(long)]
        batch: bool,
    },

    /// 候補リストから類似する施設を探す（重みは設定ファイルの値）
    Similar {
        /// 入力JSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 候補のJSONファイル（既存の施設データ）
        #[arg(short, long)]
        candidates: PathBuf,

        /// 類似度の閾値（0.0-1.0）
        #[arg(short, long, default_value = "0.5")]
        threshold: f64,
    },

    /// 診療科を判定
    Specialty {
        /// 入力JSONファイル
        #[arg(required = true)]
        input: PathBuf,
    },

    /// 日本語の施設名をローマ字に変換
    Romaji {
        /// 変換する文字列
        #[arg(required = true)]
        text: Vec<String>,

        /// 表示名（"ローマ字 (元の名前)"）で出力
        #[arg(short, long)]
        display: bool,
    },

    /// 重複判定・診療科判定・ローマ字変換を一括実行
    Process {
        /// 入力JSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 出力JSONファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 既存フィンガープリントのJSONファイル
        #[arg(short, long)]
        known: Option<PathBuf>,

        /// ローマ字キャッシュファイル（省略時は設定値）
        #[arg(long)]
        cache: Option<PathBuf>,

        /// キャッシュを使わない
        #[arg(long)]
        no_cache: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// ログフィルタを設定
        #[arg(long)]
        set_log_filter: Option<String>,

        /// 口コミから診療科を採用する最小ヒット数
        #[arg(long)]
        set_review_min_hits: Option<usize>,

        /// 説明文から診療科を採用する最小ヒット数
        #[arg(long)]
        set_description_min_hits: Option<usize>,

        /// ローマ字キャッシュファイルの場所
        #[arg(long)]
        set_cache_path: Option<PathBuf>,
    },

    /// ローマ字キャッシュ管理
    Cache {
        /// キャッシュを削除
        #[arg(long)]
        clear: bool,

        /// キャッシュファイル（省略時は設定値）
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// キャッシュ情報を表示
        #[arg(long)]
        info: bool,
    },
}
