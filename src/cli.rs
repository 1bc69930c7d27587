use crate::config::ModeKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hsn-match")]
#[command(about = "ブローシャ品目行のHSNコード照合ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ブローシャの行をHSNマスタと照合
    Match {
        /// HSNマスタ（CSV/TSV、1列目=コード・2列目=品名説明）
        #[arg(short, long)]
        master: Option<PathBuf>,

        /// ブローシャのテキスト（1行1品目）
        #[arg(short, long, required = true)]
        lines: PathBuf,

        /// 選択方式 (best/top-k)
        #[arg(long)]
        mode: Option<ModeKind>,

        /// top-kモードの件数
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// 最低スコア（0-100、未指定なら足切りなし）
        #[arg(long)]
        min_score: Option<f64>,

        /// トークン転置インデックスで候補を絞り込む
        #[arg(long)]
        prefilter: bool,

        /// 行単位の並列化を無効化
        #[arg(long)]
        sequential: bool,

        /// マスタの1行目をヘッダーとして読み飛ばす
        #[arg(long)]
        skip_header: bool,

        /// 出力ファイル/ディレクトリ（省略時は端末に表示）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (json/csv)
        #[arg(short, long, default_value = "json")]
        format: ExportFormat,
    },

    /// HSNマスタを読み込んで内容を確認
    Master {
        /// HSNマスタ（CSV/TSV）
        #[arg(required = true)]
        master: PathBuf,

        /// 1行目をヘッダーとして読み飛ばす
        #[arg(long)]
        skip_header: bool,

        /// 表示する最大件数
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },

    /// 設定を表示/編集
    Config {
        /// top-kの既定件数を設定
        #[arg(long)]
        set_top_k: Option<usize>,

        /// 既定の選択方式を設定 (best/top-k)
        #[arg(long)]
        set_mode: Option<ModeKind>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use json or csv", s)),
        }
    }
}
