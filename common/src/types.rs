//! 照合エンジンの型定義
//!
//! - MasterRecord: HSNマスタの1行（コード + 品名説明）
//! - NormalizedQuery: 1行分の照合中だけ存在する正規化済みクエリ
//! - MatchCandidate: スコア付き候補（順位付けまでの一時データ）
//! - MatchResult: 出力単位（エクスポート対象）

use serde::{Deserialize, Serialize};

/// 製品名として切り出す先頭文字数
pub const PRODUCT_NAME_CHARS: usize = 30;

/// ロット番号が見つからない場合の既定値
pub const LOT_NUMBER_DEFAULT: &str = "N/A";

/// マスタの1レコード
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterRecord {
    pub code: String,
    pub description: String,
}

impl MasterRecord {
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
        }
    }
}

/// 正規化済みクエリ
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedQuery {
    pub raw: String,
    pub normalized: String,
    pub lot_number: Option<String>,
}

/// スコア付き候補
#[derive(Debug, Clone)]
pub struct MatchCandidate<'a> {
    /// マスタ内の挿入順（同点時のタイブレーク用）
    pub position: usize,
    pub record: &'a MasterRecord,
    pub score: f64,
}

/// 照合結果（1候補 = 1レコード）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub lot_number: String,
    pub product_name: String,
    pub product_description: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// 候補の選択方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "mode", content = "k")]
pub enum MatchMode {
    /// 最高スコアの1件のみ
    #[default]
    BestOnly,
    /// 上位K件
    TopK(usize),
}

impl MatchMode {
    /// 1行あたりの最大出力件数
    pub fn limit(&self) -> usize {
        match self {
            MatchMode::BestOnly => 1,
            MatchMode::TopK(k) => *k,
        }
    }
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchMode::BestOnly => write!(f, "best"),
            MatchMode::TopK(k) => write!(f, "top-{}", k),
        }
    }
}

/// 照合オプション
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MatchOptions {
    pub mode: MatchMode,
    /// 最低スコア（未指定なら足切りしない）
    pub min_score: Option<f64>,
    /// トークン転置インデックスで候補を絞り込む
    pub prefilter: bool,
}

impl MatchOptions {
    pub fn best_only() -> Self {
        Self::default()
    }

    pub fn top_k(k: usize) -> Self {
        Self {
            mode: MatchMode::TopK(k),
            ..Default::default()
        }
    }

    /// 設定値の妥当性チェック
    pub fn validate(&self) -> crate::Result<()> {
        if let MatchMode::TopK(0) = self.mode {
            return Err(crate::Error::Config("top_k は1以上を指定してください".into()));
        }
        if let Some(min) = self.min_score {
            if !(0.0..=100.0).contains(&min) {
                return Err(crate::Error::Config(format!(
                    "min_score は0〜100の範囲で指定してください: {}",
                    min
                )));
            }
        }
        Ok(())
    }
}
