//! 照合結果の集約
//!
//! 行ごとの結果列を、行順・行内の順位順を保ったまま1つの列に平坦化する。
//! フィルタ・重複除去・再スコアは行わない。

use crate::types::MatchResult;
use serde::{Deserialize, Serialize};

/// 1ブローシャ分の最終結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet {
    results: Vec<MatchResult>,
}

/// 集約結果の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultStatus {
    /// 1件以上の結果あり
    Matched(usize),
    /// 結果なし（エラーではない）
    NoMatches,
}

impl ResultSet {
    pub fn results(&self) -> &[MatchResult] {
        &self.results
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MatchResult> {
        self.results.iter()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// 「該当なし」状態か
    pub fn is_no_matches(&self) -> bool {
        self.status() == ResultStatus::NoMatches
    }

    pub fn status(&self) -> ResultStatus {
        if self.results.is_empty() {
            ResultStatus::NoMatches
        } else {
            ResultStatus::Matched(self.results.len())
        }
    }

    pub fn into_vec(self) -> Vec<MatchResult> {
        self.results
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a MatchResult;
    type IntoIter = std::slice::Iter<'a, MatchResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

/// 行ごとの結果列を集約する
pub fn aggregate<I>(per_line: I) -> ResultSet
where
    I: IntoIterator<Item = Vec<MatchResult>>,
{
    let results: Vec<MatchResult> = per_line.into_iter().flatten().collect();
    ResultSet { results }
}
