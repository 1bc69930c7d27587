//! 照合モジュール
//!
//! 1行ごとに 正規化 → ロット番号抽出 → 全マスタレコードとのスコア計算 →
//! 順位付け → 選択方式に応じた出力 を行う。
//!
//! 行をまたいだ状態は持たない。マスタインデックスは読み取りのみなので、
//! 呼び出し側が行単位で並列化してもよい。

use crate::master::MasterIndex;
use crate::similarity::{score_tokens, tokenize};
use crate::types::{
    MatchCandidate, MatchOptions, MatchResult, NormalizedQuery, LOT_NUMBER_DEFAULT,
    PRODUCT_NAME_CHARS,
};
use crate::{lot, normalizer};

/// 1行分の照合結果
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// 候補を選択した（最低スコア指定時は空になりうる）
    Matched(Vec<MatchResult>),
    /// 空行・空白のみの行
    Skipped,
    /// マスタが0件のためスコア計算しなかった
    EmptyIndex,
}

impl MatchOutcome {
    /// 出力レコード列に変換（Skipped/EmptyIndexは空）
    pub fn into_results(self) -> Vec<MatchResult> {
        match self {
            MatchOutcome::Matched(results) => results,
            MatchOutcome::Skipped | MatchOutcome::EmptyIndex => Vec::new(),
        }
    }

    pub fn is_empty_index(&self) -> bool {
        matches!(self, MatchOutcome::EmptyIndex)
    }
}

/// 生の行からクエリを作る（空行はNone）
pub fn prepare_query(raw: &str) -> Option<NormalizedQuery> {
    let normalized = normalizer::normalize(raw);
    if normalized.is_empty() {
        return None;
    }

    Some(NormalizedQuery {
        raw: raw.to_string(),
        normalized,
        // 正規化前の行から抽出する
        lot_number: lot::extract_lot_number(raw),
    })
}

/// 全候補をスコア降順・挿入順で並べる
///
/// `prefilter` が有効な場合、トークンを共有しないレコードはスコア計算を省いて0点とする。
/// 共通トークンなしは必ず0点なので、順位は全件計算と一致する。
pub fn rank_candidates<'a>(
    query: &NormalizedQuery,
    index: &'a MasterIndex,
    prefilter: bool,
) -> Vec<MatchCandidate<'a>> {
    let query_tokens = tokenize(&query.normalized);
    let shortlist = prefilter.then(|| index.shortlist(query_tokens.iter().copied()));

    let mut candidates: Vec<MatchCandidate<'a>> = index
        .records()
        .iter()
        .enumerate()
        .map(|(position, record)| {
            let skip = shortlist
                .as_ref()
                .map(|list| !list.contains(&position))
                .unwrap_or(false);
            let score = if skip {
                0.0
            } else {
                score_tokens(&query_tokens, &tokenize(index.normalized_description(position)))
            };
            MatchCandidate {
                position,
                record,
                score,
            }
        })
        .collect();

    // 同点は先に登録されたレコードを優先
    candidates.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.position.cmp(&b.position))
    });

    candidates
}

/// 1行を照合する
pub fn match_line(line: &str, index: &MasterIndex, options: &MatchOptions) -> MatchOutcome {
    let Some(query) = prepare_query(line) else {
        return MatchOutcome::Skipped;
    };

    if index.is_empty() {
        log::warn!("master index is empty; skipping line {:?}", query.normalized);
        return MatchOutcome::EmptyIndex;
    }

    let candidates = rank_candidates(&query, index, options.prefilter);

    let results: Vec<MatchResult> = candidates
        .into_iter()
        .filter(|c| options.min_score.map_or(true, |min| c.score >= min))
        .take(options.mode.limit())
        .map(|c| to_result(&query, &c))
        .collect();

    log::debug!(
        "matched {:?}: {} result(s), top = {:?}",
        query.normalized,
        results.len(),
        results.first().map(|r| (&r.code, r.score))
    );

    MatchOutcome::Matched(results)
}

/// 複数行をまとめて照合する（逐次）
pub fn match_lines<S: AsRef<str>>(
    lines: &[S],
    index: &MasterIndex,
    options: &MatchOptions,
) -> Vec<Vec<MatchResult>> {
    lines
        .iter()
        .map(|line| match_line(line.as_ref(), index, options).into_results())
        .collect()
}

fn to_result(query: &NormalizedQuery, candidate: &MatchCandidate<'_>) -> MatchResult {
    MatchResult {
        lot_number: query
            .lot_number
            .clone()
            .unwrap_or_else(|| LOT_NUMBER_DEFAULT.to_string()),
        product_name: query.raw.chars().take(PRODUCT_NAME_CHARS).collect(),
        product_description: query.raw.clone(),
        code: candidate.record.code.clone(),
        matched_description: Some(candidate.record.description.clone()),
        score: Some(candidate.score),
    }
}
