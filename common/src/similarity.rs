//! トークン集合ベースの類似度
//!
//! 文字列を空白でトークン化して集合として比較する（token set ratio）。
//! 語順の入れ替えや、一方のトークンが他方に包含される場合でも高スコアになる。
//!
//! スコアは 0〜100。共通トークンが1つもなければ 0。

use std::collections::BTreeSet;
use strsim::normalized_levenshtein;

/// 空白で分割し、前後の記号を落としたトークン集合を返す
///
/// `pipe,` と `pipe` を同一視するため前後の非英数字は除去する。
/// 記号だけのトークン（`-` など）はそのまま残す。
pub fn tokenize(text: &str) -> BTreeSet<&str> {
    text.split_whitespace()
        .map(|token| {
            let trimmed = token.trim_matches(|c: char| !c.is_alphanumeric());
            if trimmed.is_empty() { token } else { trimmed }
        })
        .collect()
}

/// 2つの正規化済み文字列の類似度（0〜100）
pub fn score(query: &str, candidate: &str) -> f64 {
    let query_tokens = tokenize(query);
    let candidate_tokens = tokenize(candidate);
    score_tokens(&query_tokens, &candidate_tokens)
}

/// トークン集合同士の類似度
pub fn score_tokens(a: &BTreeSet<&str>, b: &BTreeSet<&str>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let intersection: Vec<&str> = a.intersection(b).copied().collect();
    if intersection.is_empty() {
        return 0.0;
    }

    let only_a: Vec<&str> = a.difference(b).copied().collect();
    let only_b: Vec<&str> = b.difference(a).copied().collect();

    // BTreeSetの走査順はソート済み
    let common = intersection.join(" ");
    let combined_a = join_sorted(&common, &only_a);
    let combined_b = join_sorted(&common, &only_b);

    let best = [
        ratio(&common, &combined_a),
        ratio(&common, &combined_b),
        ratio(&combined_a, &combined_b),
    ]
    .into_iter()
    .fold(0.0_f64, f64::max);

    best.clamp(0.0, 100.0)
}

fn join_sorted(common: &str, rest: &[&str]) -> String {
    if rest.is_empty() {
        common.to_string()
    } else {
        format!("{} {}", common, rest.join(" "))
    }
}

/// 文字単位の類似度（0〜100）
fn ratio(a: &str, b: &str) -> f64 {
    normalized_levenshtein(a, b) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_scores_100() {
        assert_eq!(score("steel pipe", "steel pipe"), 100.0);
        assert_eq!(score("x", "x"), 100.0);
        assert_eq!(score("-", "-"), 100.0);
    }

    #[test]
    fn test_reordered_scores_100() {
        assert_eq!(score("red widget", "widget red"), score("red widget", "red widget"));
    }

    #[test]
    fn test_disjoint_scores_0() {
        assert_eq!(score("red widget", "blue gadget"), 0.0);
        assert_eq!(score("bed", "red"), 0.0);
    }

    #[test]
    fn test_empty_scores_0() {
        assert_eq!(score("", "steel pipe"), 0.0);
        assert_eq!(score("steel pipe", ""), 0.0);
        assert_eq!(score("", ""), 0.0);
    }

    #[test]
    fn test_subset_scores_high() {
        let s = score("heavy duty plastic pipe", "plastic pipe");
        assert_eq!(s, 100.0);
    }

    #[test]
    fn test_partial_overlap_between_bounds() {
        let s = score("plastic pipe", "steel pipe");
        assert!(s > 0.0 && s < 100.0, "score = {}", s);
    }

    #[test]
    fn test_symmetric() {
        let pairs = [
            ("heavy duty plastic pipe", "steel pipe"),
            ("copper wire 2mm", "wire copper insulated"),
            ("a b c", "c d"),
        ];
        for (a, b) in pairs {
            assert_eq!(score(a, b), score(b, a), "{:?} / {:?}", a, b);
        }
    }

    #[test]
    fn test_punctuation_trimmed() {
        let tokens = tokenize("pipe, (steel) no:");
        assert!(tokens.contains("pipe"));
        assert!(tokens.contains("steel"));
        assert!(tokens.contains("no"));
    }

    #[test]
    fn test_deterministic() {
        let a = score("galvanised steel pipe 2in", "steel pipe galvanized");
        let b = score("galvanised steel pipe 2in", "steel pipe galvanized");
        assert_eq!(a, b);
    }
}
