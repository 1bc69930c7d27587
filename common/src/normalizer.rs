//! 入力行の正規化
//!
//! - 連続する空白を1つのスペースに統一
//! - 前後の空白を除去
//! - 小文字化

/// 生の行を比較用の形式に変換する
///
/// 空文字・空白のみの入力は空文字になる（照合側でスキップ扱い）。
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
