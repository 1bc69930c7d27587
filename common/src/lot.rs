//! ロット番号の抽出
//!
//! 正規化前の元の行から `Lot No: AB12` / `LOT-5521` / `lot no.77x` などの
//! 表記を検出し、英数字トークンを取り出す。

use regex::Regex;

/// ロット番号を抽出する（最初の一致のみ）
///
/// - `No` や `:` / `-` が付いた表記: 英数字トークンをそのまま採用
/// - `lot AB12` のような区切りなしの表記: 数字を含むトークンのみ
///   （`no lot info here` の "info" を拾わない）
pub fn extract_lot_number(raw: &str) -> Option<String> {
    lazy_static::lazy_static! {
        static ref LOT_RE: Regex = Regex::new(
            r"(?i)\blot(?:\s*no\b\.?\s*[:\-]?|\s*[:\-])\s*([a-z0-9]+)|\blot\s+([a-z0-9]*[0-9][a-z0-9]*)"
        ).unwrap();
    }

    LOT_RE
        .captures(raw)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string())
}
