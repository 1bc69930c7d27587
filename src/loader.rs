//! 入力ファイル読み込み
//!
//! - マスタ: 区切りテキスト（CSV / TSV）→ 行 × セル
//! - ブローシャ: テキスト抽出済みファイル → 1行1品目
//!
//! PDF・画像からのテキスト抽出は外部ツールに任せる。

use crate::error::{HsnError, Result};
use std::path::Path;

/// 区切り文字
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    /// 拡張子から判定（不明なら内容にタブがあるかで判定）
    pub fn detect(path: &Path, content: &str) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("csv") => Delimiter::Comma,
            Some("tsv") | Some("tab") => Delimiter::Tab,
            _ if content.contains('\t') => Delimiter::Tab,
            _ => Delimiter::Comma,
        }
    }

    fn as_byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
        }
    }
}

/// マスタファイルを行 × セルとして読み込む
pub fn load_master_rows(path: &Path, skip_header: bool) -> Result<Vec<Vec<String>>> {
    if !path.exists() {
        return Err(HsnError::FileNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let delimiter = Delimiter::detect(path, &content);
    log::debug!("master {} parsed as {:?}", path.display(), delimiter);

    parse_rows(&content, delimiter, skip_header)
}

/// 区切りテキストを行 × セルに分解（空行は除く）
///
/// クォート内の区切り文字・改行はセルの一部として扱う。セルの前後空白はそのまま返す。
pub fn parse_rows(content: &str, delimiter: Delimiter, skip_header: bool) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .has_headers(skip_header)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            HsnError::InvalidMaster(format!("{}行目を解析できません: {}", row_idx + 1, e))
        })?;

        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(rows)
}

/// ブローシャのテキストを行単位で読み込む
///
/// 空行もそのまま返す（照合側でスキップ）。
pub fn load_lines(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(HsnError::FileNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    Ok(split_lines(&content))
}

pub fn split_lines(content: &str) -> Vec<String> {
    content.lines().map(|l| l.to_string()).collect()
}
