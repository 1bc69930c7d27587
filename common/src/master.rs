//! HSNマスタインデックス
//!
//! 参照表（コード → 品名説明）を照合用のレコード列として保持する。
//! 構築後は読み取り専用。新しい参照表が来たら作り直す。

use crate::error::{Error, Result};
use crate::normalizer::normalize;
use crate::similarity::tokenize;
use crate::types::MasterRecord;
use std::collections::{BTreeSet, HashMap};

/// マスタインデックス
#[derive(Debug, Clone, Default)]
pub struct MasterIndex {
    /// 挿入順を保持したレコード列
    records: Vec<MasterRecord>,
    /// 正規化済みの品名説明（recordsと同じ並び）
    normalized: Vec<String>,
    /// トークン → レコード位置（昇順）
    token_index: HashMap<String, Vec<usize>>,
}

impl MasterIndex {
    /// 表データ（行 × セル）からインデックスを構築
    ///
    /// - 列数は全行の最大セル数で判定し、2列未満ならエラー
    /// - 1列目をコード、2列目を品名説明として位置で扱う（ヘッダー名は見ない）
    /// - 3列目以降は捨てる
    /// - 説明が欠けた行も残す（スコアは常に0になる）
    ///
    /// 0行の表は空インデックスとして成功する。
    pub fn build(rows: &[Vec<String>]) -> Result<Self> {
        if rows.is_empty() {
            log::warn!("master table has no rows; building empty index");
            return Ok(Self::default());
        }

        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        if columns < 2 {
            return Err(Error::MalformedMasterTable { columns });
        }

        let records = rows
            .iter()
            .map(|row| {
                let cell = |i: usize| {
                    row.get(i)
                        .map(|c| c.trim().to_string())
                        .unwrap_or_default()
                };
                MasterRecord::new(cell(0), cell(1))
            })
            .collect();

        Ok(Self::from_records(records))
    }

    /// レコード列から直接構築
    pub fn from_records(records: Vec<MasterRecord>) -> Self {
        let normalized: Vec<String> = records.iter().map(|r| normalize(&r.description)).collect();

        let mut token_index: HashMap<String, Vec<usize>> = HashMap::new();
        for (position, description) in normalized.iter().enumerate() {
            for token in tokenize(description) {
                token_index.entry(token.to_string()).or_default().push(position);
            }
        }

        log::debug!(
            "master index built: {} records, {} distinct tokens",
            records.len(),
            token_index.len()
        );

        Self {
            records,
            normalized,
            token_index,
        }
    }

    /// 全レコード（挿入順）
    pub fn records(&self) -> &[MasterRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 正規化済みの品名説明
    pub fn normalized_description(&self, position: usize) -> &str {
        self.normalized.get(position).map(String::as_str).unwrap_or("")
    }

    /// いずれかのトークンを共有するレコード位置（昇順）
    pub fn shortlist<'a>(&self, tokens: impl IntoIterator<Item = &'a str>) -> BTreeSet<usize> {
        tokens
            .into_iter()
            .filter_map(|token| self.token_index.get(token))
            .flatten()
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_build_two_columns() {
        let rows = table(&[&["1001", "Steel Pipe"], &["1002", "Plastic Pipe"]]);
        let index = MasterIndex::build(&rows).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.records()[0], MasterRecord::new("1001", "Steel Pipe"));
        assert_eq!(index.normalized_description(1), "plastic pipe");
    }

    #[test]
    fn test_build_single_column_fails() {
        let rows = table(&[&["1001"], &["1002"]]);
        let err = MasterIndex::build(&rows).unwrap_err();
        assert!(matches!(err, Error::MalformedMasterTable { columns: 1 }));
    }

    #[test]
    fn test_build_drops_extra_columns() {
        let rows = table(&[&["1001", "Steel Pipe", "discontinued"]]);
        let index = MasterIndex::build(&rows).unwrap();
        assert_eq!(index.records()[0].description, "Steel Pipe");
    }

    #[test]
    fn test_build_keeps_missing_description_and_duplicates() {
        let rows = table(&[&["1001", "Steel Pipe"], &["1001"], &["1001", "Steel Pipe"]]);
        let index = MasterIndex::build(&rows).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.records()[1].description, "");
        assert_eq!(index.records()[2].code, "1001");
    }

    #[test]
    fn test_build_header_row_is_data() {
        let rows = table(&[&["HSN Code", "Product Description"], &["1001", "Steel Pipe"]]);
        let index = MasterIndex::build(&rows).unwrap();
        assert_eq!(index.records()[0].code, "HSN Code");
    }

    #[test]
    fn test_build_empty_table() {
        let rows: Vec<Vec<String>> = Vec::new();
        let index = MasterIndex::build(&rows).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn test_shortlist() {
        let rows = table(&[
            &["1", "Steel Pipe"],
            &["2", "Copper Wire"],
            &["3", "Plastic Pipe"],
        ]);
        let index = MasterIndex::build(&rows).unwrap();
        let hits: Vec<usize> = index.shortlist(["pipe"]).into_iter().collect();
        assert_eq!(hits, vec![0, 2]);
        assert!(index.shortlist(["gadget"]).is_empty());
    }
}
