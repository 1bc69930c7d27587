//! CSV出力
//!
//! 列: Lot Number, Product Name, Product Description, HSN Code, Matched Description, Score

use crate::error::{HsnError, Result};
use hsn_matcher_common::{MatchResult, ResultSet};
use std::path::Path;

const HEADER: [&str; 6] = [
    "Lot Number",
    "Product Name",
    "Product Description",
    "HSN Code",
    "Matched Description",
    "Score",
];

pub fn write_csv(results: &ResultSet, output_path: &Path) -> Result<()> {
    let file = std::fs::File::create(output_path)
        .map_err(|e| HsnError::Export(format!("CSV作成エラー: {}", e)))?;
    write_records(results, std::io::BufWriter::new(file))
}

/// CSVを書き出す（列構成はモードによらず固定）
pub fn write_records<W: std::io::Write>(results: &ResultSet, out: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);

    writer.write_record(HEADER).map_err(write_error)?;
    for r in results {
        writer.write_record(row(r)).map_err(write_error)?;
    }
    writer
        .flush()
        .map_err(|e| HsnError::Export(format!("CSV書き込みエラー: {}", e)))?;
    Ok(())
}

fn row(r: &MatchResult) -> [String; 6] {
    [
        r.lot_number.clone(),
        r.product_name.clone(),
        r.product_description.clone(),
        r.code.clone(),
        r.matched_description.clone().unwrap_or_default(),
        r.score.map(|s| format!("{:.2}", s)).unwrap_or_default(),
    ]
}

fn write_error(e: csv::Error) -> HsnError {
    HsnError::Export(format!("CSV書き込みエラー: {}", e))
}
