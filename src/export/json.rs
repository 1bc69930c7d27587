//! JSON出力

use crate::error::Result;
use hsn_matcher_common::{MatchMode, MatchResult, ResultSet};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    generated_at: String,
    mode: String,
    count: usize,
    results: &'a [MatchResult],
}

pub fn write_json(results: &ResultSet, mode: MatchMode, output_path: &Path) -> Result<()> {
    let report = JsonReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        mode: mode.to_string(),
        count: results.len(),
        results: results.results(),
    };

    let file = File::create(output_path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &report)?;
    Ok(())
}
