pub mod json;
pub mod csv;

use crate::cli::ExportFormat;
use crate::error::Result;
use hsn_matcher_common::{MatchMode, ResultSet};
use std::path::{Path, PathBuf};

/// 出力先がディレクトリ（または拡張子なし）なら既定ファイル名を付ける
pub fn output_path_for_format(output: &Path, title: &str, format: &ExportFormat) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", title, format.extension()))
    } else {
        output.to_path_buf()
    }
}

pub fn export_results(
    results: &ResultSet,
    mode: MatchMode,
    format: &ExportFormat,
    output: &Path,
    title: &str,
) -> Result<PathBuf> {
    let output_path = output_path_for_format(output, title, format);

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    match format {
        ExportFormat::Json => {
            println!("- JSONを生成中...");
            json::write_json(results, mode, &output_path)?;
        }
        ExportFormat::Csv => {
            println!("- CSVを生成中...");
            csv::write_csv(results, &output_path)?;
        }
    }
    println!("✔ 出力: {}", output_path.display());

    Ok(output_path)
}

/// 結果を端末に表形式で表示
pub fn print_results(results: &ResultSet, mode: MatchMode) {
    if results.is_no_matches() {
        println!("⚠ HSNマスタに該当する品目が見つかりませんでした");
        return;
    }

    let last_header = match mode {
        MatchMode::BestOnly => "Score",
        MatchMode::TopK(_) => "Matched Description",
    };
    println!(
        "{:<12} {:<30} {:<12} {}",
        "Lot Number", "Product Name", "HSN Code", last_header
    );
    println!("{}", "-".repeat(80));

    for r in results {
        let last = match mode {
            MatchMode::BestOnly => r.score.map(|s| format!("{:.1}", s)).unwrap_or_default(),
            MatchMode::TopK(_) => r.matched_description.clone().unwrap_or_default(),
        };
        println!(
            "{:<12} {:<30} {:<12} {}",
            r.lot_number, r.product_name, r.code, last
        );
    }
}
