//! マスタファイル対話式選択モジュール

use crate::error::{HsnError, Result};
use dialoguer::Select;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// マスタを探す既定のフォルダ
pub const DEFAULT_MASTER_DIR: &str = "master";

const MASTER_EXTENSIONS: &[&str] = &["csv", "tsv", "txt"];

/// フォルダ直下から利用可能なマスタ一覧を取得（名前順）
pub fn list_available_masters(master_dir: &Path) -> Vec<(String, PathBuf)> {
    if !master_dir.exists() {
        return Vec::new();
    }

    let mut masters: Vec<(String, PathBuf)> = WalkDir::new(master_dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .map(|ext| {
                    let ext = ext.to_string_lossy().to_lowercase();
                    MASTER_EXTENSIONS.contains(&ext.as_str())
                })
                .unwrap_or(false)
        })
        .filter_map(|e| {
            let name = e.path().file_stem()?.to_string_lossy().to_string();
            Some((name, e.path().to_path_buf()))
        })
        .collect();

    masters.sort_by(|a, b| a.0.cmp(&b.0));
    masters
}

/// 対話式でマスタを選択
///
/// 候補が1件ならそれを使う。0件ならエラー。
pub fn select_master_interactive(master_dir: &Path) -> Result<PathBuf> {
    let masters = list_available_masters(master_dir);

    match masters.len() {
        0 => Err(HsnError::MasterNotSelected),
        1 => {
            let (name, path) = &masters[0];
            println!("→ {} を使用", name);
            Ok(path.clone())
        }
        _ => {
            let items: Vec<String> = masters
                .iter()
                .map(|(name, path)| format!("{} ({}件)", name, count_rows(path)))
                .collect();

            let selected = Select::new()
                .with_prompt("📋 HSNマスタを選択してください")
                .items(&items)
                .default(0)
                .interact()
                .map_err(|e| HsnError::Prompt(e.to_string()))?;

            let (name, path) = &masters[selected];
            println!("→ {} を使用", name);
            Ok(path.clone())
        }
    }
}

/// 空行を除いた行数
fn count_rows(path: &Path) -> usize {
    std::fs::read_to_string(path)
        .map(|content| content.lines().filter(|l| !l.trim().is_empty()).count())
        .unwrap_or(0)
}
