//! 照合の実行
//!
//! 行単位で照合し、結果を集約する。マスタは読み取り専用なので
//! rayonで行ごとに並列化しても結果（順序を含む）は逐次実行と同じ。

use hsn_matcher_common::{aggregate, match_line, MasterIndex, MatchOptions, MatchOutcome, ResultSet};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

/// 実行結果のまとめ
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub results: ResultSet,
    /// 入力行数
    pub total_lines: usize,
    /// 空行としてスキップした行数
    pub skipped_lines: usize,
    /// マスタが0件だった
    pub empty_index: bool,
}

/// 実行オプション
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub parallel: bool,
    pub show_progress: bool,
}

pub fn run_matching(
    lines: &[String],
    index: &MasterIndex,
    options: &MatchOptions,
    run: RunOptions,
) -> RunSummary {
    let progress = if run.show_progress {
        let bar = ProgressBar::new(lines.len() as u64);
        let style = ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} 行 ({eta})")
            .map(|s| s.progress_chars("=>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        bar
    } else {
        ProgressBar::hidden()
    };

    let match_one = |line: &String| {
        let outcome = match_line(line, index, options);
        progress.inc(1);
        outcome
    };

    let outcomes: Vec<MatchOutcome> = if run.parallel {
        lines.par_iter().map(match_one).collect()
    } else {
        lines.iter().map(match_one).collect()
    };
    progress.finish_and_clear();

    let skipped_lines = outcomes
        .iter()
        .filter(|o| matches!(o, MatchOutcome::Skipped))
        .count();
    let empty_index = outcomes.iter().any(MatchOutcome::is_empty_index);

    RunSummary {
        results: aggregate(outcomes.into_iter().map(MatchOutcome::into_results)),
        total_lines: lines.len(),
        skipped_lines,
        empty_index,
    }
}
