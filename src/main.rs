use clap::Parser;
use hsn_matcher::{cli, config, error, export, loader, master_selector, runner};
use hsn_matcher_common::{MasterIndex, MatchMode};
use cli::{Cli, Commands};
use config::{Config, ModeKind, Overrides};
use error::{HsnError, Result};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Match {
            master,
            lines,
            mode,
            top_k,
            min_score,
            prefilter,
            sequential,
            skip_header,
            output,
            format,
        } => {
            println!("🔍 hsn-match - HSNコード照合\n");

            let options = config.match_options(&Overrides {
                mode,
                top_k,
                min_score,
                prefilter,
            })?;

            let master_path = match master {
                Some(path) => path,
                None => master_selector::select_master_interactive(Path::new(
                    master_selector::DEFAULT_MASTER_DIR,
                ))?,
            };

            // 1. マスタ読み込み
            println!("[1/3] HSNマスタを読み込み中...");
            let index = build_index(&master_path, skip_header)?;
            println!("✔ {}件のマスタレコード\n", index.len());

            // 2. ブローシャ行の読み込み
            println!("[2/3] ブローシャの行を読み込み中...");
            let brochure_lines = loader::load_lines(&lines)?;
            println!("✔ {}行を検出\n", brochure_lines.len());

            // 3. 照合
            println!("[3/3] 照合中... (方式: {})", options.mode);
            let summary = runner::run_matching(
                &brochure_lines,
                &index,
                &options,
                runner::RunOptions {
                    parallel: config.parallel && !sequential,
                    show_progress: !cli.verbose,
                },
            );
            if summary.empty_index {
                println!("⚠ HSNマスタが0件のため照合できません");
            }
            println!(
                "✔ 照合完了: {}件 (空行スキップ: {}行)\n",
                summary.results.len(),
                summary.skipped_lines
            );

            if summary.results.is_no_matches() {
                println!("⚠ HSNマスタに該当する品目が見つかりませんでした");
                return Ok(());
            }

            match output {
                Some(output) => {
                    export::export_results(&summary.results, options.mode, &format, &output, "hsn_matches")?;
                }
                None => export::print_results(&summary.results, options.mode),
            }

            println!("\n✅ 完了");
        }

        Commands::Master {
            master,
            skip_header,
            limit,
        } => {
            let index = build_index(&master, skip_header)?;
            println!("📋 HSNマスタ: {} ({}件)\n", master.display(), index.len());
            for record in index.records().iter().take(limit) {
                println!("  {:<12} {}", record.code, record.description);
            }
            if index.len() > limit {
                println!("  ... 他{}件", index.len() - limit);
            }
        }

        Commands::Config {
            set_top_k,
            set_mode,
            show,
        } => {
            let mut config = config;

            if let Some(k) = set_top_k {
                config.set_top_k(k)?;
                println!("✔ top-kの既定件数を{}に設定しました", k);
            }

            if let Some(mode) = set_mode {
                config.set_mode(mode)?;
                println!("✔ 既定の選択方式を{}に設定しました", mode);
            }

            if show {
                let mode = match config.default_mode {
                    ModeKind::Best => MatchMode::BestOnly,
                    ModeKind::TopK => MatchMode::TopK(config.top_k),
                };
                println!("設定:");
                println!("  パス: {}", Config::config_path()?.display());
                println!("  選択方式: {}", mode);
                println!("  top-k件数: {}", config.top_k);
                println!(
                    "  最低スコア: {}",
                    config.min_score.map(|s| s.to_string()).unwrap_or_else(|| "なし".into())
                );
                println!("  候補絞り込み: {}", if config.prefilter { "有効" } else { "無効" });
                println!("  並列処理: {}", if config.parallel { "有効" } else { "無効" });
            }
        }
    }

    Ok(())
}

/// マスタファイルからインデックスを構築
fn build_index(path: &Path, skip_header: bool) -> Result<MasterIndex> {
    let rows = loader::load_master_rows(path, skip_header)?;
    MasterIndex::build(&rows).map_err(|e| match e {
        hsn_matcher_common::Error::MalformedMasterTable { columns } => HsnError::InvalidMaster(format!(
            "{}: 2列以上（コード・品名説明）が必要です（検出: {}列）",
            path.display(),
            columns
        )),
        other => other.into(),
    })
}

fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
