//! 照合パイプラインの統合テスト
//!
//! ファイル読み込み → インデックス構築 → 照合 → 集約 までを通しで検証

use hsn_matcher::loader;
use hsn_matcher::runner::{run_matching, RunOptions};
use hsn_matcher_common::{aggregate, match_lines, Error, MasterIndex, MatchOptions};
use std::path::Path;
use tempfile::tempdir;

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("テストファイル書き込み失敗");
    path
}

#[test]
fn test_best_only_end_to_end() {
    let dir = tempdir().expect("Failed to create temp dir");
    let master = write(dir.path(), "hsn.csv", "1001,Steel Pipe\n1002,Plastic Pipe\n");
    let lines = write(dir.path(), "brochure.txt", "Heavy duty plastic pipe, Lot No: X9\n");

    let rows = loader::load_master_rows(&master, false).unwrap();
    let index = MasterIndex::build(&rows).unwrap();
    let brochure = loader::load_lines(&lines).unwrap();

    let summary = run_matching(&brochure, &index, &MatchOptions::best_only(), RunOptions::default());
    let results = summary.results.results();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].code, "1002");
    assert_eq!(results[0].lot_number, "X9");
    assert_eq!(results[0].product_description, "Heavy duty plastic pipe, Lot No: X9");
}

#[test]
fn test_single_column_master_is_malformed() {
    let dir = tempdir().expect("Failed to create temp dir");
    let master = write(dir.path(), "codes.csv", "1001\n1002\n");

    let rows = loader::load_master_rows(&master, false).unwrap();
    let err = MasterIndex::build(&rows).unwrap_err();
    assert!(matches!(err, Error::MalformedMasterTable { columns: 1 }));
}

#[test]
fn test_notes_column_discarded() {
    let dir = tempdir().expect("Failed to create temp dir");
    let master = write(
        dir.path(),
        "hsn.tsv",
        "HSN Code\tProduct Description\tNotes\n7306\tSteel Pipe\tSECRET-NOTE\n",
    );

    let rows = loader::load_master_rows(&master, true).unwrap();
    let index = MasterIndex::build(&rows).unwrap();
    let per_line = match_lines(&["steel pipe"], &index, &MatchOptions::top_k(5));
    let set = aggregate(per_line);

    let json = serde_json::to_string(&set).unwrap();
    assert!(!json.contains("SECRET-NOTE"));
    assert_eq!(set.results()[0].matched_description.as_deref(), Some("Steel Pipe"));
}

#[test]
fn test_top_k_with_small_index() {
    let index = MasterIndex::build(&[
        vec!["1001".to_string(), "Steel Pipe".to_string()],
        vec!["1002".to_string(), "Plastic Pipe".to_string()],
    ])
    .unwrap();

    let set = aggregate(match_lines(&["pipe fittings"], &index, &MatchOptions::top_k(3)));
    assert_eq!(set.len(), 2);
}

#[test]
fn test_blank_lines_yield_no_matches() {
    let dir = tempdir().expect("Failed to create temp dir");
    let master = write(dir.path(), "hsn.csv", "1001,Steel Pipe\n");
    let lines = write(dir.path(), "brochure.txt", "\n   \n\t\n");

    let index = MasterIndex::build(&loader::load_master_rows(&master, false).unwrap()).unwrap();
    let brochure = loader::load_lines(&lines).unwrap();

    for options in [MatchOptions::best_only(), MatchOptions::top_k(3)] {
        let summary = run_matching(&brochure, &index, &options, RunOptions::default());
        assert!(summary.results.is_no_matches());
        assert!(!summary.empty_index);
    }
}

#[test]
fn test_empty_brochure_file_yields_no_matches() {
    let dir = tempdir().expect("Failed to create temp dir");
    let master = write(dir.path(), "hsn.csv", "1001,Steel Pipe\n");
    let lines = write(dir.path(), "brochure.txt", "");

    let index = MasterIndex::build(&loader::load_master_rows(&master, false).unwrap()).unwrap();
    let brochure = loader::load_lines(&lines).unwrap();
    assert!(brochure.is_empty());

    let summary = run_matching(&brochure, &index, &MatchOptions::best_only(), RunOptions::default());
    assert_eq!(summary.total_lines, 0);
    assert!(summary.results.is_no_matches());
    assert!(!summary.empty_index);
}

#[test]
fn test_quoted_multiline_description_is_one_record() {
    let dir = tempdir().expect("Failed to create temp dir");
    let master = write(dir.path(), "hsn.csv", "1001,\"Steel\nPipe\"\n1002,Plastic Pipe\n");

    let index = MasterIndex::build(&loader::load_master_rows(&master, false).unwrap()).unwrap();
    assert_eq!(index.len(), 2);
    assert_eq!(index.records()[1].code, "1002");
    assert_eq!(index.normalized_description(0), "steel pipe");

    let set = aggregate(match_lines(&["steel pipe"], &index, &MatchOptions::best_only()));
    assert_eq!(set.results()[0].code, "1001");
    assert_eq!(set.results()[0].score, Some(100.0));
}

#[test]
fn test_header_only_master_gives_empty_index_condition() {
    let dir = tempdir().expect("Failed to create temp dir");
    let master = write(dir.path(), "hsn.csv", "HSN Code,Product Description\n");
    let rows = loader::load_master_rows(&master, true).unwrap();
    let index = MasterIndex::build(&rows).unwrap();
    assert!(index.is_empty());

    let lines = vec!["steel pipe".to_string()];
    let summary = run_matching(&lines, &index, &MatchOptions::best_only(), RunOptions::default());
    assert!(summary.empty_index);
    assert!(summary.results.is_no_matches());
}

#[test]
fn test_results_keep_line_and_rank_order() {
    let index = MasterIndex::build(&[
        vec!["A".to_string(), "copper wire".to_string()],
        vec!["B".to_string(), "steel pipe".to_string()],
        vec!["C".to_string(), "steel pipe elbow".to_string()],
    ])
    .unwrap();
    let lines = vec![
        "steel pipe".to_string(),
        String::new(),
        "insulated copper wire".to_string(),
    ];

    let summary = run_matching(
        &lines,
        &index,
        &MatchOptions::top_k(2),
        RunOptions {
            parallel: true,
            show_progress: false,
        },
    );
    let codes: Vec<&str> = summary.results.iter().map(|r| r.code.as_str()).collect();
    assert_eq!(codes, vec!["B", "C", "A", "B"]);
}
