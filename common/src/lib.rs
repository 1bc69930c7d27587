//! HSN Matcher Common Library
//!
//! ブローシャの品目行をHSNマスタと照合するエンジン。
//! ファイル入出力は持たず、表データと行の列を受け取って結果列を返す。

pub mod types;
pub mod error;
pub mod normalizer;
pub mod lot;
pub mod master;
pub mod similarity;
pub mod matcher;
pub mod aggregate;

pub use types::{MasterRecord, MatchMode, MatchOptions, MatchResult, NormalizedQuery};
pub use error::{Error, Result};
pub use normalizer::normalize;
pub use lot::extract_lot_number;
pub use master::MasterIndex;
pub use similarity::score;
pub use matcher::{match_line, match_lines, MatchOutcome};
pub use aggregate::{aggregate, ResultSet, ResultStatus};
