use thiserror::Error;

#[derive(Error, Debug)]
pub enum HsnError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("マスタファイルが不正: {0}")]
    InvalidMaster(String),

    #[error("マスタが選択されていません。`--master <FILE>` で指定するか master/ にCSV/TSVを置いてください")]
    MasterNotSelected,

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("出力エラー: {0}")]
    Export(String),

    #[error("対話入力エラー: {0}")]
    Prompt(String),

    #[error(transparent)]
    Common(#[from] hsn_matcher_common::Error),
}

pub type Result<T> = std::result::Result<T, HsnError>;
