use crate::error::{HsnError, Result};
use hsn_matcher_common::{MatchMode, MatchOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const TOP_K_ENV: &str = "HSN_MATCHER_TOP_K";

/// 選択方式（設定ファイル・CLI共通）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModeKind {
    /// 最高スコアの1件
    #[default]
    Best,
    /// 上位K件
    TopK,
}

impl std::str::FromStr for ModeKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "best" | "best-only" | "1" => Ok(ModeKind::Best),
            "top-k" | "topk" | "top" => Ok(ModeKind::TopK),
            _ => Err(format!("Unknown mode: {}. Use best or top-k", s)),
        }
    }
}

impl std::fmt::Display for ModeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModeKind::Best => write!(f, "best"),
            ModeKind::TopK => write!(f, "top-k"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub default_mode: ModeKind,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// 最低スコア（未設定なら足切りなし）
    #[serde(default)]
    pub min_score: Option<f64>,
    #[serde(default)]
    pub prefilter: bool,
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_top_k() -> usize {
    3
}

fn default_parallel() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_mode: ModeKind::Best,
            top_k: default_top_k(),
            min_score: None,
            prefilter: false,
            parallel: default_parallel(),
        }
    }
}

/// 1回の実行でCLIから上書きする値
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub mode: Option<ModeKind>,
    pub top_k: Option<usize>,
    pub min_score: Option<f64>,
    pub prefilter: bool,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| HsnError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("hsn-matcher").join("config.json"))
    }

    /// 環境変数のtop-k（保存はしない）
    fn env_top_k() -> Result<Option<usize>> {
        match std::env::var(TOP_K_ENV) {
            Ok(value) => value
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| HsnError::Config(format!("{} が数値ではありません: {}", TOP_K_ENV, value))),
            Err(_) => Ok(None),
        }
    }

    pub fn set_top_k(&mut self, k: usize) -> Result<()> {
        if k == 0 {
            return Err(HsnError::Config("top_k は1以上を指定してください".into()));
        }
        self.top_k = k;
        self.save()
    }

    pub fn set_mode(&mut self, mode: ModeKind) -> Result<()> {
        self.default_mode = mode;
        self.save()
    }

    /// 設定・環境変数・CLI指定から照合オプションを組み立てる
    ///
    /// 優先順位: CLI > 環境変数 > 設定ファイル
    pub fn match_options(&self, overrides: &Overrides) -> Result<MatchOptions> {
        self.resolve_options(overrides, Self::env_top_k()?)
    }

    fn resolve_options(&self, overrides: &Overrides, env_top_k: Option<usize>) -> Result<MatchOptions> {
        let k = overrides.top_k.or(env_top_k).unwrap_or(self.top_k);
        // --top-k だけ指定された場合はtop-kモードとみなす
        let kind = overrides.mode.unwrap_or(if overrides.top_k.is_some() {
            ModeKind::TopK
        } else {
            self.default_mode
        });

        let mode = match kind {
            ModeKind::Best => MatchMode::BestOnly,
            ModeKind::TopK => MatchMode::TopK(k),
        };

        let options = MatchOptions {
            mode,
            min_score: overrides.min_score.or(self.min_score),
            prefilter: overrides.prefilter || self.prefilter,
        };
        options.validate()?;
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default_mode, ModeKind::Best);
        assert_eq!(config.top_k, 3);
        assert!(config.min_score.is_none());
        assert!(config.parallel);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"default_mode":"top-k"}"#).unwrap();
        assert_eq!(config.default_mode, ModeKind::TopK);
        assert_eq!(config.top_k, 3);
        assert!(config.parallel);
    }

    #[test]
    fn test_mode_kind_from_str() {
        assert_eq!("best".parse::<ModeKind>(), Ok(ModeKind::Best));
        assert_eq!("TOP-K".parse::<ModeKind>(), Ok(ModeKind::TopK));
        assert!("random".parse::<ModeKind>().is_err());
    }

    #[test]
    fn test_match_options_default_best() {
        let options = Config::default().resolve_options(&Overrides::default(), None).unwrap();
        assert_eq!(options.mode, MatchMode::BestOnly);
        assert!(!options.prefilter);
    }

    #[test]
    fn test_match_options_top_k_override() {
        let overrides = Overrides {
            top_k: Some(5),
            ..Default::default()
        };
        let options = Config::default().resolve_options(&overrides, None).unwrap();
        assert_eq!(options.mode, MatchMode::TopK(5));
    }

    #[test]
    fn test_env_top_k_applies_per_run_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = Config {
            default_mode: ModeKind::TopK,
            ..Default::default()
        };

        let options = config.resolve_options(&Overrides::default(), Some(7)).unwrap();
        assert_eq!(options.mode, MatchMode::TopK(7));
        assert_eq!(config.top_k, 3);

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().top_k, 3);
    }

    #[test]
    fn test_cli_top_k_beats_env() {
        let overrides = Overrides {
            top_k: Some(2),
            ..Default::default()
        };
        let options = Config::default().resolve_options(&overrides, Some(7)).unwrap();
        assert_eq!(options.mode, MatchMode::TopK(2));
    }

    #[test]
    fn test_match_options_rejects_zero_k() {
        let overrides = Overrides {
            mode: Some(ModeKind::TopK),
            top_k: Some(0),
            ..Default::default()
        };
        let err = Config::default().resolve_options(&overrides, None).unwrap_err();
        assert!(matches!(err, HsnError::Common(hsn_matcher_common::Error::Config(_))));
    }
}
