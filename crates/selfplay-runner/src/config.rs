use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::strategies::StrategyKind;

/// Runner configuration loaded from TOML; CLI flags override field by field.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SelfplayConfig {
    /// Number of games to play.
    #[serde(default = "defaults::num_games")]
    pub num_games: u32,

    /// Base seed; game `i` plays on `base_seed + i`. Entropy when omitted.
    #[serde(default)]
    pub base_seed: Option<u64>,

    /// Direction-selection strategy.
    #[serde(default)]
    pub strategy: StrategyKind,

    #[serde(default)]
    pub report: Report,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Default)]
pub struct Report {
    /// Optional JSON file for per-game records.
    #[serde(default)]
    pub results_file: Option<PathBuf>,
}

impl Default for SelfplayConfig {
    fn default() -> Self {
        Self {
            num_games: defaults::num_games(),
            base_seed: None,
            strategy: StrategyKind::default(),
            report: Report::default(),
        }
    }
}

impl SelfplayConfig {
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = std::fs::File::open(&path)
            .with_context(|| format!("failed to open {}", path.as_ref().display()))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        let cfg: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse {}", path.as_ref().display()))?;
        Ok(cfg)
    }
}

mod defaults {
    pub fn num_games() -> u32 {
        100
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn empty_config_gets_defaults() {
        let cfg: SelfplayConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.num_games, 100);
        assert_eq!(cfg.strategy, StrategyKind::Random);
        assert!(cfg.base_seed.is_none());
        assert!(cfg.report.results_file.is_none());
    }

    #[test]
    fn from_toml_reads_every_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("selfplay.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "num_games = 8").unwrap();
        writeln!(file, "base_seed = 7").unwrap();
        writeln!(file, "strategy = \"Cycle\"").unwrap();
        writeln!(file, "[report]").unwrap();
        writeln!(file, "results_file = \"runs.json\"").unwrap();

        let cfg = SelfplayConfig::from_toml(&path).unwrap();
        assert_eq!(cfg.num_games, 8);
        assert_eq!(cfg.base_seed, Some(7));
        assert_eq!(cfg.strategy, StrategyKind::Cycle);
        assert_eq!(cfg.report.results_file, Some(PathBuf::from("runs.json")));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SelfplayConfig::from_toml(dir.path().join("absent.toml"));
        assert!(err.is_err());
    }
}
