use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::catalog::ProfileCatalog;
use crate::error::ConfigError;
use crate::league_weights::LeagueWeights;
use crate::minutes_gate::MinutesGate;
use crate::position::{PositionSynonyms, ReconciliationPolicy};
use crate::records::Scope;

static BUILTIN: Lazy<EngineConfig> = Lazy::new(|| EngineConfig {
    catalog: ProfileCatalog::builtin(),
    positions: PositionSynonyms::default(),
    league_weights: LeagueWeights::builtin(),
    minutes_gate: MinutesGate::default(),
    reconciliation: ReconciliationPolicy::default(),
    parallel_scopes: true,
    scopes: Vec::new(),
});

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "ProfileCatalog::builtin")]
    pub catalog: ProfileCatalog,
    #[serde(default)]
    pub positions: PositionSynonyms,
    #[serde(default = "LeagueWeights::builtin")]
    pub league_weights: LeagueWeights,
    #[serde(default)]
    pub minutes_gate: MinutesGate,
    #[serde(default)]
    pub reconciliation: ReconciliationPolicy,
    #[serde(default = "default_parallel")]
    pub parallel_scopes: bool,
    #[serde(default)]
    pub scopes: Vec<Scope>,
}

fn default_parallel() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

impl EngineConfig {
    pub fn builtin() -> &'static EngineConfig {
        &BUILTIN
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let cfg: EngineConfig = serde_json::from_str(raw).context("parse engine config")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read engine config {}", path.display()))?;
        Self::from_json_str(&raw)
    }

    pub fn from_env() -> Result<Self> {
        match config_path_from_env() {
            Some(path) => Self::from_json_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.catalog.validate()?;
        self.league_weights.validate()?;
        self.minutes_gate.validate()?;
        Ok(())
    }
}

fn config_path_from_env() -> Option<PathBuf> {
    let raw = std::env::var("RATING_CONFIG").ok()?;
    if raw.trim().is_empty() {
        return None;
    }
    Some(PathBuf::from(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::CanonicalPosition;

    #[test]
    fn empty_json_is_the_builtin_config() {
        let cfg = EngineConfig::from_json_str("{}").expect("empty config should parse");
        assert_eq!(cfg.catalog, ProfileCatalog::builtin());
        assert_eq!(cfg.minutes_gate, MinutesGate::default());
        assert!(cfg.parallel_scopes);
        assert_eq!(cfg.reconciliation, ReconciliationPolicy::PrimaryOnly);
    }

    #[test]
    fn partial_override_keeps_other_sections() {
        let raw = r#"{
            "league_weights": { "competitions": { "Serie_A": 2.0 } },
            "reconciliation": "primary_then_secondary",
            "parallel_scopes": false
        }"#;
        let cfg = EngineConfig::from_json_str(raw).expect("override should parse");
        let scope = Scope::new("Serie_A", "2024-25");
        assert_eq!(cfg.league_weights.weight_for(&scope, CanonicalPosition::Winger), 2.0);
        assert_eq!(cfg.league_weights.default, 1.0);
        assert!(!cfg.parallel_scopes);
        assert!(!cfg.catalog.profiles(CanonicalPosition::Winger).is_empty());
    }

    #[test]
    fn invalid_catalog_is_rejected() {
        let raw = r#"{
            "catalog": { "positions": { "Striker": [
                { "name": "Bad", "w_on": 1.0, "w_off": 0.0, "on_ball": [], "off_ball": [], "scale_factor": 1.0 }
            ] } }
        }"#;
        assert!(EngineConfig::from_json_str(raw).is_err());
    }
}
