use thiserror::Error;

use crate::engine::{ScopeRatings, SkippedScope};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("profile {position}/{profile}: {reason}")]
    Profile {
        position: String,
        profile: String,
        reason: String,
    },

    #[error("minutes gate: {0}")]
    Gate(String),

    #[error("league weight for {key} must be positive and finite, got {value}")]
    LeagueWeight { key: String, value: f64 },
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(
        "no scope produced any ratings ({} skipped, {} without rated players)",
        .skipped.len(),
        .unrated.len()
    )]
    NoScopesRated {
        skipped: Vec<SkippedScope>,
        unrated: Vec<ScopeRatings>,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
