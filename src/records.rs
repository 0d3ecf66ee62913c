use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::numeric::{RawValue, parse_value};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Scope {
    pub competition: String,
    pub season: String,
}

impl Scope {
    pub fn new(competition: impl Into<String>, season: impl Into<String>) -> Self {
        Self {
            competition: competition.into(),
            season: season.into(),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.competition, self.season)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatRecord {
    pub player: String,
    pub team: String,
    #[serde(default)]
    pub minutes: f64,
    #[serde(default)]
    pub position: String,
    // Label from an independent second source (e.g. a transfer-market listing).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_position: Option<String>,
    #[serde(default)]
    pub stats: HashMap<String, Option<RawValue>>,
}

impl StatRecord {
    pub fn new(
        player: impl Into<String>,
        team: impl Into<String>,
        minutes: f64,
        position: impl Into<String>,
    ) -> Self {
        Self {
            player: player.into(),
            team: team.into(),
            minutes,
            position: position.into(),
            secondary_position: None,
            stats: HashMap::new(),
        }
    }

    pub fn with_stat(mut self, indicator: &str, value: impl Into<RawValue>) -> Self {
        self.stats.insert(indicator.to_string(), Some(value.into()));
        self
    }

    pub fn with_secondary_position(mut self, label: impl Into<String>) -> Self {
        self.secondary_position = Some(label.into());
        self
    }

    // Present and non-null, even if it fails to parse.
    pub fn carries(&self, indicator: &str) -> bool {
        matches!(self.stats.get(indicator), Some(Some(_)))
    }

    pub fn value(&self, indicator: &str) -> f64 {
        parse_value(self.stats.get(indicator).and_then(|v| v.as_ref()))
    }

    pub fn minutes_played(&self) -> f64 {
        if self.minutes.is_finite() {
            self.minutes.max(0.0)
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopePopulation {
    pub competition: String,
    pub season: String,
    #[serde(default)]
    pub records: Vec<StatRecord>,
}

impl ScopePopulation {
    pub fn scope(&self) -> Scope {
        Scope::new(self.competition.clone(), self.season.clone())
    }
}
