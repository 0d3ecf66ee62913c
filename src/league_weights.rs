use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::position::CanonicalPosition;
use crate::records::Scope;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueWeights {
    #[serde(default = "default_weight")]
    pub default: f64,
    #[serde(default)]
    pub competitions: HashMap<String, f64>,
    // Some positions were calibrated against a compressed table.
    #[serde(default)]
    pub position_overrides: HashMap<CanonicalPosition, HashMap<String, f64>>,
}

fn default_weight() -> f64 {
    1.0
}

impl Default for LeagueWeights {
    fn default() -> Self {
        Self {
            default: default_weight(),
            competitions: HashMap::new(),
            position_overrides: HashMap::new(),
        }
    }
}

impl LeagueWeights {
    pub fn builtin() -> Self {
        let top_five = ["Serie_A", "EPL", "La_Liga", "Bundesliga", "Ligue_1"];
        let second_tier = ["Primeira_Liga", "Eredivisie", "Süper_Lig"];
        let base = ["MLS", "Championship"];

        let mut competitions = HashMap::new();
        let mut keepers = HashMap::new();
        for c in top_five {
            competitions.insert(c.to_string(), 1.7);
            keepers.insert(c.to_string(), 1.4);
        }
        for c in second_tier {
            competitions.insert(c.to_string(), 1.2);
            keepers.insert(c.to_string(), 1.2);
        }
        for c in base {
            competitions.insert(c.to_string(), 1.0);
            keepers.insert(c.to_string(), 1.0);
        }

        Self {
            default: 1.0,
            competitions,
            position_overrides: HashMap::from([(CanonicalPosition::Goalkeeper, keepers)]),
        }
    }

    pub fn with_competition(mut self, competition: &str, weight: f64) -> Self {
        self.competitions.insert(competition.to_string(), weight);
        self
    }

    pub fn weight_for(&self, scope: &Scope, position: CanonicalPosition) -> f64 {
        self.position_overrides
            .get(&position)
            .and_then(|table| table.get(&scope.competition))
            .or_else(|| self.competitions.get(&scope.competition))
            .copied()
            .unwrap_or(self.default)
    }

    pub fn scope_weight(&self, scope: &Scope) -> f64 {
        self.competitions
            .get(&scope.competition)
            .copied()
            .unwrap_or(self.default)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let check = |key: &str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::LeagueWeight {
                    key: key.to_string(),
                    value,
                })
            }
        };
        check("default", self.default)?;
        for (k, v) in &self.competitions {
            check(k, *v)?;
        }
        for (pos, table) in &self.position_overrides {
            for (k, v) in table {
                check(&format!("{pos}/{k}"), *v)?;
            }
        }
        Ok(())
    }
}
