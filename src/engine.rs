use std::collections::{BTreeMap, BTreeSet};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::composite::raw_score;
use crate::config::EngineConfig;
use crate::error::{ConfigError, EngineError};
use crate::loader::PopulationLoader;
use crate::position::{CanonicalPosition, PositionClassifier};
use crate::ranges::RangeTable;
use crate::records::{Scope, StatRecord};
use crate::scale::{RATING_FLOOR, final_rating};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRating {
    pub profile: String,
    pub rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRow {
    pub player: String,
    pub team: String,
    pub competition: String,
    pub season: String,
    pub position: CanonicalPosition,
    pub minutes: f64,
    pub minutes_coefficient: f64,
    pub league_weight: f64,
    pub ratings: Vec<ProfileRating>,
}

impl RatingRow {
    pub fn rating(&self, profile: &str) -> Option<f64> {
        self.ratings
            .iter()
            .find(|r| r.profile == profile)
            .map(|r| r.rating)
    }

    pub fn scope(&self) -> Scope {
        Scope::new(self.competition.clone(), self.season.clone())
    }

    pub fn vector(&self) -> Vec<f64> {
        self.ratings.iter().map(|r| r.rating).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeDiagnostics {
    pub records: usize,
    pub rated: usize,
    // Unclassified position labels.
    pub excluded: usize,
    pub unrecognized_labels: BTreeMap<String, usize>,
    pub without_profiles: usize,
    pub gated_to_floor: usize,
    pub undefined_indicators: BTreeMap<CanonicalPosition, Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeRatings {
    pub scope: Scope,
    pub league_weight: f64,
    pub rows: Vec<RatingRow>,
    pub diagnostics: ScopeDiagnostics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedScope {
    pub scope: Scope,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingRun {
    pub scopes: Vec<ScopeRatings>,
    pub skipped: Vec<SkippedScope>,
}

impl RatingRun {
    pub fn table(&self) -> RatingTable {
        RatingTable {
            rows: self
                .scopes
                .iter()
                .flat_map(|s| s.rows.iter().cloned())
                .collect(),
        }
    }

    pub fn excluded_players(&self) -> usize {
        self.scopes.iter().map(|s| s.diagnostics.excluded).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingTable {
    pub rows: Vec<RatingRow>,
}

impl RatingTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn for_position(&self, position: CanonicalPosition) -> impl Iterator<Item = &RatingRow> {
        self.rows.iter().filter(move |r| r.position == position)
    }

    pub fn find_player(&self, name: &str) -> Option<&RatingRow> {
        self.rows.iter().find(|r| r.player.eq_ignore_ascii_case(name))
    }
}

pub struct RatingEngine {
    config: EngineConfig,
    classifier: PositionClassifier,
}

impl RatingEngine {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let classifier = PositionClassifier::new(&config.positions, config.reconciliation);
        Ok(Self { config, classifier })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn classifier(&self) -> &PositionClassifier {
        &self.classifier
    }

    pub fn run_all(&self, loader: &dyn PopulationLoader) -> Result<RatingRun, EngineError> {
        let mut seen = BTreeSet::new();
        let scopes: Vec<Scope> = loader
            .scopes()
            .into_iter()
            .chain(self.config.scopes.iter().cloned())
            .filter(|s| seen.insert(s.clone()))
            .collect();
        self.run(loader, &scopes)
    }

    /// Rates each requested scope independently. A scope the loader cannot supply is
    /// skipped and reported; the run fails only when no scope yields a single row.
    pub fn run(&self, loader: &dyn PopulationLoader, scopes: &[Scope]) -> Result<RatingRun, EngineError> {
        let outcomes: Vec<Result<ScopeRatings, SkippedScope>> = if self.config.parallel_scopes {
            scopes.par_iter().map(|s| self.load_and_rate(loader, s)).collect()
        } else {
            scopes.iter().map(|s| self.load_and_rate(loader, s)).collect()
        };

        let mut run = RatingRun {
            scopes: Vec::new(),
            skipped: Vec::new(),
        };
        for outcome in outcomes {
            match outcome {
                Ok(rated) => run.scopes.push(rated),
                Err(skipped) => run.skipped.push(skipped),
            }
        }

        if run.scopes.iter().all(|s| s.rows.is_empty()) {
            for scope in &run.scopes {
                warn!(
                    "{}: no rated players ({} records, unrecognized positions: {:?})",
                    scope.scope, scope.diagnostics.records, scope.diagnostics.unrecognized_labels
                );
            }
            return Err(EngineError::NoScopesRated {
                skipped: run.skipped,
                unrated: run.scopes,
            });
        }
        Ok(run)
    }

    fn load_and_rate(&self, loader: &dyn PopulationLoader, scope: &Scope) -> Result<ScopeRatings, SkippedScope> {
        let records = match loader.load(scope) {
            Ok(records) => records,
            Err(err) => {
                warn!("skipping scope {scope}: {err:#}");
                return Err(SkippedScope {
                    scope: scope.clone(),
                    reason: format!("{err:#}"),
                });
            }
        };
        if records.is_empty() {
            warn!("skipping scope {scope}: empty population");
            return Err(SkippedScope {
                scope: scope.clone(),
                reason: "empty population".to_string(),
            });
        }
        Ok(self.rate_scope(scope, &records))
    }

    /// Rates one fully materialized scope population. Ranges are computed here, per
    /// position, from this population only.
    pub fn rate_scope(&self, scope: &Scope, records: &[StatRecord]) -> ScopeRatings {
        let mut diagnostics = ScopeDiagnostics {
            records: records.len(),
            ..Default::default()
        };

        let mut groups: BTreeMap<CanonicalPosition, Vec<(usize, &StatRecord)>> = BTreeMap::new();
        for (idx, record) in records.iter().enumerate() {
            match self.classifier.classify_record(record) {
                Some(position) => groups.entry(position).or_default().push((idx, record)),
                None => {
                    diagnostics.excluded += 1;
                    *diagnostics
                        .unrecognized_labels
                        .entry(record.position.trim().to_string())
                        .or_default() += 1;
                }
            }
        }

        let mut indexed_rows: Vec<(usize, RatingRow)> = Vec::with_capacity(records.len());
        for (position, members) in &groups {
            let profiles = self.config.catalog.profiles(*position);
            if profiles.is_empty() {
                diagnostics.without_profiles += members.len();
                continue;
            }

            let population: Vec<&StatRecord> = members.iter().map(|(_, r)| *r).collect();
            let indicators = self.config.catalog.indicators_for(*position);
            let ranges = RangeTable::compute(&population, indicators.iter().copied());
            let undefined: Vec<String> = indicators
                .iter()
                .filter(|k| ranges.get(k).is_none())
                .map(|k| k.to_string())
                .collect();
            if !undefined.is_empty() {
                debug!("{scope} {position}: undefined ranges for {undefined:?}");
                diagnostics.undefined_indicators.insert(*position, undefined);
            }

            let league_weight = self.config.league_weights.weight_for(scope, *position);
            for (idx, record) in members {
                let minutes = record.minutes_played();
                let coefficient = self.config.minutes_gate.coefficient(minutes);
                let ratings = if coefficient == 0.0 {
                    diagnostics.gated_to_floor += 1;
                    profiles
                        .iter()
                        .map(|p| ProfileRating {
                            profile: p.name.clone(),
                            rating: RATING_FLOOR,
                        })
                        .collect()
                } else {
                    profiles
                        .iter()
                        .map(|p| ProfileRating {
                            profile: p.name.clone(),
                            rating: final_rating(
                                raw_score(record, p, &ranges),
                                p.scale_factor,
                                coefficient,
                                league_weight,
                            ),
                        })
                        .collect()
                };
                indexed_rows.push((
                    *idx,
                    RatingRow {
                        player: record.player.clone(),
                        team: record.team.clone(),
                        competition: scope.competition.clone(),
                        season: scope.season.clone(),
                        position: *position,
                        minutes,
                        minutes_coefficient: coefficient,
                        league_weight,
                        ratings,
                    },
                ));
            }
        }

        indexed_rows.sort_by_key(|(idx, _)| *idx);
        let rows: Vec<RatingRow> = indexed_rows.into_iter().map(|(_, row)| row).collect();
        diagnostics.rated = rows.len();

        if diagnostics.excluded > 0 {
            warn!(
                "{scope}: {} of {} players excluded (unrecognized positions: {:?})",
                diagnostics.excluded, diagnostics.records, diagnostics.unrecognized_labels
            );
        }
        let league_weight = self.config.league_weights.scope_weight(scope);
        info!(
            "{scope}: rated {} players (weight {league_weight}, {} at floor)",
            diagnostics.rated, diagnostics.gated_to_floor
        );

        ScopeRatings {
            scope: scope.clone(),
            league_weight,
            rows,
            diagnostics,
        }
    }
}
