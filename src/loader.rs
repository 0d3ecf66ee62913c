use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::records::{Scope, ScopePopulation, StatRecord};

/// Source of scope populations. Implementations must return the complete population
/// of a scope or an error; partial populations would corrupt the scope's ranges.
pub trait PopulationLoader: Sync {
    fn load(&self, scope: &Scope) -> Result<Vec<StatRecord>>;

    fn scopes(&self) -> Vec<Scope>;
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryLoader {
    populations: BTreeMap<Scope, Vec<StatRecord>>,
}

impl InMemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scope(mut self, scope: Scope, records: Vec<StatRecord>) -> Self {
        self.populations.insert(scope, records);
        self
    }

    pub fn insert(&mut self, population: ScopePopulation) {
        let scope = population.scope();
        self.populations
            .entry(scope)
            .or_default()
            .extend(population.records);
    }
}

impl PopulationLoader for InMemoryLoader {
    fn load(&self, scope: &Scope) -> Result<Vec<StatRecord>> {
        self.populations
            .get(scope)
            .cloned()
            .ok_or_else(|| anyhow!("no population for scope {scope}"))
    }

    fn scopes(&self) -> Vec<Scope> {
        self.populations.keys().cloned().collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PopulationFile {
    #[serde(default)]
    scopes: Vec<ScopePopulation>,
}

pub fn load_population_file(path: &Path) -> Result<InMemoryLoader> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read population file {}", path.display()))?;
    parse_population_json(&raw)
}

pub fn parse_population_json(raw: &str) -> Result<InMemoryLoader> {
    let file: PopulationFile = serde_json::from_str(raw).context("parse population json")?;
    let mut loader = InMemoryLoader::new();
    for population in file.scopes {
        loader.insert(population);
    }
    Ok(loader)
}
