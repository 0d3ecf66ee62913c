use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use scout_ratings::catalog::ProfileCatalog;
use scout_ratings::export::{RatingArtifact, export_workbook, save_artifact};
use scout_ratings::loader::load_population_file;
use scout_ratings::position::CanonicalPosition;
use scout_ratings::rankings::top_by_profile;
use scout_ratings::{EngineConfig, RatingEngine};

const TOP_N: usize = 5;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let population_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("tests/fixtures/population.json"));
    let config = match args.next() {
        Some(path) => EngineConfig::from_json_file(&PathBuf::from(path))?,
        None => EngineConfig::from_env()?,
    };

    let loader = load_population_file(&population_path)?;
    let engine = RatingEngine::new(config).context("invalid engine config")?;
    let run = engine.run_all(&loader)?;
    let table = run.table();

    for scope in &run.scopes {
        let d = &scope.diagnostics;
        println!(
            "{}: {} rated, {} excluded, {} at floor (league weight {:.2})",
            scope.scope, d.rated, d.excluded, d.gated_to_floor, scope.league_weight
        );
    }
    for skipped in &run.skipped {
        println!("{}: skipped ({})", skipped.scope, skipped.reason);
    }

    print_leaders(&table, &engine.config().catalog);

    if let Some(out) = env_path("RATING_OUT") {
        save_artifact(&out, &RatingArtifact::from_run(&run))?;
        info!("wrote rating artifact to {}", out.display());
    }
    if let Some(xlsx) = env_path("RATING_XLSX") {
        let sheets = export_workbook(&xlsx, &run, &engine.config().catalog)?;
        info!("wrote {sheets} position sheets to {}", xlsx.display());
    }

    Ok(())
}

fn print_leaders(table: &scout_ratings::RatingTable, catalog: &ProfileCatalog) {
    for position in CanonicalPosition::ALL {
        for profile in catalog.profiles(position) {
            let top = top_by_profile(table, &profile.name, TOP_N);
            if top.is_empty() {
                continue;
            }
            println!("\n{position} / {}", profile.name);
            for entry in top {
                println!(
                    "  {:>2}. {:<28} {:<22} {:>5.1}",
                    entry.rank, entry.row.player, entry.row.team, entry.rating
                );
            }
        }
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    let raw = std::env::var(key).ok()?;
    if raw.trim().is_empty() {
        return None;
    }
    Some(PathBuf::from(raw))
}
