use std::path::PathBuf;

use anyhow::{Result, anyhow};

use scout_ratings::export::load_artifact;
use scout_ratings::similarity::find_similar;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let artifact_path = args
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("usage: similar_players <ratings.json> <player> [n]"))?;
    let player = args
        .next()
        .ok_or_else(|| anyhow!("usage: similar_players <ratings.json> <player> [n]"))?;
    let n = args
        .next()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(10)
        .max(1);

    let artifact = load_artifact(&artifact_path)?;
    let target = artifact
        .table
        .find_player(&player)
        .ok_or_else(|| anyhow!("player '{player}' not found in {}", artifact_path.display()))?;

    println!(
        "Most similar to {} ({}, {} {}):",
        target.player, target.position, target.competition, target.season
    );
    let similar = find_similar(&artifact.table, target, n);
    if similar.is_empty() {
        println!("  no comparable players");
        return Ok(());
    }
    for (idx, s) in similar.iter().enumerate() {
        let profile_cells: Vec<String> = s
            .row
            .ratings
            .iter()
            .map(|r| format!("{} {:.1}", r.profile, r.rating))
            .collect();
        println!(
            "  {:>2}. {:<28} {:<22} {:>5.1}%  [{}]",
            idx + 1,
            s.row.player,
            s.row.team,
            s.score * 100.0,
            profile_cells.join(", ")
        );
    }
    Ok(())
}
