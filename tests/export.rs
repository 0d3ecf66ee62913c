use std::fs;
use std::path::PathBuf;

use scout_ratings::export::{ARTIFACT_VERSION, RatingArtifact, export_workbook, load_artifact, save_artifact};
use scout_ratings::loader::load_population_file;
use scout_ratings::rankings::top_by_profile;
use scout_ratings::similarity::find_similar;
use scout_ratings::{EngineConfig, RatingEngine, RatingRun};

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("scout_ratings_{name}_{}", std::process::id()));
    fs::create_dir_all(&dir).expect("scratch dir should be creatable");
    dir
}

fn fixture_run() -> (RatingEngine, RatingRun) {
    let loader = load_population_file(&fixture_path("population.json")).expect("fixture should load");
    let engine = RatingEngine::new(EngineConfig::default()).expect("builtin config");
    let run = engine.run_all(&loader).expect("fixture should rate");
    (engine, run)
}

#[test]
fn artifact_survives_a_save_and_load() {
    let (_, run) = fixture_run();
    let dir = scratch_dir("artifact");
    let path = dir.join("ratings.json");

    save_artifact(&path, &RatingArtifact::from_run(&run)).expect("artifact should save");
    assert!(!path.with_extension("json.tmp").exists());

    let loaded = load_artifact(&path).expect("artifact should load");
    assert_eq!(loaded.version, ARTIFACT_VERSION);
    assert_eq!(loaded.table, run.table());
    assert_eq!(loaded.scopes.len(), run.scopes.len());
    assert!(chrono::DateTime::parse_from_rfc3339(&loaded.generated_at).is_ok());

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn artifact_with_unknown_version_is_rejected() {
    let (_, run) = fixture_run();
    let dir = scratch_dir("version");
    let path = dir.join("ratings.json");

    let mut artifact = RatingArtifact::from_run(&run);
    artifact.version = ARTIFACT_VERSION + 1;
    save_artifact(&path, &artifact).expect("artifact should save");
    assert!(load_artifact(&path).is_err());

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn workbook_has_a_sheet_per_rated_position() {
    let (engine, run) = fixture_run();
    let dir = scratch_dir("workbook");
    let path = dir.join("ratings.xlsx");

    let sheets = export_workbook(&path, &run, &engine.config().catalog).expect("workbook should save");
    // Goalkeeper, Centreback, Fullback and Striker appear in the fixture.
    assert_eq!(sheets, 4);
    assert!(path.exists());

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn leaders_and_similar_players_read_the_merged_table() {
    let (_, run) = fixture_run();
    let table = run.table();

    let guardians = top_by_profile(&table, "Guardian", 5);
    assert_eq!(guardians.len(), 3);
    assert_eq!(guardians[0].rank, 1);
    assert_eq!(guardians[0].row.player, "Marco Bianchi");
    assert!(guardians.windows(2).all(|w| w[0].rating >= w[1].rating));

    let bianchi = table.find_player("Marco Bianchi").expect("bianchi should be rated");
    let similar = find_similar(&table, bianchi, 10);
    assert!(!similar.is_empty());
    assert!(similar.iter().all(|s| s.row.player != "Marco Bianchi"));
    assert!(similar.iter().all(|s| s.row.position == bianchi.position));
    assert_eq!(similar[0].score, 1.0);
}

#[test]
fn transferred_player_is_never_his_own_match() {
    let (_, run) = fixture_run();
    let table = run.table();

    let novak = table.find_player("Jan Novak").expect("novak should be rated");
    assert_eq!(table.rows.iter().filter(|r| r.player == "Jan Novak").count(), 2);
    let similar = find_similar(&table, novak, 5);
    let names: Vec<&str> = similar.iter().map(|s| s.row.player.as_str()).collect();
    assert_eq!(names, vec!["Tom Hale"]);
}
