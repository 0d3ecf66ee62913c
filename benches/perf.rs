use criterion::{Criterion, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

use scout_ratings::loader::InMemoryLoader;
use scout_ratings::numeric::parse_text;
use scout_ratings::position::CanonicalPosition;
use scout_ratings::rankings::top_by_profile;
use scout_ratings::{EngineConfig, RatingEngine, Scope, StatRecord};

const LABELS: [&str; 7] = [
    "Goalkeeper",
    "Centre-Back",
    "Left-Back",
    "Central Midfield",
    "Attacking Midfield",
    "Right Winger",
    "Centre-Forward",
];

fn synthetic_population(engine: &RatingEngine, size: usize, seed: u64) -> Vec<StatRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let catalog = &engine.config().catalog;
    (0..size)
        .map(|idx| {
            let label = LABELS[idx % LABELS.len()];
            let minutes = rng.gen_range(0.0..3400.0);
            let mut record = StatRecord::new(format!("Player {idx}"), "Test FC", minutes, label);
            if let Some(position) = engine.classifier().classify(label) {
                for key in catalog.indicators_for(position) {
                    // Mix numeric and locale-formatted text cells.
                    let v: f64 = rng.gen_range(0.0..250.0);
                    record = if rng.gen_bool(0.5) {
                        record.with_stat(key, v)
                    } else {
                        record.with_stat(key, format!("{:.1}", v).replace('.', ","))
                    };
                }
            }
            record
        })
        .collect()
}

fn bench_rate_scope(c: &mut Criterion) {
    let engine = RatingEngine::new(EngineConfig::default()).expect("builtin config");
    let records = synthetic_population(&engine, 600, 7);
    let scope = Scope::new("Serie_A", "2024-25");

    c.bench_function("rate_scope_600", |b| {
        b.iter(|| {
            let out = engine.rate_scope(black_box(&scope), black_box(&records));
            black_box(out.rows.len());
        })
    });
}

fn bench_run_parallel_scopes(c: &mut Criterion) {
    let engine = RatingEngine::new(EngineConfig::default()).expect("builtin config");
    let mut loader = InMemoryLoader::new();
    for (i, comp) in ["Serie_A", "EPL", "La_Liga", "Bundesliga", "Ligue_1", "Eredivisie"]
        .iter()
        .enumerate()
    {
        loader = loader.with_scope(
            Scope::new(*comp, "2024-25"),
            synthetic_population(&engine, 500, i as u64),
        );
    }

    c.bench_function("run_all_six_scopes", |b| {
        b.iter(|| {
            let run = engine.run_all(black_box(&loader)).expect("run should succeed");
            black_box(run.scopes.len());
        })
    });
}

fn bench_parse_text(c: &mut Criterion) {
    let cells = ["1.670.000,00", "45,3", "0,285", "€12.00m", "1,234", "-", "61,0%"];
    c.bench_function("parse_text", |b| {
        b.iter(|| {
            let total: f64 = cells.iter().map(|s| parse_text(black_box(s))).sum();
            black_box(total);
        })
    });
}

fn bench_top_by_profile(c: &mut Criterion) {
    let engine = RatingEngine::new(EngineConfig::default()).expect("builtin config");
    let loader = InMemoryLoader::new().with_scope(
        Scope::new("EPL", "2024-25"),
        synthetic_population(&engine, 2000, 11),
    );
    let table = engine.run_all(&loader).expect("run should succeed").table();
    let profile = engine.config().catalog.profiles(CanonicalPosition::Centreback)[0]
        .name
        .clone();

    c.bench_function("top_by_profile", |b| {
        b.iter(|| {
            let top = top_by_profile(black_box(&table), &profile, 20);
            black_box(top.len());
        })
    });
}

criterion_group!(
    benches,
    bench_rate_scope,
    bench_run_parallel_scopes,
    bench_parse_text,
    bench_top_by_profile,
);
criterion_main!(benches);
