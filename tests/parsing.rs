use scout_ratings::numeric::{RawValue, parse_text, parse_value};
use scout_ratings::position::{CanonicalPosition, PositionClassifier, PositionSynonyms, ReconciliationPolicy};
use scout_ratings::records::ScopePopulation;
use scout_ratings::{EngineConfig, RatingEngine, StatRecord};

#[test]
fn parser_contract() {
    assert_eq!(parse_text("12.00m"), 12_000_000.0);
    assert_eq!(parse_text("1.670.000,00"), parse_text("1670000.00"));
    assert_eq!(parse_text(""), 0.0);
    assert_eq!(parse_value(None), 0.0);
    assert_eq!(parse_text("garbage"), 0.0);
}

#[test]
fn dot_only_strings_follow_the_trailing_pair_rule() {
    // Two trailing digits mark a decimal part, any other grouping is thousands.
    assert_eq!(parse_text("1670000.00"), 1_670_000.0);
    assert_eq!(parse_text("12.345"), 12_345.0);
    assert_eq!(parse_text("12.5"), 125.0);
    assert_eq!(parse_text("0.285"), 285.0);
    assert_eq!(parse_text("1234.567"), 1_234_567.0);
    // Spanish-locale stat cells carry their decimals after a comma.
    assert_eq!(parse_text("0,285"), 0.285);
}

#[test]
fn json_cells_parse_leniently() {
    let raw = r#"{
        "competition": "La_Liga", "season": "2024-25",
        "records": [
            { "player": "A", "team": "X", "minutes": 2000, "position": "Striker",
              "stats": { "npxG": "7,4", "T/90": 2.8, "Valor": "€45.00m", "Junk": "??", "Empty": "", "Null": null } }
        ]
    }"#;
    let population: ScopePopulation = serde_json::from_str(raw).expect("population should deserialize");
    let record = &population.records[0];
    assert_eq!(record.value("npxG"), 7.4);
    assert_eq!(record.value("T/90"), 2.8);
    assert_eq!(record.value("Valor"), 45_000_000.0);
    assert_eq!(record.value("Junk"), 0.0);
    assert_eq!(record.value("Empty"), 0.0);
    assert_eq!(record.value("Missing"), 0.0);
    assert!(record.carries("Junk"));
    assert!(!record.carries("Null"));
    assert!(!record.carries("Missing"));
}

#[test]
fn raw_values_round_trip_their_shape() {
    let cell: RawValue = serde_json::from_str("\"45,3\"").expect("text cell");
    assert_eq!(cell, RawValue::Text("45,3".to_string()));
    let cell: RawValue = serde_json::from_str("45.3").expect("number cell");
    assert_eq!(cell, RawValue::Number(45.3));
}

#[test]
fn negative_minutes_are_treated_as_zero() {
    let record = StatRecord::new("A", "X", -90.0, "Goalkeeper");
    assert_eq!(record.minutes_played(), 0.0);
    let record = StatRecord::new("A", "X", f64::NAN, "Goalkeeper");
    assert_eq!(record.minutes_played(), 0.0);
}

#[test]
fn classification_ignores_case_and_separators() {
    let engine = RatingEngine::new(EngineConfig::default()).expect("builtin config");
    let c = engine.classifier();
    for label in ["Centre-Back", "center-back", "CENTRE-BACK", "centre_back", "Centre Back"] {
        assert_eq!(c.classify(label), Some(CanonicalPosition::Centreback), "{label}");
    }
    assert_eq!(c.classify("Attacking Midfield"), Some(CanonicalPosition::AttackingMidfielder));
    assert_eq!(c.classify("Right Winger"), Some(CanonicalPosition::Winger));
    assert_eq!(c.classify("Second Striker"), Some(CanonicalPosition::Striker));
    assert_eq!(c.classify("Libero"), None);
    assert_eq!(c.classify(""), None);
}

#[test]
fn secondary_label_only_counts_under_fallback_policy() {
    let record = StatRecord::new("A", "X", 2000.0, "Utility").with_secondary_position("Left-Back");
    let strict = PositionClassifier::new(&PositionSynonyms::default(), ReconciliationPolicy::PrimaryOnly);
    let fallback = PositionClassifier::new(&PositionSynonyms::default(), ReconciliationPolicy::PrimaryThenSecondary);
    assert_eq!(strict.classify_record(&record), None);
    assert_eq!(fallback.classify_record(&record), Some(CanonicalPosition::Fullback));
}
