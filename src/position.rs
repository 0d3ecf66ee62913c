use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::records::StatRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CanonicalPosition {
    Goalkeeper,
    Centreback,
    Fullback,
    Midfielder,
    AttackingMidfielder,
    Winger,
    Striker,
}

impl CanonicalPosition {
    pub const ALL: [CanonicalPosition; 7] = [
        CanonicalPosition::Goalkeeper,
        CanonicalPosition::Centreback,
        CanonicalPosition::Fullback,
        CanonicalPosition::Midfielder,
        CanonicalPosition::AttackingMidfielder,
        CanonicalPosition::Winger,
        CanonicalPosition::Striker,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CanonicalPosition::Goalkeeper => "Goalkeeper",
            CanonicalPosition::Centreback => "Centreback",
            CanonicalPosition::Fullback => "Fullback",
            CanonicalPosition::Midfielder => "Midfielder",
            CanonicalPosition::AttackingMidfielder => "Attacking Midfielder",
            CanonicalPosition::Winger => "Winger",
            CanonicalPosition::Striker => "Striker",
        }
    }
}

impl fmt::Display for CanonicalPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconciliationPolicy {
    #[default]
    PrimaryOnly,
    PrimaryThenSecondary,
    RequireAgreement,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionSynonyms(pub HashMap<CanonicalPosition, Vec<String>>);

impl Default for PositionSynonyms {
    fn default() -> Self {
        let table: &[(CanonicalPosition, &[&str])] = &[
            (
                CanonicalPosition::Goalkeeper,
                &["goalkeeper", "keeper", "gk"],
            ),
            (
                CanonicalPosition::Centreback,
                &["centre-back", "center-back", "centre back", "center back", "cb"],
            ),
            (
                CanonicalPosition::Fullback,
                &[
                    "left-back",
                    "right-back",
                    "full-back",
                    "fullback",
                    "left wing-back",
                    "right wing-back",
                    "lb",
                    "rb",
                ],
            ),
            (
                CanonicalPosition::Midfielder,
                &["central midfield", "defensive midfield", "cm", "dm"],
            ),
            (
                CanonicalPosition::AttackingMidfielder,
                &["attacking midfield", "am"],
            ),
            (
                CanonicalPosition::Winger,
                &[
                    "left winger",
                    "right winger",
                    "left midfield",
                    "right midfield",
                    "lw",
                    "rw",
                ],
            ),
            (
                CanonicalPosition::Striker,
                &[
                    "centre-forward",
                    "center-forward",
                    "second striker",
                    "striker",
                    "cf",
                    "st",
                ],
            ),
        ];
        Self(
            table
                .iter()
                .map(|(pos, labels)| (*pos, labels.iter().map(|s| s.to_string()).collect()))
                .collect(),
        )
    }
}

#[derive(Debug, Clone)]
pub struct PositionClassifier {
    by_label: HashMap<String, CanonicalPosition>,
    policy: ReconciliationPolicy,
}

impl PositionClassifier {
    pub fn new(synonyms: &PositionSynonyms, policy: ReconciliationPolicy) -> Self {
        let mut by_label = HashMap::new();
        for (pos, labels) in &synonyms.0 {
            for label in labels {
                by_label.insert(normalize_label(label), *pos);
            }
        }
        Self { by_label, policy }
    }

    pub fn classify(&self, raw: &str) -> Option<CanonicalPosition> {
        let key = normalize_label(raw);
        if key.is_empty() {
            return None;
        }
        self.by_label.get(&key).copied()
    }

    pub fn classify_record(&self, record: &StatRecord) -> Option<CanonicalPosition> {
        let primary = self.classify(&record.position);
        let secondary = record
            .secondary_position
            .as_deref()
            .and_then(|label| self.classify(label));
        match self.policy {
            ReconciliationPolicy::PrimaryOnly => primary,
            ReconciliationPolicy::PrimaryThenSecondary => primary.or(secondary),
            ReconciliationPolicy::RequireAgreement => match (primary, secondary) {
                (Some(a), Some(b)) if a == b => Some(a),
                _ => None,
            },
        }
    }
}

// "Centre-Back", "centre back" and "CENTRE_BACK" all reduce to "centre back".
fn normalize_label(raw: &str) -> String {
    raw.to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
