use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::position::CanonicalPosition;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorWeight {
    pub indicator: String,
    pub weight: f64,
    // Lower raw values are better (normalized value is flipped).
    #[serde(default)]
    pub invert: bool,
}

impl IndicatorWeight {
    pub fn new(indicator: &str, weight: f64) -> Self {
        Self {
            indicator: indicator.to_string(),
            weight,
            invert: false,
        }
    }

    pub fn inverted(mut self) -> Self {
        self.invert = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub w_on: f64,
    pub w_off: f64,
    #[serde(default)]
    pub on_ball: Vec<IndicatorWeight>,
    #[serde(default)]
    pub off_ball: Vec<IndicatorWeight>,
    pub scale_factor: f64,
}

impl Profile {
    pub fn indicators(&self) -> impl Iterator<Item = &IndicatorWeight> {
        self.on_ball.iter().chain(self.off_ball.iter())
    }

    fn validate(&self, position: CanonicalPosition) -> Result<(), ConfigError> {
        let fail = |reason: String| ConfigError::Profile {
            position: position.label().to_string(),
            profile: self.name.clone(),
            reason,
        };
        if self.name.trim().is_empty() {
            return Err(fail("empty name".to_string()));
        }
        for (label, frac) in [("w_on", self.w_on), ("w_off", self.w_off)] {
            if !frac.is_finite() || frac < 0.0 {
                return Err(fail(format!("{label} must be finite and non-negative, got {frac}")));
            }
        }
        if !self.scale_factor.is_finite() || self.scale_factor <= 0.0 {
            return Err(fail(format!("scale factor must be positive, got {}", self.scale_factor)));
        }
        if self.on_ball.is_empty() && self.off_ball.is_empty() {
            return Err(fail("no indicators".to_string()));
        }
        for w in self.indicators() {
            if w.indicator.is_empty() || !w.weight.is_finite() || w.weight < 0.0 {
                return Err(fail(format!("bad weight {} for '{}'", w.weight, w.indicator)));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProfileCatalog {
    positions: BTreeMap<CanonicalPosition, Vec<Profile>>,
}

impl ProfileCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(mut self, position: CanonicalPosition, profile: Profile) -> Self {
        self.positions.entry(position).or_default().push(profile);
        self
    }

    pub fn profiles(&self, position: CanonicalPosition) -> &[Profile] {
        self.positions
            .get(&position)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn positions(&self) -> impl Iterator<Item = CanonicalPosition> + '_ {
        self.positions.keys().copied()
    }

    pub fn position_of(&self, profile_name: &str) -> Option<CanonicalPosition> {
        self.positions
            .iter()
            .find(|(_, profiles)| profiles.iter().any(|p| p.name == profile_name))
            .map(|(pos, _)| *pos)
    }

    pub fn indicators_for(&self, position: CanonicalPosition) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for profile in self.profiles(position) {
            for w in profile.indicators() {
                if seen.insert(w.indicator.as_str()) {
                    out.push(w.indicator.as_str());
                }
            }
        }
        out
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (position, profiles) in &self.positions {
            let mut names = HashSet::new();
            for profile in profiles {
                profile.validate(*position)?;
                if !names.insert(profile.name.as_str()) {
                    return Err(ConfigError::Profile {
                        position: position.label().to_string(),
                        profile: profile.name.clone(),
                        reason: "duplicate profile name".to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn builtin() -> Self {
        use CanonicalPosition::*;

        fn profile(
            name: &str,
            w_on: f64,
            w_off: f64,
            on_ball: &[(&str, f64)],
            off_ball: &[(&str, f64)],
            scale_factor: f64,
        ) -> Profile {
            Profile {
                name: name.to_string(),
                w_on,
                w_off,
                on_ball: on_ball.iter().map(|(k, w)| IndicatorWeight::new(k, *w)).collect(),
                off_ball: off_ball.iter().map(|(k, w)| IndicatorWeight::new(k, *w)).collect(),
                scale_factor,
            }
        }

        Self::new()
            // Keepers are rated on a single phase each.
            .with_profile(
                Goalkeeper,
                profile(
                    "Playmaker_Keeper",
                    1.0,
                    0.0,
                    &[("Att (GK)", 0.4), ("DistProm.", 0.3), ("Mín", 0.3)],
                    &[],
                    0.8,
                ),
            )
            .with_profile(
                Goalkeeper,
                profile(
                    "Shot_Stopper",
                    0.0,
                    1.0,
                    &[],
                    &[("PSxG", 0.3), ("PSxG/SoT", 0.3), ("PSxG+/-", 0.4)],
                    0.8,
                ),
            )
            .with_profile(
                Centreback,
                profile(
                    "Guardian",
                    0.2,
                    0.8,
                    &[("% Cmp", 0.4), ("PA", 0.35), ("Long. Prom.", 0.15), ("Cmp", 0.1)],
                    &[
                        ("Tkl(Desafios)", 0.3),
                        ("3.º cent.", 0.25),
                        ("% de ganados", 0.25),
                        ("Recup.", 0.2),
                    ],
                    1.0,
                ),
            )
            .with_profile(
                Centreback,
                profile(
                    "Deep_Distributor",
                    0.7,
                    0.3,
                    &[("PrgP", 0.35), ("1/3", 0.3), ("Camb.", 0.25), ("% Cmp (largos)", 0.1)],
                    &[("Int", 0.4), ("3.º cent.", 0.35), ("TklG", 0.15), ("Recup.", 0.1)],
                    1.0,
                ),
            )
            .with_profile(
                Centreback,
                profile(
                    "Enforcer",
                    0.15,
                    0.85,
                    &[("PrgP", 0.4), ("% Cmp", 0.35), ("Dist. prg.", 0.15), ("Toques", 0.1)],
                    &[
                        ("Int", 0.35),
                        ("Recup.", 0.3),
                        ("% de ganados", 0.2),
                        ("Tkl(Desafios)", 0.15),
                    ],
                    0.85,
                ),
            )
            .with_profile(
                Fullback,
                profile(
                    "Sentinel",
                    0.2,
                    0.8,
                    &[("% Cmp", 0.4), ("Pcz", 0.35), ("% Cmp (medios)", 0.25)],
                    &[("Recup.", 0.3), ("3.º def.", 0.3), ("Tkl%", 0.25), ("% de ganados", 0.15)],
                    0.8,
                ),
            )
            .with_profile(
                Fullback,
                profile(
                    "Wingback",
                    0.7,
                    0.3,
                    &[("PrgC", 0.37), ("Exitosa%", 0.26), ("PrgR", 0.23), ("1/3", 0.14)],
                    &[("3.º cent.", 0.47), ("Tkl%", 0.27), ("Recup.", 0.17), ("% de ganados", 0.09)],
                    1.1,
                ),
            )
            .with_profile(
                Fullback,
                profile(
                    "Runner",
                    0.6,
                    0.4,
                    &[("Ataq. Pen.", 0.33), ("CrAP", 0.28), ("Dist. prg.", 0.27), ("Exitosa%", 0.12)],
                    &[("3.º cent.", 0.35), ("Int", 0.25), ("TklG", 0.23), ("% de ganados", 0.17)],
                    1.1,
                ),
            )
            .with_profile(
                Midfielder,
                profile(
                    "Metronome",
                    0.7,
                    0.3,
                    &[("% Cmp", 0.4), ("PrgP", 0.35), ("Cmp", 0.25)],
                    &[("Int", 0.5), ("Recup.", 0.5)],
                    0.9,
                ),
            )
            .with_profile(
                Midfielder,
                profile(
                    "Box_To_Box",
                    0.5,
                    0.5,
                    &[("PrgC", 0.4), ("1/3", 0.3), ("SCA90", 0.3)],
                    &[("Tkl(Desafios)", 0.4), ("Recup.", 0.3), ("3.º cent.", 0.3)],
                    0.9,
                ),
            )
            .with_profile(
                AttackingMidfielder,
                profile(
                    "Diez",
                    0.9,
                    0.1,
                    &[
                        ("xAG", 0.39),
                        ("PPA", 0.24),
                        ("PassLive", 0.17),
                        ("SCA90", 0.11),
                        ("T/90", 0.09),
                    ],
                    &[("Recup.", 0.5), ("3.º ataq.", 0.5)],
                    0.7,
                ),
            )
            .with_profile(
                AttackingMidfielder,
                profile(
                    "Space_Invader",
                    0.75,
                    0.25,
                    &[("npxG", 0.35), ("T/90", 0.31), ("Ataq. Pen.", 0.25), ("PrgC", 0.09)],
                    &[("Recup.", 0.6), ("3.º ataq.", 0.4)],
                    0.7,
                ),
            )
            .with_profile(
                Winger,
                profile(
                    "Key_Passer",
                    0.85,
                    0.15,
                    &[("xAG", 0.35), ("CrAP", 0.29), ("PassLive", 0.25), ("1/3", 0.11)],
                    &[("Int", 0.6), ("FR", 0.4)],
                    0.7,
                ),
            )
            .with_profile(
                Winger,
                profile(
                    "Creative_Winger",
                    0.8,
                    0.2,
                    &[
                        ("Exitosa%", 0.4),
                        ("SCA90", 0.25),
                        ("xG", 0.19),
                        ("PrgC", 0.1),
                        ("CrAP", 0.06),
                    ],
                    &[("FR", 0.7), ("3.º ataq.", 0.3)],
                    0.7,
                ),
            )
            .with_profile(
                Striker,
                profile(
                    "Poacher",
                    0.9,
                    0.1,
                    &[("npxG", 0.5), ("T/90", 0.3), ("Ataq. Pen.", 0.2)],
                    &[("3.º ataq.", 1.0)],
                    0.7,
                ),
            )
            .with_profile(
                Striker,
                profile(
                    "Target_Man",
                    0.75,
                    0.25,
                    &[("PrgR", 0.4), ("xG", 0.35), ("SCA90", 0.25)],
                    &[("% de ganados", 0.6), ("3.º ataq.", 0.4)],
                    0.7,
                ),
            )
    }
}
