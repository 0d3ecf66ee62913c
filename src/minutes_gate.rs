use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// Upper bound is inclusive; `None` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GateBand {
    pub up_to: Option<f64>,
    pub coefficient: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinutesGate {
    bands: Vec<GateBand>,
}

impl Default for MinutesGate {
    fn default() -> Self {
        Self {
            bands: vec![
                GateBand { up_to: Some(500.0), coefficient: 0.0 },
                GateBand { up_to: Some(1000.0), coefficient: 0.7 },
                GateBand { up_to: Some(1500.0), coefficient: 0.85 },
                GateBand { up_to: None, coefficient: 1.0 },
            ],
        }
    }
}

impl MinutesGate {
    pub fn new(bands: Vec<GateBand>) -> Result<Self, ConfigError> {
        let gate = Self { bands };
        gate.validate()?;
        Ok(gate)
    }

    pub fn bands(&self) -> &[GateBand] {
        &self.bands
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let Some(last) = self.bands.last() else {
            return Err(ConfigError::Gate("no bands".to_string()));
        };
        if last.up_to.is_some() {
            return Err(ConfigError::Gate("last band must be unbounded".to_string()));
        }
        let mut prev_bound = f64::NEG_INFINITY;
        let mut prev_coeff = 0.0;
        for (idx, band) in self.bands.iter().enumerate() {
            if !(0.0..=1.0).contains(&band.coefficient) {
                return Err(ConfigError::Gate(format!(
                    "band {idx} coefficient {} outside [0, 1]",
                    band.coefficient
                )));
            }
            if band.coefficient < prev_coeff {
                return Err(ConfigError::Gate(format!(
                    "band {idx} coefficient decreases"
                )));
            }
            prev_coeff = band.coefficient;
            match band.up_to {
                Some(bound) if !bound.is_finite() || bound < 0.0 || bound <= prev_bound => {
                    return Err(ConfigError::Gate(format!(
                        "band {idx} bound {bound} must be finite, non-negative and increasing"
                    )));
                }
                Some(bound) => prev_bound = bound,
                None if idx + 1 != self.bands.len() => {
                    return Err(ConfigError::Gate(format!(
                        "band {idx} is unbounded but not last"
                    )));
                }
                None => {}
            }
        }
        Ok(())
    }

    pub fn coefficient(&self, minutes: f64) -> f64 {
        let minutes = if minutes.is_finite() { minutes.max(0.0) } else { 0.0 };
        for band in &self.bands {
            match band.up_to {
                Some(bound) if minutes <= bound => return band.coefficient,
                Some(_) => continue,
                None => return band.coefficient,
            }
        }
        0.0
    }
}
