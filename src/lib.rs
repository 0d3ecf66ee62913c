pub mod catalog;
pub mod composite;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod league_weights;
pub mod loader;
pub mod minutes_gate;
pub mod numeric;
pub mod position;
pub mod ranges;
pub mod rankings;
pub mod records;
pub mod scale;
pub mod similarity;

pub use config::EngineConfig;
pub use engine::{RatingEngine, RatingRow, RatingRun, RatingTable};
pub use error::{ConfigError, EngineError};
pub use records::{Scope, StatRecord};
