pub mod config;
pub mod engine;
pub mod factors;
pub mod validation;

pub use config::*;
pub use engine::{classify_intensity, classify_score, symptom_score, Scorer};
pub use factors::RangeOp;
pub use validation::validate_scoring;
