pub mod error;
pub mod types;

pub use error::{AssessError, MissingField};
pub use types::*;
