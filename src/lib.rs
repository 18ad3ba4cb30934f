//! Period pain self-assessment.
//!
//! Scores the symptom assessment and pain tracker forms into a severity
//! with localized (English/Chinese) summaries and recommendations.

pub mod assessment;
pub mod catalog;
pub mod config;
pub mod i18n;
pub mod output;
pub mod reveal;
pub mod scoring;
