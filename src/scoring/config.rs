use serde::{Deserialize, Serialize};

use crate::assessment::Severity;

/// Scoring configuration.
///
/// Every field is optional; unset fields fall back to the built-in
/// constants of the assessment widgets.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   severe_cramps_multiplier: 1.5
///   thresholds: { moderate: 30, severe: 60, emergency: 85 }
///   tracker_buckets:
///     - { range: ">=9", severity: emergency }
///     - { range: "7-8", severity: severe }
///     - { range: "4-6", severity: moderate }
///     - { range: "<4", severity: mild }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Multiplier applied to the base score when the symptom is severe cramps
    #[serde(default)]
    pub severe_cramps_multiplier: Option<f64>,

    /// Lower bounds (inclusive) of each symptom-assessment severity band
    #[serde(default)]
    pub thresholds: Option<SeverityThresholds>,

    /// Pain tracker intensity buckets, first match wins
    #[serde(default)]
    pub tracker_buckets: Option<Vec<TrackerBucket>>,
}

pub const DEFAULT_SEVERE_CRAMPS_MULTIPLIER: f64 = 1.5;

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            severe_cramps_multiplier: Some(DEFAULT_SEVERE_CRAMPS_MULTIPLIER),
            thresholds: Some(SeverityThresholds::default()),
            tracker_buckets: Some(default_tracker_buckets()),
        }
    }
}

impl ScoringConfig {
    pub fn multiplier(&self) -> f64 {
        self.severe_cramps_multiplier
            .unwrap_or(DEFAULT_SEVERE_CRAMPS_MULTIPLIER)
    }

    pub fn thresholds(&self) -> SeverityThresholds {
        self.thresholds.unwrap_or_default()
    }

    pub fn tracker_buckets(&self) -> Vec<TrackerBucket> {
        self.tracker_buckets
            .clone()
            .unwrap_or_else(default_tracker_buckets)
    }
}

/// Half-open score bands on the 0-100 scale.
///
/// `[0, moderate)` is mild, `[moderate, severe)` moderate,
/// `[severe, emergency)` severe and `[emergency, 100]` emergency.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SeverityThresholds {
    pub moderate: f64,
    pub severe: f64,
    pub emergency: f64,
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        Self {
            moderate: 30.0,
            severe: 60.0,
            emergency: 85.0,
        }
    }
}

/// Maps a pain tracker intensity range to a severity.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TrackerBucket {
    /// Range expression (e.g., ">=9", "7-8", "<4")
    pub range: String,

    pub severity: Severity,
}

impl TrackerBucket {
    pub fn new(range: &str, severity: Severity) -> Self {
        Self {
            range: range.to_string(),
            severity,
        }
    }
}

pub fn default_tracker_buckets() -> Vec<TrackerBucket> {
    vec![
        TrackerBucket::new(">=9", Severity::Emergency),
        TrackerBucket::new(">=7", Severity::Severe),
        TrackerBucket::new(">=4", Severity::Moderate),
        TrackerBucket::new("<4", Severity::Mild),
    ]
}
