use super::config::ScoringConfig;
use super::factors::RangeOp;
use crate::assessment::Intensity;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(multiplier) = config.severe_cramps_multiplier {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            errors.push(format!(
                "scoring.severe_cramps_multiplier: must be a positive number, got {}",
                multiplier
            ));
        }
    }

    if let Some(ref thresholds) = config.thresholds {
        let bands = [
            ("moderate", thresholds.moderate),
            ("severe", thresholds.severe),
            ("emergency", thresholds.emergency),
        ];
        for (name, value) in bands {
            if !value.is_finite() || value <= 0.0 || value > 100.0 {
                errors.push(format!(
                    "scoring.thresholds.{}: must be within (0, 100], got {}",
                    name, value
                ));
            }
        }
        if !(thresholds.moderate < thresholds.severe && thresholds.severe < thresholds.emergency) {
            errors.push(
                "scoring.thresholds: must be strictly ascending (moderate < severe < emergency)"
                    .to_string(),
            );
        }
    }

    if let Some(ref buckets) = config.tracker_buckets {
        if buckets.is_empty() {
            errors.push("scoring.tracker_buckets: must contain at least one bucket".to_string());
        } else {
            let mut ranges = Vec::new();
            for (i, bucket) in buckets.iter().enumerate() {
                match RangeOp::parse(&bucket.range) {
                    Ok(range) => ranges.push(range),
                    Err(e) => errors.push(format!(
                        "scoring.tracker_buckets[{}].range: invalid '{}' - {}",
                        i, bucket.range, e
                    )),
                }
            }

            // Skip the coverage check when some ranges failed to parse; the
            // parse errors above already explain the gaps.
            if ranges.len() == buckets.len() {
                for level in Intensity::all() {
                    let value = u32::from(level.value());
                    if !ranges.iter().any(|range| range.matches(value)) {
                        errors.push(format!(
                            "scoring.tracker_buckets: intensity {} is not covered by any bucket",
                            level
                        ));
                    }
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::Severity;
    use crate::scoring::{SeverityThresholds, TrackerBucket};

    fn empty() -> ScoringConfig {
        ScoringConfig {
            severe_cramps_multiplier: None,
            thresholds: None,
            tracker_buckets: None,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_scoring(&ScoringConfig::default()).is_ok());
    }

    #[test]
    fn test_empty_config() {
        assert!(validate_scoring(&empty()).is_ok());
    }

    #[test]
    fn test_non_positive_multiplier() {
        let config = ScoringConfig {
            severe_cramps_multiplier: Some(0.0),
            ..empty()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("severe_cramps_multiplier"));

        let config = ScoringConfig {
            severe_cramps_multiplier: Some(f64::NAN),
            ..empty()
        };
        assert!(validate_scoring(&config).is_err());
    }

    #[test]
    fn test_thresholds_out_of_order() {
        let config = ScoringConfig {
            thresholds: Some(SeverityThresholds {
                moderate: 60.0,
                severe: 30.0,
                emergency: 85.0,
            }),
            ..empty()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("strictly ascending"));
    }

    #[test]
    fn test_threshold_out_of_range() {
        let config = ScoringConfig {
            thresholds: Some(SeverityThresholds {
                moderate: 30.0,
                severe: 60.0,
                emergency: 120.0,
            }),
            ..empty()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.thresholds.emergency"));
    }

    #[test]
    fn test_invalid_tracker_bucket() {
        let config = ScoringConfig {
            tracker_buckets: Some(vec![TrackerBucket::new("invalid", Severity::Mild)]),
            ..empty()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("scoring.tracker_buckets[0].range"));
    }

    #[test]
    fn test_tracker_buckets_must_cover_every_intensity() {
        let config = ScoringConfig {
            tracker_buckets: Some(vec![
                TrackerBucket::new(">=9", Severity::Emergency),
                TrackerBucket::new("1-3", Severity::Mild),
            ]),
            ..empty()
        };
        let errors = validate_scoring(&config).unwrap_err();
        // 4, 5, 6, 7, 8 are uncovered
        assert_eq!(errors.len(), 5);
        assert!(errors[0].contains("intensity 4"));
    }

    #[test]
    fn test_empty_tracker_buckets() {
        let config = ScoringConfig {
            tracker_buckets: Some(vec![]),
            ..empty()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("at least one bucket"));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = ScoringConfig {
            severe_cramps_multiplier: Some(-1.0),
            thresholds: Some(SeverityThresholds {
                moderate: 90.0,
                severe: 60.0,
                emergency: 85.0,
            }),
            tracker_buckets: Some(vec![TrackerBucket::new("bad", Severity::Mild)]),
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
