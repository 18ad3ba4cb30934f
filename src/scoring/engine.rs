use tracing::debug;

use super::config::{ScoringConfig, SeverityThresholds, TrackerBucket};
use super::factors::RangeOp;
use crate::assessment::{
    AssessError, AssessmentResult, Intensity, PainTrackerForm, Severity, SymptomCategory,
    SymptomForm, Tool,
};
use crate::catalog::Catalog;
use crate::i18n::{Label, Locale};

pub const SYMPTOM_MAX_SCORE: u32 = 100;
pub const TRACKER_MAX_SCORE: u32 = 10;

/// Computes assessment results from submitted forms.
///
/// Holds the scoring constants and the recommendation catalog; scoring
/// itself is pure and never mutates either.
#[derive(Debug, Clone)]
pub struct Scorer {
    config: ScoringConfig,
    catalog: &'static Catalog,
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

impl Scorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            config,
            catalog: Catalog::builtin(),
        }
    }

    /// Score the symptom assessment form.
    ///
    /// Fails with [`AssessError::InvalidInput`] when no symptom was selected.
    pub fn score_symptom_assessment(
        &self,
        form: &SymptomForm,
        locale: Locale,
    ) -> Result<AssessmentResult, AssessError> {
        let symptom = form.require_symptom(locale)?;
        let final_score = symptom_score(symptom, form.intensity, self.config.multiplier());
        let severity = classify_score(final_score, &self.config.thresholds());
        let score = final_score.round() as u32;

        debug!(
            symptom = ?symptom,
            intensity = form.intensity.value(),
            score,
            severity = %severity,
            "scored symptom assessment"
        );

        Ok(AssessmentResult {
            tool: Tool::SymptomAssessment,
            locale,
            score,
            max_score: SYMPTOM_MAX_SCORE,
            percentage: percentage(score, SYMPTOM_MAX_SCORE),
            severity,
            summary: symptom_summary(severity, locale),
            location_label: None,
            type_label: None,
            recommendations: self
                .catalog
                .recommendations(Tool::SymptomAssessment, locale),
        })
    }

    /// Score the pain tracker form.
    ///
    /// Fails with [`AssessError::InvalidInput`] when the location or the
    /// pain type was not selected.
    pub fn score_pain_tracker(
        &self,
        form: &PainTrackerForm,
        locale: Locale,
    ) -> Result<AssessmentResult, AssessError> {
        let (location, pain_type) = form.require_selection(locale)?;
        let severity = classify_intensity(form.intensity, &self.config.tracker_buckets());
        let score = u32::from(form.intensity.value());

        debug!(
            location = ?location,
            pain_type = ?pain_type,
            intensity = score,
            severity = %severity,
            "scored pain tracker entry"
        );

        Ok(AssessmentResult {
            tool: Tool::PainTracker,
            locale,
            score,
            max_score: TRACKER_MAX_SCORE,
            percentage: percentage(score, TRACKER_MAX_SCORE),
            severity,
            summary: tracker_summary(form.intensity, severity, locale),
            location_label: Some(location.label(locale).to_string()),
            type_label: Some(pain_type.label(locale).to_string()),
            recommendations: self.catalog.recommendations(Tool::PainTracker, locale),
        })
    }
}

/// Unrounded symptom score: `min(intensity * 10 * multiplier, 100)`, where
/// the multiplier only applies to severe cramps.
pub fn symptom_score(symptom: SymptomCategory, intensity: Intensity, multiplier: f64) -> f64 {
    let base_score = f64::from(intensity.value()) * 10.0;
    let multiplier = match symptom {
        SymptomCategory::SevereCramps => multiplier,
        SymptomCategory::MildCramps
        | SymptomCategory::ModerateCramps
        | SymptomCategory::IrregularPeriods => 1.0,
    };
    (base_score * multiplier).min(f64::from(SYMPTOM_MAX_SCORE))
}

/// Map a 0-100 score onto the half-open severity bands. Lower bounds are inclusive.
///
/// Bands apply to the unrounded score, so with a custom multiplier a reported
/// score of 85 can still classify as severe (84.95 rounds up).
pub fn classify_score(score: f64, thresholds: &SeverityThresholds) -> Severity {
    if score < thresholds.moderate {
        Severity::Mild
    } else if score < thresholds.severe {
        Severity::Moderate
    } else if score < thresholds.emergency {
        Severity::Severe
    } else {
        Severity::Emergency
    }
}

/// First bucket whose range matches wins. Unparsable buckets are skipped and
/// an intensity no bucket covers is treated as mild.
pub fn classify_intensity(intensity: Intensity, buckets: &[TrackerBucket]) -> Severity {
    let value = u32::from(intensity.value());
    buckets
        .iter()
        .find(|bucket| {
            RangeOp::parse(&bucket.range)
                .map(|range| range.matches(value))
                .unwrap_or(false)
        })
        .map(|bucket| bucket.severity)
        .unwrap_or(Severity::Mild)
}

fn percentage(score: u32, max_score: u32) -> u32 {
    (f64::from(score) / f64::from(max_score) * 100.0).round() as u32
}

fn symptom_summary(severity: Severity, locale: Locale) -> String {
    match locale {
        Locale::En => format!("Based on your symptoms, your period pain level is {}.", severity),
        Locale::Zh => format!(
            "根据您的症状描述，您的痛经程度为{}。",
            severity.label(locale)
        ),
    }
}

fn tracker_summary(intensity: Intensity, severity: Severity, locale: Locale) -> String {
    match locale {
        Locale::En => format!(
            "Your recorded pain level is {}/10, classified as {} pain.",
            intensity, severity
        ),
        Locale::Zh => format!(
            "您记录的疼痛程度为{}/10，属于{}疼痛。",
            intensity,
            severity.label(locale)
        ),
    }
}
