use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::{AssessError, MissingField};
use crate::i18n::{messages, Label, Locale, Localized};

/// Main symptom picked in the symptom assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SymptomCategory {
    MildCramps,
    ModerateCramps,
    SevereCramps,
    IrregularPeriods,
}

impl SymptomCategory {
    pub const ALL: [SymptomCategory; 4] = [
        SymptomCategory::MildCramps,
        SymptomCategory::ModerateCramps,
        SymptomCategory::SevereCramps,
        SymptomCategory::IrregularPeriods,
    ];
}

impl Label for SymptomCategory {
    fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (SymptomCategory::MildCramps, Locale::En) => "Mild cramps",
            (SymptomCategory::MildCramps, Locale::Zh) => "轻度痛经",
            (SymptomCategory::ModerateCramps, Locale::En) => "Moderate cramps",
            (SymptomCategory::ModerateCramps, Locale::Zh) => "中度痛经",
            (SymptomCategory::SevereCramps, Locale::En) => "Severe cramps",
            (SymptomCategory::SevereCramps, Locale::Zh) => "重度痛经",
            (SymptomCategory::IrregularPeriods, Locale::En) => "Irregular periods",
            (SymptomCategory::IrregularPeriods, Locale::Zh) => "月经不规律",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PainLocation {
    LowerAbdomen,
    LowerBack,
    UpperAbdomen,
    Pelvic,
}

impl PainLocation {
    pub const ALL: [PainLocation; 4] = [
        PainLocation::LowerAbdomen,
        PainLocation::LowerBack,
        PainLocation::UpperAbdomen,
        PainLocation::Pelvic,
    ];
}

impl Label for PainLocation {
    fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (PainLocation::LowerAbdomen, Locale::En) => "Lower Abdomen",
            (PainLocation::LowerAbdomen, Locale::Zh) => "下腹部",
            (PainLocation::LowerBack, Locale::En) => "Lower Back",
            (PainLocation::LowerBack, Locale::Zh) => "腰部",
            (PainLocation::UpperAbdomen, Locale::En) => "Upper Abdomen",
            (PainLocation::UpperAbdomen, Locale::Zh) => "上腹部",
            (PainLocation::Pelvic, Locale::En) => "Pelvic Area",
            (PainLocation::Pelvic, Locale::Zh) => "盆腔",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PainType {
    Cramping,
    Sharp,
    Dull,
    Throbbing,
}

impl PainType {
    pub const ALL: [PainType; 4] = [
        PainType::Cramping,
        PainType::Sharp,
        PainType::Dull,
        PainType::Throbbing,
    ];
}

impl Label for PainType {
    fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (PainType::Cramping, Locale::En) => "Cramping Pain",
            (PainType::Cramping, Locale::Zh) => "痉挛性疼痛",
            (PainType::Sharp, Locale::En) => "Sharp Pain",
            (PainType::Sharp, Locale::Zh) => "尖锐疼痛",
            (PainType::Dull, Locale::En) => "Dull Pain",
            (PainType::Dull, Locale::Zh) => "钝痛",
            (PainType::Throbbing, Locale::En) => "Throbbing Pain",
            (PainType::Throbbing, Locale::Zh) => "跳动性疼痛",
        }
    }
}

/// Ordinal classification of reported pain. Variant order is severity rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
    Emergency,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Mild => "mild",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
            Severity::Emergency => "emergency",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Label for Severity {
    fn label(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.as_str(),
            Locale::Zh => match self {
                Severity::Mild => "轻度",
                Severity::Moderate => "中度",
                Severity::Severe => "重度",
                Severity::Emergency => "紧急",
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Label for Priority {
    fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Priority::High, Locale::En) => "high",
            (Priority::High, Locale::Zh) => "高",
            (Priority::Medium, Locale::En) => "medium",
            (Priority::Medium, Locale::Zh) => "中",
            (Priority::Low, Locale::En) => "low",
            (Priority::Low, Locale::Zh) => "低",
        }
    }
}

/// The interactive tool a result was produced by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tool {
    SymptomAssessment,
    PainTracker,
}

impl Tool {
    /// Path of the follow-up treatment guide linked from the result.
    /// Both tools currently point at the same article.
    pub fn guide_path(self, locale: Locale) -> String {
        format!("/{}/articles/pain-management", locale)
    }

    pub fn guide_link_text(self) -> Localized {
        match self {
            Tool::SymptomAssessment => messages::FULL_GUIDE,
            Tool::PainTracker => messages::TREATMENT,
        }
    }

    pub fn title(self) -> Localized {
        match self {
            Tool::SymptomAssessment => messages::SYMPTOM_TOOL,
            Tool::PainTracker => messages::TRACKER_TOOL,
        }
    }

    pub fn result_heading(self) -> Localized {
        match self {
            Tool::SymptomAssessment => messages::RESULTS_HEADING,
            Tool::PainTracker => messages::RECORD_HEADING,
        }
    }

    /// Status text shown while a submission is pending.
    pub fn pending_text(self) -> Localized {
        match self {
            Tool::SymptomAssessment => messages::ASSESSING,
            Tool::PainTracker => messages::RECORDING,
        }
    }
}

/// Self-reported pain intensity on the 1-10 slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Intensity(u8);

impl Intensity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(value: u8) -> Result<Self, AssessError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(AssessError::IntensityOutOfRange(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Every valid intensity in ascending order.
    pub fn all() -> impl Iterator<Item = Intensity> {
        (Self::MIN..=Self::MAX).map(Intensity)
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Self(5)
    }
}

impl TryFrom<u8> for Intensity {
    type Error = AssessError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Form state of the symptom assessment at submission time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SymptomForm {
    pub symptom: Option<SymptomCategory>,
    pub intensity: Intensity,
}

impl SymptomForm {
    pub fn new(symptom: SymptomCategory, intensity: Intensity) -> Self {
        Self {
            symptom: Some(symptom),
            intensity,
        }
    }

    pub fn require_symptom(&self, locale: Locale) -> Result<SymptomCategory, AssessError> {
        self.symptom.ok_or(AssessError::InvalidInput {
            missing: MissingField::Symptom,
            locale,
        })
    }
}

/// Form state of the pain tracker at submission time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PainTrackerForm {
    pub location: Option<PainLocation>,
    pub pain_type: Option<PainType>,
    pub intensity: Intensity,
}

impl PainTrackerForm {
    pub fn new(location: PainLocation, pain_type: PainType, intensity: Intensity) -> Self {
        Self {
            location: Some(location),
            pain_type: Some(pain_type),
            intensity,
        }
    }

    pub fn require_selection(&self, locale: Locale) -> Result<(PainLocation, PainType), AssessError> {
        let location = self.location.ok_or(AssessError::InvalidInput {
            missing: MissingField::Location,
            locale,
        })?;
        let pain_type = self.pain_type.ok_or(AssessError::InvalidInput {
            missing: MissingField::PainType,
            locale,
        })?;
        Ok((location, pain_type))
    }
}

/// A recommendation resolved to one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: String,
    pub title: String,
    pub description: String,
    pub timeframe: String,
    pub priority: Priority,
    pub action_steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    pub tool: Tool,
    pub locale: Locale,
    pub score: u32,
    pub max_score: u32,
    pub percentage: u32,
    pub severity: Severity,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_label: Option<String>,
    pub recommendations: Vec<Recommendation>,
}
