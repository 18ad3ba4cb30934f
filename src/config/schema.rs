use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::assessment::Tool;
use crate::i18n::Locale;
use crate::scoring::ScoringConfig;

pub const DEFAULT_SYMPTOM_DELAY: &str = "2s";
pub const DEFAULT_TRACKER_DELAY: &str = "1500ms";

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Display language when `--locale` is not given (default: en)
    #[serde(default)]
    pub locale: Option<Locale>,

    #[serde(default)]
    pub reveal: Option<RevealConfig>,

    #[serde(default)]
    pub scoring: Option<ScoringConfig>,
}

/// Delay before a computed result is shown, per tool.
/// Durations use humantime syntax ("2s", "1500ms").
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RevealConfig {
    #[serde(default)]
    pub symptom_assessment: Option<String>,

    #[serde(default)]
    pub pain_tracker: Option<String>,
}

impl RevealConfig {
    fn raw_delay(&self, tool: Tool) -> Option<&str> {
        match tool {
            Tool::SymptomAssessment => self.symptom_assessment.as_deref(),
            Tool::PainTracker => self.pain_tracker.as_deref(),
        }
    }
}

fn default_delay(tool: Tool) -> &'static str {
    match tool {
        Tool::SymptomAssessment => DEFAULT_SYMPTOM_DELAY,
        Tool::PainTracker => DEFAULT_TRACKER_DELAY,
    }
}

impl Config {
    /// A config with every field filled in with its default, as written by `init`.
    pub fn template() -> Self {
        Self {
            locale: Some(Locale::En),
            reveal: Some(RevealConfig {
                symptom_assessment: Some(DEFAULT_SYMPTOM_DELAY.to_string()),
                pain_tracker: Some(DEFAULT_TRACKER_DELAY.to_string()),
            }),
            scoring: Some(ScoringConfig::default()),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale.unwrap_or_default()
    }

    pub fn scoring(&self) -> ScoringConfig {
        self.scoring.clone().unwrap_or_default()
    }

    pub fn reveal_delay(&self, tool: Tool) -> Result<Duration> {
        let raw = self
            .reveal
            .as_ref()
            .and_then(|reveal| reveal.raw_delay(tool))
            .unwrap_or(default_delay(tool));
        humantime::parse_duration(raw.trim())
            .with_context(|| format!("Invalid reveal delay '{}'", raw))
    }
}
