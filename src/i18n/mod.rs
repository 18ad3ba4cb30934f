use anyhow::{bail, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display language for labels, summaries and recommendations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    pub fn tag(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Zh => "zh",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "zh" => Ok(Locale::Zh),
            other => bail!("Unsupported locale '{}': expected 'en' or 'zh'", other),
        }
    }
}

/// A piece of text available in both supported locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Localized {
    pub en: &'static str,
    pub zh: &'static str,
}

impl Localized {
    pub const fn new(en: &'static str, zh: &'static str) -> Self {
        Self { en, zh }
    }

    pub fn get(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.en,
            Locale::Zh => self.zh,
        }
    }
}

/// Human-readable name of an enumerated value in a given locale.
pub trait Label {
    fn label(&self, locale: Locale) -> &'static str;
}

pub mod messages {
    use super::Localized;

    pub const SELECT_SYMPTOM_FIRST: Localized =
        Localized::new("Please select a symptom first", "请先选择症状");
    pub const COMPLETE_PAIN_INFO: Localized = Localized::new(
        "Please fill in complete pain information",
        "请填写完整的疼痛信息",
    );
    pub const ASSESSING: Localized = Localized::new("Assessing...", "评估中...");
    pub const RECORDING: Localized = Localized::new("Recording...", "记录中...");
    pub const RESULTS_HEADING: Localized = Localized::new("Assessment Results", "评估结果");
    pub const RECORD_HEADING: Localized = Localized::new("Pain Record", "疼痛记录");
    pub const SCORE: Localized = Localized::new("Pain Level Score", "痛经程度评分");
    pub const PAIN_LEVEL: Localized = Localized::new("Pain Level", "疼痛程度");
    pub const PAIN_LOCATION: Localized = Localized::new("Pain Location", "疼痛位置");
    pub const PAIN_TYPE: Localized = Localized::new("Pain Type", "疼痛类型");
    pub const SEVERITY: Localized = Localized::new("Severity", "严重程度");
    pub const SYMPTOM_TOOL: Localized =
        Localized::new("Period Pain Symptom Assessment", "痛经症状评估工具");
    pub const TRACKER_TOOL: Localized = Localized::new("Period Pain Tracker", "痛经追踪工具");
    pub const FULL_GUIDE: Localized =
        Localized::new("View Detailed Treatment Guide", "查看详细治疗指南");
    pub const TREATMENT: Localized =
        Localized::new("View Treatment Recommendations", "查看治疗建议");
}
