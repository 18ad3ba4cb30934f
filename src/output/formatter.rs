use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::io::IsTerminal;

use crate::assessment::{AssessmentResult, Recommendation, Severity, Tool};
use crate::catalog::Catalog;
use crate::i18n::{messages, Label, Locale};

const BAR_WIDTH: usize = 20;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score against its maximum, e.g. "75/100"
pub fn format_score(score: u32, max_score: u32) -> String {
    format!("{}/{}", score, max_score)
}

/// Render a percentage as a fixed-width bar: "[#####...............] 25%"
pub fn format_bar(percentage: u32) -> String {
    let clamped = percentage.min(100) as usize;
    let filled = (clamped * BAR_WIDTH + 50) / 100;
    format!(
        "[{}{}] {}%",
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled),
        clamped
    )
}

fn paint_severity(severity: Severity, text: &str, use_colors: bool) -> String {
    if !use_colors {
        return text.to_string();
    }
    match severity {
        Severity::Mild => text.green().to_string(),
        Severity::Moderate => text.yellow().to_string(),
        Severity::Severe => text.red().to_string(),
        Severity::Emergency => text.red().bold().to_string(),
    }
}

fn format_recommendation(rec: &Recommendation, locale: Locale, use_colors: bool) -> String {
    let mut lines = Vec::with_capacity(rec.action_steps.len() + 2);
    let meta = format!("({}, {})", rec.priority.label(locale), rec.timeframe);
    if use_colors {
        lines.push(format!("  {} {}", rec.title.bold(), meta.dimmed()));
    } else {
        lines.push(format!("  {} {}", rec.title, meta));
    }
    lines.push(format!("    {}", rec.description));
    for step in &rec.action_steps {
        lines.push(format!("    - {}", step));
    }
    lines.join("\n")
}

/// Format an assessment result as multi-line text in the result's locale.
pub fn format_result(result: &AssessmentResult, use_colors: bool) -> String {
    let locale = result.locale;
    let mut lines = Vec::new();

    let heading = result.tool.result_heading().get(locale);
    if use_colors {
        lines.push(heading.bold().to_string());
    } else {
        lines.push(heading.to_string());
    }

    let score_label = match result.tool {
        Tool::SymptomAssessment => messages::SCORE.get(locale),
        Tool::PainTracker => messages::PAIN_LEVEL.get(locale),
    };
    lines.push(format!(
        "  {}: {}",
        score_label,
        format_score(result.score, result.max_score)
    ));
    lines.push(format!("  {}", format_bar(result.percentage)));

    let severity_label = result.severity.label(locale);
    lines.push(format!(
        "  {}: {}",
        messages::SEVERITY.get(locale),
        paint_severity(result.severity, severity_label, use_colors)
    ));

    if let Some(ref location) = result.location_label {
        lines.push(format!("  {}: {}", messages::PAIN_LOCATION.get(locale), location));
    }
    if let Some(ref pain_type) = result.type_label {
        lines.push(format!("  {}: {}", messages::PAIN_TYPE.get(locale), pain_type));
    }

    lines.push(String::new());
    lines.push(format!("  {}", result.summary));

    for rec in &result.recommendations {
        lines.push(String::new());
        lines.push(format_recommendation(rec, locale, use_colors));
    }

    lines.push(String::new());
    let guide = result.tool.guide_path(locale);
    let guide = if use_colors {
        guide.underline().to_string()
    } else {
        guide
    };
    lines.push(format!(
        "  {}: {}",
        result.tool.guide_link_text().get(locale),
        guide
    ));

    lines.join("\n")
}

/// Format an assessment result as pretty-printed JSON.
pub fn format_result_json(result: &AssessmentResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("Failed to serialize result")
}

/// Format the recommendation catalog grouped by tool.
pub fn format_catalog(catalog: &Catalog, locale: Locale, use_colors: bool) -> String {
    let mut sections = Vec::new();
    for tool in [Tool::SymptomAssessment, Tool::PainTracker] {
        let title = tool.title().get(locale);
        let mut lines = vec![if use_colors {
            title.bold().to_string()
        } else {
            title.to_string()
        }];
        for rec in catalog.recommendations(tool, locale) {
            lines.push(format_recommendation(&rec, locale, use_colors));
        }
        sections.push(lines.join("\n"));
    }
    sections.join("\n\n")
}

/// Format the recommendation catalog as JSON: an object keyed by tool.
pub fn format_catalog_json(catalog: &Catalog, locale: Locale) -> Result<String> {
    let value = serde_json::json!({
        "symptom-assessment": catalog.recommendations(Tool::SymptomAssessment, locale),
        "pain-tracker": catalog.recommendations(Tool::PainTracker, locale),
    });
    serde_json::to_string_pretty(&value).context("Failed to serialize catalog")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{
        Intensity, PainLocation, PainTrackerForm, PainType, SymptomCategory, SymptomForm,
    };
    use crate::scoring::Scorer;

    fn symptom_result(locale: Locale) -> AssessmentResult {
        Scorer::default()
            .score_symptom_assessment(
                &SymptomForm::new(SymptomCategory::SevereCramps, Intensity::new(5).unwrap()),
                locale,
            )
            .unwrap()
    }

    fn tracker_result(locale: Locale) -> AssessmentResult {
        Scorer::default()
            .score_pain_tracker(
                &PainTrackerForm::new(
                    PainLocation::UpperAbdomen,
                    PainType::Sharp,
                    Intensity::new(8).unwrap(),
                ),
                locale,
            )
            .unwrap()
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(75, 100), "75/100");
        assert_eq!(format_score(5, 10), "5/10");
    }

    #[test]
    fn test_format_bar() {
        assert_eq!(format_bar(0), "[....................] 0%");
        assert_eq!(format_bar(50), "[##########..........] 50%");
        assert_eq!(format_bar(100), "[####################] 100%");
        assert_eq!(format_bar(250), "[####################] 100%");
    }

    #[test]
    fn test_format_symptom_result_plain() {
        let output = format_result(&symptom_result(Locale::En), false);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Assessment Results");
        assert!(output.contains("Pain Level Score: 75/100"));
        assert!(output.contains("Severity: severe"));
        assert!(output.contains("Based on your symptoms, your period pain level is severe."));
        assert!(output.contains("Immediate Relief (high, Immediate)"));
        assert!(output.contains("    - Apply heat pad to abdomen"));
        assert!(output.contains("View Detailed Treatment Guide: /en/articles/pain-management"));
        assert!(!output.contains("Pain Location"));
    }

    #[test]
    fn test_format_tracker_result_chinese() {
        let output = format_result(&tracker_result(Locale::Zh), false);
        assert!(output.starts_with("疼痛记录"));
        assert!(output.contains("疼痛程度: 8/10"));
        assert!(output.contains("严重程度: 重度"));
        assert!(output.contains("疼痛位置: 上腹部"));
        assert!(output.contains("疼痛类型: 尖锐疼痛"));
        assert!(output.contains("查看治疗建议: /zh/articles/pain-management"));
    }

    #[test]
    fn test_format_result_json_uses_camel_case() {
        let json = format_result_json(&tracker_result(Locale::En)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["tool"], "pain-tracker");
        assert_eq!(value["severity"], "severe");
        assert_eq!(value["maxScore"], 10);
        assert_eq!(value["locationLabel"], "Upper Abdomen");
        assert_eq!(value["recommendations"][0]["priority"], "high");
        assert!(value["recommendations"][0]["actionSteps"].is_array());
    }

    #[test]
    fn test_symptom_json_omits_tracker_labels() {
        let json = format_result_json(&symptom_result(Locale::En)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("locationLabel").is_none());
        assert!(value.get("typeLabel").is_none());
        assert_eq!(value["score"], 75);
    }

    #[test]
    fn test_format_catalog() {
        let output = format_catalog(Catalog::builtin(), Locale::En, false);
        assert!(output.contains("Period Pain Symptom Assessment"));
        assert!(output.contains("Period Pain Tracker"));
        assert!(output.contains("Track pain changes"));

        let json = format_catalog_json(Catalog::builtin(), Locale::Zh).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["pain-tracker"][0]["title"], "立即缓解建议");
    }
}
