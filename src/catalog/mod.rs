use std::sync::OnceLock;

use crate::assessment::{Priority, Recommendation, Tool};
use crate::i18n::{Locale, Localized};

/// A catalog recommendation with text in every supported locale.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub tool: Tool,
    pub title: Localized,
    pub description: Localized,
    pub timeframe: Localized,
    pub priority: Priority,
    pub action_steps: Vec<Localized>,
}

impl CatalogEntry {
    pub fn resolve(&self, locale: Locale) -> Recommendation {
        Recommendation {
            id: self.id.to_string(),
            title: self.title.get(locale).to_string(),
            description: self.description.get(locale).to_string(),
            timeframe: self.timeframe.get(locale).to_string(),
            priority: self.priority,
            action_steps: self
                .action_steps
                .iter()
                .map(|step| step.get(locale).to_string())
                .collect(),
        }
    }
}

/// Read-only recommendation catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

const IMMEDIATE: Localized = Localized::new("Immediate", "立即执行");
const IMMEDIATE_RELIEF: Localized = Localized::new("Immediate Relief", "立即缓解建议");

impl Catalog {
    /// The built-in catalog, constructed on first use and shared for the
    /// rest of the process.
    pub fn builtin() -> &'static Catalog {
        static CATALOG: OnceLock<Catalog> = OnceLock::new();
        CATALOG.get_or_init(Catalog::default_entries)
    }

    fn default_entries() -> Catalog {
        Catalog {
            entries: vec![
                CatalogEntry {
                    id: "immediate-relief",
                    tool: Tool::SymptomAssessment,
                    title: IMMEDIATE_RELIEF,
                    description: Localized::new("Heat therapy and light exercise", "热敷和轻度运动"),
                    timeframe: IMMEDIATE,
                    priority: Priority::High,
                    action_steps: vec![
                        Localized::new("Apply heat pad to abdomen", "使用热水袋敷腹部"),
                        Localized::new("Do light stretching exercises", "进行轻度拉伸运动"),
                    ],
                },
                CatalogEntry {
                    id: "immediate-relief",
                    tool: Tool::PainTracker,
                    title: IMMEDIATE_RELIEF,
                    description: Localized::new(
                        "Recommendations based on your pain type and location",
                        "基于您的疼痛类型和位置的建议",
                    ),
                    timeframe: IMMEDIATE,
                    priority: Priority::High,
                    action_steps: vec![
                        Localized::new("Apply heat therapy for pain relief", "使用热敷缓解疼痛"),
                        Localized::new("Track pain changes", "记录疼痛变化"),
                    ],
                },
            ],
        }
    }

    /// Entries attached to a tool, in catalog order.
    pub fn entries_for(&self, tool: Tool) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter().filter(move |entry| entry.tool == tool)
    }

    /// Recommendations for a tool resolved to one locale, in catalog order.
    pub fn recommendations(&self, tool: Tool, locale: Locale) -> Vec<Recommendation> {
        self.entries_for(tool)
            .map(|entry| entry.resolve(locale))
            .collect()
    }
}
