use thiserror::Error;

use crate::i18n::{messages, Locale};

/// Which required selection was missing from a submitted form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Symptom,
    Location,
    PainType,
}

impl MissingField {
    /// The blocking alert shown to the user for this missing selection.
    pub fn alert(self, locale: Locale) -> &'static str {
        match self {
            MissingField::Symptom => messages::SELECT_SYMPTOM_FIRST.get(locale),
            MissingField::Location | MissingField::PainType => {
                messages::COMPLETE_PAIN_INFO.get(locale)
            }
        }
    }
}

fn alert_text(missing: &MissingField, locale: &Locale) -> &'static str {
    missing.alert(*locale)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AssessError {
    /// A required selection is unset; the caller must block submission.
    #[error("{}", alert_text(.missing, .locale))]
    InvalidInput { missing: MissingField, locale: Locale },

    #[error("Intensity {0} is out of range: expected 1-10")]
    IntensityOutOfRange(u8),
}
