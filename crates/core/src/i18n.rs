//! Localized text stored as `{ "en": …, "ro": … }` JSONB objects.
//!
//! Every multi-language column (`name`, `description`, `features`, …) is
//! written through [`Localized`], so the shape of the stored JSON is defined
//! in exactly one place.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::CoreError;

/// A value available in every supported language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized<T> {
    pub en: T,
    pub ro: T,
}

impl<T: Serialize> Localized<T> {
    /// JSON object written to the database column.
    pub fn to_json(&self) -> Value {
        json!({ "en": &self.en, "ro": &self.ro })
    }
}

impl<T: Clone> Localized<T> {
    /// Same value in both languages (brand names, acronyms).
    pub fn uniform(value: T) -> Self {
        Self {
            en: value.clone(),
            ro: value,
        }
    }
}

impl Localized<String> {
    /// Empty text in both languages.
    pub fn blank() -> Self {
        Self::uniform(String::new())
    }

    /// Fail unless both translations are non-blank.
    pub fn ensure_present(&self, entity: &str, key: &str) -> Result<(), CoreError> {
        for (lang, text) in [("en", &self.en), ("ro", &self.ro)] {
            if text.trim().is_empty() {
                return Err(CoreError::Validation(format!(
                    "{entity} '{key}' is missing its {lang} text"
                )));
            }
        }
        Ok(())
    }
}

impl Localized<Vec<String>> {
    /// Fail unless both languages list the same number of entries.
    ///
    /// Feature bullet lists are rendered side by side, so a missing
    /// translation shows up as a shifted list.
    pub fn ensure_aligned(&self, entity: &str, key: &str) -> Result<(), CoreError> {
        if self.en.len() != self.ro.len() {
            return Err(CoreError::Validation(format!(
                "{entity} '{key}' has {} en entries but {} ro entries",
                self.en.len(),
                self.ro.len()
            )));
        }
        Ok(())
    }
}

impl<T: Default> Default for Localized<T> {
    fn default() -> Self {
        Self {
            en: T::default(),
            ro: T::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn text(en: &str, ro: &str) -> Localized<String> {
        Localized {
            en: en.to_string(),
            ro: ro.to_string(),
        }
    }

    #[test]
    fn to_json_has_both_languages() {
        let value = text("Concert", "Concert").to_json();
        assert_eq!(value, json!({"en": "Concert", "ro": "Concert"}));
    }

    #[test]
    fn list_to_json() {
        let features = Localized {
            en: vec!["Fast".to_string()],
            ro: vec!["Rapid".to_string()],
        };
        assert_eq!(features.to_json(), json!({"en": ["Fast"], "ro": ["Rapid"]}));
    }

    #[test]
    fn deserializes_from_fixture_shape() {
        let parsed: Localized<String> =
            serde_json::from_str(r#"{"en": "Theatre", "ro": "Teatru"}"#).unwrap();
        assert_eq!(parsed, text("Theatre", "Teatru"));
    }

    #[test]
    fn blank_is_empty_in_both() {
        assert_eq!(Localized::blank().to_json(), json!({"en": "", "ro": ""}));
    }

    #[test]
    fn ensure_present_rejects_missing_translation() {
        let err = text("Opera", " ").ensure_present("event type", "opera");
        assert_matches!(err, Err(CoreError::Validation(msg)) if msg.contains("ro"));
        assert!(text("Opera", "Operă").ensure_present("event type", "opera").is_ok());
    }

    #[test]
    fn ensure_aligned_detects_length_mismatch() {
        let features = Localized {
            en: vec!["a".to_string(), "b".to_string()],
            ro: vec!["a".to_string()],
        };
        assert_matches!(
            features.ensure_aligned("microservice", "sms"),
            Err(CoreError::Validation(_))
        );
    }
}
