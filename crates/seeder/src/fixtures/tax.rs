//! Romanian general taxes (VAT, cultural stamps, copyright fees) and the
//! event types they refer to.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use tixello_core::error::CoreError;
use tixello_core::hierarchy::parents_first;
use tixello_core::natural_key::ensure_unique;
use validator::Validate;

use super::taxonomy::TypeFixture;
use super::{parse, validate_all};
use crate::error::SeedError;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GeneralTaxFixture {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub value: f64,
    pub value_type: ValueType,
    /// `None` means the tax applies to every event type.
    #[serde(default)]
    pub event_type_slug: Option<String>,
    pub is_added_to_price: bool,
    #[serde(default)]
    pub applied_to_base: Option<String>,
    #[serde(default)]
    pub has_tiered_rates: bool,
    #[serde(default)]
    pub tiered_rates: Option<Value>,
    #[serde(default)]
    pub legal_basis: Option<String>,
    #[serde(default)]
    pub beneficiary: Option<String>,
    #[serde(default)]
    pub payment_term_type: Option<String>,
    #[serde(default)]
    #[validate(range(min = 1, max = 31))]
    pub payment_term_day: Option<i16>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub payment_term_days_after: Option<i16>,
    #[serde(default)]
    pub payment_term: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub after_event_instructions: Option<String>,
    #[serde(default)]
    pub valid_from: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Percent,
    Fixed,
}

impl ValueType {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::Percent => "percent",
            ValueType::Fixed => "fixed",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneralTaxes {
    /// Event types the taxes refer to. Created only when missing.
    pub event_types: Vec<TypeFixture>,
    pub taxes: Vec<GeneralTaxFixture>,
}

impl GeneralTaxes {
    pub const NAME: &'static str = "general_taxes.json";

    pub fn load() -> Result<Self, SeedError> {
        parse(Self::NAME, include_str!("../../fixtures/general_taxes.json"))
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        ensure_unique("event type", self.event_types.iter().map(|t| t.slug.as_str()))?;
        parents_first("event type", &self.event_types)?;
        validate_all(&self.taxes)?;
        ensure_unique(
            "general tax",
            self.taxes.iter().map(|t| {
                format!("{}/{}", t.name, t.event_type_slug.as_deref().unwrap_or("*"))
            }),
        )?;

        for tax in &self.taxes {
            if tax.value_type == ValueType::Percent && tax.value > 100.0 {
                return Err(CoreError::Validation(format!(
                    "general tax '{}' has a percentage above 100",
                    tax.name
                )));
            }
            if tax.has_tiered_rates && !tax.tiered_rates.as_ref().is_some_and(Value::is_array) {
                return Err(CoreError::Validation(format!(
                    "general tax '{}' declares tiered rates but lists none",
                    tax.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use tixello_core::tax::tax_priority;

    use super::*;

    fn one_tax(extra: &str) -> GeneralTaxes {
        serde_json::from_str(&format!(
            r#"{{"event_types": [], "taxes": [{{
                "name": "TVA 21%", "value": 21, "value_type": "percent",
                "is_added_to_price": false {extra}
            }}]}}"#
        ))
        .unwrap()
    }

    #[test]
    fn embedded_taxes_are_valid() {
        let taxes = GeneralTaxes::load().unwrap();
        taxes.validate().unwrap();
        assert_eq!(taxes.taxes.len(), 20);
        // Exactly one tax applies to every event type.
        assert_eq!(taxes.taxes.iter().filter(|t| t.event_type_slug.is_none()).count(), 1);
    }

    #[test]
    fn every_embedded_tax_gets_a_known_priority() {
        let taxes = GeneralTaxes::load().unwrap();
        for tax in &taxes.taxes {
            assert!([100, 50, 30].contains(&tax_priority(&tax.name)), "{}", tax.name);
        }
    }

    #[test]
    fn percentage_above_100_is_rejected() {
        let mut taxes = one_tax("");
        taxes.taxes[0].value = 121.0;
        assert_matches!(taxes.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn tiered_flag_without_rates_is_rejected() {
        assert_matches!(
            one_tax(r#", "has_tiered_rates": true"#).validate(),
            Err(CoreError::Validation(msg)) if msg.contains("tiered")
        );
        assert!(one_tax(r#", "has_tiered_rates": true, "tiered_rates": [{"min": 0, "rate": 7}]"#)
            .validate()
            .is_ok());
    }

    #[test]
    fn payment_day_out_of_range_is_rejected() {
        assert_matches!(
            one_tax(r#", "payment_term_day": 40"#).validate(),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn same_name_twice_for_one_event_type_is_rejected() {
        let taxes: GeneralTaxes = serde_json::from_str(
            r#"{"event_types": [], "taxes": [
                {"name": "T", "value": 1, "value_type": "percent", "is_added_to_price": true},
                {"name": "T", "value": 2, "value_type": "percent", "is_added_to_price": true}
            ]}"#,
        )
        .unwrap();
        assert_matches!(taxes.validate(), Err(CoreError::DuplicateKey { .. }));
    }
}
