//! General (platform-wide) taxes applied to ticket sales.

use chrono::NaiveDate;
use serde_json::Value;
use tixello_core::types::DbId;

/// DTO for upserting a `general_taxes` row.
///
/// Natural key is `(name, event_type_id)`, where a `None` event type means
/// the tax applies to every event.
#[derive(Debug, Clone)]
pub struct NewGeneralTax<'a> {
    pub name: &'a str,
    pub event_type_id: Option<DbId>,
    pub value: f64,
    pub value_type: &'a str,
    pub is_added_to_price: bool,
    pub applied_to_base: Option<&'a str>,
    pub has_tiered_rates: bool,
    pub tiered_rates: Option<&'a Value>,
    pub legal_basis: Option<&'a str>,
    pub beneficiary: Option<&'a str>,
    pub payment_term_type: Option<&'a str>,
    pub payment_term_day: Option<i16>,
    pub payment_term_days_after: Option<i16>,
    pub payment_term: Option<&'a str>,
    pub explanation: Option<&'a str>,
    pub after_event_instructions: Option<&'a str>,
    pub valid_from: Option<NaiveDate>,
    pub priority: i32,
}
