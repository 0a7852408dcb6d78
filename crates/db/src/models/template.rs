//! Email and contract templates.

use serde_json::Value;

/// DTO for upserting an `email_templates` row, keyed by `slug`.
#[derive(Debug, Clone)]
pub struct NewEmailTemplate<'a> {
    pub slug: &'a str,
    pub name: &'a str,
    pub category: &'a str,
    pub subject: Value,
    pub body_html: Value,
    /// Placeholder names the body may reference, e.g. `customer_name`.
    pub variables: Value,
    pub is_active: bool,
}

/// DTO for upserting a `contract_templates` row, keyed by `slug`.
#[derive(Debug, Clone)]
pub struct NewContractTemplate<'a> {
    pub slug: &'a str,
    pub name: Value,
    pub contract_type: &'a str,
    pub content: Value,
    pub variables: Value,
    pub version: i32,
    pub is_default: bool,
}
