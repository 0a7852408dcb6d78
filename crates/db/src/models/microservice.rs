//! Marketplace microservice listings and hub connector definitions.
//!
//! A "microservice" here is a purchasable add-on module of the platform
//! (WhatsApp notifications, eFactura, …), not a network service.

use serde_json::Value;

/// DTO for upserting a `microservices` row, keyed by `slug`.
#[derive(Debug, Clone)]
pub struct NewMicroservice<'a> {
    pub slug: &'a str,
    pub name: Value,
    pub description: Value,
    pub short_description: Value,
    pub price: f64,
    pub currency: &'a str,
    pub billing_cycle: &'a str,
    pub pricing_model: &'a str,
    pub features: Value,
    pub category: &'a str,
    pub status: &'a str,
    pub config_schema: Option<&'a Value>,
    pub metadata: Option<&'a Value>,
    pub sort_order: i32,
}

/// DTO for upserting a `hub_connectors` row, keyed by `slug`.
#[derive(Debug, Clone)]
pub struct NewHubConnector<'a> {
    pub slug: &'a str,
    pub name: Value,
    pub description: Value,
    pub icon: &'a str,
    pub auth_type: &'a str,
    pub auth_config: &'a Value,
    pub supported_actions: &'a Value,
    pub supported_events: &'a Value,
    pub is_active: bool,
    pub sort_order: i32,
}
