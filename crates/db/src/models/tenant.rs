//! Demo tenants and the venues and events they own.

use serde_json::Value;
use sqlx::FromRow;
use tixello_core::types::{DbId, Timestamp};

/// A row from the `tenants` table.
#[derive(Debug, Clone, FromRow)]
pub struct Tenant {
    pub id: DbId,
    pub slug: String,
    pub name: String,
    pub domain: String,
    pub locale: String,
    pub currency: String,
}

/// DTO for upserting a tenant, keyed by `slug`.
#[derive(Debug, Clone)]
pub struct NewTenant<'a> {
    pub slug: &'a str,
    pub name: &'a str,
    pub domain: &'a str,
    pub locale: &'a str,
    pub currency: &'a str,
    pub settings: &'a Value,
}

/// DTO for upserting a venue, keyed by `(tenant_id, slug)`.
#[derive(Debug, Clone)]
pub struct NewVenue<'a> {
    pub tenant_id: DbId,
    pub slug: &'a str,
    pub venue_type_id: Option<DbId>,
    pub name: &'a str,
    pub city: &'a str,
    pub address: &'a str,
    pub capacity: i32,
}

/// DTO for upserting an event, keyed by `(tenant_id, slug)`.
#[derive(Debug, Clone)]
pub struct NewEvent<'a> {
    pub tenant_id: DbId,
    pub venue_id: Option<DbId>,
    pub event_type_id: Option<DbId>,
    pub slug: &'a str,
    pub title: Value,
    pub description: Value,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub status: &'a str,
}
