//! Regions, counties and cities, scoped to one tenant's marketplace.

use serde_json::Value;
use tixello_core::types::DbId;

/// DTO for upserting a region, keyed by `(tenant_id, slug)`.
#[derive(Debug, Clone)]
pub struct NewRegion<'a> {
    pub tenant_id: DbId,
    pub slug: &'a str,
    pub name: Value,
    pub code: &'a str,
    pub country: &'a str,
    pub sort_order: i32,
    pub is_featured: bool,
    /// Cities across every county of the region.
    pub city_count: i32,
}

/// DTO for upserting a county, keyed by `(tenant_id, code)`.
#[derive(Debug, Clone)]
pub struct NewCounty<'a> {
    pub tenant_id: DbId,
    pub region_id: DbId,
    pub code: &'a str,
    pub slug: &'a str,
    pub name: Value,
    pub country: &'a str,
    pub sort_order: i32,
    pub is_featured: bool,
    pub city_count: i32,
}

/// DTO for upserting a city, keyed by `(tenant_id, county_id, slug)`.
///
/// Slugs are only unique within a county: Romania has two towns named
/// Sfântu Gheorghe.
#[derive(Debug, Clone)]
pub struct NewCity<'a> {
    pub tenant_id: DbId,
    pub region_id: DbId,
    pub county_id: DbId,
    pub slug: &'a str,
    pub name: Value,
    pub country: &'a str,
    pub timezone: &'a str,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub population: Option<i32>,
    pub sort_order: i32,
    pub is_featured: bool,
    pub is_capital: bool,
}
