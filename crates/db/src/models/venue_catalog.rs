use serde_json::Value;
use tixello_core::types::DbId;

/// DTO for upserting a `venue_categories` row, keyed by `slug`.
#[derive(Debug, Clone)]
pub struct NewVenueCategory<'a> {
    pub slug: &'a str,
    pub name: Value,
    pub icon: &'a str,
    pub sort_order: i32,
}

/// DTO for upserting a `venue_types` row, keyed by `slug`.
#[derive(Debug, Clone)]
pub struct NewVenueType<'a> {
    pub slug: &'a str,
    pub venue_category_id: DbId,
    pub name: Value,
    pub icon: &'a str,
    pub sort_order: i32,
}
