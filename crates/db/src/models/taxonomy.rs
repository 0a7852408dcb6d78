//! Two-level taxonomies: a self-referencing type tree, a flat genre list,
//! and a pivot table of allowed (type, genre) combinations.
//!
//! The event and artist taxonomies share one schema shape, so the
//! repository is parameterised by [`TaxonomyTables`] instead of being
//! written twice.

use serde_json::Value;
use sqlx::FromRow;
use tixello_core::types::DbId;

/// Table and column names of one taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxonomyTables {
    pub types: &'static str,
    pub genres: &'static str,
    pub pivot: &'static str,
    pub type_fk: &'static str,
    pub genre_fk: &'static str,
}

impl TaxonomyTables {
    pub const EVENT: TaxonomyTables = TaxonomyTables {
        types: "event_types",
        genres: "event_genres",
        pivot: "event_type_event_genre",
        type_fk: "event_type_id",
        genre_fk: "event_genre_id",
    };

    pub const ARTIST: TaxonomyTables = TaxonomyTables {
        types: "artist_types",
        genres: "artist_genres",
        pivot: "artist_type_artist_genre",
        type_fk: "artist_type_id",
        genre_fk: "artist_genre_id",
    };
}

/// A type row, enough to check the tree shape.
#[derive(Debug, Clone, FromRow)]
pub struct TaxonomyNode {
    pub id: DbId,
    pub slug: String,
    pub parent_id: Option<DbId>,
}

/// DTO for upserting a type row, keyed by `slug`.
#[derive(Debug, Clone)]
pub struct NewTaxonomyType<'a> {
    pub slug: &'a str,
    pub parent_id: Option<DbId>,
    pub name: Value,
    pub description: Value,
}

/// DTO for upserting a genre row, keyed by `slug`.
#[derive(Debug, Clone)]
pub struct NewTaxonomyGenre<'a> {
    pub slug: &'a str,
    pub name: Value,
    pub description: Value,
}
