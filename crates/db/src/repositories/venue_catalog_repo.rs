//! Repository for the `venue_categories` and `venue_types` tables.

use std::collections::HashMap;

use sqlx::PgConnection;
use tixello_core::types::DbId;

use super::{slug_ids, upsert_sql};
use crate::models::venue_catalog::{NewVenueCategory, NewVenueType};
use crate::models::UpsertOutcome;

pub struct VenueCatalogRepo;

impl VenueCatalogRepo {
    pub async fn upsert_category(
        conn: &mut PgConnection,
        input: &NewVenueCategory<'_>,
    ) -> Result<UpsertOutcome, sqlx::Error> {
        let query = upsert_sql(
            "venue_categories",
            "(slug, name, icon, sort_order) VALUES ($1, $2, $3, $4) ON CONFLICT (slug)",
            &["name", "icon", "sort_order"],
            "slug = $1",
        );
        sqlx::query_as::<_, UpsertOutcome>(&query)
            .bind(input.slug)
            .bind(&input.name)
            .bind(input.icon)
            .bind(input.sort_order)
            .fetch_one(&mut *conn)
            .await
    }

    /// Upsert a venue type. A type whose slug already exists is moved under
    /// `venue_category_id`.
    pub async fn upsert_type(
        conn: &mut PgConnection,
        input: &NewVenueType<'_>,
    ) -> Result<UpsertOutcome, sqlx::Error> {
        let query = upsert_sql(
            "venue_types",
            "(slug, venue_category_id, name, icon, sort_order) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (slug)",
            &["venue_category_id", "name", "icon", "sort_order"],
            "slug = $1",
        );
        sqlx::query_as::<_, UpsertOutcome>(&query)
            .bind(input.slug)
            .bind(input.venue_category_id)
            .bind(&input.name)
            .bind(input.icon)
            .bind(input.sort_order)
            .fetch_one(&mut *conn)
            .await
    }

    pub async fn type_ids(conn: &mut PgConnection) -> Result<HashMap<String, DbId>, sqlx::Error> {
        slug_ids(conn, "venue_types").await
    }
}
