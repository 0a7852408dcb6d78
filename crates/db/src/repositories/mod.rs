//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async upsert and lookup
//! methods that accept `&mut PgConnection` as the first argument, so a
//! seeder can run every statement inside one transaction.

pub mod feature_flag_repo;
pub mod gamification_repo;
pub mod knowledge_base_repo;
pub mod location_repo;
pub mod microservice_repo;
pub mod tax_repo;
pub mod taxonomy_repo;
pub mod template_repo;
pub mod tenant_repo;
pub mod venue_catalog_repo;

pub use feature_flag_repo::FeatureFlagRepo;
pub use gamification_repo::GamificationRepo;
pub use knowledge_base_repo::KnowledgeBaseRepo;
pub use location_repo::LocationRepo;
pub use microservice_repo::MicroserviceRepo;
pub use tax_repo::TaxRepo;
pub use taxonomy_repo::TaxonomyRepo;
pub use template_repo::{ContractTemplateRepo, EmailTemplateRepo};
pub use tenant_repo::{EventRepo, TenantRepo, VenueRepo};
pub use venue_catalog_repo::VenueCatalogRepo;

use std::collections::HashMap;

use sqlx::PgConnection;
use tixello_core::types::DbId;

/// Build an upsert that leaves a row alone when it already holds the
/// incoming values, so re-runs neither rewrite rows nor fire the
/// `updated_at` trigger.
///
/// `insert` is everything after `INSERT INTO {table}` up to and including
/// the `ON CONFLICT` target. `update` lists the columns overwritten on
/// conflict. `lookup` finds the existing row by its natural key, reusing the
/// insert's placeholders; it only runs when the guarded update was skipped.
///
/// The statement yields one [`UpsertOutcome`](crate::models::UpsertOutcome)
/// row in every case.
pub(crate) fn upsert_sql(table: &str, insert: &str, update: &[&str], lookup: &str) -> String {
    let set = update
        .iter()
        .map(|col| format!("{col} = EXCLUDED.{col}"))
        .collect::<Vec<_>>()
        .join(", ");
    let existing = update
        .iter()
        .map(|col| format!("{table}.{col}"))
        .collect::<Vec<_>>()
        .join(", ");
    let incoming = update
        .iter()
        .map(|col| format!("EXCLUDED.{col}"))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "WITH upserted AS ( \
            INSERT INTO {table} {insert} \
            DO UPDATE SET {set} \
            WHERE ({existing}) IS DISTINCT FROM ({incoming}) \
            RETURNING id, (xmax = 0) AS inserted \
         ) \
         SELECT id, inserted, true AS changed FROM upserted \
         UNION ALL \
         SELECT id, false, false FROM {table} \
         WHERE {lookup} AND NOT EXISTS (SELECT 1 FROM upserted)"
    )
}

/// Map every `slug` in `table` to its id.
///
/// `table` is always a compile-time constant from this crate.
pub(crate) async fn slug_ids(
    conn: &mut PgConnection,
    table: &'static str,
) -> Result<HashMap<String, DbId>, sqlx::Error> {
    let query = format!("SELECT slug, id FROM {table}");
    let rows: Vec<(String, DbId)> = sqlx::query_as(&query).fetch_all(&mut *conn).await?;
    Ok(rows.into_iter().collect())
}

/// Number of rows in `table`.
pub async fn count_rows(conn: &mut PgConnection, table: &'static str) -> Result<i64, sqlx::Error> {
    let query = format!("SELECT COUNT(*) FROM {table}");
    sqlx::query_scalar(&query).fetch_one(&mut *conn).await
}
