//! Repository for the `feature_flags` table.

use sqlx::PgConnection;

use super::upsert_sql;
use crate::models::feature_flag::{FeatureFlag, NewFeatureFlag};
use crate::models::UpsertOutcome;

/// Column list for the `feature_flags` table.
const COLUMNS: &str = "id, key, description, is_enabled, rollout_percentage, created_at, updated_at";

pub struct FeatureFlagRepo;

impl FeatureFlagRepo {
    /// Insert a flag or overwrite the existing row with the same key.
    pub async fn upsert(
        conn: &mut PgConnection,
        input: &NewFeatureFlag<'_>,
    ) -> Result<UpsertOutcome, sqlx::Error> {
        let query = upsert_sql(
            "feature_flags",
            "(key, description, is_enabled, rollout_percentage) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (key)",
            &["description", "is_enabled", "rollout_percentage"],
            "key = $1",
        );
        sqlx::query_as::<_, UpsertOutcome>(&query)
            .bind(input.key)
            .bind(input.description)
            .bind(input.is_enabled)
            .bind(input.rollout_percentage)
            .fetch_one(&mut *conn)
            .await
    }

    pub async fn find_by_key(
        conn: &mut PgConnection,
        key: &str,
    ) -> Result<Option<FeatureFlag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM feature_flags WHERE key = $1");
        sqlx::query_as::<_, FeatureFlag>(&query)
            .bind(key)
            .fetch_optional(&mut *conn)
            .await
    }
}
