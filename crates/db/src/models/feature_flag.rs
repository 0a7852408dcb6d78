//! Platform feature flags, keyed by `key`.

use sqlx::FromRow;
use tixello_core::types::{DbId, Timestamp};

/// A row from the `feature_flags` table.
#[derive(Debug, Clone, FromRow)]
pub struct FeatureFlag {
    pub id: DbId,
    pub key: String,
    pub description: String,
    pub is_enabled: bool,
    pub rollout_percentage: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for upserting a feature flag.
#[derive(Debug, Clone)]
pub struct NewFeatureFlag<'a> {
    pub key: &'a str,
    pub description: &'a str,
    pub is_enabled: bool,
    pub rollout_percentage: i16,
}
