//! Row structs and upsert DTOs.
//!
//! Each submodule contains:
//! - `New*` DTOs carrying everything an upsert writes
//! - `FromRow` structs for the rows the seeders read back

pub mod feature_flag;
pub mod gamification;
pub mod knowledge_base;
pub mod location;
pub mod microservice;
pub mod tax;
pub mod taxonomy;
pub mod template;
pub mod tenant;
pub mod venue_catalog;

use sqlx::FromRow;
use tixello_core::types::DbId;

/// Result of one upsert.
///
/// `inserted` is computed from `xmax = 0`, which only holds for rows created
/// by the statement itself. `changed` is false when the existing row already
/// held every incoming value and was left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct UpsertOutcome {
    pub id: DbId,
    pub inserted: bool,
    pub changed: bool,
}

impl UpsertOutcome {
    pub fn inserted(id: DbId) -> Self {
        Self { id, inserted: true, changed: true }
    }

    pub fn unchanged(id: DbId) -> Self {
        Self { id, inserted: false, changed: false }
    }

    /// An existing row whose values were overwritten.
    pub fn is_update(&self) -> bool {
        self.changed && !self.inserted
    }
}
