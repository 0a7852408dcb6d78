//! Typed fixture documents embedded in the binary.
//!
//! Every fixture has a `load()` that parses the embedded JSON and a
//! `validate()` that rejects documents which would upsert the same natural
//! key twice or write blank localized text. Seeders always validate before
//! the first write.

pub mod catalog;
pub mod demo;
pub mod gamification;
pub mod knowledge_base;
pub mod location;
pub mod tax;
pub mod taxonomy;
pub mod venue;

use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::SeedError;

pub(crate) fn parse<T: DeserializeOwned>(fixture: &'static str, raw: &str) -> Result<T, SeedError> {
    serde_json::from_str(raw).map_err(|source| SeedError::Fixture { fixture, source })
}

/// Run the derived field validators over every item of a list.
pub(crate) fn validate_all<'a, T, I>(items: I) -> Result<(), tixello_core::error::CoreError>
where
    T: Validate + 'a,
    I: IntoIterator<Item = &'a T>,
{
    for item in items {
        item.validate()?;
    }
    Ok(())
}

fn default_true() -> bool {
    true
}
