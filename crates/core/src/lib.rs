//! Pure domain logic for the catalog seeder.
//!
//! Nothing in this crate touches the database; everything here can be
//! exercised with plain unit tests.

pub mod error;
pub mod hierarchy;
pub mod i18n;
pub mod natural_key;
pub mod slug;
pub mod tax;
pub mod taxonomy;
pub mod types;
