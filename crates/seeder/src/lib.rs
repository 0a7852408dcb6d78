//! Idempotent catalog seeding for the ticketing platform.
//!
//! Fixtures are JSON documents compiled into the binary. Each seeder
//! validates its fixture, then upserts it by natural key inside its own
//! transaction, so a run can be repeated any number of times.

pub mod config;
pub mod error;
pub mod fixtures;
pub mod report;
pub mod runner;
pub mod seeders;
