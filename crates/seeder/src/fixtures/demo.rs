//! Demo tenant with a handful of venues and events, used for local
//! development and previews.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tixello_core::error::CoreError;
use tixello_core::i18n::Localized;
use tixello_core::natural_key::ensure_unique;
use validator::Validate;

use super::{parse, validate_all};
use crate::error::SeedError;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TenantFixture {
    #[validate(length(min = 1))]
    pub slug: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub domain: String,
    #[validate(length(equal = 2))]
    pub locale: String,
    #[validate(length(equal = 3))]
    pub currency: String,
    #[serde(default)]
    pub settings: Value,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VenueFixture {
    #[validate(length(min = 1))]
    pub slug: String,
    /// Venue type slug from the venue catalog.
    #[serde(default)]
    pub venue_type: Option<String>,
    pub name: String,
    pub city: String,
    pub address: String,
    #[validate(range(min = 0))]
    pub capacity: i32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EventFixture {
    #[validate(length(min = 1))]
    pub slug: String,
    /// Event type slug from the event taxonomy.
    #[serde(default)]
    pub event_type: Option<String>,
    /// Venue slug from this fixture.
    #[serde(default)]
    pub venue: Option<String>,
    pub title: Localized<String>,
    #[serde(default)]
    pub description: Localized<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    #[serde(default = "default_event_status")]
    pub status: String,
}

fn default_event_status() -> String {
    "draft".into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct DemoFixture {
    pub tenant: TenantFixture,
    pub venues: Vec<VenueFixture>,
    pub events: Vec<EventFixture>,
    /// Microservice slugs activated for the demo tenant.
    #[serde(default)]
    pub microservices: Vec<String>,
}

impl DemoFixture {
    pub const NAME: &'static str = "demo.json";

    pub fn load() -> Result<Self, SeedError> {
        parse(Self::NAME, include_str!("../../fixtures/demo.json"))
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        self.tenant.validate()?;
        validate_all(&self.venues)?;
        validate_all(&self.events)?;
        ensure_unique("venue", self.venues.iter().map(|v| v.slug.as_str()))?;
        ensure_unique("event", self.events.iter().map(|e| e.slug.as_str()))?;
        ensure_unique("microservice", self.microservices.iter().map(String::as_str))?;

        let venues: HashSet<&str> = self.venues.iter().map(|v| v.slug.as_str()).collect();
        for event in &self.events {
            event.title.ensure_present("event", &event.slug)?;
            if event.ends_at < event.starts_at {
                return Err(CoreError::Validation(format!(
                    "event '{}' ends before it starts",
                    event.slug
                )));
            }
            if let Some(venue) = event.venue.as_deref() {
                if !venues.contains(venue) {
                    return Err(CoreError::Validation(format!(
                        "event '{}' refers to unknown venue '{venue}'",
                        event.slug
                    )));
                }
            }
        }
        Ok(())
    }
}
