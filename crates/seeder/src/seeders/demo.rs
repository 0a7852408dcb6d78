//! Demo tenant, its venues and events, and the microservices it has
//! activated.
//!
//! Catalog references (venue type, event type, microservice) are looked up
//! by slug; unknown ones are written as NULL or left out.

use std::collections::HashMap;

use serde_json::json;
use sqlx::PgConnection;
use tixello_core::types::DbId;
use tixello_db::models::taxonomy::TaxonomyTables;
use tixello_db::models::tenant::{NewEvent, NewTenant, NewVenue};
use tixello_db::repositories::{
    EventRepo, MicroserviceRepo, TaxonomyRepo, TenantRepo, VenueCatalogRepo, VenueRepo,
};

use crate::error::SeedError;
use crate::fixtures::demo::DemoFixture;
use crate::report::SeedReport;

pub const NAME: &str = "demo";

pub async fn seed(conn: &mut PgConnection) -> Result<SeedReport, SeedError> {
    seed_fixture(conn, &DemoFixture::load()?).await
}

pub async fn seed_fixture(
    conn: &mut PgConnection,
    fixture: &DemoFixture,
) -> Result<SeedReport, SeedError> {
    fixture.validate().map_err(SeedError::invalid(DemoFixture::NAME))?;

    let mut report = SeedReport::new(NAME);
    let tenant = &fixture.tenant;
    let empty_settings = json!({});
    let settings = if tenant.settings.is_null() {
        &empty_settings
    } else {
        &tenant.settings
    };

    let tenant_row = TenantRepo::upsert(
        conn,
        &NewTenant {
            slug: &tenant.slug,
            name: &tenant.name,
            domain: &tenant.domain,
            locale: &tenant.locale,
            currency: &tenant.currency,
            settings,
        },
    )
    .await?;
    report.record(tenant_row);
    let tenant_id = tenant_row.id;

    // Venues
    let venue_types = VenueCatalogRepo::type_ids(conn).await?;
    let mut venue_ids: HashMap<&str, DbId> = HashMap::new();
    for venue in &fixture.venues {
        let venue_type_id = resolve(&venue_types, venue.venue_type.as_deref(), &mut report, |slug| {
            tracing::warn!(venue = %venue.slug, venue_type = slug, "Unknown venue type, leaving it unset");
        });
        let outcome = VenueRepo::upsert(
            conn,
            &NewVenue {
                tenant_id,
                slug: &venue.slug,
                venue_type_id,
                name: &venue.name,
                city: &venue.city,
                address: &venue.address,
                capacity: venue.capacity,
            },
        )
        .await?;
        report.record(outcome);
        venue_ids.insert(&venue.slug, outcome.id);
    }

    // Events
    let event_types = TaxonomyRepo::type_ids(conn, TaxonomyTables::EVENT).await?;
    for event in &fixture.events {
        let event_type_id = resolve(&event_types, event.event_type.as_deref(), &mut report, |slug| {
            tracing::warn!(event = %event.slug, event_type = slug, "Unknown event type, leaving it unset");
        });
        let venue_id = event.venue.as_deref().and_then(|slug| venue_ids.get(slug).copied());
        let outcome = EventRepo::upsert(
            conn,
            &NewEvent {
                tenant_id,
                venue_id,
                event_type_id,
                slug: &event.slug,
                title: event.title.to_json(),
                description: event.description.to_json(),
                starts_at: event.starts_at,
                ends_at: event.ends_at,
                status: &event.status,
            },
        )
        .await?;
        report.record(outcome);
    }

    // Activated microservices
    let microservices = MicroserviceRepo::ids_by_slug(conn).await?;
    for slug in &fixture.microservices {
        match microservices.get(slug) {
            Some(&microservice_id) => {
                let created = TenantRepo::enable_microservice(conn, tenant_id, microservice_id).await?;
                report.record_link(created);
            }
            None => {
                tracing::warn!(microservice = %slug, "Unknown microservice, not activating");
                report.skip();
            }
        }
    }

    Ok(report)
}

/// Look up an optional slug reference. A slug that is given but unknown is
/// reported through `on_unknown` and counted as skipped.
fn resolve<F>(
    ids: &HashMap<String, DbId>,
    slug: Option<&str>,
    report: &mut SeedReport,
    on_unknown: F,
) -> Option<DbId>
where
    F: FnOnce(&str),
{
    let slug = slug?;
    let id = ids.get(slug).copied();
    if id.is_none() {
        on_unknown(slug);
        report.skip();
    }
    id
}
