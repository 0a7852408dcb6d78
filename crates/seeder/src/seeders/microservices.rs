//! Marketplace microservices and the hub connectors offered by the
//! integration hub.

use sqlx::PgConnection;
use tixello_db::models::microservice::{NewHubConnector, NewMicroservice};
use tixello_db::repositories::MicroserviceRepo;

use crate::error::SeedError;
use crate::fixtures::catalog::Microservices;
use crate::report::SeedReport;

pub const NAME: &str = "microservices";

pub async fn seed(conn: &mut PgConnection) -> Result<SeedReport, SeedError> {
    seed_fixture(conn, &Microservices::load()?).await
}

/// Listings get `sort_order` from their position in the fixture; connectors
/// carry their own.
pub async fn seed_fixture(
    conn: &mut PgConnection,
    fixture: &Microservices,
) -> Result<SeedReport, SeedError> {
    fixture.validate().map_err(SeedError::invalid(Microservices::NAME))?;

    let mut report = SeedReport::new(NAME);
    for (position, ms) in fixture.microservices.iter().enumerate() {
        let outcome = MicroserviceRepo::upsert(
            conn,
            &NewMicroservice {
                slug: &ms.slug,
                name: ms.name.to_json(),
                description: ms.description.to_json(),
                short_description: ms.short_description.to_json(),
                price: ms.price,
                currency: &ms.currency,
                billing_cycle: &ms.billing_cycle,
                pricing_model: &ms.pricing_model,
                features: ms.features.to_json(),
                category: &ms.category,
                status: &ms.status,
                config_schema: ms.config_schema.as_ref(),
                metadata: ms.metadata.as_ref(),
                sort_order: position as i32 + 1,
            },
        )
        .await?;
        tracing::debug!(slug = %ms.slug, inserted = outcome.inserted, "Microservice upserted");
        report.record(outcome);
    }

    for connector in &fixture.connectors {
        let outcome = MicroserviceRepo::upsert_connector(
            conn,
            &NewHubConnector {
                slug: &connector.slug,
                name: connector.name.to_json(),
                description: connector.description.to_json(),
                icon: &connector.icon,
                auth_type: &connector.auth_type,
                auth_config: &connector.auth_config,
                supported_actions: &connector.supported_actions,
                supported_events: &connector.supported_events,
                is_active: connector.is_active,
                sort_order: connector.sort_order,
            },
        )
        .await?;
        report.record(outcome);
    }
    Ok(report)
}
