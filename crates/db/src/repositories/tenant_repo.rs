//! Repositories for tenants and the venues and events they own.

use sqlx::PgConnection;
use tixello_core::types::DbId;

use super::upsert_sql;
use crate::models::tenant::{NewEvent, NewTenant, NewVenue, Tenant};
use crate::models::UpsertOutcome;

/// Column list for the `tenants` table.
const TENANT_COLUMNS: &str = "id, slug, name, domain, locale, currency";

pub struct TenantRepo;

impl TenantRepo {
    pub async fn upsert(
        conn: &mut PgConnection,
        input: &NewTenant<'_>,
    ) -> Result<UpsertOutcome, sqlx::Error> {
        let query = upsert_sql(
            "tenants",
            "(slug, name, domain, locale, currency, settings) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (slug)",
            &["name", "domain", "locale", "currency", "settings"],
            "slug = $1",
        );
        sqlx::query_as::<_, UpsertOutcome>(&query)
            .bind(input.slug)
            .bind(input.name)
            .bind(input.domain)
            .bind(input.locale)
            .bind(input.currency)
            .bind(input.settings)
            .fetch_one(&mut *conn)
            .await
    }

    pub async fn find_by_slug(
        conn: &mut PgConnection,
        slug: &str,
    ) -> Result<Option<Tenant>, sqlx::Error> {
        let query = format!("SELECT {TENANT_COLUMNS} FROM tenants WHERE slug = $1");
        sqlx::query_as::<_, Tenant>(&query)
            .bind(slug)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Activate a microservice for a tenant. Returns `false` if it already was.
    pub async fn enable_microservice(
        conn: &mut PgConnection,
        tenant_id: DbId,
        microservice_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO tenant_microservices (tenant_id, microservice_id) \
             VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(tenant_id)
        .bind(microservice_id)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}

pub struct VenueRepo;

impl VenueRepo {
    /// Upsert a venue keyed by `(tenant_id, slug)`.
    pub async fn upsert(
        conn: &mut PgConnection,
        input: &NewVenue<'_>,
    ) -> Result<UpsertOutcome, sqlx::Error> {
        let query = upsert_sql(
            "venues",
            "(tenant_id, slug, venue_type_id, name, city, address, capacity) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (tenant_id, slug)",
            &["venue_type_id", "name", "city", "address", "capacity"],
            "tenant_id = $1 AND slug = $2",
        );
        sqlx::query_as::<_, UpsertOutcome>(&query)
            .bind(input.tenant_id)
            .bind(input.slug)
            .bind(input.venue_type_id)
            .bind(input.name)
            .bind(input.city)
            .bind(input.address)
            .bind(input.capacity)
            .fetch_one(&mut *conn)
            .await
    }
}

pub struct EventRepo;

impl EventRepo {
    /// Upsert an event keyed by `(tenant_id, slug)`.
    pub async fn upsert(
        conn: &mut PgConnection,
        input: &NewEvent<'_>,
    ) -> Result<UpsertOutcome, sqlx::Error> {
        let query = upsert_sql(
            "events",
            "(tenant_id, venue_id, event_type_id, slug, title, description, starts_at, \
              ends_at, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             ON CONFLICT (tenant_id, slug)",
            &[
                "venue_id",
                "event_type_id",
                "title",
                "description",
                "starts_at",
                "ends_at",
                "status",
            ],
            "tenant_id = $1 AND slug = $4",
        );
        sqlx::query_as::<_, UpsertOutcome>(&query)
            .bind(input.tenant_id)
            .bind(input.venue_id)
            .bind(input.event_type_id)
            .bind(input.slug)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.starts_at)
            .bind(input.ends_at)
            .bind(input.status)
            .fetch_one(&mut *conn)
            .await
    }
}
