//! Repository for the `microservices` and `hub_connectors` tables.

use std::collections::HashMap;

use sqlx::PgConnection;
use tixello_core::types::DbId;

use super::{slug_ids, upsert_sql};
use crate::models::microservice::{NewHubConnector, NewMicroservice};
use crate::models::UpsertOutcome;

pub struct MicroserviceRepo;

impl MicroserviceRepo {
    /// Insert a marketplace listing or overwrite the one with the same slug.
    pub async fn upsert(
        conn: &mut PgConnection,
        input: &NewMicroservice<'_>,
    ) -> Result<UpsertOutcome, sqlx::Error> {
        let query = upsert_sql(
            "microservices",
            "(slug, name, description, short_description, price, currency, billing_cycle, \
              pricing_model, features, category, status, config_schema, metadata, sort_order) \
             VALUES ($1, $2, $3, $4, $5::numeric, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             ON CONFLICT (slug)",
            &[
                "name",
                "description",
                "short_description",
                "price",
                "currency",
                "billing_cycle",
                "pricing_model",
                "features",
                "category",
                "status",
                "config_schema",
                "metadata",
                "sort_order",
            ],
            "slug = $1",
        );
        sqlx::query_as::<_, UpsertOutcome>(&query)
            .bind(input.slug)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.short_description)
            .bind(input.price)
            .bind(input.currency)
            .bind(input.billing_cycle)
            .bind(input.pricing_model)
            .bind(&input.features)
            .bind(input.category)
            .bind(input.status)
            .bind(input.config_schema)
            .bind(input.metadata)
            .bind(input.sort_order)
            .fetch_one(&mut *conn)
            .await
    }

    /// Insert a hub connector definition or overwrite the one with the same slug.
    pub async fn upsert_connector(
        conn: &mut PgConnection,
        input: &NewHubConnector<'_>,
    ) -> Result<UpsertOutcome, sqlx::Error> {
        let query = upsert_sql(
            "hub_connectors",
            "(slug, name, description, icon, auth_type, auth_config, supported_actions, \
              supported_events, is_active, sort_order) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             ON CONFLICT (slug)",
            &[
                "name",
                "description",
                "icon",
                "auth_type",
                "auth_config",
                "supported_actions",
                "supported_events",
                "is_active",
                "sort_order",
            ],
            "slug = $1",
        );
        sqlx::query_as::<_, UpsertOutcome>(&query)
            .bind(input.slug)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.icon)
            .bind(input.auth_type)
            .bind(input.auth_config)
            .bind(input.supported_actions)
            .bind(input.supported_events)
            .bind(input.is_active)
            .bind(input.sort_order)
            .fetch_one(&mut *conn)
            .await
    }

    /// Slug to id for every listed microservice.
    pub async fn ids_by_slug(conn: &mut PgConnection) -> Result<HashMap<String, DbId>, sqlx::Error> {
        slug_ids(conn, "microservices").await
    }
}
