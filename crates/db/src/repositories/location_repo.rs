//! Repository for the tenant-scoped `regions`, `counties` and `cities` tables.

use sqlx::PgConnection;

use super::upsert_sql;
use crate::models::location::{NewCity, NewCounty, NewRegion};
use crate::models::UpsertOutcome;

pub struct LocationRepo;

impl LocationRepo {
    /// Upsert a region keyed by `(tenant_id, slug)`.
    pub async fn upsert_region(
        conn: &mut PgConnection,
        input: &NewRegion<'_>,
    ) -> Result<UpsertOutcome, sqlx::Error> {
        let query = upsert_sql(
            "regions",
            "(tenant_id, slug, name, code, country, sort_order, is_visible, is_featured, city_count) \
             VALUES ($1, $2, $3, $4, $5, $6, true, $7, $8) \
             ON CONFLICT (tenant_id, slug)",
            &[
                "name",
                "code",
                "country",
                "sort_order",
                "is_visible",
                "is_featured",
                "city_count",
            ],
            "tenant_id = $1 AND slug = $2",
        );
        sqlx::query_as::<_, UpsertOutcome>(&query)
            .bind(input.tenant_id)
            .bind(input.slug)
            .bind(&input.name)
            .bind(input.code)
            .bind(input.country)
            .bind(input.sort_order)
            .bind(input.is_featured)
            .bind(input.city_count)
            .fetch_one(&mut *conn)
            .await
    }

    /// Upsert a county keyed by `(tenant_id, code)`. A county whose code
    /// already exists is moved under `region_id`.
    pub async fn upsert_county(
        conn: &mut PgConnection,
        input: &NewCounty<'_>,
    ) -> Result<UpsertOutcome, sqlx::Error> {
        let query = upsert_sql(
            "counties",
            "(tenant_id, code, region_id, slug, name, country, sort_order, is_visible, \
              is_featured, city_count) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, true, $8, $9) \
             ON CONFLICT (tenant_id, code)",
            &[
                "region_id",
                "slug",
                "name",
                "country",
                "sort_order",
                "is_visible",
                "is_featured",
                "city_count",
            ],
            "tenant_id = $1 AND code = $2",
        );
        sqlx::query_as::<_, UpsertOutcome>(&query)
            .bind(input.tenant_id)
            .bind(input.code)
            .bind(input.region_id)
            .bind(input.slug)
            .bind(&input.name)
            .bind(input.country)
            .bind(input.sort_order)
            .bind(input.is_featured)
            .bind(input.city_count)
            .fetch_one(&mut *conn)
            .await
    }

    /// Upsert a city keyed by `(tenant_id, county_id, slug)`.
    pub async fn upsert_city(
        conn: &mut PgConnection,
        input: &NewCity<'_>,
    ) -> Result<UpsertOutcome, sqlx::Error> {
        let query = upsert_sql(
            "cities",
            "(tenant_id, county_id, slug, region_id, name, country, timezone, latitude, \
              longitude, population, sort_order, is_visible, is_featured, is_capital) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, true, $12, $13) \
             ON CONFLICT (tenant_id, county_id, slug)",
            &[
                "region_id",
                "name",
                "country",
                "timezone",
                "latitude",
                "longitude",
                "population",
                "sort_order",
                "is_visible",
                "is_featured",
                "is_capital",
            ],
            "tenant_id = $1 AND county_id = $2 AND slug = $3",
        );
        sqlx::query_as::<_, UpsertOutcome>(&query)
            .bind(input.tenant_id)
            .bind(input.county_id)
            .bind(input.slug)
            .bind(input.region_id)
            .bind(&input.name)
            .bind(input.country)
            .bind(input.timezone)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(input.population)
            .bind(input.sort_order)
            .bind(input.is_featured)
            .bind(input.is_capital)
            .fetch_one(&mut *conn)
            .await
    }
}
