//! Regions, counties and cities for one tenant's marketplace.

use std::collections::HashMap;

use sqlx::PgConnection;
use tixello_db::models::location::{NewCity, NewCounty, NewRegion};
use tixello_db::repositories::{LocationRepo, TenantRepo};

use crate::error::SeedError;
use crate::fixtures::location::Locations;
use crate::report::SeedReport;

pub const NAME: &str = "locations";

/// Write every region, county and city for the tenant with `tenant_slug`.
///
/// City counts are taken from the fixture, so regions and counties are
/// written with their final count in a single pass.
/// The seeder is skipped with a warning if the tenant does not exist.
pub async fn seed(conn: &mut PgConnection, tenant_slug: &str) -> Result<SeedReport, SeedError> {
    let fixture = Locations::load()?;
    fixture.validate().map_err(SeedError::invalid(Locations::NAME))?;

    let mut report = SeedReport::new(NAME);
    let Some(tenant) = TenantRepo::find_by_slug(conn, tenant_slug).await? else {
        tracing::warn!(tenant = tenant_slug, "Tenant not found, skipping locations");
        report.skip();
        return Ok(report);
    };

    let mut region_ids = HashMap::with_capacity(fixture.regions.len());
    for (pos, region) in fixture.regions.iter().enumerate() {
        let slug = region.slug();
        let outcome = LocationRepo::upsert_region(
            conn,
            &NewRegion {
                tenant_id: tenant.id,
                slug: &slug,
                name: region.name.to_json(),
                code: &region.code,
                country: &fixture.country,
                sort_order: pos as i32 + 1,
                is_featured: region.featured,
                city_count: fixture.region_city_count(&region.code) as i32,
            },
        )
        .await?;
        report.record(outcome);
        region_ids.insert(region.code.as_str(), outcome.id);
    }

    for (county_pos, county) in fixture.counties.iter().enumerate() {
        // validate() guarantees every county names a known region
        let Some(&region_id) = region_ids.get(county.region.as_str()) else {
            report.skip();
            continue;
        };
        let county_slug = county.slug();
        let county_row = LocationRepo::upsert_county(
            conn,
            &NewCounty {
                tenant_id: tenant.id,
                region_id,
                code: &county.code,
                slug: &county_slug,
                name: county.name.to_json(),
                country: &fixture.country,
                sort_order: county_pos as i32 + 1,
                is_featured: county.featured,
                city_count: county.cities.len() as i32,
            },
        )
        .await?;
        report.record(county_row);

        for (city_pos, city) in county.cities.iter().enumerate() {
            let city_slug = city.slug();
            let outcome = LocationRepo::upsert_city(
                conn,
                &NewCity {
                    tenant_id: tenant.id,
                    region_id,
                    county_id: county_row.id,
                    slug: &city_slug,
                    name: city.name.to_json(),
                    country: &fixture.country,
                    timezone: &fixture.timezone,
                    latitude: city.lat,
                    longitude: city.lng,
                    population: city.population,
                    sort_order: city_pos as i32 + 1,
                    is_featured: city.featured,
                    is_capital: city.capital,
                },
            )
            .await?;
            report.record(outcome);
        }
    }

    tracing::debug!(
        tenant = %tenant.slug,
        regions = fixture.regions.len(),
        counties = fixture.counties.len(),
        cities = fixture.city_count(),
        "Locations written"
    );
    Ok(report)
}
