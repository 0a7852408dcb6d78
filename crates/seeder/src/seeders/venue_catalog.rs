use sqlx::PgConnection;
use tixello_db::models::venue_catalog::{NewVenueCategory, NewVenueType};
use tixello_db::repositories::VenueCatalogRepo;

use crate::error::SeedError;
use crate::fixtures::venue::VenueCatalog;
use crate::report::SeedReport;

pub const NAME: &str = "venue-catalog";

/// Categories and types both get `sort_order` from their 1-based position
/// (types count within their category).
pub async fn seed(conn: &mut PgConnection) -> Result<SeedReport, SeedError> {
    let fixture = VenueCatalog::load()?;
    fixture.validate().map_err(SeedError::invalid(VenueCatalog::NAME))?;

    let mut report = SeedReport::new(NAME);
    for (category_pos, category) in fixture.categories.iter().enumerate() {
        let parent = VenueCatalogRepo::upsert_category(
            conn,
            &NewVenueCategory {
                slug: &category.slug,
                name: category.name.to_json(),
                icon: &category.icon,
                sort_order: category_pos as i32 + 1,
            },
        )
        .await?;
        report.record(parent);

        for (type_pos, venue_type) in category.types.iter().enumerate() {
            let outcome = VenueCatalogRepo::upsert_type(
                conn,
                &NewVenueType {
                    slug: &venue_type.slug,
                    venue_category_id: parent.id,
                    name: venue_type.name.to_json(),
                    icon: &venue_type.icon,
                    sort_order: type_pos as i32 + 1,
                },
            )
            .await?;
            report.record(outcome);
        }
    }
    Ok(report)
}
