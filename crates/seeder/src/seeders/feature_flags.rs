use sqlx::PgConnection;
use tixello_db::models::feature_flag::NewFeatureFlag;
use tixello_db::repositories::FeatureFlagRepo;

use crate::error::SeedError;
use crate::fixtures::catalog::FeatureFlags;
use crate::report::SeedReport;

pub const NAME: &str = "feature-flags";

pub async fn seed(conn: &mut PgConnection) -> Result<SeedReport, SeedError> {
    seed_fixture(conn, &FeatureFlags::load()?).await
}

pub async fn seed_fixture(
    conn: &mut PgConnection,
    fixture: &FeatureFlags,
) -> Result<SeedReport, SeedError> {
    fixture.validate().map_err(SeedError::invalid(FeatureFlags::NAME))?;

    let mut report = SeedReport::new(NAME);
    for flag in &fixture.flags {
        let outcome = FeatureFlagRepo::upsert(
            conn,
            &NewFeatureFlag {
                key: &flag.key,
                description: &flag.description,
                is_enabled: flag.is_enabled,
                rollout_percentage: flag.rollout_percentage,
            },
        )
        .await?;
        report.record(outcome);
    }
    Ok(report)
}
