use tixello_core::error::CoreError;

/// Everything that can abort a seed run.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown seeder '{0}'")]
    UnknownSeeder(String),

    #[error("Fixture {fixture} could not be parsed: {source}")]
    Fixture {
        fixture: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Fixture {fixture} is invalid: {source}")]
    InvalidFixture {
        fixture: &'static str,
        #[source]
        source: CoreError,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl SeedError {
    /// Wrap a validation failure with the name of the fixture it came from.
    pub fn invalid(fixture: &'static str) -> impl FnOnce(CoreError) -> SeedError {
        move |source| SeedError::InvalidFixture { fixture, source }
    }
}
