//! Seeder selection and execution.

use std::time::Instant;

use tixello_db::DbPool;

use crate::error::SeedError;
use crate::report::SeedReport;
use crate::seeders::{SeedContext, Seeder};

/// Which seeders a run includes.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    only: Option<Vec<Seeder>>,
    include_opt_in: bool,
}

impl Selection {
    /// Every default seeder, plus the opt-in ones when `include_opt_in`.
    pub fn defaults(include_opt_in: bool) -> Self {
        Self {
            only: None,
            include_opt_in,
        }
    }

    /// Exactly the named seeders. Opt-in seeders named here are included
    /// regardless of `--demo`.
    pub fn only<S: AsRef<str>>(names: &[S]) -> Result<Self, SeedError> {
        let seeders = names
            .iter()
            .map(|name| {
                let name = name.as_ref().trim();
                Seeder::from_name(name).ok_or_else(|| SeedError::UnknownSeeder(name.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            only: Some(seeders),
            include_opt_in: true,
        })
    }

    /// Selected seeders in dependency order, whatever order they were named in.
    pub fn seeders(&self) -> Vec<Seeder> {
        Seeder::ALL
            .into_iter()
            .filter(|seeder| match &self.only {
                Some(only) => only.contains(seeder),
                None => self.include_opt_in || !seeder.is_opt_in(),
            })
            .collect()
    }
}

/// Run `seeders` in order, each inside its own transaction.
///
/// The first failure rolls back that seeder's transaction and aborts the
/// run; seeders that already committed stay committed.
pub async fn run(
    pool: &DbPool,
    seeders: &[Seeder],
    ctx: &SeedContext,
) -> Result<Vec<SeedReport>, SeedError> {
    let mut reports = Vec::with_capacity(seeders.len());

    for &seeder in seeders {
        let started = Instant::now();
        let mut tx = pool.begin().await?;

        let report = match seeder.run(&mut tx, ctx).await {
            Ok(report) => report,
            Err(e) => {
                tracing::error!(seeder = seeder.name(), error = %e, "Seeder failed, rolling back");
                return Err(e);
            }
        };
        tx.commit().await?;

        tracing::info!(
            seeder = report.seeder,
            inserted = report.inserted,
            updated = report.updated,
            unchanged = report.unchanged,
            skipped = report.skipped,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Seeder finished",
        );
        reports.push(report);
    }

    Ok(reports)
}

/// Validate the fixtures of `seeders` without touching a database.
///
/// Every seeder is checked; the first error is returned after all have run
/// so one invocation reports every broken fixture in the log.
pub fn check(seeders: &[Seeder]) -> Result<(), SeedError> {
    let mut first_error = None;
    for &seeder in seeders {
        match seeder.check() {
            Ok(()) => tracing::info!(seeder = seeder.name(), "Fixture valid"),
            Err(e) => {
                tracing::error!(seeder = seeder.name(), error = %e, "Fixture invalid");
                first_error.get_or_insert(e);
            }
        }
    }
    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
