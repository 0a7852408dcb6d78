//! Per-seeder outcome counts.

use std::fmt;

use tixello_db::models::UpsertOutcome;

/// What one seeder did to the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub seeder: &'static str,
    pub inserted: u64,
    pub updated: u64,
    /// Rows that already held the fixture's values and were not written.
    pub unchanged: u64,
    /// References that could not be resolved and were left out.
    pub skipped: u64,
}

impl SeedReport {
    pub fn new(seeder: &'static str) -> Self {
        Self {
            seeder,
            inserted: 0,
            updated: 0,
            unchanged: 0,
            skipped: 0,
        }
    }

    pub fn record(&mut self, outcome: UpsertOutcome) {
        if outcome.inserted {
            self.inserted += 1;
        } else if outcome.changed {
            self.updated += 1;
        } else {
            self.unchanged += 1;
        }
    }

    /// Count a pivot or link row. Links have no columns to update, so an
    /// existing one is unchanged.
    pub fn record_link(&mut self, created: bool) {
        if created {
            self.inserted += 1;
        } else {
            self.unchanged += 1;
        }
    }

    pub fn skip(&mut self) {
        self.skipped += 1;
    }

    /// A report for a seeder that had nothing to do.
    pub fn is_noop(&self) -> bool {
        self.inserted == 0 && self.updated == 0
    }
}

impl fmt::Display for SeedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<20} inserted={:<5} updated={:<5} unchanged={:<5} skipped={}",
            self.seeder, self.inserted, self.updated, self.unchanged, self.skipped
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_splits_inserts_and_updates() {
        let mut report = SeedReport::new("feature-flags");
        report.record(UpsertOutcome::inserted(1));
        report.record(UpsertOutcome { id: 2, inserted: false, changed: true });
        report.record_link(true);
        report.record_link(false);
        report.skip();
        assert_eq!(report.inserted, 2);
        assert_eq!(report.updated, 1);
        assert_eq!(report.unchanged, 1);
        assert_eq!(report.skipped, 1);
        assert!(!report.is_noop());
    }

    #[test]
    fn identical_rows_are_not_counted_as_updates() {
        let mut report = SeedReport::new("feature-flags");
        report.record(UpsertOutcome::unchanged(1));
        report.record(UpsertOutcome::unchanged(2));
        report.record_link(false);
        assert_eq!(report.updated, 0);
        assert_eq!(report.unchanged, 3);
        assert!(report.is_noop());
        assert!(report.to_string().contains("unchanged=3"));
    }

    #[test]
    fn display_names_the_seeder() {
        let report = SeedReport::new("locations");
        assert!(report.to_string().starts_with("locations"));
        assert!(report.is_noop());
    }
}
