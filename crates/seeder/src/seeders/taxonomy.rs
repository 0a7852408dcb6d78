//! Shared seeder for the event and artist taxonomies.
//!
//! Order of writes:
//! 1. Types, parents first, so every `parent_id` resolves.
//! 2. Genres, once each even when listed in several groups.
//! 3. Pivot rows from the allowed map after group expansion.
//!
//! Lookups also see rows already in the database, so a type created by
//! another seeder can be a parent or carry allowed genres. Anything still
//! unresolved is logged, counted as skipped, and left out.

use sqlx::PgConnection;
use tixello_core::hierarchy::parents_first;
use tixello_core::i18n::Localized;
use tixello_core::taxonomy::{plan_pivot, SkippedRef};
use tixello_db::models::taxonomy::{NewTaxonomyGenre, NewTaxonomyType, TaxonomyTables};
use tixello_db::repositories::TaxonomyRepo;

use crate::error::SeedError;
use crate::fixtures::taxonomy::TaxonomyFixture;
use crate::report::SeedReport;

/// Which of the two taxonomies to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Taxonomy {
    Event,
    Artist,
}

impl Taxonomy {
    pub fn seeder_name(self) -> &'static str {
        match self {
            Taxonomy::Event => "event-taxonomy",
            Taxonomy::Artist => "artist-taxonomy",
        }
    }

    pub fn tables(self) -> TaxonomyTables {
        match self {
            Taxonomy::Event => TaxonomyTables::EVENT,
            Taxonomy::Artist => TaxonomyTables::ARTIST,
        }
    }

    pub fn type_entity(self) -> &'static str {
        match self {
            Taxonomy::Event => "event type",
            Taxonomy::Artist => "artist type",
        }
    }

    pub fn fixture_name(self) -> &'static str {
        match self {
            Taxonomy::Event => TaxonomyFixture::EVENT,
            Taxonomy::Artist => TaxonomyFixture::ARTIST,
        }
    }

    pub fn load(self) -> Result<TaxonomyFixture, SeedError> {
        match self {
            Taxonomy::Event => TaxonomyFixture::load_event(),
            Taxonomy::Artist => TaxonomyFixture::load_artist(),
        }
    }
}

pub async fn seed(conn: &mut PgConnection, taxonomy: Taxonomy) -> Result<SeedReport, SeedError> {
    seed_fixture(conn, taxonomy, &taxonomy.load()?).await
}

pub async fn seed_fixture(
    conn: &mut PgConnection,
    taxonomy: Taxonomy,
    fixture: &TaxonomyFixture,
) -> Result<SeedReport, SeedError> {
    let seeder = taxonomy.seeder_name();
    let tables = taxonomy.tables();
    fixture
        .validate(taxonomy.type_entity())
        .map_err(SeedError::invalid(taxonomy.fixture_name()))?;

    let mut report = SeedReport::new(seeder);
    let description = Localized::<String>::blank().to_json();

    // Types
    let ordered = parents_first(taxonomy.type_entity(), &fixture.types)?;
    let mut type_ids = TaxonomyRepo::type_ids(conn, tables).await?;
    for node in ordered.nodes {
        let parent_id = match node.parent.as_deref() {
            None => None,
            Some(parent) => match type_ids.get(parent) {
                Some(&id) => Some(id),
                None => {
                    tracing::warn!(seeder, slug = %node.slug, parent, "Parent type not found, writing as root");
                    report.skip();
                    None
                }
            },
        };
        let outcome = TaxonomyRepo::upsert_type(
            conn,
            tables,
            &NewTaxonomyType {
                slug: &node.slug,
                parent_id,
                name: node.name.to_json(),
                description: description.clone(),
            },
        )
        .await?;
        report.record(outcome);
        type_ids.insert(node.slug.clone(), outcome.id);
    }

    // Genres
    let mut genre_ids = TaxonomyRepo::genre_ids(conn, tables).await?;
    for genre in fixture.genres() {
        let outcome = TaxonomyRepo::upsert_genre(
            conn,
            tables,
            &NewTaxonomyGenre {
                slug: &genre.slug,
                name: genre.name.to_json(),
                description: description.clone(),
            },
        )
        .await?;
        report.record(outcome);
        genre_ids.insert(genre.slug.clone(), outcome.id);
    }

    // Pivot
    let plan = plan_pivot(&fixture.allowed, &fixture.group_index(), &type_ids, &genre_ids);
    for skipped in &plan.skipped {
        match skipped {
            SkippedRef::UnknownParent(parent) => {
                tracing::warn!(seeder, parent = %parent, "Allowed map names an unknown type, skipping");
            }
            SkippedRef::UnknownGroup { parent, group } => {
                tracing::warn!(seeder, parent = %parent, group = %group, "Unknown genre group, skipping");
            }
            SkippedRef::UnknownItem { parent, item } => {
                tracing::warn!(seeder, parent = %parent, genre = %item, "Unknown genre, skipping");
            }
        }
        report.skip();
    }

    let pairs = plan.pairs.len();
    for (type_id, genre_id) in plan.pairs {
        let created = TaxonomyRepo::link(conn, tables, type_id, genre_id).await?;
        report.record_link(created);
    }
    tracing::debug!(seeder, pairs, "Allowed genres linked");

    Ok(report)
}
