//! Unknown references are skipped and counted, never fatal.

use serde_json::json;
use sqlx::PgPool;
use tixello_db::models::taxonomy::TaxonomyTables;
use tixello_db::repositories::{count_rows, TaxonomyRepo};
use tixello_seeder::fixtures::demo::DemoFixture;
use tixello_seeder::fixtures::tax::GeneralTaxes;
use tixello_seeder::fixtures::taxonomy::TaxonomyFixture;
use tixello_seeder::seeders::taxonomy::{self, Taxonomy};
use tixello_seeder::seeders::{demo, general_taxes, locations};

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_taxonomy_references_are_skipped(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let fixture: TaxonomyFixture = serde_json::from_value(json!({
        "types": [
            {"slug": "concert", "name": {"en": "Concert", "ro": "Concert"}},
            {"slug": "dj-set", "parent": "club-culture", "name": {"en": "DJ set", "ro": "DJ set"}}
        ],
        "groups": [
            {"group": "music", "members": [
                {"slug": "rock", "name": {"en": "Rock", "ro": "Rock"}},
                {"slug": "jazz", "name": {"en": "Jazz", "ro": "Jazz"}}
            ]}
        ],
        "allowed": {
            "concert": ["group:music", "group:film", "polka", "rock"],
            "ghost-type": ["jazz"]
        }
    }))
    .unwrap();

    let report = taxonomy::seed_fixture(&mut conn, Taxonomy::Event, &fixture)
        .await
        .unwrap();

    // Orphan parent, unknown group, unknown genre, unknown type.
    assert_eq!(report.skipped, 4);
    assert_eq!(count_rows(&mut conn, "event_type_event_genre").await.unwrap(), 2);

    let nodes = TaxonomyRepo::list_types(&mut conn, TaxonomyTables::EVENT).await.unwrap();
    let dj = nodes.iter().find(|n| n.slug == "dj-set").unwrap();
    assert_eq!(dj.parent_id, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_parent_already_in_database_is_used(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let first: TaxonomyFixture = serde_json::from_value(json!({
        "types": [{"slug": "music", "name": {"en": "Music", "ro": "Muzică"}}],
        "groups": [],
        "allowed": {}
    }))
    .unwrap();
    let second: TaxonomyFixture = serde_json::from_value(json!({
        "types": [{"slug": "concert", "parent": "music", "name": {"en": "Concert", "ro": "Concert"}}],
        "groups": [],
        "allowed": {}
    }))
    .unwrap();

    taxonomy::seed_fixture(&mut conn, Taxonomy::Artist, &first).await.unwrap();
    let report = taxonomy::seed_fixture(&mut conn, Taxonomy::Artist, &second)
        .await
        .unwrap();
    assert_eq!(report.skipped, 0);

    let ids = TaxonomyRepo::type_ids(&mut conn, TaxonomyTables::ARTIST).await.unwrap();
    let nodes = TaxonomyRepo::list_types(&mut conn, TaxonomyTables::ARTIST).await.unwrap();
    let concert = nodes.iter().find(|n| n.slug == "concert").unwrap();
    assert_eq!(concert.parent_id, ids.get("music").copied());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tax_with_unknown_event_type_applies_to_all(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let fixture: GeneralTaxes = serde_json::from_value(json!({
        "event_types": [],
        "taxes": [{
            "name": "Timbru Muzical 5%", "value": 5, "value_type": "percent",
            "event_type_slug": "not-a-type", "is_added_to_price": true
        }]
    }))
    .unwrap();

    let report = general_taxes::seed_fixture(&mut conn, &fixture).await.unwrap();
    assert_eq!(report.skipped, 1);
    assert_eq!(report.inserted, 1);

    let (event_type_id, priority): (Option<i64>, i32) =
        sqlx::query_as("SELECT event_type_id, priority FROM general_taxes")
            .fetch_one(&mut *conn)
            .await
            .unwrap();
    assert_eq!(event_type_id, None);
    assert_eq!(priority, 50);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tax_event_types_never_overwrite_existing(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let taxonomy: TaxonomyFixture = serde_json::from_value(json!({
        "types": [{"slug": "opera", "name": {"en": "Opera", "ro": "Operă"}}],
        "groups": [],
        "allowed": {}
    }))
    .unwrap();
    taxonomy::seed_fixture(&mut conn, Taxonomy::Event, &taxonomy).await.unwrap();

    let taxes: GeneralTaxes = serde_json::from_value(json!({
        "event_types": [
            {"slug": "opera", "name": {"en": "Renamed", "ro": "Redenumit"}},
            {"slug": "balet", "name": {"en": "Ballet", "ro": "Balet"}}
        ],
        "taxes": [{
            "name": "TVA 11% - Operă", "value": 11, "value_type": "percent",
            "event_type_slug": "opera", "is_added_to_price": false
        }]
    }))
    .unwrap();
    let report = general_taxes::seed_fixture(&mut conn, &taxes).await.unwrap();
    // balet and the tax
    assert_eq!(report.inserted, 2);

    let (name,): (serde_json::Value,) =
        sqlx::query_as("SELECT name FROM event_types WHERE slug = 'opera'")
            .fetch_one(&mut *conn)
            .await
            .unwrap();
    assert_eq!(name["en"], "Opera");

    let (linked,): (bool,) = sqlx::query_as(
        "SELECT event_type_id = (SELECT id FROM event_types WHERE slug = 'opera') FROM general_taxes",
    )
    .fetch_one(&mut *conn)
    .await
    .unwrap();
    assert!(linked);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_demo_with_empty_catalogs_writes_null_references(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let fixture = DemoFixture::load().unwrap();

    let report = demo::seed_fixture(&mut conn, &fixture).await.unwrap();
    // Every venue type, event type and microservice is unknown.
    let expected_skips = fixture.venues.len() + fixture.events.len() + fixture.microservices.len();
    assert_eq!(report.skipped, expected_skips as u64);

    let (with_type,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM venues WHERE venue_type_id IS NOT NULL")
            .fetch_one(&mut *conn)
            .await
            .unwrap();
    assert_eq!(with_type, 0);
    assert_eq!(count_rows(&mut conn, "tenant_microservices").await.unwrap(), 0);

    // Venue links inside the fixture still resolve.
    let (with_venue,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM events WHERE venue_id IS NOT NULL")
            .fetch_one(&mut *conn)
            .await
            .unwrap();
    assert_eq!(with_venue, fixture.events.len() as i64);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_locations_without_tenant_are_skipped(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let report = locations::seed(&mut conn, "missing-tenant").await.unwrap();
    assert_eq!(report.skipped, 1);
    assert!(report.is_noop());
    assert_eq!(count_rows(&mut conn, "regions").await.unwrap(), 0);
}
