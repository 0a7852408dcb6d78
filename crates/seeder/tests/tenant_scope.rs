//! Tenant-scoped seeders only touch their own tenant's rows.

use serde_json::json;
use sqlx::PgPool;
use tixello_db::models::tenant::NewTenant;
use tixello_db::repositories::{count_rows, TenantRepo};
use tixello_seeder::fixtures::location::Locations;
use tixello_seeder::runner;
use tixello_seeder::seeders::{gamification, knowledge_base, locations, SeedContext, Seeder};

async fn tenant_counts(pool: &PgPool, slug: &str) -> (i64, i64) {
    sqlx::query_as(
        "SELECT \
            (SELECT COUNT(*) FROM regions r JOIN tenants t ON t.id = r.tenant_id WHERE t.slug = $1), \
            (SELECT COUNT(*) FROM cities c JOIN tenants t ON t.id = c.tenant_id WHERE t.slug = $1)",
    )
    .bind(slug)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_locations_are_written_per_tenant(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let settings = json!({});
    for slug in ["alpha", "beta"] {
        TenantRepo::upsert(
            &mut conn,
            &NewTenant {
                slug,
                name: slug,
                domain: "example.test",
                locale: "ro",
                currency: "RON",
                settings: &settings,
            },
        )
        .await
        .unwrap();
    }

    let fixture = Locations::load().unwrap();
    let expected = (fixture.regions.len() as i64, fixture.city_count() as i64);

    locations::seed(&mut conn, "alpha").await.unwrap();
    assert_eq!(tenant_counts(&pool, "alpha").await, expected);
    assert_eq!(tenant_counts(&pool, "beta").await, (0, 0));

    locations::seed(&mut conn, "beta").await.unwrap();
    assert_eq!(tenant_counts(&pool, "beta").await, expected);
    assert_eq!(tenant_counts(&pool, "alpha").await, expected);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_demo_then_locations_uses_configured_tenant(pool: PgPool) {
    runner::run(&pool, &[Seeder::Demo, Seeder::Locations], &SeedContext::new("demo-events"))
        .await
        .unwrap();

    let (regions, cities) = tenant_counts(&pool, "demo-events").await;
    assert_eq!(regions, 8);
    assert_eq!(cities, 265);
    let (counties,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM counties")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(counties, 42);

    // Every city sits in a county of its own region and tenant.
    let (mismatched,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM cities c \
         JOIN counties k ON k.id = c.county_id \
         JOIN regions r ON r.id = c.region_id \
         WHERE r.tenant_id <> c.tenant_id OR k.tenant_id <> c.tenant_id \
            OR k.region_id <> c.region_id",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(mismatched, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_locations_carry_city_counts_and_timezone(pool: PgPool) {
    runner::run(&pool, &[Seeder::Demo, Seeder::Locations], &SeedContext::new("demo-events"))
        .await
        .unwrap();

    let (transilvania,): (i32,) =
        sqlx::query_as("SELECT city_count FROM regions WHERE slug = 'transilvania'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(transilvania, 68);
    let (cluj,): (i32,) = sqlx::query_as("SELECT city_count FROM counties WHERE code = 'CJ'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(cluj, 8);

    // Stored counts agree with the rows actually written.
    let (stale_regions,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM regions r \
         WHERE r.city_count <> (SELECT COUNT(*) FROM cities c WHERE c.region_id = r.id)",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(stale_regions, 0);
    let (stale_counties,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM counties k \
         WHERE k.city_count <> (SELECT COUNT(*) FROM cities c WHERE c.county_id = k.id)",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(stale_counties, 0);

    let (other_zone,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM cities WHERE timezone <> 'Europe/Bucharest' OR country <> 'RO'",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(other_zone, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_knowledge_base_counts_articles_per_category(pool: PgPool) {
    let ctx = SeedContext::new("demo-events");
    runner::run(&pool, &[Seeder::Demo, Seeder::KnowledgeBase], &ctx)
        .await
        .unwrap();

    let (categories, articles, counted): (i64, i64, i64) = sqlx::query_as(
        "SELECT (SELECT COUNT(*) FROM kb_categories), (SELECT COUNT(*) FROM kb_articles), \
                (SELECT SUM(article_count)::bigint FROM kb_categories)",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!((categories, articles, counted), (6, 27, 27));

    for (slug, expected) in [("pentru-organizatori", 5), ("bilete", 6)] {
        let (count,): (i32,) =
            sqlx::query_as("SELECT article_count FROM kb_categories WHERE slug = $1")
                .bind(slug)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(count, expected, "{slug}");
    }

    let reports = runner::run(&pool, &[Seeder::KnowledgeBase], &ctx).await.unwrap();
    assert_eq!(reports[0].inserted, 0);
    assert_eq!(reports[0].updated, 0);
    assert_eq!(reports[0].unchanged, 33);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_knowledge_base_without_tenant_is_skipped(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let report = knowledge_base::seed(&mut conn, "missing-tenant").await.unwrap();
    assert_eq!(report.skipped, 1);
    assert!(report.is_noop());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_gamification_tenant_rows_are_separate_from_global(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let settings = json!({});
    TenantRepo::upsert(
        &mut conn,
        &NewTenant {
            slug: "alpha",
            name: "Alpha",
            domain: "alpha.test",
            locale: "ro",
            currency: "RON",
            settings: &settings,
        },
    )
    .await
    .unwrap();

    let global = gamification::seed(&mut conn, None).await.unwrap();
    let scoped = gamification::seed(&mut conn, Some("alpha")).await.unwrap();
    // config, 12 actions, 24 badges, 16 rewards
    assert_eq!(global.inserted, 53);
    assert_eq!(scoped.inserted, 53);

    let (global_badges, tenant_badges): (i64, i64) = sqlx::query_as(
        "SELECT COUNT(*) FILTER (WHERE tenant_id IS NULL), \
                COUNT(*) FILTER (WHERE tenant_id IS NOT NULL) FROM badges",
    )
    .fetch_one(&mut *conn)
    .await
    .unwrap();
    assert_eq!((global_badges, tenant_badges), (24, 24));

    // The global scope dedupes on re-run like any other key.
    let again = gamification::seed(&mut conn, None).await.unwrap();
    assert_eq!((again.inserted, again.updated, again.unchanged), (0, 0, 53));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_gamification_for_missing_tenant_is_skipped(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let report = gamification::seed(&mut conn, Some("missing-tenant")).await.unwrap();
    assert_eq!(report.skipped, 1);
    assert!(report.is_noop());
    assert_eq!(count_rows(&mut conn, "badges").await.unwrap(), 0);
}
