use sqlx::PgPool;

/// Connect, migrate, verify every seeded table exists and starts empty.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    tixello_db::health_check(&pool).await.unwrap();

    let tables = [
        "feature_flags",
        "microservices",
        "hub_connectors",
        "email_templates",
        "contract_templates",
        "event_types",
        "event_genres",
        "event_type_event_genre",
        "artist_types",
        "artist_genres",
        "artist_type_artist_genre",
        "venue_categories",
        "venue_types",
        "general_taxes",
        "experience_configs",
        "experience_actions",
        "badges",
        "rewards",
        "tenants",
        "tenant_microservices",
        "venues",
        "events",
        "regions",
        "counties",
        "cities",
        "kb_categories",
        "kb_articles",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// `updated_at` is bumped by the trigger when an upsert overwrites a row.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_updated_at_trigger(pool: PgPool) {
    sqlx::query("INSERT INTO feature_flags (key, description) VALUES ('x', 'first')")
        .execute(&pool)
        .await
        .unwrap();
    let (created, before): (chrono::DateTime<chrono::Utc>, chrono::DateTime<chrono::Utc>) =
        sqlx::query_as("SELECT created_at, updated_at FROM feature_flags WHERE key = 'x'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(created, before);

    sqlx::query("UPDATE feature_flags SET description = 'second' WHERE key = 'x'")
        .execute(&pool)
        .await
        .unwrap();
    let (after,): (chrono::DateTime<chrono::Utc>,) =
        sqlx::query_as("SELECT updated_at FROM feature_flags WHERE key = 'x'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(after >= before);
}
