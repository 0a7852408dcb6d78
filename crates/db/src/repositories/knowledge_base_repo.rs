//! Repository for the `kb_categories` and `kb_articles` tables.

use sqlx::PgConnection;
use tixello_core::types::DbId;

use super::upsert_sql;
use crate::models::knowledge_base::{NewKbArticle, NewKbCategory};
use crate::models::UpsertOutcome;

pub struct KnowledgeBaseRepo;

impl KnowledgeBaseRepo {
    pub async fn upsert_category(
        conn: &mut PgConnection,
        input: &NewKbCategory<'_>,
    ) -> Result<UpsertOutcome, sqlx::Error> {
        let query = upsert_sql(
            "kb_categories",
            "(tenant_id, slug, name, description, icon, color, sort_order, is_visible) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, true) \
             ON CONFLICT (tenant_id, slug)",
            &["name", "description", "icon", "color", "sort_order", "is_visible"],
            "tenant_id = $1 AND slug = $2",
        );
        sqlx::query_as::<_, UpsertOutcome>(&query)
            .bind(input.tenant_id)
            .bind(input.slug)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.icon)
            .bind(input.color)
            .bind(input.sort_order)
            .fetch_one(&mut *conn)
            .await
    }

    /// Upsert an article keyed by `(tenant_id, slug)`. An article whose slug
    /// already exists is moved under `kb_category_id`.
    pub async fn upsert_article(
        conn: &mut PgConnection,
        input: &NewKbArticle<'_>,
    ) -> Result<UpsertOutcome, sqlx::Error> {
        let query = upsert_sql(
            "kb_articles",
            "(tenant_id, slug, kb_category_id, article_type, title, question, content, \
              is_visible, is_featured, is_popular, sort_order) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, true, $8, $9, $10) \
             ON CONFLICT (tenant_id, slug)",
            &[
                "kb_category_id",
                "article_type",
                "title",
                "question",
                "content",
                "is_visible",
                "is_featured",
                "is_popular",
                "sort_order",
            ],
            "tenant_id = $1 AND slug = $2",
        );
        sqlx::query_as::<_, UpsertOutcome>(&query)
            .bind(input.tenant_id)
            .bind(input.slug)
            .bind(input.kb_category_id)
            .bind(input.article_type)
            .bind(&input.title)
            .bind(&input.question)
            .bind(&input.content)
            .bind(input.is_featured)
            .bind(input.is_popular)
            .bind(input.sort_order)
            .fetch_one(&mut *conn)
            .await
    }

    /// Recount the articles of every category of one tenant, including
    /// articles that did not come from a fixture. Returns the number of
    /// categories whose count changed.
    pub async fn refresh_article_counts(
        conn: &mut PgConnection,
        tenant_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE kb_categories c SET article_count = counts.n \
             FROM ( \
                SELECT cat.id, COUNT(a.id)::int AS n \
                FROM kb_categories cat \
                LEFT JOIN kb_articles a ON a.kb_category_id = cat.id \
                WHERE cat.tenant_id = $1 \
                GROUP BY cat.id \
             ) counts \
             WHERE c.id = counts.id AND c.article_count IS DISTINCT FROM counts.n",
        )
        .bind(tenant_id)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected())
    }
}
