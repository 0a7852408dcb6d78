//! Help-center categories and articles for one tenant.

use std::collections::HashMap;

use sqlx::PgConnection;
use tixello_db::models::knowledge_base::{NewKbArticle, NewKbCategory};
use tixello_db::repositories::{KnowledgeBaseRepo, TenantRepo};

use crate::error::SeedError;
use crate::fixtures::knowledge_base::KnowledgeBase;
use crate::report::SeedReport;

pub const NAME: &str = "knowledge-base";

/// Write every category and article for the tenant with `tenant_slug`, then
/// recount the articles per category.
///
/// Articles without an explicit `sort_order` get their 1-based position
/// within their category. The seeder is skipped with a warning if the
/// tenant does not exist.
pub async fn seed(conn: &mut PgConnection, tenant_slug: &str) -> Result<SeedReport, SeedError> {
    let fixture = KnowledgeBase::load()?;
    fixture.validate().map_err(SeedError::invalid(KnowledgeBase::NAME))?;

    let mut report = SeedReport::new(NAME);
    let Some(tenant) = TenantRepo::find_by_slug(conn, tenant_slug).await? else {
        tracing::warn!(tenant = tenant_slug, "Tenant not found, skipping knowledge base");
        report.skip();
        return Ok(report);
    };

    let mut category_ids = HashMap::with_capacity(fixture.categories.len());
    for (pos, category) in fixture.categories.iter().enumerate() {
        let outcome = KnowledgeBaseRepo::upsert_category(
            conn,
            &NewKbCategory {
                tenant_id: tenant.id,
                slug: &category.slug,
                name: category.name.to_json(),
                description: category.description.to_json(),
                icon: &category.icon,
                color: &category.color,
                sort_order: pos as i32 + 1,
            },
        )
        .await?;
        report.record(outcome);
        category_ids.insert(category.slug.as_str(), outcome.id);
    }

    let mut positions: HashMap<&str, i32> = HashMap::new();
    for article in &fixture.articles {
        let position = positions.entry(article.category.as_str()).or_default();
        *position += 1;

        // validate() guarantees the category exists
        let Some(&kb_category_id) = category_ids.get(article.category.as_str()) else {
            report.skip();
            continue;
        };
        let outcome = KnowledgeBaseRepo::upsert_article(
            conn,
            &NewKbArticle {
                tenant_id: tenant.id,
                kb_category_id,
                slug: &article.slug,
                article_type: article.article_type.as_str(),
                title: article.title.as_ref().map(|t| t.to_json()),
                question: article.question.as_ref().map(|q| q.to_json()),
                content: article.content.to_json(),
                is_featured: article.featured,
                is_popular: article.popular,
                sort_order: article.sort_order.unwrap_or(*position),
            },
        )
        .await?;
        report.record(outcome);
    }

    let recounted = KnowledgeBaseRepo::refresh_article_counts(conn, tenant.id).await?;
    tracing::debug!(
        tenant = %tenant.slug,
        categories = fixture.categories.len(),
        articles = fixture.articles.len(),
        recounted,
        "Knowledge base written"
    );
    Ok(report)
}
