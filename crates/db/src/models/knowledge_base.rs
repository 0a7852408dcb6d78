//! Help-center categories and articles for one tenant.

use serde_json::Value;
use tixello_core::types::DbId;

/// DTO for upserting a `kb_categories` row, keyed by `(tenant_id, slug)`.
#[derive(Debug, Clone)]
pub struct NewKbCategory<'a> {
    pub tenant_id: DbId,
    pub slug: &'a str,
    pub name: Value,
    pub description: Value,
    pub icon: &'a str,
    pub color: &'a str,
    pub sort_order: i32,
}

/// DTO for upserting a `kb_articles` row, keyed by `(tenant_id, slug)`.
///
/// Articles carry a `title`, FAQ entries a `question`; the other is `None`.
#[derive(Debug, Clone)]
pub struct NewKbArticle<'a> {
    pub tenant_id: DbId,
    pub kb_category_id: DbId,
    pub slug: &'a str,
    pub article_type: &'a str,
    pub title: Option<Value>,
    pub question: Option<Value>,
    pub content: Value,
    pub is_featured: bool,
    pub is_popular: bool,
    pub sort_order: i32,
}
