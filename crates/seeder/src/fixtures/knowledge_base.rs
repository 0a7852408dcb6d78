//! Help-center categories and the articles and FAQ entries filed under them.

use std::collections::HashSet;

use serde::Deserialize;
use tixello_core::error::CoreError;
use tixello_core::i18n::Localized;
use tixello_core::natural_key::ensure_unique;
use validator::Validate;

use super::{parse, validate_all};
use crate::error::SeedError;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct KbCategoryFixture {
    #[validate(length(min = 1))]
    pub slug: String,
    pub name: Localized<String>,
    pub description: Localized<String>,
    pub icon: String,
    #[validate(length(equal = 7))]
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleType {
    Article,
    Faq,
}

impl ArticleType {
    pub fn as_str(self) -> &'static str {
        match self {
            ArticleType::Article => "article",
            ArticleType::Faq => "faq",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct KbArticleFixture {
    #[validate(length(min = 1))]
    pub slug: String,
    /// Slug of the category the article is filed under.
    pub category: String,
    #[serde(rename = "type")]
    pub article_type: ArticleType,
    pub title: Option<Localized<String>>,
    pub question: Option<Localized<String>>,
    pub content: Localized<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub popular: bool,
    /// Position inside the category; defaults to the fixture position.
    pub sort_order: Option<i32>,
}

impl KbArticleFixture {
    /// The heading shown for the entry: its title or its question.
    pub fn heading(&self) -> Option<&Localized<String>> {
        match self.article_type {
            ArticleType::Article => self.title.as_ref(),
            ArticleType::Faq => self.question.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct KnowledgeBase {
    pub categories: Vec<KbCategoryFixture>,
    pub articles: Vec<KbArticleFixture>,
}

impl KnowledgeBase {
    pub const NAME: &'static str = "knowledge_base.json";

    pub fn load() -> Result<Self, SeedError> {
        parse(Self::NAME, include_str!("../../fixtures/knowledge_base.json"))
    }

    /// Slugs are unique, every article names a known category, and each
    /// entry carries the heading its type needs.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_all(&self.categories)?;
        validate_all(&self.articles)?;
        ensure_unique("kb category", self.categories.iter().map(|c| c.slug.as_str()))?;
        ensure_unique("kb article", self.articles.iter().map(|a| a.slug.as_str()))?;

        for category in &self.categories {
            category.name.ensure_present("kb category", &category.slug)?;
        }

        let categories: HashSet<&str> = self.categories.iter().map(|c| c.slug.as_str()).collect();
        for article in &self.articles {
            if !categories.contains(article.category.as_str()) {
                return Err(CoreError::Validation(format!(
                    "kb article '{}' names unknown category '{}'",
                    article.slug, article.category
                )));
            }
            let Some(heading) = article.heading() else {
                return Err(CoreError::Validation(format!(
                    "kb {} '{}' has no {}",
                    article.article_type.as_str(),
                    article.slug,
                    match article.article_type {
                        ArticleType::Article => "title",
                        ArticleType::Faq => "question",
                    }
                )));
            };
            heading.ensure_present("kb article", &article.slug)?;
            article.content.ensure_present("kb article", &article.slug)?;
        }
        Ok(())
    }
}
