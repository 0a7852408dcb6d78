//! Venue categories, each owning a list of venue types.

use serde::Deserialize;
use tixello_core::error::CoreError;
use tixello_core::i18n::Localized;
use tixello_core::natural_key::ensure_unique;

use super::parse;
use crate::error::SeedError;

#[derive(Debug, Clone, Deserialize)]
pub struct VenueTypeFixture {
    pub slug: String,
    pub icon: String,
    pub name: Localized<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VenueCategoryFixture {
    pub slug: String,
    pub icon: String,
    pub name: Localized<String>,
    pub types: Vec<VenueTypeFixture>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct VenueCatalog {
    pub categories: Vec<VenueCategoryFixture>,
}

impl VenueCatalog {
    pub const NAME: &'static str = "venue_catalog.json";

    pub fn load() -> Result<Self, SeedError> {
        parse(Self::NAME, include_str!("../../fixtures/venue_catalog.json"))
    }

    /// Category slugs are unique, and type slugs are unique across all
    /// categories since `venue_types.slug` is a global key.
    pub fn validate(&self) -> Result<(), CoreError> {
        ensure_unique("venue category", self.categories.iter().map(|c| c.slug.as_str()))?;
        ensure_unique(
            "venue type",
            self.categories
                .iter()
                .flat_map(|c| c.types.iter())
                .map(|t| t.slug.as_str()),
        )?;
        for category in &self.categories {
            category.name.ensure_present("venue category", &category.slug)?;
            for venue_type in &category.types {
                venue_type.name.ensure_present("venue type", &venue_type.slug)?;
            }
        }
        Ok(())
    }

    pub fn type_count(&self) -> usize {
        self.categories.iter().map(|c| c.types.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn embedded_catalog_is_valid() {
        let catalog = VenueCatalog::load().unwrap();
        catalog.validate().unwrap();
        assert_eq!(catalog.categories.len(), 14);
        assert_eq!(catalog.type_count(), 151);
    }

    #[test]
    fn type_slug_shared_by_two_categories_is_rejected() {
        let catalog: VenueCatalog = serde_json::from_str(
            r#"[
                {"slug": "a", "icon": "x", "name": {"en": "A", "ro": "A"},
                 "types": [{"slug": "arena", "icon": "x", "name": {"en": "Arena", "ro": "Arenă"}}]},
                {"slug": "b", "icon": "x", "name": {"en": "B", "ro": "B"},
                 "types": [{"slug": "arena", "icon": "x", "name": {"en": "Arena", "ro": "Arenă"}}]}
            ]"#,
        )
        .unwrap();
        assert_matches!(
            catalog.validate(),
            Err(CoreError::DuplicateKey { entity: "venue type", .. })
        );
    }
}
