//! Event and artist taxonomies: a type tree, genres grouped by category, and
//! an allowed map from type slug to genres or `group:` references.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Deserialize;
use tixello_core::error::CoreError;
use tixello_core::hierarchy::{parents_first, HierarchyNode};
use tixello_core::i18n::Localized;
use tixello_core::natural_key::ensure_unique;
use tixello_core::taxonomy::{plan_pivot, GroupIndex, SkippedRef};

use super::parse;
use crate::error::SeedError;

#[derive(Debug, Clone, Deserialize)]
pub struct TypeFixture {
    pub slug: String,
    #[serde(default)]
    pub parent: Option<String>,
    pub name: Localized<String>,
}

impl HierarchyNode for TypeFixture {
    fn slug(&self) -> &str {
        &self.slug
    }

    fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenreFixture {
    pub slug: String,
    pub name: Localized<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroupFixture {
    pub group: String,
    pub members: Vec<GenreFixture>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaxonomyFixture {
    pub types: Vec<TypeFixture>,
    pub groups: Vec<GroupFixture>,
    /// Type slug to genre slugs and `group:<name>` references.
    pub allowed: BTreeMap<String, Vec<String>>,
}

impl TaxonomyFixture {
    pub const EVENT: &'static str = "event_taxonomy.json";
    pub const ARTIST: &'static str = "artist_taxonomy.json";

    pub fn load_event() -> Result<Self, SeedError> {
        parse(Self::EVENT, include_str!("../../fixtures/event_taxonomy.json"))
    }

    pub fn load_artist() -> Result<Self, SeedError> {
        parse(Self::ARTIST, include_str!("../../fixtures/artist_taxonomy.json"))
    }

    /// Group name to member slugs, in fixture order.
    pub fn group_index(&self) -> GroupIndex {
        self.groups
            .iter()
            .flat_map(|g| g.members.iter().map(move |m| (&g.group, &m.slug)))
            .collect()
    }

    /// Every distinct genre. A genre listed in several groups appears once,
    /// with the name from its first occurrence.
    pub fn genres(&self) -> Vec<&GenreFixture> {
        let mut seen = HashSet::new();
        self.groups
            .iter()
            .flat_map(|g| g.members.iter())
            .filter(|genre| seen.insert(genre.slug.as_str()))
            .collect()
    }

    pub fn validate(&self, entity: &'static str) -> Result<(), CoreError> {
        ensure_unique(entity, self.types.iter().map(|t| t.slug.as_str()))?;
        ensure_unique("genre group", self.groups.iter().map(|g| g.group.as_str()))?;
        for group in &self.groups {
            ensure_unique("genre group member", group.members.iter().map(|m| m.slug.as_str()))?;
        }
        for node in &self.types {
            node.name.ensure_present(entity, &node.slug)?;
        }
        for genre in self.genres() {
            genre.name.ensure_present("genre", &genre.slug)?;
        }
        parents_first(entity, &self.types)?;
        Ok(())
    }

    /// References in the allowed map that would not produce a pivot row if
    /// every fixture entry were written.
    pub fn unresolved_refs(&self) -> Vec<SkippedRef> {
        let type_ids = positions(self.types.iter().map(|t| t.slug.as_str()));
        let genre_ids = positions(self.genres().into_iter().map(|g| g.slug.as_str()));
        plan_pivot(&self.allowed, &self.group_index(), &type_ids, &genre_ids).skipped
    }
}

/// Stand-in ids for dry validation.
fn positions<'a>(slugs: impl Iterator<Item = &'a str>) -> HashMap<String, i64> {
    slugs
        .enumerate()
        .map(|(i, slug)| (slug.to_string(), i as i64 + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn fixture(raw: &str) -> TaxonomyFixture {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn embedded_taxonomies_are_valid_and_fully_resolved() {
        for taxonomy in [
            TaxonomyFixture::load_event().unwrap(),
            TaxonomyFixture::load_artist().unwrap(),
        ] {
            taxonomy.validate("type").unwrap();
            let unresolved = taxonomy.unresolved_refs();
            assert!(unresolved.is_empty(), "unresolved references: {unresolved:?}");
        }
    }

    #[test]
    fn artist_genres_listed_in_two_groups_appear_once() {
        let taxonomy = TaxonomyFixture::load_artist().unwrap();
        let memberships: usize = taxonomy.groups.iter().map(|g| g.members.len()).sum();
        let genres = taxonomy.genres();
        assert!(genres.len() < memberships);
        assert_eq!(genres.iter().filter(|g| g.slug == "electronic").count(), 1);
    }

    #[test]
    fn first_occurrence_name_wins() {
        let taxonomy = fixture(
            r#"{
                "types": [],
                "groups": [
                    {"group": "a", "members": [{"slug": "jazz", "name": {"en": "Jazz", "ro": "Jazz"}}]},
                    {"group": "b", "members": [{"slug": "jazz", "name": {"en": "Other", "ro": "Alt"}}]}
                ],
                "allowed": {}
            }"#,
        );
        let genres = taxonomy.genres();
        assert_eq!(genres.len(), 1);
        assert_eq!(genres[0].name.en, "Jazz");
    }

    #[test]
    fn unresolved_refs_are_reported() {
        let taxonomy = fixture(
            r#"{
                "types": [{"slug": "concert", "name": {"en": "Concert", "ro": "Concert"}}],
                "groups": [{"group": "music", "members": [{"slug": "rock", "name": {"en": "Rock", "ro": "Rock"}}]}],
                "allowed": {"concert": ["group:music", "group:film", "polka"], "ghost": ["rock"]}
            }"#,
        );
        taxonomy.validate("event type").unwrap();
        assert_eq!(taxonomy.unresolved_refs().len(), 3);
    }

    #[test]
    fn duplicate_type_slug_is_rejected() {
        let taxonomy = fixture(
            r#"{
                "types": [
                    {"slug": "concert", "name": {"en": "Concert", "ro": "Concert"}},
                    {"slug": "concert", "name": {"en": "Gig", "ro": "Concert"}}
                ],
                "groups": [],
                "allowed": {}
            }"#,
        );
        assert_matches!(
            taxonomy.validate("event type"),
            Err(CoreError::DuplicateKey { key, .. }) if key == "concert"
        );
    }

    #[test]
    fn parent_cycle_is_rejected() {
        let taxonomy = fixture(
            r#"{
                "types": [
                    {"slug": "a", "parent": "b", "name": {"en": "A", "ro": "A"}},
                    {"slug": "b", "parent": "a", "name": {"en": "B", "ro": "B"}}
                ],
                "groups": [],
                "allowed": {}
            }"#,
        );
        assert_matches!(taxonomy.validate("artist type"), Err(CoreError::HierarchyCycle { .. }));
    }
}
