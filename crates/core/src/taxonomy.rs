//! Taxonomy group expansion.
//!
//! A taxonomy fixture lists genres in named groups (`music`, `comedy`, …) and
//! an allowed map from type slug to entries that are either literal genre
//! slugs or `group:<name>` references. Expansion flattens one level of group
//! references into genre slugs, deduplicates, and resolves everything to
//! `(type_id, genre_id)` pivot pairs.
//!
//! Anything that cannot be resolved is skipped and reported; nothing here
//! fails.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::types::DbId;

/// Prefix marking a reference to a whole genre group.
pub const GROUP_PREFIX: &str = "group:";

/// One entry of an allowed-map list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowedRef<'a> {
    /// `group:<name>`: every member of the named group.
    Group(&'a str),
    /// A single genre slug.
    Item(&'a str),
}

impl<'a> AllowedRef<'a> {
    pub fn parse(raw: &'a str) -> Self {
        match raw.strip_prefix(GROUP_PREFIX) {
            Some(group) => AllowedRef::Group(group),
            None => AllowedRef::Item(raw),
        }
    }
}

/// Group name to ordered member slugs.
#[derive(Debug, Default, Clone)]
pub struct GroupIndex {
    groups: HashMap<String, Vec<String>>,
}

impl GroupIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `member` to `group`, creating the group on first use.
    pub fn insert(&mut self, group: &str, member: &str) {
        self.groups
            .entry(group.to_string())
            .or_default()
            .push(member.to_string());
    }

    pub fn members(&self, group: &str) -> Option<&[String]> {
        self.groups.get(group).map(Vec::as_slice)
    }

    pub fn contains(&self, group: &str) -> bool {
        self.groups.contains_key(group)
    }
}

impl<G, M> FromIterator<(G, M)> for GroupIndex
where
    G: AsRef<str>,
    M: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (G, M)>>(iter: I) -> Self {
        let mut index = GroupIndex::new();
        for (group, member) in iter {
            index.insert(group.as_ref(), member.as_ref());
        }
        index
    }
}

/// Flattened allowed list for one parent entity.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// Deduplicated genre slugs, in first-occurrence order.
    pub slugs: Vec<String>,
    /// Group names that are not defined in the index.
    pub unknown_groups: Vec<String>,
}

/// Expand one allowed list against `groups`.
pub fn expand<S: AsRef<str>>(groups: &GroupIndex, allowed: &[S]) -> Expansion {
    let mut expansion = Expansion::default();
    let mut seen = HashSet::new();

    let mut push = |slug: &str, out: &mut Vec<String>| {
        if seen.insert(slug.to_string()) {
            out.push(slug.to_string());
        }
    };

    for raw in allowed {
        match AllowedRef::parse(raw.as_ref()) {
            AllowedRef::Group(name) => match groups.members(name) {
                Some(members) => {
                    for member in members {
                        push(member, &mut expansion.slugs);
                    }
                }
                None => expansion.unknown_groups.push(name.to_string()),
            },
            AllowedRef::Item(slug) => push(slug, &mut expansion.slugs),
        }
    }

    expansion
}

/// Why a reference in the allowed map produced no pivot row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkippedRef {
    /// The allowed map names a parent that was not written.
    UnknownParent(String),
    /// A `group:` reference names an undefined group.
    UnknownGroup { parent: String, group: String },
    /// A genre slug that was not written.
    UnknownItem { parent: String, item: String },
}

/// Pivot rows to insert, plus everything that was skipped on the way.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PivotPlan {
    pub pairs: Vec<(DbId, DbId)>,
    pub skipped: Vec<SkippedRef>,
}

/// Resolve a whole allowed map into `(parent_id, item_id)` pairs.
///
/// `parent_ids` and `item_ids` map slugs to the ids returned by the upserts.
/// Parents are visited in slug order so the plan is deterministic.
pub fn plan_pivot<S: AsRef<str>>(
    allowed_map: &BTreeMap<String, Vec<S>>,
    groups: &GroupIndex,
    parent_ids: &HashMap<String, DbId>,
    item_ids: &HashMap<String, DbId>,
) -> PivotPlan {
    let mut plan = PivotPlan::default();

    for (parent, allowed) in allowed_map {
        let Some(&parent_id) = parent_ids.get(parent) else {
            plan.skipped.push(SkippedRef::UnknownParent(parent.clone()));
            continue;
        };

        let expansion = expand(groups, allowed);
        for group in expansion.unknown_groups {
            plan.skipped.push(SkippedRef::UnknownGroup {
                parent: parent.clone(),
                group,
            });
        }

        for slug in expansion.slugs {
            match item_ids.get(&slug) {
                Some(&item_id) => plan.pairs.push((parent_id, item_id)),
                None => plan.skipped.push(SkippedRef::UnknownItem {
                    parent: parent.clone(),
                    item: slug,
                }),
            }
        }
    }

    plan
}
