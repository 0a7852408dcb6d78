//! Parent-first ordering of self-referencing catalog trees.
//!
//! Event types and artist types reference their parent by slug. Rows must be
//! written parents first so the child's `parent_id` can be resolved from the
//! ids already upserted.

use std::collections::{HashMap, HashSet};

use crate::error::CoreError;

/// A fixture entry that may point at a parent entry by slug.
pub trait HierarchyNode {
    fn slug(&self) -> &str;
    fn parent(&self) -> Option<&str>;
}

/// Result of [`parents_first`].
#[derive(Debug)]
pub struct Ordered<'a, N> {
    /// Nodes in an order where every parent precedes its children.
    pub nodes: Vec<&'a N>,
    /// Slugs whose parent is not part of the fixture. They are written as
    /// roots (`parent_id = NULL`).
    pub orphans: Vec<String>,
}

/// Order `nodes` so that every parent comes before its children.
///
/// Siblings keep their fixture order. Depth is unbounded. A node whose
/// parent slug is unknown is treated as a root and reported in
/// [`Ordered::orphans`]; a cycle is an error.
pub fn parents_first<'a, N: HierarchyNode>(
    entity: &'static str,
    nodes: &'a [N],
) -> Result<Ordered<'a, N>, CoreError> {
    let known: HashSet<&str> = nodes.iter().map(|n| n.slug()).collect();

    let mut children: HashMap<&str, Vec<&'a N>> = HashMap::new();
    let mut roots = Vec::new();
    let mut orphans = Vec::new();

    for node in nodes {
        match node.parent() {
            Some(parent) if known.contains(parent) => {
                children.entry(parent).or_default().push(node);
            }
            Some(_) => {
                orphans.push(node.slug().to_string());
                roots.push(node);
            }
            None => roots.push(node),
        }
    }

    let mut ordered = Vec::with_capacity(nodes.len());
    let mut stack: Vec<&'a N> = roots.into_iter().rev().collect();
    while let Some(node) = stack.pop() {
        ordered.push(node);
        if let Some(kids) = children.remove(node.slug()) {
            stack.extend(kids.into_iter().rev());
        }
    }

    // Anything left unreached hangs off a cycle.
    if ordered.len() < nodes.len() {
        let reached: HashSet<&str> = ordered.iter().map(|n| n.slug()).collect();
        let slug = nodes
            .iter()
            .map(|n| n.slug())
            .find(|s| !reached.contains(s))
            .unwrap_or_default()
            .to_string();
        return Err(CoreError::HierarchyCycle { entity, slug });
    }

    Ok(Ordered {
        nodes: ordered,
        orphans,
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[derive(Debug)]
    struct Node(&'static str, Option<&'static str>);

    impl HierarchyNode for Node {
        fn slug(&self) -> &str {
            self.0
        }
        fn parent(&self) -> Option<&str> {
            self.1
        }
    }

    fn slugs<'a>(ordered: &Ordered<'a, Node>) -> Vec<&'a str> {
        ordered.nodes.iter().map(|n| n.0).collect()
    }

    #[test]
    fn children_listed_before_parent_are_reordered() {
        let nodes = [
            Node("concert", Some("music")),
            Node("music", None),
            Node("theatre", None),
        ];
        let ordered = parents_first("event type", &nodes).unwrap();
        assert_eq!(slugs(&ordered), vec!["music", "concert", "theatre"]);
        assert!(ordered.orphans.is_empty());
    }

    #[test]
    fn multi_level_depth() {
        let nodes = [
            Node("c", Some("b")),
            Node("b", Some("a")),
            Node("a", None),
        ];
        let ordered = parents_first("artist type", &nodes).unwrap();
        assert_eq!(slugs(&ordered), vec!["a", "b", "c"]);
    }

    #[test]
    fn siblings_keep_fixture_order() {
        let nodes = [
            Node("root", None),
            Node("x", Some("root")),
            Node("y", Some("root")),
            Node("z", Some("root")),
        ];
        let ordered = parents_first("event type", &nodes).unwrap();
        assert_eq!(slugs(&ordered), vec!["root", "x", "y", "z"]);
    }

    #[test]
    fn unknown_parent_becomes_root_and_is_reported() {
        let nodes = [Node("dj", Some("missing")), Node("music", None)];
        let ordered = parents_first("event type", &nodes).unwrap();
        assert_eq!(ordered.nodes.len(), 2);
        assert_eq!(ordered.orphans, vec!["dj".to_string()]);
    }

    #[test]
    fn cycle_is_rejected() {
        let nodes = [Node("a", Some("b")), Node("b", Some("a")), Node("c", None)];
        assert_matches!(
            parents_first("event type", &nodes),
            Err(CoreError::HierarchyCycle { entity: "event type", .. })
        );
    }

    #[test]
    fn self_parent_is_a_cycle() {
        let nodes = [Node("loop", Some("loop"))];
        assert_matches!(
            parents_first("artist type", &nodes),
            Err(CoreError::HierarchyCycle { slug, .. }) if slug == "loop"
        );
    }
}
