//! Natural-key uniqueness checks run before any row is written.

use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

use crate::error::CoreError;

/// Ensure no natural key appears twice in one fixture.
///
/// Two fixture entries sharing a key would upsert the same row twice, with
/// the second silently winning. Reject that up front instead.
pub fn ensure_unique<K, I>(entity: &'static str, keys: I) -> Result<(), CoreError>
where
    K: Eq + Hash + Display,
    I: IntoIterator<Item = K>,
{
    let mut seen = HashSet::new();
    for key in keys {
        let rendered = key.to_string();
        if !seen.insert(key) {
            return Err(CoreError::DuplicateKey {
                entity,
                key: rendered,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn unique_keys_pass() {
        assert!(ensure_unique("feature flag", ["a", "b", "c"]).is_ok());
    }

    #[test]
    fn empty_passes() {
        assert!(ensure_unique::<&str, _>("feature flag", []).is_ok());
    }

    #[test]
    fn duplicate_reports_first_repeat() {
        let err = ensure_unique("venue type", ["arena", "stadium", "arena", "stadium"]);
        assert_matches!(
            err,
            Err(CoreError::DuplicateKey { entity: "venue type", key }) if key == "arena"
        );
    }

    #[test]
    fn composite_keys() {
        let keys = [("tva", 1_i64), ("tva", 2), ("timbru", 1)]
            .into_iter()
            .map(|(name, id)| format!("{name}/{id}"));
        assert!(ensure_unique("general tax", keys).is_ok());
    }
}
