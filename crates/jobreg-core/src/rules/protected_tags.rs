//! Permanent-tag enforcement
//!
//! Every entity's tag set must contain its own id and name. The rule lives
//! in one place and is applied at every tag-mutation boundary instead of
//! being special-cased inside each operation.
//!
//! Both members are protected symmetrically: the original system guarded the
//! id tag but was inconsistent about the name tag, and that asymmetry is
//! deliberately not reproduced.

use std::collections::BTreeSet;

/// Re-insert the permanent tags `{id, name}` into `tags`
///
/// Called after every mutation of a tag set, including replace and
/// remove-all, so the set is never observed without its permanent members.
pub fn enforce_protected_tags(id: &str, name: &str, tags: &mut BTreeSet<String>) {
    tags.insert(id.to_string());
    tags.insert(name.to_string());
}

/// Check whether `tag` is one of the entity's permanent tags
pub fn is_protected(id: &str, name: &str, tag: &str) -> bool {
    tag == id || tag == name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enforce_inserts_both_members() {
        let mut tags = BTreeSet::new();
        tags.insert("prod".to_string());

        enforce_protected_tags("app1", "tez", &mut tags);

        assert!(tags.contains("app1"));
        assert!(tags.contains("tez"));
        assert!(tags.contains("prod"));
        assert_eq!(tags.len(), 3);
    }

    #[test]
    fn test_enforce_is_idempotent() {
        let mut tags = BTreeSet::new();
        enforce_protected_tags("app1", "tez", &mut tags);
        enforce_protected_tags("app1", "tez", &mut tags);
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn test_is_protected_symmetric() {
        assert!(is_protected("app1", "tez", "app1"));
        assert!(is_protected("app1", "tez", "tez"));
        assert!(!is_protected("app1", "tez", "prod"));
    }
}
