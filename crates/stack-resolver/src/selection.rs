//! User selections and their normalized signatures.
//!
//! A selection arrives as an ordered list of module names or a category →
//! name map. Both normalize to a sorted, deduplicated name list: two
//! selections differing only in input order are the same selection, share
//! the same signature, and must produce the same resolution.

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};

/// A user's module selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Module names, in the order the user gave them.
    Names(Vec<String>),
    /// Category label → module name.
    ByCategory(BTreeMap<String, String>),
}

impl Selection {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Selection::Names(names.into_iter().map(Into::into).collect())
    }

    /// The sorted, deduplicated module-name list.
    pub fn normalized(&self) -> Vec<String> {
        let mut names: Vec<String> = match self {
            Selection::Names(names) => names.clone(),
            Selection::ByCategory(map) => map.values().cloned().collect(),
        };
        names.sort();
        names.dedup();
        names
    }

    /// Order-independent signature of the selection, for cache keys.
    pub fn signature(&self) -> String {
        let mut hasher = Sha256::new();
        for name in self.normalized() {
            hasher.update(name.as_bytes());
            hasher.update(b"\n");
        }
        let digest = hasher.finalize();
        digest.iter().map(|b| format!("{b:02x}")).collect()
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Selection::Names(names) => names.is_empty(),
            Selection::ByCategory(map) => map.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_normalized_sorts_and_dedups() {
        let selection = Selection::from_names(["vue", "react", "vue"]);
        assert_eq!(selection.normalized(), vec!["react", "vue"]);
    }

    #[test]
    fn test_signature_order_independent() {
        let a = Selection::from_names(["react", "tailwind", "express"]);
        let b = Selection::from_names(["express", "react", "tailwind"]);
        assert_eq!(a.signature(), b.signature());
    }

    #[test]
    fn test_signature_distinguishes_selections() {
        let a = Selection::from_names(["react"]);
        let b = Selection::from_names(["vue"]);
        assert_ne!(a.signature(), b.signature());
    }

    #[test]
    fn test_signature_not_fooled_by_concatenation() {
        let a = Selection::from_names(["ab", "c"]);
        let b = Selection::from_names(["a", "bc"]);
        assert_ne!(a.signature(), b.signature());
    }

    #[test]
    fn test_by_category_uses_values() {
        let mut map = BTreeMap::new();
        map.insert("frontend-framework".to_string(), "react".to_string());
        map.insert("ui-library".to_string(), "tailwind".to_string());
        let selection = Selection::ByCategory(map);
        assert_eq!(selection.normalized(), vec!["react", "tailwind"]);
    }
}
