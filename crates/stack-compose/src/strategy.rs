//! Per-path merge-strategy election.

use std::path::Path;

use stack_registry::MergeStrategy;

use crate::merge::DataFormat;

/// Filenames treated as append-only line lists.
const APPEND_FILENAMES: &[&str] = &[
    ".gitignore",
    ".dockerignore",
    ".npmignore",
    ".gitattributes",
    ".env",
    ".env.example",
    ".env.local",
];

/// The file-type default table.
///
/// Structured-data files deep-merge, append-only list files (ignore rules,
/// environment templates) append uniquely, everything else is replaced.
pub fn default_strategy(path: &str) -> MergeStrategy {
    let filename = Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path);
    if APPEND_FILENAMES.contains(&filename) {
        return MergeStrategy::AppendUnique;
    }
    if DataFormat::from_path(path).is_some() {
        return MergeStrategy::MergeStructured;
    }
    MergeStrategy::Replace
}

/// Elect the effective strategy for one path.
///
/// A declared override wins over the default table; two or more *distinct*
/// declared overrides are irreconcilable and yield `Err` with the rivals.
pub fn elect_strategy(
    path: &str,
    declared: impl Iterator<Item = MergeStrategy>,
) -> Result<MergeStrategy, Vec<MergeStrategy>> {
    let mut overrides: Vec<MergeStrategy> = declared.collect();
    overrides.sort_by_key(|s| s.as_str());
    overrides.dedup();

    match overrides.as_slice() {
        [] => Ok(default_strategy(path)),
        [single] => Ok(*single),
        _ => Err(overrides),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_data_defaults_to_merge() {
        assert_eq!(default_strategy("package.json"), MergeStrategy::MergeStructured);
        assert_eq!(default_strategy("config/app.yaml"), MergeStrategy::MergeStructured);
        assert_eq!(default_strategy("Cargo.toml"), MergeStrategy::MergeStructured);
    }

    #[test]
    fn test_append_only_files() {
        assert_eq!(default_strategy(".gitignore"), MergeStrategy::AppendUnique);
        assert_eq!(default_strategy(".env.example"), MergeStrategy::AppendUnique);
        assert_eq!(default_strategy("sub/dir/.gitignore"), MergeStrategy::AppendUnique);
    }

    #[test]
    fn test_everything_else_replaces() {
        assert_eq!(default_strategy("src/main.rs"), MergeStrategy::Replace);
        assert_eq!(default_strategy("README.md"), MergeStrategy::Replace);
        assert_eq!(default_strategy("Makefile"), MergeStrategy::Replace);
    }

    #[test]
    fn test_single_override_wins() {
        let elected = elect_strategy(
            "README.md",
            [MergeStrategy::AppendUnique].into_iter(),
        )
        .unwrap();
        assert_eq!(elected, MergeStrategy::AppendUnique);
    }

    #[test]
    fn test_agreeing_overrides_are_fine() {
        let elected = elect_strategy(
            "package.json",
            [MergeStrategy::Replace, MergeStrategy::Replace].into_iter(),
        )
        .unwrap();
        assert_eq!(elected, MergeStrategy::Replace);
    }

    #[test]
    fn test_conflicting_overrides_rejected() {
        let rivals = elect_strategy(
            "package.json",
            [MergeStrategy::Replace, MergeStrategy::MergeStructured].into_iter(),
        )
        .unwrap_err();
        assert_eq!(rivals.len(), 2);
    }

    #[test]
    fn test_no_override_uses_default() {
        let elected = elect_strategy("notes.txt", std::iter::empty()).unwrap();
        assert_eq!(elected, MergeStrategy::Replace);
    }
}
