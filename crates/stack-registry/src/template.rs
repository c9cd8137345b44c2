//! Template contribution declarations carried by modules.

use serde::{Deserialize, Serialize};

/// Rule for combining multiple contributions to the same path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergeStrategy {
    /// Highest-priority contribution wins outright.
    Replace,
    /// Recursive deep merge of key-value data.
    MergeStructured,
    /// Line-wise append with de-duplication.
    AppendUnique,
}

impl MergeStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MergeStrategy::Replace => "replace",
            MergeStrategy::MergeStructured => "merge-structured",
            MergeStrategy::AppendUnique => "append-unique",
        }
    }
}

impl std::fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One module's content for a specific target file path.
///
/// `strategy` and `priority` are optional overrides; absent, the composition
/// engine falls back to the file-type default table and the module's own
/// priority respectively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateContribution {
    /// Target path relative to the project root.
    pub path: String,
    /// Inline content, rendered through variable substitution before merging.
    pub content: String,
    #[serde(default)]
    pub strategy: Option<MergeStrategy>,
    #[serde(default)]
    pub priority: Option<i64>,
}
