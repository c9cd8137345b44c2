//! Module categories and the exclusivity policy.
//!
//! Categories are a closed set; category-specific behavior lives in data
//! tables keyed by the enum rather than a type hierarchy, keeping the
//! resolver and composition engine category-agnostic.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed classification of a module.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    FrontendFramework,
    UiLibrary,
    BackendService,
    AuthProvider,
    StateManager,
    Other,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: &'static [Category] = &[
        Category::FrontendFramework,
        Category::UiLibrary,
        Category::BackendService,
        Category::AuthProvider,
        Category::StateManager,
        Category::Other,
    ];

    /// The kebab-case name used in descriptors and CLI flags.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::FrontendFramework => "frontend-framework",
            Category::UiLibrary => "ui-library",
            Category::BackendService => "backend-service",
            Category::AuthProvider => "auth-provider",
            Category::StateManager => "state-manager",
            Category::Other => "other",
        }
    }

    /// Parse a kebab-case category name.
    pub fn parse(s: &str) -> Option<Self> {
        Category::ALL.iter().copied().find(|c| c.as_str() == s)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declarative pick-exactly-one configuration per category.
///
/// Exclusivity is registry configuration, not a naming convention: callers
/// may reconfigure which categories admit at most one module per project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPolicy {
    exclusive: BTreeSet<Category>,
}

impl Default for CategoryPolicy {
    /// The stock policy: one frontend framework, one backend service, one
    /// auth provider, one state manager. UI libraries and `other` modules
    /// stack freely.
    fn default() -> Self {
        Self {
            exclusive: [
                Category::FrontendFramework,
                Category::BackendService,
                Category::AuthProvider,
                Category::StateManager,
            ]
            .into_iter()
            .collect(),
        }
    }
}

impl CategoryPolicy {
    /// A policy with no exclusive categories.
    pub fn permissive() -> Self {
        Self {
            exclusive: BTreeSet::new(),
        }
    }

    pub fn is_exclusive(&self, category: Category) -> bool {
        self.exclusive.contains(&category)
    }

    pub fn set_exclusive(&mut self, category: Category, exclusive: bool) {
        if exclusive {
            self.exclusive.insert(category);
        } else {
            self.exclusive.remove(&category);
        }
    }

    /// Exclusive categories in deterministic order.
    pub fn exclusive_categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.exclusive.iter().copied()
    }
}
