//! The weighted search index and its queries.

use serde::{Deserialize, Serialize};
use stack_registry::{Category, Module};

use crate::score::{field_score, substring_score};

const WEIGHT_NAME: u32 = 10;
const WEIGHT_TAG: u32 = 6;
const WEIGHT_DISPLAY: u32 = 5;
const WEIGHT_DESCRIPTION: u32 = 2;

/// Category filter applied after ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub category: Option<Category>,
}

/// One ranked result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub name: String,
    /// Display name when declared, else the module name.
    pub label: String,
    pub category: Category,
    pub score: u32,
}

struct IndexEntry {
    name: String,
    label: String,
    category: Category,
    // Lowercased match fields.
    name_lower: String,
    display_lower: Option<String>,
    description_lower: String,
    tags_lower: Vec<String>,
}

/// Weighted fuzzy index over module name, display name, description, and
/// tags. Built from a registry snapshot; read-only afterwards.
pub struct SearchIndex {
    entries: Vec<IndexEntry>,
}

impl SearchIndex {
    /// Snapshot the given modules into an index.
    pub fn build<'a>(modules: impl Iterator<Item = &'a Module>) -> Self {
        let entries = modules
            .map(|module| IndexEntry {
                name: module.name.clone(),
                label: module.label().to_string(),
                category: module.category,
                name_lower: module.name.to_lowercase(),
                display_lower: module.display_name.as_deref().map(str::to_lowercase),
                description_lower: module.description.to_lowercase(),
                tags_lower: module.tags.iter().map(|t| t.to_lowercase()).collect(),
            })
            .collect();
        Self { entries }
    }

    /// Rank by weighted match quality, then filter by category.
    ///
    /// Ordering is deterministic: score descending, name ascending.
    pub fn search(&self, query: &str, filters: &SearchFilters) -> Vec<SearchHit> {
        let query = query.trim().to_lowercase();
        let mut hits: Vec<SearchHit> = self
            .entries
            .iter()
            .filter(|entry| {
                filters
                    .category
                    .is_none_or(|category| entry.category == category)
            })
            .filter_map(|entry| {
                let score = entry.score(&query);
                (score > 0).then(|| SearchHit {
                    name: entry.name.clone(),
                    label: entry.label.clone(),
                    category: entry.category,
                    score,
                })
            })
            .collect();
        hits.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.name.cmp(&b.name)));
        hits
    }

    /// Ranked name completions for interactive use.
    pub fn suggest(&self, prefix: &str, limit: usize) -> Vec<String> {
        let prefix = prefix.trim().to_lowercase();
        let mut names: Vec<&str> = self
            .entries
            .iter()
            .filter(|entry| entry.name_lower.starts_with(&prefix))
            .map(|entry| entry.name.as_str())
            .collect();
        names.sort();
        names.truncate(limit);
        names.into_iter().map(str::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IndexEntry {
    /// Best weighted field score for this entry.
    fn score(&self, query: &str) -> u32 {
        let mut best = field_score(query, &self.name_lower) * WEIGHT_NAME;
        for tag in &self.tags_lower {
            best = best.max(field_score(query, tag) * WEIGHT_TAG);
        }
        if let Some(ref display) = self.display_lower {
            best = best.max(field_score(query, display) * WEIGHT_DISPLAY);
        }
        best = best.max(substring_score(query, &self.description_lower) * WEIGHT_DESCRIPTION);
        best
    }
}
