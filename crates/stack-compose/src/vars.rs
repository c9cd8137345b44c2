//! Variable substitution and conditional blocks.
//!
//! Rendering happens per contribution, before merging. Placeholders look
//! like `{{project_name}}`; conditional blocks gate on the resolved module
//! set:
//!
//! ```text
//! {{#if module:jwt-auth}} ... {{/if}}
//! {{#if not module:jwt-auth}} ... {{/if}}
//! ```
//!
//! Unknown placeholders are left verbatim with a recorded warning so a typo
//! in a descriptor is visible instead of silently blanked. Conditional
//! blocks do not nest.

use std::collections::{BTreeMap, BTreeSet};

use regex::Regex;

/// Substitution context: variables plus the resolved module set.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    variables: BTreeMap<String, String>,
    present: BTreeSet<String>,
}

impl TemplateContext {
    /// A context seeded with the project name and its derived lexical-case
    /// variants (`project_name`, `_kebab`, `_snake`, `_pascal`, `_camel`).
    pub fn for_project(name: &str) -> Self {
        let mut context = Self::default();
        context.set("project_name", name);
        context.set("project_name_kebab", to_kebab(name));
        context.set("project_name_snake", to_snake(name));
        context.set("project_name_pascal", to_pascal(name));
        context.set("project_name_camel", to_camel(name));
        context
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    pub fn var(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Record a module as present in the resolved set.
    pub fn mark_present(&mut self, module: impl Into<String>) {
        self.present.insert(module.into());
    }

    pub fn is_present(&self, module: &str) -> bool {
        self.present.contains(module)
    }
}

fn words(name: &str) -> Vec<String> {
    name.split(['-', '_', ' ', '.'])
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn to_kebab(name: &str) -> String {
    words(name).join("-")
}

pub fn to_snake(name: &str) -> String {
    words(name).join("_")
}

pub fn to_pascal(name: &str) -> String {
    words(name).iter().map(|w| capitalize(w)).collect()
}

pub fn to_camel(name: &str) -> String {
    let pascal = to_pascal(name);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Template renderer: conditionals first, then placeholders.
pub struct Renderer {
    placeholder: Regex,
    conditional: Regex,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        // Both patterns are compile-time constants; failure is a defect in
        // this file, not an input condition.
        let placeholder = Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}")
            .expect("placeholder pattern is valid");
        let conditional = Regex::new(
            r"(?s)\{\{#if\s+(not\s+)?module:([A-Za-z0-9_-]+)\s*\}\}\r?\n?(.*?)\{\{/if\}\}\r?\n?",
        )
        .expect("conditional pattern is valid");
        Self {
            placeholder,
            conditional,
        }
    }

    /// Render one contribution's content against the context.
    ///
    /// Returns the rendered text and any warnings (unknown placeholders).
    pub fn render(&self, content: &str, context: &TemplateContext) -> (String, Vec<String>) {
        let mut warnings = Vec::new();

        let after_conditionals = self.conditional.replace_all(content, |caps: &regex::Captures| {
            let negated = caps.get(1).is_some();
            let module = &caps[2];
            let body = &caps[3];
            if context.is_present(module) != negated {
                body.to_string()
            } else {
                String::new()
            }
        });

        let rendered = self
            .placeholder
            .replace_all(&after_conditionals, |caps: &regex::Captures| {
                let name = &caps[1];
                match context.var(name) {
                    Some(value) => value.to_string(),
                    None => {
                        warnings.push(format!("unknown template variable '{{{{{name}}}}}'"));
                        caps[0].to_string()
                    }
                }
            })
            .into_owned();

        (rendered, warnings)
    }
}
