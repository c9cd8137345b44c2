//! Content merging: structured deep merge and unique line append.
//!
//! Structured merging works over a common value model (`serde_json::Value`)
//! regardless of the on-disk format; JSON, YAML, and TOML contributions are
//! parsed into it and the merged tree is re-emitted in the target path's
//! format. Map iteration is ordered, so merged output is byte-stable.

use std::path::Path;

use serde_json::Value;

/// Structured-data formats the merge engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Yaml,
    Toml,
}

impl DataFormat {
    /// Detect from a target path's extension.
    pub fn from_path(path: &str) -> Option<Self> {
        let extension = Path::new(path).extension()?.to_str()?;
        match extension.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Toml => "toml",
        }
    }

    /// Parse text in this format into the common value model.
    pub fn parse(&self, content: &str) -> Result<Value, String> {
        match self {
            Self::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            Self::Toml => {
                let value: toml::Value = toml::from_str(content).map_err(|e| e.to_string())?;
                serde_json::to_value(value).map_err(|e| e.to_string())
            }
        }
    }

    /// Emit a value tree back in this format.
    pub fn emit(&self, value: &Value) -> Result<String, String> {
        match self {
            Self::Json => serde_json::to_string_pretty(value)
                .map(|s| s + "\n")
                .map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::to_string(value).map_err(|e| e.to_string()),
            Self::Toml => toml::to_string_pretty(value).map_err(|e| e.to_string()),
        }
    }
}

/// One parsed contribution for a structured merge.
#[derive(Debug, Clone)]
pub struct StructuredContribution {
    pub module: String,
    pub priority: i64,
    pub value: Value,
}

/// Deep-merge contributions in ascending priority order.
///
/// Nested mappings merge key-by-key; list values concatenate with
/// de-duplication; scalar collisions resolve to the higher priority (later
/// in order at equal priority) and record a warning naming the key path.
pub fn merge_structured(
    mut contributions: Vec<StructuredContribution>,
    warnings: &mut Vec<String>,
) -> Value {
    // Stable: equal priorities keep resolution order, so the later module
    // overlays the earlier one.
    contributions.sort_by_key(|c| c.priority);

    let mut iter = contributions.into_iter();
    let Some(first) = iter.next() else {
        return Value::Object(serde_json::Map::new());
    };

    let mut merged = first.value;
    for contribution in iter {
        merge_into(
            &mut merged,
            contribution.value,
            &contribution.module,
            "",
            warnings,
        );
    }
    merged
}

fn merge_into(
    base: &mut Value,
    overlay: Value,
    overlay_module: &str,
    key_path: &str,
    warnings: &mut Vec<String>,
) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                let child_path = if key_path.is_empty() {
                    key.clone()
                } else {
                    format!("{key_path}.{key}")
                };
                match base_map.get_mut(&key) {
                    Some(existing) => {
                        merge_into(existing, value, overlay_module, &child_path, warnings)
                    }
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (Value::Array(base_items), Value::Array(overlay_items)) => {
            for item in overlay_items {
                if !base_items.contains(&item) {
                    base_items.push(item);
                }
            }
        }
        (base_slot, overlay_value) => {
            if *base_slot != overlay_value {
                warnings.push(format!(
                    "'{overlay_module}' overrides value at '{key_path}'"
                ));
            }
            *base_slot = overlay_value;
        }
    }
}

/// Concatenate line-oriented parts, dropping exact duplicate lines and
/// preserving first-seen order.
pub fn append_unique(parts: &[&str]) -> String {
    let mut seen = std::collections::BTreeSet::new();
    let mut lines = Vec::new();
    for part in parts {
        for line in part.lines() {
            if seen.insert(line.to_string()) {
                lines.push(line.to_string());
            }
        }
    }
    let mut output = lines.join("\n");
    output.push('\n');
    output
}
