//! The composition pass: ordered modules → project tree.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

use stack_registry::{MergeStrategy, Module};

use crate::error::{Error, Result};
use crate::merge::{self, DataFormat, StructuredContribution};
use crate::strategy;
use crate::vars::{Renderer, TemplateContext};
use crate::writer;

/// A per-path composition failure. All other paths still compose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathFailure {
    pub path: String,
    pub reason: String,
}

/// What a composition run did, per path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeReport {
    /// Paths that did not exist before this run.
    pub created: Vec<String>,
    /// Paths merged into (or replacing) existing content.
    pub merged: Vec<String>,
    pub warnings: Vec<String>,
    pub failed: Vec<PathFailure>,
}

/// One rendered contribution queued for a target path.
struct PendingContribution {
    module: String,
    priority: i64,
    strategy: Option<MergeStrategy>,
    content: String,
}

/// Composes module template contributions into a target directory.
pub struct Composer {
    project_root: PathBuf,
    renderer: Renderer,
}

impl Composer {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            renderer: Renderer::new(),
        }
    }

    /// Compose every contribution of the ordered module set.
    ///
    /// The context is augmented with the resolved set for conditional
    /// blocks. Fails only when the target directory itself cannot be
    /// created; per-path problems land in the report.
    pub fn compose(&self, order: &[Module], context: &TemplateContext) -> Result<ComposeReport> {
        fs::create_dir_all(&self.project_root).map_err(|e| Error::TargetUnwritable {
            path: self.project_root.clone(),
            source: e,
        })?;

        let mut context = context.clone();
        for module in order {
            context.mark_present(module.name.clone());
        }

        let mut report = ComposeReport::default();
        let contributions = self.collect(order, &context, &mut report);

        for (path, pending) in &contributions {
            match self.compose_path(path, pending, &mut report.warnings) {
                Ok(outcome) => match outcome {
                    PathOutcome::Created => report.created.push(path.clone()),
                    PathOutcome::Merged => report.merged.push(path.clone()),
                },
                Err(e) => {
                    tracing::warn!("composition failed for '{path}': {e}");
                    report.failed.push(PathFailure {
                        path: path.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        tracing::debug!(
            "composed {} created, {} merged, {} failed",
            report.created.len(),
            report.merged.len(),
            report.failed.len()
        );
        Ok(report)
    }

    /// Render each contribution and group them by target path, preserving
    /// module order within a path.
    fn collect(
        &self,
        order: &[Module],
        context: &TemplateContext,
        report: &mut ComposeReport,
    ) -> BTreeMap<String, Vec<PendingContribution>> {
        let mut by_path: BTreeMap<String, Vec<PendingContribution>> = BTreeMap::new();
        for module in order {
            for template in &module.templates {
                let (content, render_warnings) = self.renderer.render(&template.content, context);
                for warning in render_warnings {
                    report
                        .warnings
                        .push(format!("{} ({}): {warning}", template.path, module.name));
                }
                by_path
                    .entry(template.path.clone())
                    .or_default()
                    .push(PendingContribution {
                        module: module.name.clone(),
                        priority: template.priority.unwrap_or(module.priority),
                        strategy: template.strategy,
                        content,
                    });
            }
        }
        by_path
    }

    fn compose_path(
        &self,
        path: &str,
        pending: &[PendingContribution],
        warnings: &mut Vec<String>,
    ) -> Result<PathOutcome> {
        let relative = safe_relative_path(path)?;
        let target = self.project_root.join(&relative);
        let existed = target.exists();

        let elected = strategy::elect_strategy(
            path,
            pending.iter().filter_map(|c| c.strategy),
        )
        .map_err(|strategies| Error::MergeConflict {
            path: path.to_string(),
            strategies,
        })?;

        let existing = if existed {
            Some(fs::read_to_string(&target).map_err(|e| Error::io(&target, e))?)
        } else {
            None
        };

        let content = match elected {
            MergeStrategy::Replace => compose_replace(path, pending, warnings),
            MergeStrategy::AppendUnique => {
                let mut parts: Vec<&str> = Vec::new();
                if let Some(ref existing) = existing {
                    parts.push(existing);
                }
                parts.extend(pending.iter().map(|c| c.content.as_str()));
                merge::append_unique(&parts)
            }
            MergeStrategy::MergeStructured => {
                compose_structured(path, pending, existing.as_deref(), warnings)?
            }
        };

        writer::write_atomic(&target, content.as_bytes())?;
        Ok(if existed {
            PathOutcome::Merged
        } else {
            PathOutcome::Created
        })
    }
}

enum PathOutcome {
    Created,
    Merged,
}

/// Highest priority wins; ties go to the later module in installation
/// order. Discarded rivals are reported when more than one contribution
/// targeted the path.
fn compose_replace(
    path: &str,
    pending: &[PendingContribution],
    warnings: &mut Vec<String>,
) -> String {
    let winner_index = pending
        .iter()
        .enumerate()
        .max_by(|(i, a), (j, b)| a.priority.cmp(&b.priority).then(i.cmp(j)))
        .map(|(i, _)| i)
        .unwrap_or(0);

    if pending.len() > 1 {
        let discarded: Vec<&str> = pending
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != winner_index)
            .map(|(_, c)| c.module.as_str())
            .collect();
        warnings.push(format!(
            "{path}: kept content from '{}', discarded {}",
            pending[winner_index].module,
            discarded.join(", ")
        ));
    }

    pending[winner_index].content.clone()
}

/// Parse every contribution (and the existing file as the lowest-priority
/// base), deep-merge, and re-emit in the path's format.
fn compose_structured(
    path: &str,
    pending: &[PendingContribution],
    existing: Option<&str>,
    warnings: &mut Vec<String>,
) -> Result<String> {
    let format = DataFormat::from_path(path).ok_or_else(|| Error::UnsupportedFormat {
        path: path.to_string(),
    })?;

    let mut contributions = Vec::with_capacity(pending.len() + 1);
    if let Some(existing) = existing {
        let value = format.parse(existing).map_err(|message| Error::ContentParse {
            path: path.to_string(),
            module: "<existing file>".to_string(),
            format: format.as_str().to_string(),
            message,
        })?;
        contributions.push(StructuredContribution {
            module: "<existing file>".to_string(),
            priority: i64::MIN,
            value,
        });
    }
    for contribution in pending {
        let value = format
            .parse(&contribution.content)
            .map_err(|message| Error::ContentParse {
                path: path.to_string(),
                module: contribution.module.clone(),
                format: format.as_str().to_string(),
                message,
            })?;
        contributions.push(StructuredContribution {
            module: contribution.module.clone(),
            priority: contribution.priority,
            value,
        });
    }

    let merged = merge::merge_structured(contributions, warnings);
    format.emit(&merged).map_err(|message| Error::ContentParse {
        path: path.to_string(),
        module: "<merged output>".to_string(),
        format: format.as_str().to_string(),
        message,
    })
}

/// Reject template paths that would land outside the project directory.
fn safe_relative_path(path: &str) -> Result<PathBuf> {
    let relative = Path::new(path);
    if relative.is_absolute()
        || relative
            .components()
            .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(Error::UnsafePath {
            path: path.to_string(),
        });
    }
    Ok(relative.to_path_buf())
}
