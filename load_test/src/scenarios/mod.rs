//! Scenarios - which task set the simulated users pick from

use std::path::Path;

use clap::ValueEnum;

use crate::error::ConfigError;
use crate::tasks::{self, TaskSet, TemplateSearch};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScenarioKind {
    /// Every built-in search task, fixed payloads
    Catalog,
    /// Only the payload read from the template file
    Template,
    /// Built-in tasks plus the template task
    Mixed,
}

/// Build the task set for `kind`, optionally restricted to `only`.
pub fn build_task_set(
    kind: ScenarioKind,
    template_file: &Path,
    only: &[String],
) -> Result<TaskSet, ConfigError> {
    let full = match kind {
        ScenarioKind::Catalog => tasks::catalog(),
        ScenarioKind::Template => TaskSet::new().with(TemplateSearch::new(template_file)),
        ScenarioKind::Mixed => tasks::catalog().with(TemplateSearch::new(template_file)),
    };

    if only.is_empty() {
        return Ok(full);
    }

    let mut selected = TaskSet::new();
    for name in only {
        let task = full.get(name).ok_or_else(|| {
            ConfigError::Invalid(format!(
                "unknown task '{}' for scenario {:?}; available: {}",
                name,
                kind,
                full.operation_names().join(", ")
            ))
        })?;
        selected.register_shared(task);
    }
    Ok(selected)
}
