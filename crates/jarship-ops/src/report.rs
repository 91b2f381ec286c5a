//! Machine-readable run report for CI builds.

use std::path::PathBuf;

use serde::Serialize;

use jarship_util::errors::JarshipError;

use crate::context::{signing_summary, ProjectContext};
use crate::pipeline::{RunSummary, TaskOutcome};

/// Project property that switches report writing on.
pub const CI_PROPERTY: &str = "envIsCi";

pub const REPORT_FILE: &str = "run.json";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub project: String,
    pub target: String,
    pub started_at: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub signing: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staged_repository: Option<String>,
    pub tasks: Vec<TaskEntry>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskEntry {
    pub name: String,
    pub outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub duration_ms: u128,
}

impl RunReport {
    pub fn new(ctx: &ProjectContext, summary: &RunSummary) -> Self {
        let tasks = summary
            .records
            .iter()
            .map(|r| TaskEntry {
                name: r.task.name().to_string(),
                outcome: r.outcome.label().to_string(),
                reason: match &r.outcome {
                    TaskOutcome::Skipped { reason } | TaskOutcome::FailedIgnored { reason } => {
                        Some(reason.clone())
                    }
                    _ => None,
                },
                duration_ms: r.duration.as_millis(),
            })
            .collect();
        Self {
            project: ctx.coordinates().to_string(),
            target: summary.target.name().to_string(),
            started_at: summary.started_at.to_rfc3339(),
            success: summary.success(),
            error: summary.error.clone(),
            signing: signing_summary(&ctx.signing),
            staged_repository: summary.staged_repository.clone(),
            tasks,
        }
    }
}

/// Write `build/reports/run.json`; returns its path.
pub fn write(ctx: &ProjectContext, summary: &RunSummary) -> miette::Result<PathBuf> {
    let report = RunReport::new(ctx, summary);
    let json = serde_json::to_string_pretty(&report).map_err(|e| JarshipError::Generic {
        message: format!("Failed to serialize run report: {e}"),
    })?;
    std::fs::create_dir_all(&ctx.layout.reports_dir).map_err(JarshipError::Io)?;
    let path = ctx.layout.reports_dir.join(REPORT_FILE);
    std::fs::write(&path, json).map_err(JarshipError::Io)?;
    Ok(path)
}
