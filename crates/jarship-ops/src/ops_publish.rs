//! Operation: publish the `mavenJava` publication.

use jarship_core::task::TaskId;
use jarship_util::errors::JarshipError;

use crate::context::ProjectContext;
use crate::pipeline::{self, PipelineOptions, RunSummary};

/// Options for a publish invocation.
#[derive(Debug, Clone, Default)]
pub struct PublishOptions {
    /// Install into the local repository instead of uploading.
    pub local: bool,
    /// Close the staging repository after uploading.
    pub close: bool,
    /// Close and then release the staging repository.
    pub release: bool,
    /// Print the task plan without running anything.
    pub dry_run: bool,
}

impl PublishOptions {
    /// The task that satisfies these options.
    pub fn target(&self) -> Result<TaskId, JarshipError> {
        if self.local && (self.close || self.release) {
            return Err(JarshipError::Generic {
                message: "--local cannot be combined with --close or --release".to_string(),
            });
        }
        Ok(if self.local {
            TaskId::PublishToMavenLocal
        } else if self.close || self.release {
            TaskId::CloseAndReleaseStagingRepository
        } else {
            TaskId::PublishToSonatype
        })
    }
}

/// A task of a dry run with the reason it would be skipped, if known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedTask {
    pub task: TaskId,
    pub skip_reason: Option<String>,
}

#[derive(Debug)]
pub enum PublishResult {
    Planned(Vec<PlannedTask>),
    Completed(RunSummary),
}

pub async fn publish(
    ctx: &ProjectContext,
    opts: &PublishOptions,
    mut pipeline_options: PipelineOptions,
) -> miette::Result<PublishResult> {
    let target = opts.target()?;
    if opts.dry_run {
        let planned = pipeline::plan(ctx, target)?
            .into_iter()
            .map(|(task, skip_reason)| PlannedTask { task, skip_reason })
            .collect();
        return Ok(PublishResult::Planned(planned));
    }

    pipeline_options.release = opts.release;
    let summary = pipeline::execute(ctx, target, pipeline_options).await?;
    Ok(PublishResult::Completed(summary))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_selection() {
        assert_eq!(
            PublishOptions::default().target().unwrap(),
            TaskId::PublishToSonatype
        );
        let local = PublishOptions {
            local: true,
            ..Default::default()
        };
        assert_eq!(local.target().unwrap(), TaskId::PublishToMavenLocal);
        let release = PublishOptions {
            release: true,
            ..Default::default()
        };
        assert_eq!(
            release.target().unwrap(),
            TaskId::CloseAndReleaseStagingRepository
        );
        let conflicting = PublishOptions {
            local: true,
            close: true,
            ..Default::default()
        };
        assert!(conflicting.target().is_err());
    }
}
