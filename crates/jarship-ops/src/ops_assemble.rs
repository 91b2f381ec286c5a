//! Operation: compile and build every archive of the publication.

use jarship_core::task::TaskId;

use crate::context::ProjectContext;
use crate::pipeline::{self, PipelineOptions, RunSummary};

/// Run `assemble`: the primary, sources, javadoc and doc jars end up in
/// `build/libs/`.
pub async fn assemble(ctx: &ProjectContext, options: PipelineOptions) -> miette::Result<RunSummary> {
    pipeline::execute(ctx, TaskId::Assemble, options).await
}
