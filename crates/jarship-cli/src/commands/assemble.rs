use miette::Result;

use jarship_ops::ops_assemble;
use jarship_ops::pipeline::PipelineOptions;
use jarship_util::progress::status_info;

pub async fn exec(properties: &[(String, String)]) -> Result<()> {
    let ctx = super::load_context(properties)?;
    ops_assemble::assemble(&ctx, PipelineOptions::default()).await?;
    status_info("Archives", &ctx.layout.libs_dir.display().to_string());
    Ok(())
}
