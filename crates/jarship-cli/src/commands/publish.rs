use console::Style;
use miette::Result;

use jarship_ops::ops_publish::{self, PublishOptions, PublishResult};
use jarship_ops::pipeline::PipelineOptions;

pub async fn exec(properties: &[(String, String)], opts: &PublishOptions) -> Result<()> {
    let ctx = super::load_context(properties)?;
    match ops_publish::publish(&ctx, opts, PipelineOptions::default()).await? {
        PublishResult::Planned(plan) => {
            let dim = Style::new().dim();
            println!("Tasks for {} (dry run):", ctx.coordinates());
            for step in plan {
                match step.skip_reason {
                    Some(reason) => println!(
                        "  {} {}",
                        step.task,
                        dim.apply_to(format!("SKIPPED ({reason})"))
                    ),
                    None => println!("  {}", step.task),
                }
            }
        }
        PublishResult::Completed(summary) => {
            if let Some(id) = summary.staged_repository {
                println!("Staging repository: {id}");
            }
        }
    }
    Ok(())
}
