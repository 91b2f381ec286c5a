//! Command dispatch and handler modules.

mod assemble;
mod clean;
mod init;
mod properties;
mod publish;
mod tasks;

use miette::Result;

use jarship_ops::context::ProjectContext;
use jarship_util::errors::JarshipError;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Assemble => assemble::exec(&cli.properties).await,
        Command::Publish {
            local,
            close,
            release,
            dry_run,
        } => {
            let opts = jarship_ops::ops_publish::PublishOptions {
                local,
                close,
                release,
                dry_run,
            };
            publish::exec(&cli.properties, &opts).await
        }
        Command::Tasks { all } => tasks::exec(all),
        Command::Properties { reveal } => properties::exec(&cli.properties, reveal),
        Command::Clean => clean::exec(),
        Command::Init { force } => init::exec(force),
    }
}

/// Load the project enclosing the current directory.
fn load_context(properties: &[(String, String)]) -> Result<ProjectContext> {
    let cwd = std::env::current_dir().map_err(JarshipError::Io)?;
    ProjectContext::discover(&cwd, properties)
}
