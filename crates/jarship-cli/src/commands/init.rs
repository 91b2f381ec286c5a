use miette::Result;

use jarship_ops::ops_init;
use jarship_util::errors::JarshipError;

pub fn exec(force: bool) -> Result<()> {
    let cwd = std::env::current_dir().map_err(JarshipError::Io)?;
    let result = ops_init::init(&cwd, force)?;

    println!("Initialized jarship project in {}", cwd.display());
    println!("  wrote {}", result.manifest.display());
    if let Some(props) = result.properties {
        println!("  wrote {}", props.display());
    }
    Ok(())
}
