use miette::Result;

use jarship_ops::context::find_project_root;
use jarship_ops::ops_clean::{self, CleanResult};
use jarship_util::errors::JarshipError;

pub fn exec() -> Result<()> {
    let cwd = std::env::current_dir().map_err(JarshipError::Io)?;
    let project_root = find_project_root(&cwd)?;

    match ops_clean::clean(&project_root)? {
        CleanResult::Cleaned => println!("Cleaned build directory"),
        CleanResult::NothingToClean => println!("Nothing to clean"),
    }
    Ok(())
}
