//! Java build steps.
//!
//! Wraps the JDK tools (`javac`, `javadoc`) and implements resource copying
//! and jar packaging natively, applying the project's duplicate-file policy.

pub mod classpath;
pub mod jar;
pub mod javac;
pub mod javadoc;
pub mod resources;

use std::path::{Path, PathBuf};

/// Collect every `.java` file under the given source roots, sorted.
pub fn collect_java_files(roots: &[PathBuf]) -> std::io::Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for root in roots {
        out.extend(
            jarship_util::fs::walk_files(root)?
                .into_iter()
                .filter(|p| p.extension().is_some_and(|ext| ext == "java")),
        );
    }
    out.sort();
    Ok(out)
}

/// Write an `@argfile` for a JDK tool, one quoted argument per line.
///
/// Keeps command lines short when compiling hundreds of sources.
pub fn write_argfile(path: &Path, args: &[String]) -> std::io::Result<()> {
    let body: Vec<String> = args
        .iter()
        .map(|a| format!("\"{}\"", a.replace('\\', "\\\\").replace('"', "\\\"")))
        .collect();
    std::fs::write(path, body.join("\n"))
}
