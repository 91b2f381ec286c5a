//! `processResources`: copy resource trees into the build directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use jarship_core::duplicates::{DuplicateAction, DuplicatesStrategy};
use jarship_util::errors::JarshipError;
use jarship_util::fs::{relative_slash_path, walk_files};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CopyReport {
    pub copied: usize,
    /// Relative paths supplied by more than one input root.
    pub duplicates: Vec<String>,
}

/// Copy every file under `roots` into `dest`, keeping relative paths.
///
/// When two roots provide the same relative path, `strategy` decides which
/// one ends up in `dest`.
pub fn copy_resources(
    roots: &[PathBuf],
    dest: &Path,
    strategy: DuplicatesStrategy,
) -> miette::Result<CopyReport> {
    let mut chosen: BTreeMap<String, PathBuf> = BTreeMap::new();
    let mut report = CopyReport::default();

    for root in roots {
        for file in walk_files(root).map_err(JarshipError::Io)? {
            let Some(rel) = relative_slash_path(root, &file) else {
                continue;
            };
            if chosen.contains_key(&rel) {
                report.duplicates.push(rel.clone());
                match strategy.resolve("processResources", &rel)? {
                    DuplicateAction::KeepExisting => continue,
                    DuplicateAction::Replace => {}
                }
            }
            chosen.insert(rel, file);
        }
    }

    std::fs::create_dir_all(dest).map_err(JarshipError::Io)?;
    for (rel, source) in &chosen {
        let target = rel.split('/').fold(dest.to_path_buf(), |p, part| p.join(part));
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(JarshipError::Io)?;
        }
        std::fs::copy(source, &target).map_err(JarshipError::Io)?;
        report.copied += 1;
    }
    tracing::debug!("copied {} resource file(s) to {}", report.copied, dest.display());
    Ok(report)
}
