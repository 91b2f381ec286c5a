//! Jar packaging.
//!
//! Entries are collected first and written in path order, so an archive's
//! bytes depend only on its inputs. Every jar gets a `META-INF/MANIFEST.MF`
//! generated here; a manifest found among the inputs is ignored.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use jarship_core::duplicates::{DuplicateAction, DuplicatesStrategy};
use jarship_util::errors::JarshipError;
use jarship_util::fs::{relative_slash_path, walk_files};

pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";

/// Summary of a written archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JarSummary {
    pub path: PathBuf,
    /// File entries, not counting the manifest or directories.
    pub files: usize,
    pub duplicates: Vec<String>,
}

pub struct JarBuilder {
    name: String,
    strategy: DuplicatesStrategy,
    excludes: GlobSet,
    entries: BTreeMap<String, PathBuf>,
    attributes: Vec<(String, String)>,
    duplicates: Vec<String>,
}

impl JarBuilder {
    /// `name` identifies the archive in log messages and errors.
    pub fn new(name: &str, strategy: DuplicatesStrategy, exclude: &[String]) -> miette::Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in exclude {
            let glob = Glob::new(pattern).map_err(|e| JarshipError::Manifest {
                message: format!("invalid exclude pattern '{pattern}': {e}"),
            })?;
            builder.add(glob);
        }
        let excludes = builder.build().map_err(|e| JarshipError::Manifest {
            message: format!("invalid exclude patterns: {e}"),
        })?;
        Ok(Self {
            name: name.to_string(),
            strategy,
            excludes,
            entries: BTreeMap::new(),
            attributes: vec![("Manifest-Version".to_string(), "1.0".to_string())],
            duplicates: Vec::new(),
        })
    }

    /// Add a main attribute to the generated manifest.
    pub fn manifest_attribute(mut self, key: &str, value: &str) -> Self {
        self.attributes.push((key.to_string(), value.to_string()));
        self
    }

    /// Add every file under `root`. Missing roots add nothing.
    /// Returns the number of files taken from this root.
    pub fn add_tree(&mut self, root: &Path) -> miette::Result<usize> {
        let mut added = 0;
        for file in walk_files(root).map_err(JarshipError::Io)? {
            let Some(rel) = relative_slash_path(root, &file) else {
                continue;
            };
            if self.excludes.is_match(&rel) {
                tracing::debug!("{}: excluded {rel}", self.name);
                continue;
            }
            if self.add_file(&rel, &file)? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Add a single file as entry `entry`. Returns whether it was taken.
    pub fn add_file(&mut self, entry: &str, path: &Path) -> miette::Result<bool> {
        if entry.eq_ignore_ascii_case(MANIFEST_PATH) {
            tracing::debug!("{}: ignoring bundled {entry}", self.name);
            return Ok(false);
        }
        if self.entries.contains_key(entry) {
            self.duplicates.push(entry.to_string());
            if self.strategy.resolve(&self.name, entry)? == DuplicateAction::KeepExisting {
                return Ok(false);
            }
        }
        self.entries.insert(entry.to_string(), path.to_path_buf());
        Ok(true)
    }

    pub fn entry_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn manifest_text(&self) -> String {
        let mut text = String::new();
        for (k, v) in &self.attributes {
            text.push_str(&format!("{k}: {v}\r\n"));
        }
        text.push_str("\r\n");
        text
    }

    /// Write the archive to `dest`, replacing any existing file.
    pub fn write(self, dest: &Path) -> miette::Result<JarSummary> {
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).map_err(JarshipError::Io)?;
        }
        let archive_err = |e: &dyn std::fmt::Display| JarshipError::Archive {
            message: format!("{}: {e}", dest.display()),
        };

        let file = File::create(dest).map_err(JarshipError::Io)?;
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default());

        zip.add_directory("META-INF/", options)
            .map_err(|e| archive_err(&e))?;
        zip.start_file(MANIFEST_PATH, options)
            .map_err(|e| archive_err(&e))?;
        zip.write_all(self.manifest_text().as_bytes())
            .map_err(JarshipError::Io)?;

        let mut dirs: BTreeSet<String> = BTreeSet::new();
        dirs.insert("META-INF/".to_string());
        for (entry, source) in &self.entries {
            for dir in parent_dirs(entry) {
                if dirs.insert(dir.clone()) {
                    zip.add_directory(dir, options).map_err(|e| archive_err(&e))?;
                }
            }
            zip.start_file(entry.as_str(), options)
                .map_err(|e| archive_err(&e))?;
            let bytes = std::fs::read(source).map_err(JarshipError::Io)?;
            zip.write_all(&bytes).map_err(JarshipError::Io)?;
        }
        zip.finish().map_err(|e| archive_err(&e))?;

        tracing::debug!(
            "{}: wrote {} entries to {}",
            self.name,
            self.entries.len(),
            dest.display()
        );
        Ok(JarSummary {
            path: dest.to_path_buf(),
            files: self.entries.len(),
            duplicates: self.duplicates,
        })
    }
}

/// `a/b/c.txt` -> `["a/", "a/b/"]`
fn parent_dirs(entry: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut end = 0;
    while let Some(pos) = entry[end..].find('/') {
        end += pos + 1;
        out.push(entry[..end].to_string());
    }
    out
}
