//! `javadoc` invocation.
//!
//! Documentation generation is best-effort unless the project asks for
//! `javadoc-fail-on-error`: a failing or missing `javadoc` is reported as a
//! warning and the caller still packages whatever was produced.

use std::path::{Path, PathBuf};

use jarship_toolchain::jdk::JdkInfo;
use jarship_util::errors::JarshipError;
use jarship_util::process::CommandBuilder;

use crate::classpath::to_classpath_string;

#[derive(Debug, Clone)]
pub struct JavadocOptions {
    pub encoding: String,
    /// Flags for the javadoc JVM, each passed as `-J<flag>`.
    pub jvm_flags: Vec<String>,
    pub fail_on_error: bool,
}

/// What happened when javadoc ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JavadocOutcome {
    Generated,
    /// Nothing to document.
    NoSources,
    /// javadoc failed or could not be started; the output may be partial.
    Failed { reason: String },
}

pub struct JavadocTool {
    executable: PathBuf,
    options: JavadocOptions,
}

impl JavadocTool {
    pub fn new(jdk: &JdkInfo, options: JavadocOptions) -> Self {
        Self {
            executable: jdk.javadoc(),
            options,
        }
    }

    /// Use an explicit javadoc binary.
    pub fn with_executable(executable: PathBuf, options: JavadocOptions) -> Self {
        Self {
            executable,
            options,
        }
    }

    pub fn arguments(&self, classpath: &[PathBuf], output_dir: &Path, sources: &[PathBuf]) -> Vec<String> {
        let mut args: Vec<String> = self
            .options
            .jvm_flags
            .iter()
            .map(|f| format!("-J{f}"))
            .collect();
        args.push("-encoding".to_string());
        args.push(self.options.encoding.clone());
        args.push("-d".to_string());
        args.push(output_dir.to_string_lossy().to_string());
        if !classpath.is_empty() {
            args.push("-classpath".to_string());
            args.push(to_classpath_string(classpath));
        }
        args.push("-quiet".to_string());
        args.extend(sources.iter().map(|p| p.to_string_lossy().to_string()));
        args
    }

    /// Generate API docs for `sources` into `output_dir`.
    ///
    /// Returns `Err` only for I/O problems setting up the run, or for a
    /// javadoc failure when `fail_on_error` is set.
    pub fn generate(
        &self,
        sources: &[PathBuf],
        classpath: &[PathBuf],
        output_dir: &Path,
        work_dir: &Path,
    ) -> miette::Result<JavadocOutcome> {
        std::fs::create_dir_all(output_dir).map_err(JarshipError::Io)?;
        if sources.is_empty() {
            return Ok(JavadocOutcome::NoSources);
        }
        std::fs::create_dir_all(work_dir).map_err(JarshipError::Io)?;

        // -J flags are not allowed inside an argfile.
        let (jvm_args, file_args): (Vec<String>, Vec<String>) = self
            .arguments(classpath, output_dir, sources)
            .into_iter()
            .partition(|a| a.starts_with("-J"));
        let argfile = work_dir.join("javadoc.args");
        crate::write_argfile(&argfile, &file_args).map_err(JarshipError::Io)?;

        let result = CommandBuilder::new(self.executable.to_string_lossy().to_string())
            .args(jvm_args)
            .arg(format!("@{}", argfile.to_string_lossy()))
            .exec();

        let reason = match result {
            Ok(output) if output.status.success() => return Ok(JavadocOutcome::Generated),
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                let errors = stderr.lines().filter(|l| l.contains("error:")).count();
                format!("javadoc exited with {} ({errors} error(s))", output.status)
            }
            Err(e) => format!("could not run {}: {e}", self.executable.display()),
        };

        if self.options.fail_on_error {
            return Err(JarshipError::Compilation { message: reason }.into());
        }
        tracing::warn!("{reason}; continuing with partial documentation");
        Ok(JavadocOutcome::Failed { reason })
    }
}
