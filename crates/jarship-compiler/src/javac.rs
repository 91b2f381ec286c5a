//! `javac` invocation and diagnostic parsing.

use std::path::{Path, PathBuf};

use jarship_toolchain::compat::Compatibility;
use jarship_toolchain::jdk::JdkInfo;
use jarship_util::errors::JarshipError;
use jarship_util::process::CommandBuilder;

use crate::classpath::to_classpath_string;

/// One `javac` invocation: sources, classpath and output directory.
#[derive(Debug, Clone)]
pub struct CompilationUnit {
    pub sources: Vec<PathBuf>,
    pub classpath: Vec<PathBuf>,
    pub output_dir: PathBuf,
    /// Extra `javac` arguments.
    pub compiler_args: Vec<String>,
}

/// The result of compiling a unit.
#[derive(Debug)]
pub struct CompilationOutput {
    pub classes_dir: PathBuf,
    pub success: bool,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationOutput {
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == DiagnosticSeverity::Error)
    }
}

/// A single compiler diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub message: String,
    pub file: Option<String>,
    pub line: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

/// Compiler backend using the JDK's `javac`.
pub struct JavaCompiler {
    jdk: JdkInfo,
    compat: Compatibility,
}

impl JavaCompiler {
    pub fn new(jdk: JdkInfo, compat: Compatibility) -> Self {
        Self { jdk, compat }
    }

    /// Argument list for `unit`, excluding the program name.
    pub fn arguments(&self, unit: &CompilationUnit) -> Vec<String> {
        let mut args = vec![
            "-d".to_string(),
            unit.output_dir.to_string_lossy().to_string(),
        ];
        args.extend(self.compat.javac_args());
        if !unit.classpath.is_empty() {
            args.push("-classpath".to_string());
            args.push(to_classpath_string(&unit.classpath));
        }
        args.extend(unit.compiler_args.iter().cloned());
        args.extend(unit.sources.iter().map(|p| p.to_string_lossy().to_string()));
        args
    }

    /// Compile `unit`. A non-zero exit is reported through
    /// [`CompilationOutput::success`], not as an `Err`.
    pub fn compile(&self, unit: &CompilationUnit, work_dir: &Path) -> miette::Result<CompilationOutput> {
        std::fs::create_dir_all(&unit.output_dir).map_err(JarshipError::Io)?;
        if unit.sources.is_empty() {
            return Ok(CompilationOutput {
                classes_dir: unit.output_dir.clone(),
                success: true,
                diagnostics: vec![],
            });
        }

        std::fs::create_dir_all(work_dir).map_err(JarshipError::Io)?;
        let argfile = work_dir.join("javac.args");
        crate::write_argfile(&argfile, &self.arguments(unit)).map_err(JarshipError::Io)?;

        let javac = self.jdk.javac();
        tracing::debug!("running {} @{}", javac.display(), argfile.display());
        let output = CommandBuilder::new(javac.to_string_lossy().to_string())
            .arg(format!("@{}", argfile.to_string_lossy()))
            .env("JAVA_HOME", self.jdk.home.to_string_lossy().to_string())
            .exec()
            .map_err(|e| JarshipError::Compilation {
                message: format!("Failed to run javac: {e}"),
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        Ok(CompilationOutput {
            classes_dir: unit.output_dir.clone(),
            success: output.status.success(),
            diagnostics: parse_diagnostics(&stderr),
        })
    }
}

/// Parse `javac` output lines of the form `File.java:12: error: message`.
pub fn parse_diagnostics(output: &str) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    for line in output.lines() {
        for (marker, severity) in [
            (": error: ", DiagnosticSeverity::Error),
            (": warning: ", DiagnosticSeverity::Warning),
        ] {
            let Some(pos) = line.find(marker) else {
                continue;
            };
            let location = &line[..pos];
            let message = line[pos + marker.len()..].to_string();
            let (file, line_no) = match location.rsplit_once(':') {
                Some((f, n)) => match n.parse::<u32>() {
                    Ok(n) => (Some(f.to_string()), Some(n)),
                    Err(_) => (Some(location.to_string()), None),
                },
                None => (Some(location.to_string()), None),
            };
            out.push(Diagnostic {
                severity,
                message,
                file,
                line: line_no,
            });
            break;
        }
        if let Some(message) = line.strip_prefix("error: ") {
            out.push(Diagnostic {
                severity: DiagnosticSeverity::Error,
                message: message.to_string(),
                file: None,
                line: None,
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_error_and_warning() {
        let out = "src/main/java/com/icl/saxon/Foo.java:12: error: cannot find symbol\n\
                   \x20   Bar x;\n\
                   src/main/java/com/icl/saxon/Baz.java:3: warning: [deprecation] old\n\
                   1 error\n";
        let diags = parse_diagnostics(out);
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].severity, DiagnosticSeverity::Error);
        assert_eq!(diags[0].line, Some(12));
        assert_eq!(
            diags[0].file.as_deref(),
            Some("src/main/java/com/icl/saxon/Foo.java")
        );
        assert_eq!(diags[0].message, "cannot find symbol");
        assert_eq!(diags[1].severity, DiagnosticSeverity::Warning);
    }

    #[test]
    fn parses_global_error() {
        let diags = parse_diagnostics("error: invalid target release: 99\n");
        assert_eq!(diags.len(), 1);
        assert!(diags[0].file.is_none());
    }
}
