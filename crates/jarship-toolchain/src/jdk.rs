//! JDK discovery and validation.

use std::path::{Path, PathBuf};
use std::process::Command;

/// Information about a discovered JDK.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JdkInfo {
    pub home: PathBuf,
    /// Major version, e.g. `"21"` or `"8"`.
    pub version: String,
}

impl JdkInfo {
    pub fn major(&self) -> u32 {
        jdk_major(&self.version)
    }

    /// Path to a tool in the JDK's `bin/` directory.
    pub fn tool(&self, name: &str) -> PathBuf {
        tool_path(&self.home, name)
    }

    pub fn javac(&self) -> PathBuf {
        self.tool("javac")
    }

    pub fn javadoc(&self) -> PathBuf {
        self.tool("javadoc")
    }
}

fn tool_path(home: &Path, name: &str) -> PathBuf {
    if cfg!(windows) {
        home.join("bin").join(format!("{name}.exe"))
    } else {
        home.join("bin").join(name)
    }
}

/// Discover an installed JDK.
///
/// Search order: explicit config path -> `JAVA_HOME` -> `javac` on `PATH`
/// -> common OS paths.
pub fn discover_jdk(config_jdk: Option<&str>) -> Option<JdkInfo> {
    candidates(config_jdk)
        .into_iter()
        .find_map(|home| validate_jdk(&home))
}

/// Discover a JDK whose major version is >= `required_major`.
///
/// Searches the same locations as [`discover_jdk`] but skips JDKs that are
/// too old. Returns `None` if no compatible JDK is found.
pub fn discover_jdk_for_target(config_jdk: Option<&str>, required_major: u32) -> Option<JdkInfo> {
    candidates(config_jdk)
        .into_iter()
        .filter_map(|home| validate_jdk(&home))
        .find(|info| info.major() >= required_major)
}

fn candidates(config_jdk: Option<&str>) -> Vec<PathBuf> {
    let mut out = Vec::new();
    if let Some(path) = config_jdk {
        out.push(PathBuf::from(path));
    }
    if let Ok(home) = std::env::var("JAVA_HOME") {
        if !home.is_empty() {
            out.push(PathBuf::from(home));
        }
    }
    if let Some(home) = home_from_path() {
        out.push(home);
    }
    out.extend(common_jdk_paths());
    out
}

/// Resolve a JDK home from a `javac` found on `PATH` (following symlinks).
fn home_from_path() -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    let javac_name = if cfg!(windows) { "javac.exe" } else { "javac" };
    std::env::split_paths(&path)
        .map(|dir| dir.join(javac_name))
        .find(|p| p.is_file())
        .and_then(|p| std::fs::canonicalize(p).ok())
        .and_then(|p| p.parent()?.parent().map(Path::to_path_buf))
}

/// Parse the major version number from a JDK version string (e.g., "21" -> 21).
pub fn jdk_major(version: &str) -> u32 {
    version.parse().unwrap_or(0)
}

/// Validate a JDK home directory by running `java -version`.
///
/// A home without `javac` is a JRE and is rejected.
pub fn validate_jdk(home: &Path) -> Option<JdkInfo> {
    let java = tool_path(home, "java");
    if !java.exists() || !tool_path(home, "javac").exists() {
        return None;
    }

    let output = Command::new(&java).arg("-version").output().ok()?;
    let stderr = String::from_utf8_lossy(&output.stderr);
    let version = parse_java_version(&stderr)?;
    tracing::debug!("found JDK {version} at {}", home.display());

    Some(JdkInfo {
        home: home.to_path_buf(),
        version,
    })
}

/// Parse a major version from `java -version` stderr output.
///
/// `openjdk version "21.0.2" 2024-01-16` -> `"21"`,
/// `java version "1.8.0_392"` -> `"8"`.
pub fn parse_java_version(output: &str) -> Option<String> {
    for line in output.lines() {
        if let Some(start) = line.find('"') {
            if let Some(end) = line[start + 1..].find('"') {
                let full = &line[start + 1..start + 1 + end];
                let major = if full.starts_with("1.") {
                    full.split('.').nth(1).unwrap_or(full)
                } else {
                    full.split(['.', '-', '+']).next().unwrap_or(full)
                };
                return Some(major.to_string());
            }
        }
    }
    None
}

fn common_jdk_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    #[cfg(target_os = "macos")]
    {
        let lib_jvm = PathBuf::from("/Library/Java/JavaVirtualMachines");
        if let Ok(entries) = std::fs::read_dir(&lib_jvm) {
            for entry in entries.filter_map(|e| e.ok()) {
                let contents = entry.path().join("Contents/Home");
                if contents.is_dir() {
                    paths.push(contents);
                }
            }
        }
        paths.push(PathBuf::from(
            "/opt/homebrew/opt/openjdk/libexec/openjdk.jdk/Contents/Home",
        ));
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(entries) = std::fs::read_dir("/usr/lib/jvm") {
            let mut found: Vec<PathBuf> = entries.filter_map(|e| e.ok()).map(|e| e.path()).collect();
            found.sort();
            found.reverse();
            paths.extend(found);
        }
        paths.push(PathBuf::from("/usr/local/java"));
    }

    #[cfg(target_os = "windows")]
    {
        for base in &[
            "C:\\Program Files\\Java",
            "C:\\Program Files\\Eclipse Adoptium",
        ] {
            if let Ok(entries) = std::fs::read_dir(base) {
                for entry in entries.filter_map(|e| e.ok()) {
                    paths.push(entry.path());
                }
            }
        }
    }

    paths
}
