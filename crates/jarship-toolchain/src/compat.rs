//! Source/target language-level compatibility.

use std::fmt;
use std::str::FromStr;

use jarship_util::errors::JarshipError;

use crate::jdk::JdkInfo;

/// A Java language level such as `8` (also written `1.8`) or `11`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct JavaLevel(u32);

impl JavaLevel {
    pub fn major(self) -> u32 {
        self.0
    }

    /// The value passed to `javac -source` / `-target`.
    pub fn as_javac_arg(self) -> String {
        if self.0 <= 8 {
            format!("1.{}", self.0)
        } else {
            self.0.to_string()
        }
    }
}

impl FromStr for JavaLevel {
    type Err = JarshipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("1.")
            .or_else(|| trimmed.strip_prefix("VERSION_1_"))
            .or_else(|| trimmed.strip_prefix("VERSION_"))
            .unwrap_or(trimmed);
        match digits.parse::<u32>() {
            Ok(n) if n >= 1 => Ok(Self(n)),
            _ => Err(JarshipError::Toolchain {
                message: format!("'{s}' is not a Java language level"),
            }),
        }
    }
}

impl fmt::Display for JavaLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resolved compatibility settings for one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compatibility {
    pub source: JavaLevel,
    pub target: JavaLevel,
    pub encoding: String,
}

impl Compatibility {
    pub fn resolve(source: &str, target: &str, encoding: &str) -> Result<Self, JarshipError> {
        let source: JavaLevel = source.parse()?;
        let target: JavaLevel = target.parse()?;
        if source > target {
            return Err(JarshipError::Toolchain {
                message: format!(
                    "source compatibility {source} is newer than target compatibility {target}"
                ),
            });
        }
        if encoding.trim().is_empty() {
            return Err(JarshipError::Toolchain {
                message: "source encoding must not be empty".to_string(),
            });
        }
        Ok(Self {
            source,
            target,
            encoding: encoding.to_string(),
        })
    }

    /// Fail unless `jdk` can compile for the target level.
    pub fn check(&self, jdk: &JdkInfo) -> Result<(), JarshipError> {
        let major = jdk.major();
        if major < self.target.major() {
            return Err(JarshipError::Toolchain {
                message: format!(
                    "JDK {} at {} cannot produce Java {} bytecode",
                    jdk.version,
                    jdk.home.display(),
                    self.target
                ),
            });
        }
        Ok(())
    }

    /// `javac` flags for these settings.
    pub fn javac_args(&self) -> Vec<String> {
        vec![
            "-source".to_string(),
            self.source.as_javac_arg(),
            "-target".to_string(),
            self.target.as_javac_arg(),
            "-encoding".to_string(),
            self.encoding.clone(),
        ]
    }
}
