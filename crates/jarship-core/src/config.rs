use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use jarship_util::errors::JarshipError;

/// Global user configuration loaded from `~/.jarship/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub toolchain: ToolchainGlobalConfig,

    #[serde(default)]
    pub repository: LocalRepositoryConfig,

    #[serde(default)]
    pub cache: CacheConfig,
}

/// Global toolchain settings from `[toolchain]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolchainGlobalConfig {
    /// Explicit JDK home, checked before `JAVA_HOME`.
    #[serde(default)]
    pub jdk: Option<String>,
}

/// Local Maven repository settings from `[repository]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalRepositoryConfig {
    /// Overrides `~/.m2/repository`.
    #[serde(default)]
    pub local: Option<String>,
}

/// Dependency cache configuration from `[cache]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Defaults to `~/.jarship/cache`.
    #[serde(default)]
    pub dir: Option<String>,
}

impl GlobalConfig {
    /// Load the global configuration, or return defaults if the file doesn't exist.
    pub fn load() -> miette::Result<Self> {
        Self::load_from(&Self::default_path())
    }

    pub fn load_from(path: &Path) -> miette::Result<Self> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| JarshipError::Generic {
            message: format!("Failed to read global config: {e}"),
        })?;
        toml::from_str(&content).map_err(|e| {
            JarshipError::Generic {
                message: format!("Failed to parse global config: {e}"),
            }
            .into()
        })
    }

    /// Returns the default path to the global config file.
    pub fn default_path() -> PathBuf {
        jarship_util::fs::dirs_path().join("config.toml")
    }

    /// The local Maven repository (`~/.m2/repository` unless overridden).
    pub fn local_repository(&self) -> PathBuf {
        match self.repository.local {
            Some(ref dir) => expand_tilde(dir),
            None => jarship_util::fs::home_dir().join(".m2").join("repository"),
        }
    }

    /// The directory downloaded dependencies are cached in.
    pub fn cache_dir(&self) -> PathBuf {
        match self.cache.dir {
            Some(ref dir) => expand_tilde(dir),
            None => jarship_util::fs::dirs_path().join("cache"),
        }
    }
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => jarship_util::fs::home_dir().join(rest),
        None => PathBuf::from(path),
    }
}
