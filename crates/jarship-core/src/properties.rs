//! Layered project properties.
//!
//! Properties carry build secrets and switches that must not live in
//! `Jarship.toml`: signing keys and passphrases, repository credentials,
//! CI markers. They are read, lowest precedence first, from:
//!
//! 1. `jarship.properties` in the project directory
//! 2. `~/.jarship/jarship.properties`
//! 3. environment variables named `JARSHIP_PROJECT_<name>`
//! 4. `-P name=value` on the command line
//!
//! Files use Java `.properties` syntax so that armored keys can be kept on a
//! single line with `\n` escapes.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use jarship_util::errors::JarshipError;

/// File name of the per-project and per-user property files.
pub const PROPERTIES_FILE: &str = "jarship.properties";

/// Prefix for environment variables that define project properties.
pub const ENV_PREFIX: &str = "JARSHIP_PROJECT_";

/// Where a property value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PropertySource {
    ProjectFile,
    UserFile,
    Environment,
    CommandLine,
}

impl fmt::Display for PropertySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProjectFile => write!(f, "project {PROPERTIES_FILE}"),
            Self::UserFile => write!(f, "user {PROPERTIES_FILE}"),
            Self::Environment => write!(f, "environment"),
            Self::CommandLine => write!(f, "command line"),
        }
    }
}

/// The effective set of project properties after layering.
#[derive(Debug, Clone, Default)]
pub struct ProjectProperties {
    values: BTreeMap<String, (String, PropertySource)>,
}

impl ProjectProperties {
    /// Load every layer for the project at `project_dir`.
    pub fn load(project_dir: &Path, cli: &[(String, String)]) -> miette::Result<Self> {
        let mut props = Self::default();
        props.merge(
            PropertySource::ProjectFile,
            load_properties_file(&project_dir.join(PROPERTIES_FILE))?,
        );
        props.merge(
            PropertySource::UserFile,
            load_properties_file(&jarship_util::fs::dirs_path().join(PROPERTIES_FILE))?,
        );
        props.merge(PropertySource::Environment, from_env_vars(std::env::vars()));
        props.merge(PropertySource::CommandLine, cli.iter().cloned());
        Ok(props)
    }

    /// Overlay `entries` from `source`. Later layers win over earlier ones.
    pub fn merge(
        &mut self,
        source: PropertySource,
        entries: impl IntoIterator<Item = (String, String)>,
    ) {
        for (key, value) in entries {
            match self.values.get(&key) {
                Some((_, existing)) if *existing > source => {}
                _ => {
                    self.values.insert(key, (value, source));
                }
            }
        }
    }

    /// Builder-style [`merge`](Self::merge), mostly for tests.
    pub fn with(mut self, source: PropertySource, entries: &[(&str, &str)]) -> Self {
        self.merge(
            source,
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        );
        self
    }

    /// Whether the property is defined at all. An empty value still counts.
    pub fn has(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(|(v, _)| v.as_str())
    }

    pub fn source_of(&self, name: &str) -> Option<PropertySource> {
        self.values.get(name).map(|(_, s)| *s)
    }

    /// Interpret a property as a boolean (`true`, case-insensitive).
    pub fn flag(&self, name: &str) -> bool {
        self.get(name)
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, PropertySource)> {
        self.values
            .iter()
            .map(|(k, (v, s))| (k.as_str(), v.as_str(), *s))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Collect `JARSHIP_PROJECT_<name>` variables as `(name, value)` pairs.
pub fn from_env_vars(vars: impl IntoIterator<Item = (String, String)>) -> Vec<(String, String)> {
    vars.into_iter()
        .filter_map(|(k, v)| {
            k.strip_prefix(ENV_PREFIX)
                .filter(|name| !name.is_empty())
                .map(|name| (name.to_string(), v))
        })
        .collect()
}

/// Parse a `-P name=value` argument. A bare `name` means an empty value.
pub fn parse_cli_property(arg: &str) -> Result<(String, String), String> {
    let (key, value) = arg.split_once('=').unwrap_or((arg, ""));
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid property '{arg}': expected name=value"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Load a `.properties` file. A missing file yields an empty map.
pub fn load_properties_file(path: &Path) -> miette::Result<BTreeMap<String, String>> {
    if !path.is_file() {
        return Ok(BTreeMap::new());
    }
    let content = std::fs::read_to_string(path).map_err(|e| JarshipError::Generic {
        message: format!("Failed to read {}: {e}", path.display()),
    })?;
    tracing::debug!("loaded properties from {}", path.display());
    Ok(parse_properties(&content))
}

/// Parse Java `.properties` content.
pub fn parse_properties(content: &str) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for line in logical_lines(content) {
        let (key, value) = split_entry(&line);
        map.insert(unescape(&key), unescape(&value));
    }
    map
}

/// Join continuation lines and drop blanks and comments. Escapes are kept
/// so that the key/value split can still see escaped separators.
fn logical_lines(content: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current: Option<String> = None;

    for raw in content.lines() {
        let line = raw.trim_start();
        let mut buf = match current.take() {
            Some(prev) => prev,
            None => {
                if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                    continue;
                }
                String::new()
            }
        };

        let trailing = line.chars().rev().take_while(|&c| c == '\\').count();
        if trailing % 2 == 1 {
            buf.push_str(&line[..line.len() - 1]);
            current = Some(buf);
        } else {
            buf.push_str(line);
            out.push(buf);
        }
    }
    if let Some(rest) = current {
        out.push(rest);
    }
    out
}

fn split_entry(line: &str) -> (String, String) {
    let mut key_end = line.len();
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' | ' ' | '\t' | '\x0c' => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = line[..key_end].to_string();
    let mut rest = line[key_end..].trim_start_matches([' ', '\t', '\x0c']);
    if let Some(stripped) = rest.strip_prefix(['=', ':']) {
        rest = stripped.trim_start_matches([' ', '\t', '\x0c']);
    }
    (key, rest.to_string())
}

fn unescape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(ch) => out.push(ch),
                    None => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

/// Interpolate `${env:VAR}` references in a string.
///
/// Looks up values first from `env_overrides`, then falls back to the process
/// environment. Unknown variables become empty strings and are logged.
pub fn interpolate(input: &str, env_overrides: &BTreeMap<String, String>) -> String {
    let mut result = input.to_string();
    let mut from = 0;
    while let Some(offset) = result[from..].find("${env:") {
        let start = from + offset;
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let end = start + end;
        let key = &result[start + 6..end];
        let value = env_overrides
            .get(key)
            .cloned()
            .or_else(|| std::env::var(key).ok())
            .unwrap_or_else(|| {
                tracing::warn!("environment variable {key} is not set; using an empty value");
                String::new()
            });
        result.replace_range(start..=end, &value);
        from = start + value.len();
    }
    result
}
