//! Operation: show the effective project properties.

use jarship_core::properties::{ProjectProperties, PropertySource};

/// Shown instead of secret values.
pub const MASK: &str = "********";

const SECRET_MARKERS: [&str; 4] = ["password", "passphrase", "secret", "token"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyEntry {
    pub name: String,
    pub value: String,
    pub source: PropertySource,
}

/// Whether a property holds key material or a credential.
pub fn is_secret(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    name == "signingKey" || SECRET_MARKERS.iter().any(|m| lower.contains(m))
}

/// All properties sorted by name, secrets masked unless `reveal`.
pub fn list_properties(props: &ProjectProperties, reveal: bool) -> Vec<PropertyEntry> {
    props
        .iter()
        .map(|(name, value, source)| {
            let value = if !reveal && is_secret(name) && !value.is_empty() {
                MASK.to_string()
            } else {
                value.to_string()
            };
            PropertyEntry {
                name: name.to_string(),
                value,
                source,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props() -> ProjectProperties {
        ProjectProperties::default()
            .with(
                PropertySource::ProjectFile,
                &[("signing.keyId", "24875D73"), ("envIsCi", "true")],
            )
            .with(
                PropertySource::CommandLine,
                &[("sonatypePassword", "hunter2"), ("signingKey", "")],
            )
    }

    #[test]
    fn secrets_are_masked() {
        let entries = list_properties(&props(), false);
        let get = |n: &str| entries.iter().find(|e| e.name == n).unwrap();
        assert_eq!(get("sonatypePassword").value, MASK);
        assert_eq!(get("sonatypePassword").source, PropertySource::CommandLine);
        assert_eq!(get("signing.keyId").value, "24875D73");
        assert_eq!(get("envIsCi").value, "true");
        assert_eq!(get("signingKey").value, "");
    }

    #[test]
    fn reveal_shows_values() {
        let entries = list_properties(&props(), true);
        assert!(entries.iter().any(|e| e.value == "hunter2"));
    }

    #[test]
    fn secret_names() {
        assert!(is_secret("signing.gnupg.passphrase"));
        assert!(is_secret("signingPassword"));
        assert!(!is_secret("signing.gnupg.keyName"));
    }
}
