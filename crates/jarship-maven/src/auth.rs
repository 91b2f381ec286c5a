//! Repository credentials.
//!
//! Credentials come from the `sonatypeUsername` / `sonatypePassword` project
//! properties. They are bound only when both are present; with either one
//! missing, requests go out unauthenticated and the server decides.

use std::fmt;

use reqwest::RequestBuilder;

use jarship_core::properties::ProjectProperties;

pub const USERNAME_PROPERTY: &str = "sonatypeUsername";
pub const PASSWORD_PROPERTY: &str = "sonatypePassword";

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Bind credentials only when both properties are present.
    pub fn from_properties(props: &ProjectProperties) -> Option<Self> {
        match (props.get(USERNAME_PROPERTY), props.get(PASSWORD_PROPERTY)) {
            (Some(user), Some(pass)) => Some(Self::new(user, pass)),
            (Some(_), None) | (None, Some(_)) => {
                tracing::debug!(
                    "only one of {USERNAME_PROPERTY}/{PASSWORD_PROPERTY} is set; not authenticating"
                );
                None
            }
            (None, None) => None,
        }
    }
}

// Never print the password.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"****")
            .finish()
    }
}

/// Apply basic authentication to a request if credentials are bound.
pub fn apply_auth(request: RequestBuilder, credentials: Option<&Credentials>) -> RequestBuilder {
    match credentials {
        Some(c) => request.basic_auth(&c.username, Some(&c.password)),
        None => request,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jarship_core::properties::PropertySource;

    #[test]
    fn both_properties_bind_credentials() {
        let props = ProjectProperties::default().with(
            PropertySource::Environment,
            &[("sonatypeUsername", "miurahr"), ("sonatypePassword", "s3cret")],
        );
        let creds = Credentials::from_properties(&props).unwrap();
        assert_eq!(creds.username, "miurahr");
        assert!(!format!("{creds:?}").contains("s3cret"));
    }

    #[test]
    fn one_property_is_not_enough() {
        let props = ProjectProperties::default()
            .with(PropertySource::Environment, &[("sonatypeUsername", "miurahr")]);
        assert!(Credentials::from_properties(&props).is_none());
        let props = ProjectProperties::default()
            .with(PropertySource::Environment, &[("sonatypePassword", "x")]);
        assert!(Credentials::from_properties(&props).is_none());
    }
}
