//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;
use url::Url;

/// A validated commercetools project key.
///
/// The project key is the first path segment of every API request
/// (`{api_url}/{project_key}/...`).
///
/// # Example
///
/// ```rust
/// use commercetools::ProjectKey;
///
/// let key = ProjectKey::new("my-project").unwrap();
/// assert_eq!(key.as_ref(), "my-project");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectKey(String);

impl ProjectKey {
    /// Creates a new validated project key.
    ///
    /// Surrounding whitespace and slashes are stripped before validation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyProjectKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        let key = key.trim().trim_matches('/');
        if key.is_empty() {
            return Err(ConfigError::EmptyProjectKey);
        }
        Ok(Self(key.to_string()))
    }
}

impl AsRef<str> for ProjectKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated OAuth2 client ID.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientId(String);

impl ClientId {
    /// Creates a new validated client ID.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyClientId`] if the ID is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ConfigError::EmptyClientId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for ClientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated OAuth2 client secret.
///
/// # Security
///
/// The `Debug` implementation masks the secret value, displaying only
/// `ClientSecret(*****)` instead of the actual secret.
///
/// # Example
///
/// ```rust
/// use commercetools::ClientSecret;
///
/// let secret = ClientSecret::new("my-secret").unwrap();
/// assert_eq!(format!("{:?}", secret), "ClientSecret(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ClientSecret(String);

impl ClientSecret {
    /// Creates a new validated client secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyClientSecret`] if the secret is empty.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::EmptyClientSecret);
        }
        Ok(Self(secret))
    }
}

impl AsRef<str> for ClientSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientSecret(*****)")
    }
}

/// A validated absolute service URL (API or auth endpoint).
///
/// Trailing slashes are removed so paths can be appended with a single `/`.
///
/// # Example
///
/// ```rust
/// use commercetools::ServiceUrl;
///
/// let url = ServiceUrl::new("https://api.europe-west1.gcp.commercetools.com/").unwrap();
/// assert_eq!(url.as_ref(), "https://api.europe-west1.gcp.commercetools.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceUrl(String);

impl ServiceUrl {
    /// Creates a new validated service URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the value is not an absolute
    /// `http` or `https` URL.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = url.into();
        let trimmed = raw.trim().trim_end_matches('/');

        let parsed = Url::parse(trimmed).map_err(|_| ConfigError::InvalidUrl { url: raw.clone() })?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(ConfigError::InvalidUrl { url: raw });
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Appends `path` to this URL, joining with exactly one `/`.
    #[must_use]
    pub fn join_path(&self, path: &str) -> String {
        format!("{}/{}", self.0, path.trim_start_matches('/'))
    }
}

impl AsRef<str> for ServiceUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_key_rejects_empty() {
        assert!(matches!(
            ProjectKey::new(""),
            Err(ConfigError::EmptyProjectKey)
        ));
        assert!(matches!(
            ProjectKey::new(" / "),
            Err(ConfigError::EmptyProjectKey)
        ));
    }

    #[test]
    fn test_project_key_strips_slashes() {
        let key = ProjectKey::new("/my-project/").unwrap();
        assert_eq!(key.as_ref(), "my-project");
        assert_eq!(key.to_string(), "my-project");
    }

    #[test]
    fn test_client_credentials_reject_empty() {
        assert!(matches!(ClientId::new(""), Err(ConfigError::EmptyClientId)));
        assert!(matches!(
            ClientSecret::new(""),
            Err(ConfigError::EmptyClientSecret)
        ));
    }

    #[test]
    fn test_client_secret_debug_is_masked() {
        let secret = ClientSecret::new("super-secret").unwrap();
        let debug = format!("{secret:?}");
        assert_eq!(debug, "ClientSecret(*****)");
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_service_url_trims_trailing_slash() {
        let url = ServiceUrl::new("https://auth.example.com///").unwrap();
        assert_eq!(url.as_ref(), "https://auth.example.com");
        assert_eq!(url.join_path("/oauth/token"), "https://auth.example.com/oauth/token");
    }

    #[test]
    fn test_service_url_keeps_port() {
        let url = ServiceUrl::new("http://127.0.0.1:8080").unwrap();
        assert_eq!(url.join_path("p/x"), "http://127.0.0.1:8080/p/x");
    }

    #[test]
    fn test_service_url_rejects_invalid_values() {
        for invalid in ["", "not a url", "ftp://example.com", "example.com"] {
            assert!(
                matches!(ServiceUrl::new(invalid), Err(ConfigError::InvalidUrl { .. })),
                "expected {invalid:?} to be rejected"
            );
        }
    }
}
