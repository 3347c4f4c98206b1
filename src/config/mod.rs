//! Configuration types for the commercetools SDK.
//!
//! This module provides the configuration types used to initialize the
//! HTTP client and the OAuth2 token provider.
//!
//! # Overview
//!
//! - [`Config`]: The main configuration struct holding all SDK settings
//! - [`ConfigBuilder`]: A builder for constructing [`Config`] instances
//! - [`ProjectKey`]: A validated project key newtype
//! - [`ClientId`] / [`ClientSecret`]: Validated OAuth2 client credentials
//! - [`ServiceUrl`]: A validated API or auth endpoint URL
//!
//! # Example
//!
//! ```rust
//! use commercetools::{Config, ProjectKey, ClientId, ClientSecret};
//!
//! let config = Config::builder()
//!     .project_key(ProjectKey::new("my-project").unwrap())
//!     .client_credentials(
//!         ClientId::new("client-id").unwrap(),
//!         ClientSecret::new("client-secret").unwrap(),
//!     )
//!     .scopes(["manage_project:my-project"])
//!     .library("terraform-provider-commercetools", "0.1")
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::{ClientId, ClientSecret, ProjectKey, ServiceUrl};

use crate::error::ConfigError;

/// Default commercetools HTTP API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.europe-west1.gcp.commercetools.com";

/// Default commercetools OAuth2 endpoint.
pub const DEFAULT_AUTH_URL: &str = "https://auth.europe-west1.gcp.commercetools.com";

/// OAuth2 client credentials for the client-credentials grant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientCredentials {
    /// The API client ID.
    pub client_id: ClientId,
    /// The API client secret (masked in debug output).
    pub client_secret: ClientSecret,
}

/// Configuration for the commercetools SDK.
///
/// Holds the project key, endpoints, optional client credentials and the
/// caller's identity metadata used to build the `User-Agent` header.
///
/// # Thread Safety
///
/// `Config` is `Clone`, `Send`, and `Sync`, and is never mutated after
/// [`ConfigBuilder::build`].
///
/// # Example
///
/// ```rust
/// use commercetools::{Config, ProjectKey};
///
/// let config = Config::builder()
///     .project_key(ProjectKey::new("my-project").unwrap())
///     .contact_email("ops@example.com")
///     .build()
///     .unwrap();
///
/// assert_eq!(config.contact_email(), Some("ops@example.com"));
/// assert!(config.library_name().is_none());
/// ```
#[derive(Clone, Debug)]
pub struct Config {
    project_key: ProjectKey,
    api_url: ServiceUrl,
    auth_url: ServiceUrl,
    credentials: Option<ClientCredentials>,
    scopes: Vec<String>,
    library_name: Option<String>,
    library_version: Option<String>,
    contact_url: Option<String>,
    contact_email: Option<String>,
}

impl Config {
    /// Creates a new builder for constructing a `Config`.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Returns the project key.
    #[must_use]
    pub const fn project_key(&self) -> &ProjectKey {
        &self.project_key
    }

    /// Returns the HTTP API base URL.
    #[must_use]
    pub const fn api_url(&self) -> &ServiceUrl {
        &self.api_url
    }

    /// Returns the OAuth2 endpoint base URL.
    #[must_use]
    pub const fn auth_url(&self) -> &ServiceUrl {
        &self.auth_url
    }

    /// Returns the client credentials, if configured.
    #[must_use]
    pub const fn credentials(&self) -> Option<&ClientCredentials> {
        self.credentials.as_ref()
    }

    /// Returns the OAuth2 scopes requested by the token provider.
    #[must_use]
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    /// Returns the calling library's name, if set.
    #[must_use]
    pub fn library_name(&self) -> Option<&str> {
        self.library_name.as_deref()
    }

    /// Returns the calling library's version, if set.
    #[must_use]
    pub fn library_version(&self) -> Option<&str> {
        self.library_version.as_deref()
    }

    /// Returns the contact URL, if set.
    #[must_use]
    pub fn contact_url(&self) -> Option<&str> {
        self.contact_url.as_deref()
    }

    /// Returns the contact email, if set.
    #[must_use]
    pub fn contact_email(&self) -> Option<&str> {
        self.contact_email.as_deref()
    }
}

// Verify Config is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Config>();
};

/// Builder for constructing [`Config`] instances.
///
/// `project_key` is the only required field.
///
/// # Defaults
///
/// - `api_url`: [`DEFAULT_API_URL`]
/// - `auth_url`: [`DEFAULT_AUTH_URL`]
/// - `credentials`: `None`
/// - `scopes`: Empty
/// - identity metadata: `None`
///
/// Empty strings passed for identity metadata are treated as unset.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    project_key: Option<ProjectKey>,
    api_url: Option<ServiceUrl>,
    auth_url: Option<ServiceUrl>,
    credentials: Option<ClientCredentials>,
    scopes: Vec<String>,
    library_name: Option<String>,
    library_version: Option<String>,
    contact_url: Option<String>,
    contact_email: Option<String>,
}

impl ConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the project key (required).
    #[must_use]
    pub fn project_key(mut self, key: ProjectKey) -> Self {
        self.project_key = Some(key);
        self
    }

    /// Sets the HTTP API base URL.
    #[must_use]
    pub fn api_url(mut self, url: ServiceUrl) -> Self {
        self.api_url = Some(url);
        self
    }

    /// Sets the OAuth2 endpoint base URL.
    #[must_use]
    pub fn auth_url(mut self, url: ServiceUrl) -> Self {
        self.auth_url = Some(url);
        self
    }

    /// Sets the client credentials used by the client-credentials token provider.
    #[must_use]
    pub fn client_credentials(mut self, client_id: ClientId, client_secret: ClientSecret) -> Self {
        self.credentials = Some(ClientCredentials {
            client_id,
            client_secret,
        });
        self
    }

    /// Sets the OAuth2 scopes to request.
    #[must_use]
    pub fn scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the name and version of the library embedding this SDK.
    #[must_use]
    pub fn library(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.library_name = non_empty(name.into());
        self.library_version = non_empty(version.into());
        self
    }

    /// Sets the name of the library embedding this SDK.
    #[must_use]
    pub fn library_name(mut self, name: impl Into<String>) -> Self {
        self.library_name = non_empty(name.into());
        self
    }

    /// Sets the contact URL advertised in the `User-Agent` header.
    #[must_use]
    pub fn contact_url(mut self, url: impl Into<String>) -> Self {
        self.contact_url = non_empty(url.into());
        self
    }

    /// Sets the contact email advertised in the `User-Agent` header.
    #[must_use]
    pub fn contact_email(mut self, email: impl Into<String>) -> Self {
        self.contact_email = non_empty(email.into());
        self
    }

    /// Builds the [`Config`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `project_key` is not
    /// set, or [`ConfigError::InvalidUrl`] if a default endpoint fails to parse.
    pub fn build(self) -> Result<Config, ConfigError> {
        let project_key = self.project_key.ok_or(ConfigError::MissingRequiredField {
            field: "project_key",
        })?;

        let api_url = match self.api_url {
            Some(url) => url,
            None => ServiceUrl::new(DEFAULT_API_URL)?,
        };
        let auth_url = match self.auth_url {
            Some(url) => url,
            None => ServiceUrl::new(DEFAULT_AUTH_URL)?,
        };

        Ok(Config {
            project_key,
            api_url,
            auth_url,
            credentials: self.credentials,
            scopes: self.scopes,
            library_name: self.library_name,
            library_version: self.library_version,
            contact_url: self.contact_url,
            contact_email: self.contact_email,
        })
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project_key() -> ProjectKey {
        ProjectKey::new("unittest").unwrap()
    }

    #[test]
    fn test_builder_requires_project_key() {
        let result = ConfigBuilder::new().build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "project_key"
            })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = Config::builder().project_key(project_key()).build().unwrap();

        assert_eq!(config.api_url().as_ref(), DEFAULT_API_URL);
        assert_eq!(config.auth_url().as_ref(), DEFAULT_AUTH_URL);
        assert!(config.credentials().is_none());
        assert!(config.scopes().is_empty());
        assert!(config.library_name().is_none());
        assert!(config.library_version().is_none());
        assert!(config.contact_url().is_none());
        assert!(config.contact_email().is_none());
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = Config::builder()
            .project_key(project_key())
            .api_url(ServiceUrl::new("https://api.us-central1.gcp.commercetools.com").unwrap())
            .auth_url(ServiceUrl::new("https://auth.us-central1.gcp.commercetools.com").unwrap())
            .client_credentials(
                ClientId::new("client").unwrap(),
                ClientSecret::new("secret").unwrap(),
            )
            .scopes(["manage_project:unittest", "view_products:unittest"])
            .library("terraform-provider-commercetools", "0.1")
            .contact_url("https://example.com")
            .contact_email("test@example.org")
            .build()
            .unwrap();

        assert_eq!(
            config.api_url().as_ref(),
            "https://api.us-central1.gcp.commercetools.com"
        );
        assert_eq!(config.credentials().unwrap().client_id.as_ref(), "client");
        assert_eq!(config.scopes().len(), 2);
        assert_eq!(config.library_name(), Some("terraform-provider-commercetools"));
        assert_eq!(config.library_version(), Some("0.1"));
        assert_eq!(config.contact_url(), Some("https://example.com"));
        assert_eq!(config.contact_email(), Some("test@example.org"));
    }

    #[test]
    fn test_empty_identity_metadata_is_unset() {
        let config = Config::builder()
            .project_key(project_key())
            .library("", "1.0")
            .contact_url("")
            .contact_email("")
            .build()
            .unwrap();

        assert!(config.library_name().is_none());
        assert_eq!(config.library_version(), Some("1.0"));
        assert!(config.contact_url().is_none());
        assert!(config.contact_email().is_none());
    }

    #[test]
    fn test_config_debug_masks_secret() {
        let config = Config::builder()
            .project_key(project_key())
            .client_credentials(
                ClientId::new("client").unwrap(),
                ClientSecret::new("very-secret").unwrap(),
            )
            .build()
            .unwrap();

        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("Config"));
        assert!(!debug_str.contains("very-secret"));
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Config>();
    }
}
