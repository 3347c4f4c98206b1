//! OAuth 2.0 Client Credentials Grant against the commercetools auth service.
//!
//! [`ClientCredentialsTokenProvider`] exchanges an API client's ID and secret
//! for a bearer token at `{auth_url}/oauth/token` and caches it until it
//! expires. Refresh is transparent to the HTTP client: every call to
//! [`TokenProvider::get_valid_token`] returns the cached token while it is
//! valid and fetches a new one otherwise.
//!
//! # Example
//!
//! ```rust,ignore
//! use commercetools::{Config, ProjectKey, ClientId, ClientSecret, HttpClient};
//! use commercetools::auth::ClientCredentialsTokenProvider;
//!
//! let config = Config::builder()
//!     .project_key(ProjectKey::new("my-project").unwrap())
//!     .client_credentials(
//!         ClientId::new("client-id").unwrap(),
//!         ClientSecret::new("client-secret").unwrap(),
//!     )
//!     .scopes(["manage_project:my-project"])
//!     .build()?;
//!
//! let provider = ClientCredentialsTokenProvider::from_config(&config)?;
//! let client = HttpClient::new(config, provider)?;
//! ```

use serde::Serialize;
use tokio::sync::Mutex;

use crate::auth::token::TokenResponse;
use crate::auth::{AccessToken, AuthError, TokenProvider};
use crate::config::{ClientCredentials, Config, ServiceUrl};

/// Grant type for client credentials.
const CLIENT_CREDENTIALS_GRANT_TYPE: &str = "client_credentials";

/// Path of the token endpoint relative to the auth URL.
const TOKEN_PATH: &str = "oauth/token";

/// Form body for the token request.
#[derive(Debug, Serialize)]
struct ClientCredentialsRequest<'a> {
    grant_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<String>,
}

/// Token provider implementing the client-credentials grant with caching.
///
/// Concurrent callers share one cached token; the cache lock is held while a
/// new token is fetched, so at most one token request is in flight.
#[derive(Debug)]
pub struct ClientCredentialsTokenProvider {
    http_client: reqwest::Client,
    token_url: String,
    credentials: ClientCredentials,
    scopes: Vec<String>,
    cached: Mutex<Option<AccessToken>>,
}

// Verify the provider is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientCredentialsTokenProvider>();
};

impl ClientCredentialsTokenProvider {
    /// Creates a provider for the given auth service and credentials.
    #[must_use]
    pub fn new(auth_url: &ServiceUrl, credentials: ClientCredentials, scopes: Vec<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            token_url: auth_url.join_path(TOKEN_PATH),
            credentials,
            scopes,
            cached: Mutex::new(None),
        }
    }

    /// Creates a provider from the auth URL, credentials and scopes in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingCredentials`] if `config` has no client credentials.
    pub fn from_config(config: &Config) -> Result<Self, AuthError> {
        let credentials = config
            .credentials()
            .cloned()
            .ok_or(AuthError::MissingCredentials)?;

        Ok(Self::new(
            config.auth_url(),
            credentials,
            config.scopes().to_vec(),
        ))
    }

    /// Replaces the HTTP client used to reach the token endpoint.
    #[must_use]
    pub fn with_http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = http_client;
        self
    }

    /// Returns the token endpoint URL.
    #[must_use]
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Drops the cached token so the next call fetches a new one.
    pub async fn invalidate(&self) {
        self.cached.lock().await.take();
    }

    /// Requests a new token from the auth service.
    async fn fetch_token(&self) -> Result<AccessToken, AuthError> {
        let request_body = ClientCredentialsRequest {
            grant_type: CLIENT_CREDENTIALS_GRANT_TYPE,
            scope: (!self.scopes.is_empty()).then(|| self.scopes.join(" ")),
        };

        let response = self
            .http_client
            .post(&self.token_url)
            .basic_auth(
                self.credentials.client_id.as_ref(),
                Some(self.credentials.client_secret.as_ref()),
            )
            .form(&request_body)
            .send()
            .await
            .map_err(|e| AuthError::TokenRequestFailed {
                status: 0,
                message: format!("Network error: {e}"),
            })?;

        let status = response.status().as_u16();

        if !response.status().is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::warn!("Token request to {} failed with status {}", self.token_url, status);
            return Err(AuthError::TokenRequestFailed {
                status,
                message: error_body,
            });
        }

        let token_response: TokenResponse =
            response
                .json()
                .await
                .map_err(|e| AuthError::TokenRequestFailed {
                    status,
                    message: format!("Failed to parse token response: {e}"),
                })?;

        tracing::debug!(
            "Obtained access token from {} (expires in {:?}s)",
            self.token_url,
            token_response.expires_in
        );

        Ok(AccessToken::from_token_response(token_response))
    }
}

impl TokenProvider for ClientCredentialsTokenProvider {
    async fn get_valid_token(&self) -> Result<AccessToken, AuthError> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref().filter(|token| !token.expired()) {
            return Ok(token.clone());
        }

        let token = self.fetch_token().await?;
        *cached = Some(token.clone());
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClientId, ClientSecret, ProjectKey};

    fn credentials() -> ClientCredentials {
        ClientCredentials {
            client_id: ClientId::new("client").unwrap(),
            client_secret: ClientSecret::new("secret").unwrap(),
        }
    }

    #[test]
    fn test_token_url_is_derived_from_auth_url() {
        let provider = ClientCredentialsTokenProvider::new(
            &ServiceUrl::new("https://auth.example.com/").unwrap(),
            credentials(),
            Vec::new(),
        );
        assert_eq!(provider.token_url(), "https://auth.example.com/oauth/token");
    }

    #[test]
    fn test_from_config_requires_credentials() {
        let config = Config::builder()
            .project_key(ProjectKey::new("unittest").unwrap())
            .build()
            .unwrap();

        let result = ClientCredentialsTokenProvider::from_config(&config);
        assert!(matches!(result, Err(AuthError::MissingCredentials)));
    }

    #[test]
    fn test_request_body_contains_grant_type_and_scope() {
        let request = ClientCredentialsRequest {
            grant_type: CLIENT_CREDENTIALS_GRANT_TYPE,
            scope: Some("manage_project:p view_products:p".to_string()),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["grant_type"], "client_credentials");
        assert_eq!(json["scope"], "manage_project:p view_products:p");
    }

    #[test]
    fn test_request_body_omits_empty_scope() {
        let request = ClientCredentialsRequest {
            grant_type: CLIENT_CREDENTIALS_GRANT_TYPE,
            scope: None,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"grant_type":"client_credentials"}"#);
    }
}
