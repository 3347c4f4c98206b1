//! The token provider seam consumed by the HTTP client.

use std::future::Future;
use std::sync::Arc;

use crate::auth::{AccessToken, AuthError};

/// Supplies valid bearer tokens to the HTTP client.
///
/// The client calls [`get_valid_token`](Self::get_valid_token) exactly once
/// per API request and treats any error as fatal for that request.
/// Implementations own caching and refresh.
///
/// # Example
///
/// ```rust
/// use commercetools::auth::{AccessToken, AuthError, TokenProvider};
///
/// struct EnvToken(String);
///
/// impl TokenProvider for EnvToken {
///     async fn get_valid_token(&self) -> Result<AccessToken, AuthError> {
///         Ok(AccessToken::new(self.0.clone()))
///     }
/// }
/// ```
pub trait TokenProvider: Send + Sync {
    /// Returns a token that is valid for at least the next request.
    fn get_valid_token(&self) -> impl Future<Output = Result<AccessToken, AuthError>> + Send;
}

impl<P: TokenProvider> TokenProvider for Arc<P> {
    fn get_valid_token(&self) -> impl Future<Output = Result<AccessToken, AuthError>> + Send {
        (**self).get_valid_token()
    }
}

/// A provider that always returns the same token.
///
/// Useful for tokens obtained out of band (e.g. a long-lived token from a
/// secrets store) and for tests.
#[derive(Clone, Debug)]
pub struct StaticTokenProvider {
    token: AccessToken,
}

impl StaticTokenProvider {
    /// Creates a provider for a non-expiring bearer token.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            token: AccessToken::new(secret),
        }
    }
}

impl From<AccessToken> for StaticTokenProvider {
    fn from(token: AccessToken) -> Self {
        Self { token }
    }
}

impl TokenProvider for StaticTokenProvider {
    async fn get_valid_token(&self) -> Result<AccessToken, AuthError> {
        Ok(self.token.clone())
    }
}
