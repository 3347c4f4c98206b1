//! Bearer access tokens.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

/// Tokens count as expired this many seconds before their reported expiry.
const EXPIRY_MARGIN_SECONDS: i64 = 30;

/// An OAuth2 bearer token.
///
/// # Security
///
/// The `Debug` implementation masks the secret.
///
/// # Example
///
/// ```rust
/// use commercetools::auth::AccessToken;
///
/// let token = AccessToken::new("abc123");
/// assert_eq!(token.secret(), "abc123");
/// assert!(!token.expired());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    secret: String,
    token_type: String,
    expires_at: Option<DateTime<Utc>>,
    scope: Option<String>,
}

impl AccessToken {
    /// Creates a bearer token that never expires.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            token_type: "Bearer".to_string(),
            expires_at: None,
            scope: None,
        }
    }

    /// Sets the expiry time.
    #[must_use]
    pub const fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Sets the granted scope.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Returns the token value sent in the `Authorization` header.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Returns the token type reported by the auth server.
    #[must_use]
    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// Returns when the token expires, if known.
    #[must_use]
    pub const fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Returns the granted scope, if reported.
    #[must_use]
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// Returns `true` if the token has expired or is about to.
    ///
    /// Tokens without an expiration time never expire.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.expires_at.is_some_and(|expires_at| {
            Utc::now() + Duration::seconds(EXPIRY_MARGIN_SECONDS) >= expires_at
        })
    }

    pub(crate) fn from_token_response(response: TokenResponse) -> Self {
        let expires_at = response.expires_in.and_then(expiry_after);

        Self {
            secret: response.access_token,
            token_type: response.token_type.unwrap_or_else(|| "Bearer".to_string()),
            expires_at,
            scope: response.scope,
        }
    }
}

/// Converts a relative `expires_in` into an absolute expiry.
///
/// Lifetimes beyond the representable range saturate: far-future ones never
/// expire, far-past ones are already expired.
fn expiry_after(seconds: i64) -> Option<DateTime<Utc>> {
    match Duration::try_seconds(seconds).and_then(|d| Utc::now().checked_add_signed(d)) {
        Some(expires_at) => Some(expires_at),
        None if seconds < 0 => Some(DateTime::<Utc>::MIN_UTC),
        None => None,
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("secret", &"*****")
            .field("token_type", &self.token_type)
            .field("expires_at", &self.expires_at)
            .field("scope", &self.scope)
            .finish()
    }
}

/// Token endpoint response body.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub scope: Option<String>,
}
