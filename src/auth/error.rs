//! Authentication error types for the commercetools SDK.
//!
//! # Example
//!
//! ```rust
//! use commercetools::auth::AuthError;
//!
//! let error = AuthError::TokenRequestFailed {
//!     status: 401,
//!     message: "Please provide valid client credentials".to_string(),
//! };
//! assert!(error.to_string().contains("401"));
//! ```

use thiserror::Error;

/// Errors that can occur while obtaining a bearer token.
///
/// Any of these is fatal for the API request that needed the token; the
/// HTTP client surfaces it as [`ClientError::Auth`](crate::ClientError::Auth).
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token endpoint rejected the request or could not be reached.
    ///
    /// `status` is `0` when the request failed before a response arrived.
    #[error("Token request failed with status {status}: {message}")]
    TokenRequestFailed {
        /// The HTTP status code returned (or `0` for network errors).
        status: u16,
        /// The error message or response body.
        message: String,
    },

    /// No client credentials are configured for the client-credentials grant.
    #[error("Client credentials must be configured to request an access token")]
    MissingCredentials,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_request_failed_message() {
        let error = AuthError::TokenRequestFailed {
            status: 0,
            message: "Network error: connection refused".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Token request failed with status 0: Network error: connection refused"
        );
    }

    #[test]
    fn test_missing_credentials_message() {
        assert!(AuthError::MissingCredentials
            .to_string()
            .contains("Client credentials"));
    }

    #[test]
    fn test_auth_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AuthError>();
    }
}
