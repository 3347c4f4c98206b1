//! HTTP-specific error types for the commercetools SDK.
//!
//! # Error Handling
//!
//! Every failure of an API call surfaces as a [`ClientError`]:
//!
//! - [`ClientError::Transport`]: The request never produced a response
//!   (connection refused, DNS, timeout). Not retried.
//! - [`ClientError::Decode`]: A response body was not the expected JSON. The
//!   rendering is serde_json's own message.
//! - [`ClientError::Response`]: A well-formed API error, rendered as the
//!   API's top-level message.
//! - [`ClientError::Auth`]: The token provider could not supply a token.
//! - [`ClientError::InvalidRequest`] / [`ClientError::InvalidUrl`] /
//!   [`ClientError::Encode`]: The request could not be built.
//!
//! # Example
//!
//! ```rust,ignore
//! use commercetools::{ApiError, ClientError};
//!
//! match client.get::<serde_json::Value>("products/123").await {
//!     Ok(product) => println!("{product}"),
//!     Err(ClientError::Response(e)) if e.status_code == 404 => println!("not found"),
//!     Err(ClientError::Response(e)) => {
//!         if let Some(ApiError::InsufficientScope(_)) = e.errors.first() {
//!             println!("token lacks scope: {e}");
//!         }
//!     }
//!     Err(e) => println!("request failed: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::auth::AuthError;
use crate::clients::error_response::ErrorResponse;

/// Error returned when an HTTP request fails validation before it is sent.
///
/// # Example
///
/// ```rust
/// use commercetools::InvalidHttpRequestError;
///
/// let error = InvalidHttpRequestError::MissingBody {
///     method: "post".to_string(),
/// };
///
/// assert_eq!(error.to_string(), "Cannot use post without specifying data.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// A body was set on a method that does not carry one.
    #[error("Cannot send a body with {method}.")]
    UnexpectedBody {
        /// The HTTP method that was given a body.
        method: String,
    },
}

/// Unified error type for all API calls.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or connection error; the request produced no response.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A response body could not be decoded.
    #[error(transparent)]
    Decode(#[from] serde_json::Error),

    /// The request body could not be serialized.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The API answered with a structured error.
    #[error(transparent)]
    Response(#[from] ErrorResponse),

    /// No bearer token could be obtained.
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// The request URL could not be built.
    #[error("Invalid request URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL that failed to parse.
        url: String,
        /// Why parsing failed.
        reason: String,
    },
}

impl ClientError {
    /// Returns the API error response, if this is one.
    #[must_use]
    pub const fn as_response(&self) -> Option<&ErrorResponse> {
        match self {
            Self::Response(response) => Some(response),
            _ => None,
        }
    }

    /// Returns the HTTP status code of an API error response.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Response(response) => Some(response.status_code),
            _ => None,
        }
    }
}
