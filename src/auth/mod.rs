//! Authentication for the commercetools HTTP API.
//!
//! The HTTP client does not know how tokens are obtained; it asks a
//! [`TokenProvider`] for a valid [`AccessToken`] before every request.
//!
//! # Overview
//!
//! - [`TokenProvider`]: The seam between the HTTP client and token sources
//! - [`ClientCredentialsTokenProvider`]: OAuth 2.0 client-credentials grant with caching
//! - [`StaticTokenProvider`]: A fixed token obtained elsewhere
//! - [`AccessToken`]: A bearer token with optional expiry
//! - [`AuthError`]: Failures while obtaining a token
//!
//! # Example
//!
//! ```rust
//! use commercetools::auth::{StaticTokenProvider, TokenProvider};
//!
//! let provider = StaticTokenProvider::new("my-token");
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let token = runtime.block_on(provider.get_valid_token()).unwrap();
//! assert_eq!(token.secret(), "my-token");
//! ```

mod client_credentials;
mod error;
mod provider;
mod token;

pub use client_credentials::ClientCredentialsTokenProvider;
pub use error::AuthError;
pub use provider::{StaticTokenProvider, TokenProvider};
pub use token::AccessToken;
