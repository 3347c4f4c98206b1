//! HTTP client types for commercetools API communication.
//!
//! This module provides the request layer of the SDK. It builds project-scoped
//! URLs, attaches the bearer token and `User-Agent`, and decodes responses
//! into either the caller's type or a typed error.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A raw response from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, HEAD, POST, DELETE)
//! - [`ClientError`]: Every failure of an API call
//! - [`ErrorResponse`] / [`ApiError`]: The decoded API error envelope
//!
//! # Example
//!
//! ```rust,ignore
//! use commercetools::auth::StaticTokenProvider;
//! use commercetools::{HttpClient, HttpMethod, HttpRequest, QueryInput};
//!
//! let client = HttpClient::new(config, StaticTokenProvider::new("token"))?;
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "tax-categories")
//!     .query(QueryInput::new().with_sort("name asc").with_limit(10))
//!     .build()?;
//!
//! let page: serde_json::Value = client.request(request).await?;
//! ```
//!
//! # Retry Behavior
//!
//! The client never retries. A transport failure, an expired token or an
//! API error is returned to the caller as is.

mod error_response;
mod errors;
mod http_client;
mod http_request;
mod http_response;
mod user_agent;

pub use error_response::{
    ApiError, ConcurrentModificationError, DuplicateFieldError, ErrorMessage, ErrorResponse,
    GenericError, InvalidFieldError, InvalidJsonInputError, RequiredFieldError,
    NOT_FOUND_MESSAGE,
};
pub use errors::{ClientError, InvalidHttpRequestError};
pub use http_client::HttpClient;
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
pub use user_agent::{build_user_agent, RUST_VERSION, SDK_NAME, SDK_VERSION};
