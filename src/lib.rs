//! # commercetools Rust SDK
//!
//! A Rust client core for the commercetools HTTP API, providing type-safe
//! configuration, OAuth 2.0 token handling, query encoding, and an HTTP client
//! that decodes typed error responses.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`Config`] and [`ConfigBuilder`]
//! - Validated newtypes for project keys, credentials and endpoint URLs
//! - Query parameter encoding via [`QueryInput`]
//! - Client-credentials token fetching and caching via [`auth`]
//! - An async HTTP client that builds project-scoped URLs and decodes
//!   [`ErrorResponse`]s into [`ApiError`] variants
//! - A `User-Agent` identifying the SDK and the embedding library
//!
//! ## Quick Start
//!
//! ```rust
//! use commercetools::{ClientId, ClientSecret, Config, ProjectKey};
//!
//! // Create configuration using the builder pattern
//! let config = Config::builder()
//!     .project_key(ProjectKey::new("my-project").unwrap())
//!     .client_credentials(
//!         ClientId::new("client-id").unwrap(),
//!         ClientSecret::new("client-secret").unwrap(),
//!     )
//!     .scopes(["manage_project:my-project"])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.project_key().as_ref(), "my-project");
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use commercetools::auth::ClientCredentialsTokenProvider;
//! use commercetools::{HttpClient, QueryInput};
//! use serde_json::json;
//!
//! let provider = ClientCredentialsTokenProvider::from_config(&config)?;
//! let client = HttpClient::new(config, provider)?;
//!
//! // Query a collection
//! let input = QueryInput::new()
//!     .with_where("key = \"standard\"")
//!     .with_limit(1);
//! let page = client.query::<serde_json::Value>("tax-categories", &input).await?;
//!
//! // Update a resource
//! let actions = json!([{"action": "changeName", "name": "Reduced"}]);
//! let updated: serde_json::Value = client
//!     .update("tax-categories/abc", 3, &actions)
//!     .await?;
//! ```
//!
//! ## Error Handling
//!
//! Every call returns [`ClientError`]. API errors render as the API's
//! top-level message and expose the individual causes:
//!
//! ```rust,ignore
//! use commercetools::{ApiError, ClientError};
//!
//! match client.get::<serde_json::Value>("tax-categories/missing").await {
//!     Err(ClientError::Response(e)) if e.status_code == 404 => println!("{e}"),
//!     Err(ClientError::Response(e)) if e.has_code("insufficient_scope") => println!("scope"),
//!     Err(e) => println!("request failed: {e}"),
//!     Ok(_) => {}
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: The client is `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **No hidden retries**: Each call performs at most one API request

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod query;

// Re-export public types at crate root for convenience
pub use config::{
    ClientCredentials, ClientId, ClientSecret, Config, ConfigBuilder, ProjectKey, ServiceUrl,
};
pub use error::ConfigError;
pub use query::{PagedQueryResponse, QueryInput};

// Re-export HTTP client types
pub use clients::{
    build_user_agent, ApiError, ClientError, ConcurrentModificationError, DuplicateFieldError,
    ErrorMessage, ErrorResponse, GenericError, HttpClient, HttpMethod, HttpRequest,
    HttpRequestBuilder, HttpResponse, InvalidFieldError, InvalidHttpRequestError,
    InvalidJsonInputError, RequiredFieldError,
};
