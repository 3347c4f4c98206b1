//! HTTP request types for the commercetools SDK.
//!
//! This module provides the [`HttpRequest`] type and its builder for
//! constructing requests to the commercetools HTTP API.

use std::collections::HashMap;
use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;
use crate::query::QueryInput;

/// HTTP methods used by the commercetools HTTP API.
///
/// Updates are `POST` requests carrying update actions, so there is no `PUT`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP HEAD method for existence checks.
    Head,
    /// HTTP POST method for creating and updating resources.
    Post,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns `true` if requests with this method must carry a body.
    #[must_use]
    pub const fn requires_body(self) -> bool {
        matches!(self, Self::Post)
    }

    /// Returns `true` if requests with this method must not carry a body.
    #[must_use]
    pub const fn forbids_body(self) -> bool {
        matches!(self, Self::Get | Self::Head)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Head => write!(f, "head"),
            Self::Post => write!(f, "post"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Head => Self::HEAD,
            HttpMethod::Post => Self::POST,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// An HTTP request to be sent to the commercetools HTTP API.
///
/// Use [`HttpRequest::builder`] to construct requests with the builder pattern.
///
/// # Example
///
/// ```rust
/// use commercetools::{HttpMethod, HttpRequest, QueryInput};
/// use serde_json::json;
///
/// // Query request
/// let query = HttpRequest::builder(HttpMethod::Get, "tax-categories")
///     .query(QueryInput::new().with_limit(20))
///     .build()
///     .unwrap();
///
/// // Create request
/// let create = HttpRequest::builder(HttpMethod::Post, "tax-categories")
///     .body(json!({"name": "Standard"}))
///     .build()
///     .unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The path relative to the project, e.g. `products/123`.
    pub path: String,
    /// Structured query parameters.
    pub query: Option<QueryInput>,
    /// Additional query parameters, appended after `query` in order.
    pub params: Vec<(String, String)>,
    /// The JSON request body, if any.
    pub body: Option<serde_json::Value>,
    /// Additional headers to include in the request.
    ///
    /// `Authorization`, `User-Agent`, `Accept` and `Content-Type` are set by
    /// the client and cannot be overridden here.
    pub extra_headers: Option<HashMap<String, String>>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - `http_method` is `Post` but `body` is `None`
    /// - `http_method` is `Get` or `Head` but `body` is `Some`
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.http_method.requires_body() && self.body.is_none() {
            return Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method.to_string(),
            });
        }

        if self.http_method.forbids_body() && self.body.is_some() {
            return Err(InvalidHttpRequestError::UnexpectedBody {
                method: self.http_method.to_string(),
            });
        }

        Ok(())
    }

    /// Returns all query pairs in send order: encoded `query` first, then `params`.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self
            .query
            .as_ref()
            .map(QueryInput::to_query_pairs)
            .unwrap_or_default();
        pairs.extend(self.params.iter().cloned());
        pairs
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    query: Option<QueryInput>,
    params: Vec<(String, String)>,
    body: Option<serde_json::Value>,
    extra_headers: Option<HashMap<String, String>>,
}

impl HttpRequestBuilder {
    /// Creates a new builder with the required method and path.
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            query: None,
            params: Vec::new(),
            body: None,
            extra_headers: None,
        }
    }

    /// Sets the structured query parameters.
    #[must_use]
    pub fn query(mut self, query: QueryInput) -> Self {
        self.query = Some(query);
        self
    }

    /// Adds a single query parameter. Repeated keys are kept.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Sets the JSON request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Adds a single extra header.
    ///
    /// Headers the client sets itself are ignored, see
    /// [`HttpRequest::extra_headers`].
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            path: self.path,
            query: self.query,
            params: self.params,
            body: self.body,
            extra_headers: self.extra_headers,
        };
        request.verify()?;
        Ok(request)
    }
}
