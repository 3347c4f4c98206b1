//! HTTP client for commercetools API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests to the project-scoped commercetools HTTP API.

use std::collections::HashMap;
use std::fmt;

use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::auth::{AccessToken, TokenProvider};
use crate::clients::errors::ClientError;
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::clients::user_agent::build_user_agent;
use crate::config::Config;
use crate::query::{PagedQueryResponse, QueryInput};

const APPLICATION_JSON: &str = "application/json";

/// Headers owned by the client; extra headers with these names are dropped.
const RESERVED_HEADERS: [&str; 4] = ["authorization", "user-agent", "accept", "content-type"];

/// Returns `true` if a path segment would be resolved as `.` or `..`.
fn is_dot_segment(segment: &str) -> bool {
    let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
    decoded == "." || decoded == ".."
}

/// Body of an update request.
#[derive(Serialize)]
struct UpdateBody<'a, A: ?Sized> {
    version: u64,
    actions: &'a A,
}

/// HTTP client for making requests to the commercetools HTTP API.
///
/// The client handles:
/// - URL construction from the configured API URL and project key
/// - Query encoding from [`QueryInput`] and extra parameters
/// - Bearer token injection from a [`TokenProvider`]
/// - Default headers including `User-Agent` and `Accept`
/// - Decoding success bodies and typed error responses
///
/// Each call performs at most one API request. Nothing is retried.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use commercetools::auth::ClientCredentialsTokenProvider;
/// use commercetools::{Config, HttpClient, QueryInput};
///
/// let provider = ClientCredentialsTokenProvider::from_config(&config)?;
/// let client = HttpClient::new(config, provider)?;
///
/// let page = client
///     .query::<serde_json::Value>("tax-categories", &QueryInput::new().with_limit(20))
///     .await?;
/// println!("{} tax categories", page.count);
/// ```
pub struct HttpClient<P> {
    config: Config,
    token_provider: P,
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Precomputed `User-Agent` header value.
    user_agent: String,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient<crate::auth::StaticTokenProvider>>();
};

impl<P> fmt::Debug for HttpClient<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

impl<P: TokenProvider> HttpClient<P> {
    /// Creates a new HTTP client with its own connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the underlying reqwest client
    /// cannot be created (e.g., TLS initialization failure).
    ///
    /// # Example
    ///
    /// ```rust
    /// use commercetools::auth::StaticTokenProvider;
    /// use commercetools::{Config, HttpClient, ProjectKey};
    ///
    /// let config = Config::builder()
    ///     .project_key(ProjectKey::new("my-project").unwrap())
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = HttpClient::new(config, StaticTokenProvider::new("token")).unwrap();
    /// assert!(client.user_agent().starts_with("commercetools-rust-sdk/"));
    /// ```
    pub fn new(config: Config, token_provider: P) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().use_rustls_tls().build()?;
        Ok(Self::with_transport(config, token_provider, client))
    }

    /// Creates a new HTTP client that sends through an existing reqwest client.
    ///
    /// Use this to share a connection pool or to set timeouts and proxies.
    #[must_use]
    pub fn with_transport(config: Config, token_provider: P, client: reqwest::Client) -> Self {
        let user_agent = build_user_agent(&config);
        Self {
            config,
            token_provider,
            client,
            user_agent,
        }
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the token provider.
    #[must_use]
    pub const fn token_provider(&self) -> &P {
        &self.token_provider
    }

    /// Returns the `User-Agent` header value sent with every request.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Builds the absolute request URL, including all query pairs.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if the path contains `.` or `..`
    /// segments, which would leave the project scope, or if the joined URL
    /// does not parse.
    pub fn build_url(&self, request: &HttpRequest) -> Result<Url, ClientError> {
        let base = self
            .config
            .api_url()
            .join_path(self.config.project_key().as_ref());
        let path = request.path.trim_start_matches('/');
        let raw = if path.is_empty() {
            base
        } else {
            format!("{base}/{path}")
        };

        let path_only = path.split(['?', '#']).next().unwrap_or_default();
        if path_only.split('/').any(is_dot_segment) {
            return Err(ClientError::InvalidUrl {
                url: raw,
                reason: "path must not contain '.' or '..' segments".to_string(),
            });
        }

        let mut url = Url::parse(&raw).map_err(|e| ClientError::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;

        let pairs = request.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }

        Ok(url)
    }

    /// Assembles the reqwest request: URL, bearer token, default headers and body.
    ///
    /// `Content-Type` is only set when the request carries a body. Extra
    /// headers never replace the ones set here.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Encode`] if the body cannot be serialized and
    /// [`ClientError::Transport`] if a header value is invalid.
    pub fn build_request(
        &self,
        request: &HttpRequest,
        url: Url,
        token: &AccessToken,
    ) -> Result<reqwest::Request, ClientError> {
        let mut req_builder = self
            .client
            .request(request.http_method.into(), url)
            .bearer_auth(token.secret())
            .header(USER_AGENT, self.user_agent.as_str())
            .header(ACCEPT, APPLICATION_JSON);

        if let Some(body) = &request.body {
            let bytes = serde_json::to_vec(body).map_err(ClientError::Encode)?;
            req_builder = req_builder.header(CONTENT_TYPE, APPLICATION_JSON).body(bytes);
        }

        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                if RESERVED_HEADERS.contains(&key.to_ascii_lowercase().as_str()) {
                    tracing::warn!("Ignoring extra header {} set by the client", key);
                    continue;
                }
                req_builder = req_builder.header(key.as_str(), value.as_str());
            }
        }

        Ok(req_builder.build()?)
    }

    /// Sends a request and returns the raw response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - The URL cannot be built (`InvalidUrl`)
    /// - No token can be obtained (`Auth`); no request is sent then
    /// - The body cannot be serialized (`Encode`)
    /// - The request produces no response (`Transport`)
    pub async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ClientError> {
        request.verify()?;
        let url = self.build_url(request)?;

        let token = self.token_provider.get_valid_token().await?;
        let req = self.build_request(request, url.clone(), &token)?;

        tracing::debug!("Sending {} request to {}", request.http_method, url);

        let res = self.client.execute(req).await?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body = res.bytes().await?.to_vec();

        let response = HttpResponse::new(code, headers, body);

        if response.is_ok() {
            tracing::debug!("Received {} from {} {}", code, request.http_method, url);
        } else {
            tracing::warn!(
                "Request to commercetools API at {} failed with status {} (correlation id: {})",
                request.path,
                code,
                response.correlation_id().unwrap_or("none")
            );
        }

        Ok(response)
    }

    /// Sends a request and decodes the response into `T`.
    ///
    /// # Errors
    ///
    /// Everything [`send`](Self::send) returns, plus [`ClientError::Decode`]
    /// and [`ClientError::Response`] from decoding the response.
    pub async fn request<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T, ClientError> {
        let response = self.send(&request).await?;
        response.decode()
    }

    /// Performs a single API call.
    ///
    /// `path` is relative to the project, `query` is encoded into the URL
    /// and `body` is serialized as JSON.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn execute<T, B>(
        &self,
        method: HttpMethod,
        path: &str,
        query: Option<&QueryInput>,
        body: Option<&B>,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut builder = HttpRequest::builder(method, path);
        if let Some(query) = query {
            builder = builder.query(query.clone());
        }
        if let Some(body) = body {
            builder = builder.body(serde_json::to_value(body).map_err(ClientError::Encode)?);
        }

        self.request(builder.build()?).await
    }

    /// Fetches a single resource, e.g. `tax-categories/key=standard`.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.execute(HttpMethod::Get, path, None, None::<&()>).await
    }

    /// Queries a resource collection and returns one page of results.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn query<T: DeserializeOwned>(
        &self,
        path: &str,
        input: &QueryInput,
    ) -> Result<PagedQueryResponse<T>, ClientError> {
        self.execute(HttpMethod::Get, path, Some(input), None::<&()>)
            .await
    }

    /// Creates a resource from a draft.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn create<T, B>(&self, path: &str, draft: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(HttpMethod::Post, path, None, Some(draft)).await
    }

    /// Applies update actions to the resource at `version`.
    ///
    /// A stale version is answered with a 409 carrying
    /// [`ApiError::ConcurrentModification`](crate::ApiError::ConcurrentModification).
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn update<T, A>(&self, path: &str, version: u64, actions: &A) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        A: Serialize + ?Sized,
    {
        let body = UpdateBody { version, actions };
        self.execute(HttpMethod::Post, path, None, Some(&body)).await
    }

    /// Deletes the resource at `version`.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn delete<T: DeserializeOwned>(&self, path: &str, version: u64) -> Result<T, ClientError> {
        let request = HttpRequest::builder(HttpMethod::Delete, path)
            .param("version", version.to_string())
            .build()?;
        self.request(request).await
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}
