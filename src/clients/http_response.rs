//! HTTP response types for the commercetools SDK.
//!
//! [`HttpResponse`] holds the raw status, headers and body of a response and
//! decodes it into either the caller's output type or a typed error.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::clients::error_response::ErrorResponse;
use crate::clients::errors::ClientError;

/// An HTTP response from the commercetools HTTP API.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers keyed by lowercase name (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(code: u16, headers: HashMap<String, Vec<String>>, body: Vec<u8>) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, by lowercase name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `X-Correlation-ID` header value, if present.
    ///
    /// Include this ID when reporting problems to commercetools support.
    #[must_use]
    pub fn correlation_id(&self) -> Option<&str> {
        self.header("x-correlation-id")
    }

    /// Returns the `Content-Type` header value, if present.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Decodes the response.
    ///
    /// - 2xx: the body is decoded as JSON into `T`; an empty body decodes
    ///   as `null`.
    /// - otherwise: the body is decoded into an [`ErrorResponse`], see
    ///   [`error_response`](Self::error_response).
    ///
    /// # Errors
    ///
    /// - [`ClientError::Decode`] if a body is not valid JSON for its target
    /// - [`ClientError::Response`] for every non-2xx response with a usable body
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        if self.is_ok() {
            let body: &[u8] = if self.body.iter().all(u8::is_ascii_whitespace) {
                b"null"
            } else {
                &self.body
            };
            return Ok(serde_json::from_slice(body)?);
        }

        Err(self.error_response()?.into())
    }

    /// Decodes a non-2xx body into an [`ErrorResponse`].
    ///
    /// A 404 whose body is empty or not an error envelope yields
    /// [`ErrorResponse::not_found`]. The correlation ID header is attached.
    ///
    /// # Errors
    ///
    /// Returns the parser error if the body is not an error envelope and the
    /// status is not 404. The status is logged at warn level since the parser
    /// error does not carry it.
    pub fn error_response(&self) -> Result<ErrorResponse, serde_json::Error> {
        let mut response = match ErrorResponse::from_body(self.code, &self.body) {
            Ok(response) => response,
            Err(_) if self.code == 404 => ErrorResponse::not_found(),
            Err(e) => {
                tracing::warn!(
                    "Failed to decode error body (status {}, content type {:?}): {}",
                    self.code,
                    self.content_type(),
                    e
                );
                return Err(e);
            }
        };

        response.correlation_id = self.correlation_id().map(String::from);
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::error_response::ApiError;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct OutputData {}

    fn response(code: u16, body: &str) -> HttpResponse {
        HttpResponse::new(code, HashMap::new(), body.as_bytes().to_vec())
    }

    #[test]
    fn test_is_ok_returns_true_for_2xx() {
        for code in 200..=299 {
            assert!(response(code, "").is_ok(), "Expected is_ok() for code {code}");
        }
        for code in [199, 300, 400, 404, 500] {
            assert!(!response(code, "").is_ok());
        }
    }

    #[test]
    fn test_decode_success_body() {
        let value: serde_json::Value = response(200, r#"{"id":"abc","version":1}"#)
            .decode()
            .unwrap();
        assert_eq!(value["id"], "abc");

        let output: OutputData = response(201, "{}").decode().unwrap();
        assert_eq!(output, OutputData {});
    }

    #[test]
    fn test_decode_empty_success_body_as_null() {
        response(204, "").decode::<()>().unwrap();
        let value: Option<serde_json::Value> = response(200, "  ").decode().unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_decode_malformed_success_body() {
        let expected = serde_json::from_str::<OutputData>(",").unwrap_err().to_string();

        let error = response(200, ",").decode::<OutputData>().unwrap_err();
        assert!(matches!(error, ClientError::Decode(_)));
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn test_decode_malformed_error_body() {
        let expected = serde_json::from_str::<serde_json::Value>(",").unwrap_err().to_string();

        let error = response(400, ",").decode::<OutputData>().unwrap_err();
        assert!(matches!(error, ClientError::Decode(_)));
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn test_decode_error_envelope_with_null_errors() {
        let body = r#"{"statusCode":400,"message":"Bad","errors":null}"#;

        let error = response(400, body).decode::<serde_json::Value>().unwrap_err();
        assert_eq!(error.to_string(), "Bad");
        assert_eq!(error.status_code(), Some(400));
        assert!(error.as_response().unwrap().errors.is_empty());
    }

    #[test]
    fn test_decode_empty_gateway_error_is_decode_error() {
        let expected = serde_json::from_slice::<serde_json::Value>(b"")
            .unwrap_err()
            .to_string();

        let error = response(502, "").decode::<OutputData>().unwrap_err();
        assert!(matches!(error, ClientError::Decode(_)));
        assert_eq!(error.to_string(), expected);
        assert!(response(502, "").error_response().is_err());
    }

    #[test]
    fn test_decode_not_found_without_body() {
        let error = response(404, "").decode::<OutputData>().unwrap_err();
        assert_eq!(error.to_string(), "Not Found (404): ResourceNotFound");
        assert_eq!(error.status_code(), Some(404));

        let error = response(404, "<html>gone</html>").decode::<OutputData>().unwrap_err();
        assert_eq!(error.to_string(), "Not Found (404): ResourceNotFound");
    }

    #[test]
    fn test_decode_not_found_with_envelope() {
        let body = r#"{
            "statusCode": 404,
            "message": "The Resource with ID 'abc' was not found.",
            "errors": [{"code": "ResourceNotFound", "message": "The Resource with ID 'abc' was not found."}]
        }"#;

        let error = response(404, body).decode::<OutputData>().unwrap_err();
        let error_response = error.as_response().unwrap();
        assert_eq!(
            error_response.message,
            "The Resource with ID 'abc' was not found."
        );
        assert!(matches!(
            error_response.errors[0],
            ApiError::ResourceNotFound(_)
        ));
    }

    #[test]
    fn test_error_response_carries_correlation_id() {
        let mut headers = HashMap::new();
        headers.insert(
            "x-correlation-id".to_string(),
            vec!["projects-abc-123".to_string()],
        );
        let response = HttpResponse::new(404, headers, Vec::new());

        assert_eq!(response.correlation_id(), Some("projects-abc-123"));
        let error = response.error_response().unwrap();
        assert_eq!(error.correlation_id.as_deref(), Some("projects-abc-123"));
    }

    #[test]
    fn test_content_type_lookup() {
        let mut headers = HashMap::new();
        headers.insert(
            "content-type".to_string(),
            vec!["application/json; charset=utf-8".to_string()],
        );
        let response = HttpResponse::new(200, headers, Vec::new());
        assert_eq!(response.content_type(), Some("application/json; charset=utf-8"));
        assert!(response.header("missing").is_none());
    }
}
