//! Typed commercetools error responses.
//!
//! Failed API calls return a JSON envelope:
//!
//! ```json
//! {
//!   "statusCode": 400,
//!   "message": "Request body does not contain valid JSON.",
//!   "errors": [
//!     {
//!       "code": "InvalidJsonInput",
//!       "message": "Request body does not contain valid JSON.",
//!       "detailedErrorMessage": "No content to map due to end-of-input"
//!     }
//!   ]
//! }
//! ```
//!
//! The envelope decodes into an [`ErrorResponse`]; each entry of `errors`
//! decodes into an [`ApiError`] variant chosen by its `code`. Codes without a
//! dedicated variant become [`ApiError::Generic`], which keeps every field.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use thiserror::Error;

/// Message of the error synthesized for a 404 without a usable body.
pub const NOT_FOUND_MESSAGE: &str = "Not Found (404): ResourceNotFound";

/// A decoded commercetools error response.
///
/// Renders as its top-level `message` only; inspect [`errors`](Self::errors)
/// for the individual causes.
///
/// # Example
///
/// ```rust
/// use commercetools::{ApiError, ErrorResponse};
///
/// let body = br#"{
///     "statusCode": 403,
///     "message": "Insufficient scope",
///     "errors": [{"code": "insufficient_scope", "message": "Insufficient scope"}]
/// }"#;
///
/// let error = ErrorResponse::from_body(403, body).unwrap();
/// assert_eq!(error.to_string(), "Insufficient scope");
/// assert!(matches!(error.errors[0], ApiError::InsufficientScope(_)));
/// ```
#[derive(Clone, Debug, PartialEq, Error)]
#[error("{message}")]
pub struct ErrorResponse {
    /// The HTTP status code.
    pub status_code: u16,
    /// The top-level error message.
    pub message: String,
    /// The individual errors, in response order.
    pub errors: Vec<ApiError>,
    /// OAuth error code (`error`), present on auth failures.
    pub error: Option<String>,
    /// OAuth error description (`error_description`), present on auth failures.
    pub error_description: Option<String>,
    /// The `X-Correlation-ID` response header, for support requests.
    pub correlation_id: Option<String>,
}

impl ErrorResponse {
    /// Creates an error response with no sub-errors.
    #[must_use]
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
            errors: Vec::new(),
            error: None,
            error_description: None,
            correlation_id: None,
        }
    }

    /// The fixed response used for a 404 whose body is empty or not an envelope.
    #[must_use]
    pub fn not_found() -> Self {
        Self::new(404, NOT_FOUND_MESSAGE)
    }

    /// Decodes an error envelope.
    ///
    /// A missing `statusCode` is taken from `status_code`. A missing `message`
    /// falls back to `error_description`, then to the first sub-error message.
    ///
    /// # Errors
    ///
    /// Returns the parser error if `body` is not a JSON object of the
    /// envelope shape.
    pub fn from_body(status_code: u16, body: &[u8]) -> Result<Self, serde_json::Error> {
        let envelope: ErrorEnvelope = serde_json::from_slice(body)?;
        Ok(envelope.into_response(status_code))
    }

    /// Returns `true` if any sub-error carries `code`.
    #[must_use]
    pub fn has_code(&self, code: &str) -> bool {
        self.errors.iter().any(|error| error.code() == code)
    }
}

/// Wire shape of the error envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorEnvelope {
    #[serde(default)]
    status_code: Option<u16>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Option<Vec<ApiError>>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default, rename = "error_description")]
    error_description: Option<String>,
}

impl ErrorEnvelope {
    fn into_response(self, http_status: u16) -> ErrorResponse {
        let status_code = self.status_code.unwrap_or(http_status);
        let errors = self.errors.unwrap_or_default();
        let message = self
            .message
            .filter(|m| !m.is_empty())
            .or_else(|| self.error_description.clone())
            .or_else(|| errors.first().map(|e| e.message().to_string()))
            .unwrap_or_else(|| {
                if status_code == 404 {
                    NOT_FOUND_MESSAGE.to_string()
                } else {
                    format!("Request failed with status {status_code}")
                }
            });

        ErrorResponse {
            status_code,
            message,
            errors,
            error: self.error,
            error_description: self.error_description,
            correlation_id: None,
        }
    }
}

/// An error that carries only a message.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Error)]
#[error("{message}")]
pub struct ErrorMessage {
    /// Human-readable description.
    pub message: String,
}

/// `InvalidJsonInput`: the request body was not valid JSON.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct InvalidJsonInputError {
    /// Human-readable description.
    pub message: String,
    /// The parser diagnostic reported by the API.
    #[serde(default)]
    pub detailed_error_message: Option<String>,
}

/// `InvalidField`: a field holds a value the API does not accept.
#[derive(Clone, Debug, PartialEq, Deserialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct InvalidFieldError {
    /// Human-readable description.
    pub message: String,
    /// The offending field.
    pub field: String,
    /// The rejected value.
    #[serde(default)]
    pub invalid_value: Value,
    /// The values the field accepts, when the API lists them.
    #[serde(default)]
    pub allowed_values: Option<Vec<Value>>,
}

/// `RequiredField`: a mandatory field is missing.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Error)]
#[error("{message}")]
pub struct RequiredFieldError {
    /// Human-readable description.
    pub message: String,
    /// The missing field.
    pub field: String,
}

/// `DuplicateField`: a unique field value is already taken.
#[derive(Clone, Debug, PartialEq, Deserialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct DuplicateFieldError {
    /// Human-readable description.
    pub message: String,
    /// The field with the duplicate value.
    pub field: String,
    /// The duplicate value.
    #[serde(default)]
    pub duplicate_value: Value,
}

/// `ConcurrentModification`: the given resource version is stale.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct ConcurrentModificationError {
    /// Human-readable description.
    pub message: String,
    /// The current version of the resource, when reported.
    #[serde(default)]
    pub current_version: Option<i64>,
}

/// An error whose code has no dedicated variant.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("{message}")]
pub struct GenericError {
    /// The machine-readable code as sent by the API.
    pub code: String,
    /// Human-readable description.
    pub message: String,
    /// All remaining fields of the error object.
    pub extra: Map<String, Value>,
}

impl GenericError {
    fn from_value(code: String, value: Value) -> Self {
        let mut extra = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        extra.remove("code");
        let message = match extra.remove("message") {
            Some(Value::String(message)) => message,
            _ => String::new(),
        };

        Self {
            code,
            message,
            extra,
        }
    }
}

/// A single error inside an [`ErrorResponse`], keyed by its `code`.
///
/// Renders as the error's `message`.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ApiError {
    /// `access_denied`
    #[error(transparent)]
    AccessDenied(ErrorMessage),
    /// `insufficient_scope`
    #[error(transparent)]
    InsufficientScope(ErrorMessage),
    /// `invalid_token`
    #[error(transparent)]
    InvalidToken(ErrorMessage),
    /// `InvalidCredentials`
    #[error(transparent)]
    InvalidCredentials(ErrorMessage),
    /// `InvalidJsonInput`
    #[error(transparent)]
    InvalidJsonInput(InvalidJsonInputError),
    /// `InvalidInput`
    #[error(transparent)]
    InvalidInput(ErrorMessage),
    /// `InvalidOperation`
    #[error(transparent)]
    InvalidOperation(ErrorMessage),
    /// `InvalidField`
    #[error(transparent)]
    InvalidField(InvalidFieldError),
    /// `RequiredField`
    #[error(transparent)]
    RequiredField(RequiredFieldError),
    /// `DuplicateField`
    #[error(transparent)]
    DuplicateField(DuplicateFieldError),
    /// `ConcurrentModification`
    #[error(transparent)]
    ConcurrentModification(ConcurrentModificationError),
    /// `ResourceNotFound`
    #[error(transparent)]
    ResourceNotFound(ErrorMessage),
    /// `QueryTimedOut`
    #[error(transparent)]
    QueryTimedOut(ErrorMessage),
    /// `General`
    #[error(transparent)]
    General(ErrorMessage),
    /// Any other code.
    #[error(transparent)]
    Generic(GenericError),
}

impl ApiError {
    /// Builds the variant matching the `code` field of `value`.
    ///
    /// Unknown codes, and known codes whose payload does not fit the variant,
    /// yield [`ApiError::Generic`]. This never fails.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        let code = value
            .get("code")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let typed = match code.as_str() {
            "access_denied" => decode(&value).map(Self::AccessDenied),
            "insufficient_scope" => decode(&value).map(Self::InsufficientScope),
            "invalid_token" => decode(&value).map(Self::InvalidToken),
            "InvalidCredentials" => decode(&value).map(Self::InvalidCredentials),
            "InvalidJsonInput" => decode(&value).map(Self::InvalidJsonInput),
            "InvalidInput" => decode(&value).map(Self::InvalidInput),
            "InvalidOperation" => decode(&value).map(Self::InvalidOperation),
            "InvalidField" => decode(&value).map(Self::InvalidField),
            "RequiredField" => decode(&value).map(Self::RequiredField),
            "DuplicateField" => decode(&value).map(Self::DuplicateField),
            "ConcurrentModification" => decode(&value).map(Self::ConcurrentModification),
            "ResourceNotFound" => decode(&value).map(Self::ResourceNotFound),
            "QueryTimedOut" => decode(&value).map(Self::QueryTimedOut),
            "General" => decode(&value).map(Self::General),
            _ => None,
        };

        typed.unwrap_or_else(|| Self::Generic(GenericError::from_value(code, value)))
    }

    /// Returns the machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::AccessDenied(_) => "access_denied",
            Self::InsufficientScope(_) => "insufficient_scope",
            Self::InvalidToken(_) => "invalid_token",
            Self::InvalidCredentials(_) => "InvalidCredentials",
            Self::InvalidJsonInput(_) => "InvalidJsonInput",
            Self::InvalidInput(_) => "InvalidInput",
            Self::InvalidOperation(_) => "InvalidOperation",
            Self::InvalidField(_) => "InvalidField",
            Self::RequiredField(_) => "RequiredField",
            Self::DuplicateField(_) => "DuplicateField",
            Self::ConcurrentModification(_) => "ConcurrentModification",
            Self::ResourceNotFound(_) => "ResourceNotFound",
            Self::QueryTimedOut(_) => "QueryTimedOut",
            Self::General(_) => "General",
            Self::Generic(e) => &e.code,
        }
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::AccessDenied(e)
            | Self::InsufficientScope(e)
            | Self::InvalidToken(e)
            | Self::InvalidCredentials(e)
            | Self::InvalidInput(e)
            | Self::InvalidOperation(e)
            | Self::ResourceNotFound(e)
            | Self::QueryTimedOut(e)
            | Self::General(e) => &e.message,
            Self::InvalidJsonInput(e) => &e.message,
            Self::InvalidField(e) => &e.message,
            Self::RequiredField(e) => &e.message,
            Self::DuplicateField(e) => &e.message,
            Self::ConcurrentModification(e) => &e.message,
            Self::Generic(e) => &e.message,
        }
    }
}

impl<'de> Deserialize<'de> for ApiError {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

fn decode<T: DeserializeOwned>(value: &Value) -> Option<T> {
    T::deserialize(value)
        .map_err(|e| {
            tracing::debug!("Error payload does not match its code, keeping it generic: {}", e);
        })
        .ok()
}
