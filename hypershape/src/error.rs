//! Error types and HTTP response conversion

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::storage::{StorageError, StorageErrorKind};
use crate::versioning::ApiVersion;

/// Result type alias using the crate error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the crate
///
/// Client-caused failures (an unknown sort or shaping field) map to 400.
/// Wiring defects (a missing mapping, an action with no route) map to 500 and
/// are logged at error level, since no request can fix them.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// A sort token named a field the output type does not expose
    #[error("The provided sort parameter isn't valid: '{0}'")]
    InvalidSortField(String),

    /// A requested field does not exist on the output type
    #[error("The provided data shaping fields aren't valid: '{0}'")]
    InvalidShapingField(String),

    /// The negotiated API version is not served by the endpoint
    #[error("API version '{0}' is not supported")]
    UnsupportedApiVersion(ApiVersion),

    /// No route could be resolved for a link
    #[error("No route registered for action '{action}' on resource '{resource}'")]
    LinkResolution {
        /// Resource the action was looked up in
        resource: String,
        /// Action name
        action: String,
    },

    /// Sorting was requested for an (output, source) pair with no mapping table
    #[error("No sort mapping registered from '{output_type}' to '{source_type}'")]
    MappingNotRegistered {
        /// Output (client-visible) type name
        output_type: &'static str,
        /// Source (storage) type name
        source_type: &'static str,
    },

    /// A mapping table failed validation at registration time
    #[error("Invalid sort mapping: {0}")]
    InvalidMapping(String),

    /// Structured storage error with operation context
    #[error("{0}")]
    Storage(StorageError),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a link resolution error
    pub fn link_resolution(resource: impl Into<String>, action: impl Into<String>) -> Self {
        Self::LinkResolution {
            resource: resource.into(),
            action: action.into(),
        }
    }

    /// Status code this error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidSortField(_)
            | Error::InvalidShapingField(_)
            | Error::UnsupportedApiVersion(_)
            | Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Storage(e) => match e.kind {
                StorageErrorKind::NotFound => StatusCode::NOT_FOUND,
                StorageErrorKind::Unavailable | StorageErrorKind::Timeout => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// Optional error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// HTTP status code
    pub status: u16,

    /// Offending query field, when the error is about one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: None,
            status: status.as_u16(),
            field: None,
        }
    }

    /// Create error response with a code
    pub fn with_code(
        status: StatusCode,
        code: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            error: error.into(),
            code: Some(code.into()),
            status: status.as_u16(),
            field: None,
        }
    }

    /// Attach the offending field
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_response = match self {
            Error::Config(e) => {
                tracing::error!("Configuration error: {}", e);
                ErrorResponse::with_code(status, "CONFIG_ERROR", "Service misconfigured")
            }

            Error::InvalidSortField(ref field) => {
                let message = self.to_string();
                ErrorResponse::with_code(status, "INVALID_SORT_FIELD", message).with_field(field)
            }

            Error::InvalidShapingField(ref field) => {
                let message = self.to_string();
                ErrorResponse::with_code(status, "INVALID_SHAPING_FIELD", message)
                    .with_field(field)
            }

            Error::UnsupportedApiVersion(_) => {
                let message = self.to_string();
                ErrorResponse::with_code(status, "UNSUPPORTED_API_VERSION", message)
            }

            Error::LinkResolution {
                ref resource,
                ref action,
            } => {
                tracing::error!(resource = %resource, action = %action, "link resolution failed");
                ErrorResponse::with_code(status, "LINK_RESOLUTION_ERROR", "Internal server error")
            }

            Error::MappingNotRegistered {
                output_type,
                source_type,
            } => {
                tracing::error!(
                    output_type,
                    source_type,
                    "sort mapping not registered for type pair"
                );
                ErrorResponse::with_code(status, "MAPPING_NOT_REGISTERED", "Internal server error")
            }

            Error::InvalidMapping(msg) => {
                tracing::error!("Invalid sort mapping: {}", msg);
                ErrorResponse::with_code(status, "INVALID_MAPPING", "Internal server error")
            }

            Error::Storage(ref e) => {
                tracing::error!(
                    operation = %e.operation,
                    kind = %e.kind,
                    entity_type = ?e.entity_type,
                    entity_id = ?e.entity_id,
                    retriable = e.is_retriable(),
                    "Storage error: {}", e.message
                );

                let code = format!("STORAGE_{}", e.kind.to_string().to_uppercase());

                // User-facing message (don't expose store internals)
                let user_message = match e.kind {
                    StorageErrorKind::NotFound => "Resource not found",
                    StorageErrorKind::Unavailable => "Storage temporarily unavailable",
                    StorageErrorKind::Timeout => "Storage operation timed out",
                    _ => "Storage operation failed",
                };

                ErrorResponse::with_code(status, code, user_message)
            }

            Error::NotFound(msg) => ErrorResponse::with_code(status, "NOT_FOUND", msg),

            Error::BadRequest(msg) => ErrorResponse::with_code(status, "BAD_REQUEST", msg),

            Error::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                ErrorResponse::with_code(status, "INTERNAL_ERROR", "Internal server error")
            }

            Error::Io(e) => {
                tracing::error!("I/O error: {}", e);
                ErrorResponse::with_code(status, "IO_ERROR", "I/O operation failed")
            }
        };

        (status, Json(error_response)).into_response()
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

// Manual From implementations for boxed errors
impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        Error::Storage(err)
    }
}
