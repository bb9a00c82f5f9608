/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// All handlers return `Result<T, ApiError>`, which converts into the JSON
/// error envelope `{"error": {"code", "message", "details?"}}` — the same
/// shape the authentication middleware emits, so clients see one format
/// everywhere.
///
/// The taxonomy is small on purpose: every failure in this service is one
/// of "you are not authenticated", "your input is malformed", "that name is
/// taken", "no such row", or "we broke". Internal failures are logged with
/// detail and reported to the client generically.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use stockroom_shared::auth::{jwt::JwtError, password::PasswordError};
use stockroom_shared::export::ExportError;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No valid owner context (401)
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// Malformed request transport, e.g. unreadable multipart (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Target row absent or owned by someone else (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Uniqueness violation on create or register (409)
    #[error("Duplicate name: {0}")]
    DuplicateName(String),

    /// Malformed or out-of-range input (422, with per-field details)
    #[error("Validation failed: {} error(s)", .0.len())]
    Validation(Vec<ValidationErrorDetail>),

    /// Dependency unavailable, e.g. readiness probe failing (503)
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Pool, serializer, or hashing failure (500; detail logged, not leaked)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Validation error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// Inner payload of the error envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Stable machine-readable code (e.g. "NOT_FOUND")
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Per-field validation errors, when applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

/// Error response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// The error payload
    pub error: ErrorBody,
}

impl ApiError {
    /// Convenience constructor for a single-field validation error
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        ApiError::Validation(vec![ValidationErrorDetail {
            field: field.to_string(),
            message: message.into(),
        }])
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            ApiError::Unauthenticated(msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED", msg, None)
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg, None),
            ApiError::DuplicateName(msg) => (StatusCode::CONFLICT, "DUPLICATE_NAME", msg, None),
            ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
                "Request validation failed".to_string(),
                Some(errors),
            ),
            ApiError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
                msg,
                None,
            ),
            ApiError::Internal(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message,
                details,
            },
        });

        (status, body).into_response()
    }
}

/// Convert sqlx errors to API errors
///
/// Unique violations are classified by the table named in SQLite's error
/// message (`users.username` vs `inventory.`), since SQLite reports no
/// constraint name through `DatabaseError::constraint()`. This is how
/// duplicate detection works: the insert itself fails, there is no
/// check-then-insert pre-query anywhere.
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                if matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation) {
                    let message = db_err.message();
                    if message.contains("users.username") {
                        return ApiError::DuplicateName("Username is already taken".to_string());
                    }
                    if message.contains("inventory.") {
                        return ApiError::DuplicateName(
                            "You already have an item with this name".to_string(),
                        );
                    }
                    return ApiError::DuplicateName("Resource already exists".to_string());
                }

                ApiError::Internal(format!("Database error: {}", db_err))
            }
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

/// Convert JWT errors to API errors
impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => ApiError::Unauthenticated("Token expired".to_string()),
            JwtError::InvalidIssuer => ApiError::Unauthenticated("Invalid token issuer".to_string()),
            JwtError::ValidationError(msg) => ApiError::Unauthenticated(msg),
            JwtError::CreateError(msg) => ApiError::Internal(format!("Token creation failed: {}", msg)),
        }
    }
}

/// Convert password errors to API errors
impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::Internal(format!("Password operation failed: {}", err))
    }
}

/// Convert export errors to API errors
impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        ApiError::Internal(format!("Export failed: {}", err))
    }
}

/// Convert multipart read errors to API errors
impl From<axum::extract::multipart::MultipartError> for ApiError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        ApiError::BadRequest(format!("Malformed multipart request: {}", err))
    }
}

/// Convert request-shape validation failures to API errors
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details: Vec<ValidationErrorDetail> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationErrorDetail {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Validation failed".to_string()),
                })
            })
            .collect();

        ApiError::Validation(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::NotFound("No item named 'Pear'".to_string());
        assert_eq!(err.to_string(), "Not found: No item named 'Pear'");

        let err = ApiError::DuplicateName("Username is already taken".to_string());
        assert_eq!(err.to_string(), "Duplicate name: Username is already taken");
    }

    #[test]
    fn test_validation_error_display() {
        let err = ApiError::Validation(vec![
            ValidationErrorDetail {
                field: "quantity".to_string(),
                message: "Quantity must be a whole number".to_string(),
            },
            ValidationErrorDetail {
                field: "price".to_string(),
                message: "Price must be non-negative".to_string(),
            },
        ]);
        assert_eq!(err.to_string(), "Validation failed: 2 error(s)");
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (
                ApiError::Unauthenticated("no token".to_string()),
                StatusCode::UNAUTHORIZED,
            ),
            (
                ApiError::BadRequest("bad body".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::NotFound("missing".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::DuplicateName("taken".to_string()),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::validation("quantity", "must be non-negative"),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ApiError::ServiceUnavailable("db down".to_string()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ApiError::Internal("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_envelope_shape() {
        let body = ErrorResponse {
            error: ErrorBody {
                code: "NOT_FOUND".to_string(),
                message: "No item named 'Pear'".to_string(),
                details: None,
            },
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"]["code"], "NOT_FOUND");
        assert_eq!(json["error"]["message"], "No item named 'Pear'");
        // Absent details are omitted entirely, not serialized as null
        assert!(json["error"].get("details").is_none());
    }

    #[test]
    fn test_duplicate_classification_fallthrough() {
        // Non-database errors never classify as duplicates
        let err = ApiError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
