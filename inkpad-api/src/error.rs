/// Error handling for the API server
///
/// A single `ApiError` enum covers the whole failure taxonomy and maps to
/// HTTP responses. Handlers return `Result<T, ApiError>`; the wire shape is
/// `{ "error": "..." }` for single failures and `{ "errors": [...] }` for
/// field-level validation failures.
///
/// Validation errors are produced at the service boundary before any store
/// mutation; store/driver faults are caught here at the outermost layer and
/// mapped to a generic 500 with the detail kept in the server log.
///
/// # Example
///
/// ```no_run
/// use inkpad_api::error::{ApiError, ApiResult};
/// use axum::Json;
///
/// async fn handler() -> ApiResult<Json<serde_json::Value>> {
///     Err(ApiError::NotFound("Note not found".to_string()))
/// }
/// ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;

use inkpad_shared::auth::{jwt::JwtError, password::PasswordError};

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Field-level validation failures (400)
    Validation(Vec<ValidationErrorDetail>),

    /// Registration attempt with an email that is already taken (400)
    DuplicateEmail,

    /// Unknown email or wrong password on login (400)
    ///
    /// Deliberately one variant for both, so responses cannot be used to
    /// enumerate registered emails.
    InvalidCredentials,

    /// Malformed resource identifier (400)
    InvalidId(String),

    /// Missing or invalid identity token (401)
    Unauthorized(String),

    /// Valid identity, but not the owner of the resource (403)
    Forbidden(String),

    /// Resource does not exist (404)
    NotFound(String),

    /// Store/driver fault or other unexpected failure (500)
    Internal(String),
}

/// One field-level validation failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// Single-error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::DuplicateEmail => write!(f, "Duplicate email"),
            ApiError::InvalidCredentials => write!(f, "Invalid credentials"),
            ApiError::InvalidId(msg) => write!(f, "Invalid id: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Validation failures carry a list, everything else a single error
        if let ApiError::Validation(errors) = &self {
            return (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response();
        }

        let (status, message) = match self {
            ApiError::Validation(_) => unreachable!(),
            ApiError::DuplicateEmail => (
                StatusCode::BAD_REQUEST,
                "Sorry a user with this email already exists!".to_string(),
            ),
            ApiError::InvalidCredentials => {
                (StatusCode::BAD_REQUEST, "Invalid user Credentials".to_string())
            }
            ApiError::InvalidId(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => {
                // Log the detail server-side, never expose it to the client
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Convert sqlx errors to API errors
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                // A duplicate email racing past the pre-insert lookup lands
                // on the unique index and must surface as the same 400
                if let Some(constraint) = db_err.constraint() {
                    if constraint.contains("email") {
                        return ApiError::DuplicateEmail;
                    }
                }

                ApiError::Internal(format!("Database error: {}", db_err))
            }
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

/// Convert declarative validation failures to API errors
impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        let errors: Vec<ValidationErrorDetail> = err
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

        ApiError::Validation(errors)
    }
}

/// Convert password errors to API errors
///
/// Hashing only fails on misconfiguration or a corrupt stored hash, both
/// of which are server faults, never the client's.
impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::Internal(format!("Password operation failed: {}", err))
    }
}

/// Convert token errors to API errors
impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Create(msg) => ApiError::Internal(format!("Token creation failed: {}", msg)),
            JwtError::Invalid(_) => {
                ApiError::Unauthorized("Please authenticate using a valid token".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::NotFound("Note not found".to_string());
        assert_eq!(err.to_string(), "Not found: Note not found");

        let err = ApiError::Forbidden("Not authorized".to_string());
        assert_eq!(err.to_string(), "Forbidden: Not authorized");
    }

    #[test]
    fn test_status_codes() {
        let cases = vec![
            (ApiError::DuplicateEmail, StatusCode::BAD_REQUEST),
            (ApiError::InvalidCredentials, StatusCode::BAD_REQUEST),
            (
                ApiError::InvalidId("Invalid note id".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::Unauthorized("nope".to_string()),
                StatusCode::UNAUTHORIZED,
            ),
            (
                ApiError::Forbidden("Not authorized".to_string()),
                StatusCode::FORBIDDEN,
            ),
            (
                ApiError::NotFound("Note not found".to_string()),
                StatusCode::NOT_FOUND,
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
    fn test_validation_error_response() {
        let err = ApiError::Validation(vec![
            ValidationErrorDetail {
                field: "email".to_string(),
                message: "Invalid email".to_string(),
            },
            ValidationErrorDetail {
                field: "password".to_string(),
                message: "Password too short".to_string(),
            },
        ]);

        assert_eq!(err.to_string(), "Validation failed: 2 errors");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_sqlx_row_not_found_maps_to_404() {
        let err: ApiError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
