/// Request-level token guard
///
/// The guard is a pure token-to-identity projection: it takes the value of
/// the configured token header, verifies it, and produces an [`AuthContext`]
/// for downstream handlers. It never touches the store.
///
/// Per request there are exactly two outcomes: the request is answered with
/// 401, or control passes on with the resolved identity attached. The
/// wiring into the router (reading the header, inserting the extension)
/// lives in the API crate; the decision logic lives here so it can be
/// tested without a server.
///
/// # Example
///
/// ```
/// use inkpad_shared::auth::guard::authenticate;
/// use inkpad_shared::auth::jwt::{create_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "test-secret-key-at-least-32-bytes-long";
/// let user_id = Uuid::new_v4();
/// let token = create_token(&Claims::new(user_id), secret)?;
///
/// let auth = authenticate(Some(&token), secret).unwrap();
/// assert_eq!(auth.user_id, user_id);
///
/// assert!(authenticate(None, secret).is_err());
/// # Ok(())
/// # }
/// ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use super::jwt::verify_token;

/// Identity attached to a request after the guard admits it
///
/// Handlers extract it with Axum's `Extension` extractor.
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use inkpad_shared::auth::guard::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("User: {}", auth.user_id)
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user id
    pub user_id: Uuid,
}

impl AuthContext {
    /// Creates an auth context for a verified user id
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

/// Error type for the token guard
#[derive(Debug)]
pub enum AuthError {
    /// The token header was absent
    MissingToken,

    /// The token failed verification
    InvalidToken(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        // Same body for both failure modes, matching the wire contract:
        // the client learns nothing about why the token was rejected.
        let body = Json(json!({ "error": "Please authenticate using a valid token" }));
        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}

/// Resolves a token header value into an identity
///
/// # Errors
///
/// - `AuthError::MissingToken` if no header value was present
/// - `AuthError::InvalidToken` if verification fails
pub fn authenticate(header_value: Option<&str>, secret: &str) -> Result<AuthContext, AuthError> {
    let token = header_value.ok_or(AuthError::MissingToken)?;

    let claims = verify_token(token, secret).map_err(|e| AuthError::InvalidToken(e.to_string()))?;

    Ok(AuthContext::new(claims.sub))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::{create_token, Claims};

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_authenticate_valid_token() {
        let user_id = Uuid::new_v4();
        let token = create_token(&Claims::new(user_id), SECRET).unwrap();

        let auth = authenticate(Some(&token), SECRET).expect("Valid token should authenticate");
        assert_eq!(auth.user_id, user_id);
    }

    #[test]
    fn test_authenticate_missing_token() {
        let result = authenticate(None, SECRET);
        assert!(matches!(result, Err(AuthError::MissingToken)));
    }

    #[test]
    fn test_authenticate_invalid_token() {
        let result = authenticate(Some("garbage"), SECRET);
        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_authenticate_wrong_secret() {
        let token = create_token(&Claims::new(Uuid::new_v4()), SECRET).unwrap();

        let result = authenticate(Some(&token), "another-secret-key-32-bytes-long!!");
        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_auth_error_into_response() {
        let response = AuthError::MissingToken.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = AuthError::InvalidToken("bad".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
