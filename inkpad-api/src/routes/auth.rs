/// Authentication and user management endpoints
///
/// Registration and login issue identity tokens; the remaining operations
/// act on user records and all require a verified token.
///
/// # Endpoints
///
/// - `POST /api/auth/create-user` - register, returns a token
/// - `POST /api/auth/login` - login, returns a token
/// - `POST /api/auth/get-user` - profile of the authenticated user
/// - `GET /api/auth/fetch-all-users` - list users
/// - `GET /api/auth/fetch-user/:id` - fetch one user
/// - `PUT /api/auth/update-user/:id` - partial update of a user
/// - `DELETE /api/auth/delete-user/:id` - delete a user

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use inkpad_shared::{
    auth::{guard::AuthContext, jwt, password},
    models::user::{CreateUser, UpdateUser, User},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Registration request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Display name
    #[validate(length(min = 4, message = "Name must be at least 4 chars"))]
    pub name: String,

    /// Email address
    #[validate(email(message = "Invalid email"))]
    pub email: String,

    /// Plaintext password, hashed before storage
    #[validate(length(min = 6, message = "Password too short"))]
    pub password: String,
}

/// Login request
///
/// The password minimum matches registration, so the check can never
/// reject a password that a stored account could actually have.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email"))]
    pub email: String,

    /// Plaintext password
    #[validate(length(min = 6, message = "Password too short"))]
    pub password: String,
}

/// Partial user update request
///
/// Only provided fields change; each provided field must satisfy the
/// registration rules.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// New display name
    #[validate(length(min = 4, message = "Name must be at least 4 chars"))]
    pub name: Option<String>,

    /// New email address
    #[validate(email(message = "Invalid email"))]
    pub email: Option<String>,

    /// New plaintext password, hashed before storage
    #[validate(length(min = 6, message = "Password too short"))]
    pub password: Option<String>,
}

/// Token envelope returned by registration and login
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    /// Human-readable outcome
    pub message: String,

    /// Signed identity token
    pub token: String,
}

/// Single-user envelope
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// Human-readable outcome
    pub message: String,

    /// The user record (password hash never serializes)
    pub user: User,
}

/// Bare-message envelope
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable outcome
    pub message: String,
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/create-user
/// Content-Type: application/json
///
/// { "name": "Alice", "email": "a@x.com", "password": "secret1" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: validation failed or email already registered
/// - `500 Internal Server Error`: store fault
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<TokenResponse>)> {
    req.validate()?;

    // Duplicate check before any mutation; the unique index is the
    // backstop for a concurrent registration with the same email
    if User::find_by_email(&state.db, &req.email).await?.is_some() {
        return Err(ApiError::DuplicateEmail);
    }

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            name: req.name,
            email: req.email,
            password_hash,
        },
    )
    .await?;

    let token = jwt::create_token(&jwt::Claims::new(user.id), state.jwt_secret())?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            message: "User added successfully".to_string(),
            token,
        }),
    ))
}

/// Login with email and password
///
/// The response does not distinguish "no such email" from "wrong
/// password".
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/login
/// Content-Type: application/json
///
/// { "email": "a@x.com", "password": "secret1" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: validation failed or invalid credentials
/// - `500 Internal Server Error`: store fault
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    req.validate()?;

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::InvalidCredentials);
    }

    let token = jwt::create_token(&jwt::Claims::new(user.id), state.jwt_secret())?;

    Ok(Json(TokenResponse {
        message: "User logged in successfully".to_string(),
        token,
    }))
}

/// Fetch the authenticated user's own record
///
/// Tokens outlive their user: a token for a since-deleted account still
/// verifies, and lands here as 404.
///
/// # Errors
///
/// - `401 Unauthorized`: missing or invalid token
/// - `404 Not Found`: the token's user no longer exists
pub async fn get_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<UserResponse>> {
    let user = User::find_by_id(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(UserResponse {
        message: "User fetched successfully".to_string(),
        user,
    }))
}

/// List all users
///
/// Returns a bare array, newest first.
pub async fn fetch_all_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = User::list(&state.db).await?;

    Ok(Json(users))
}

/// Fetch a single user by id
///
/// # Errors
///
/// - `404 Not Found`: no user with that id
pub async fn fetch_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<UserResponse>> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(UserResponse {
        message: "User Fetched successfully".to_string(),
        user,
    }))
}

/// Partially update a user
///
/// Omitted fields are untouched. A provided password is hashed before it
/// reaches the store.
///
/// # Errors
///
/// - `400 Bad Request`: validation failed or new email already taken
/// - `404 Not Found`: no user with that id
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    req.validate()?;

    let password_hash = match req.password {
        Some(ref plaintext) => Some(password::hash_password(plaintext)?),
        None => None,
    };

    let user = User::update(
        &state.db,
        id,
        UpdateUser {
            name: req.name,
            email: req.email,
            password_hash,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(UserResponse {
        message: "User updated successfully".to_string(),
        user,
    }))
}

/// Delete a user
///
/// The user's notes are not cascaded; they keep their dangling owner
/// reference. Outstanding tokens for the deleted id keep verifying but
/// resolve to 404 wherever the record is needed.
///
/// # Errors
///
/// - `404 Not Found`: no user with that id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    let deleted = User::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    tracing::info!(user_id = %id, "User deleted");

    Ok(Json(MessageResponse {
        message: "User deleted successfully".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_request_validation() {
        let ok = CreateUserRequest {
            name: "Alice".to_string(),
            email: "a@x.com".to_string(),
            password: "secret1".to_string(),
        };
        assert!(ok.validate().is_ok());

        let short_name = CreateUserRequest {
            name: "Al".to_string(),
            email: "a@x.com".to_string(),
            password: "secret1".to_string(),
        };
        assert!(short_name.validate().is_err());

        let bad_email = CreateUserRequest {
            name: "Alice".to_string(),
            email: "not-an-email".to_string(),
            password: "secret1".to_string(),
        };
        assert!(bad_email.validate().is_err());

        let short_password = CreateUserRequest {
            name: "Alice".to_string(),
            email: "a@x.com".to_string(),
            password: "12345".to_string(),
        };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_login_request_validation_matches_registration_minimum() {
        let five_chars = LoginRequest {
            email: "a@x.com".to_string(),
            password: "12345".to_string(),
        };
        assert!(five_chars.validate().is_err());

        let six_chars = LoginRequest {
            email: "a@x.com".to_string(),
            password: "123456".to_string(),
        };
        assert!(six_chars.validate().is_ok());
    }

    #[test]
    fn test_update_user_request_allows_omitted_fields() {
        let empty = UpdateUserRequest {
            name: None,
            email: None,
            password: None,
        };
        assert!(empty.validate().is_ok());

        let bad_present_field = UpdateUserRequest {
            name: Some("Al".to_string()),
            email: None,
            password: None,
        };
        assert!(bad_present_field.validate().is_err());
    }
}
