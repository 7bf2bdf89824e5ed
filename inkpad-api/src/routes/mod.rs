/// API route handlers
///
/// Organized by resource:
///
/// - `health`: health check endpoint
/// - `auth`: registration, login, and user management
/// - `notes`: ownership-checked note CRUD

pub mod auth;
pub mod health;
pub mod notes;
