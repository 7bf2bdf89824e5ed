/// Database models for inkpad
///
/// This module contains the persisted records and their CRUD operations.
///
/// # Models
///
/// - `user`: user accounts (the credential store)
/// - `note`: notes owned by a user (the note store)
///
/// A note holds a non-owning reference to its user: there is no foreign
/// key and deleting a user leaves the notes behind with a dangling
/// `owner_id`.
///
/// # Example
///
/// ```no_run
/// use inkpad_shared::models::user::{User, CreateUser};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let user = User::create(
///     &pool,
///     CreateUser {
///         name: "Alice".to_string(),
///         email: "a@x.com".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///     },
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```

pub mod note;
pub mod user;
