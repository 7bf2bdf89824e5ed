/// Authentication primitives
///
/// This module provides the authentication building blocks for inkpad:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: signed identity token issuance and verification
/// - [`guard`]: request-level token guard injecting [`guard::AuthContext`]
///
/// # Security Notes
///
/// - **Password Hashing**: Argon2id with a random per-hash salt
/// - **Identity Tokens**: HS256-signed, carrying only the user id; tokens
///   never expire and cannot be revoked, so possession of a token is
///   possession of the identity until the signing secret rotates
/// - **Verification**: constant-time comparisons throughout
///
/// # Example
///
/// ```no_run
/// use inkpad_shared::auth::password::{hash_password, verify_password};
/// use inkpad_shared::auth::jwt::{create_token, verify_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// let token = create_token(&Claims::new(Uuid::new_v4()), "secret-key")?;
/// let claims = verify_token(&token, "secret-key")?;
/// # Ok(())
/// # }
/// ```

pub mod guard;
pub mod jwt;
pub mod password;
