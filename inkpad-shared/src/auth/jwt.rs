/// Identity token issuance and verification
///
/// This module produces and checks the signed identity tokens that carry a
/// user id between requests. Tokens are signed with HS256 (HMAC-SHA256)
/// using a server-held secret.
///
/// # Design
///
/// - **Algorithm**: HS256
/// - **Claims**: `sub` (user id) and `iat` (issued at)
/// - **No expiry**: no `exp` claim is encoded and expiry validation is
///   disabled at decode time. A token stays valid until the signing secret
///   changes; deleting the user does not invalidate it.
/// - **Secret Management**: the secret must be at least 32 bytes and comes
///   from configuration; a missing secret is a startup failure, never a
///   per-request one.
///
/// # Example
///
/// ```
/// use inkpad_shared::auth::jwt::{create_token, verify_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let user_id = Uuid::new_v4();
/// let secret = "test-secret-key-at-least-32-bytes-long";
///
/// let token = create_token(&Claims::new(user_id), secret)?;
/// let claims = verify_token(&token, secret)?;
/// assert_eq!(claims.sub, user_id);
/// # Ok(())
/// # }
/// ```

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error type for token operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create a token
    #[error("Failed to create token: {0}")]
    Create(String),

    /// Signature did not validate or the payload is malformed
    #[error("Invalid token: {0}")]
    Invalid(String),
}

/// Identity token claims
///
/// Deliberately minimal: the token is a stateless projection of "who is
/// making this request" and nothing else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - user id
    pub sub: Uuid,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Creates claims for the given user id, stamped with the current time
    pub fn new(user_id: Uuid) -> Self {
        Self {
            sub: user_id,
            iat: Utc::now().timestamp(),
        }
    }
}

/// Signs a token embedding the given claims
///
/// # Errors
///
/// Returns `JwtError::Create` if encoding fails.
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key).map_err(|e| JwtError::Create(format!("Token encoding failed: {}", e)))
}

/// Verifies a token and extracts its claims
///
/// Checks the HS256 signature and that the payload deserializes into
/// [`Claims`]. There is no expiry to check: `validate_exp` is switched off
/// and no spec claims are required, because tokens are issued without an
/// `exp` claim.
///
/// # Errors
///
/// Returns `JwtError::Invalid` if the signature does not validate or the
/// payload is malformed.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.set_required_spec_claims::<&str>(&[]);

    let token_data = decode::<Claims>(token, &key, &validation)
        .map_err(|e| JwtError::Invalid(format!("Token validation failed: {}", e)))?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_claims_creation() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id);

        assert_eq!(claims.sub, user_id);
        assert!(claims.iat <= Utc::now().timestamp());
    }

    #[test]
    fn test_create_and_verify_token() {
        let user_id = Uuid::new_v4();

        let token = create_token(&Claims::new(user_id), SECRET).expect("Should create token");
        let verified = verify_token(&token, SECRET).expect("Should verify token");

        assert_eq!(verified.sub, user_id);
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let token = create_token(&Claims::new(Uuid::new_v4()), SECRET).expect("Should create token");

        let result = verify_token(&token, "wrong-secret-key-also-32-bytes-long!");
        assert!(matches!(result, Err(JwtError::Invalid(_))));
    }

    #[test]
    fn test_verify_garbage_token() {
        assert!(verify_token("not-a-token", SECRET).is_err());
        assert!(verify_token("", SECRET).is_err());
        assert!(verify_token("a.b.c", SECRET).is_err());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let token = create_token(&Claims::new(Uuid::new_v4()), SECRET).unwrap();

        // Flip a character in the payload segment
        let mut parts: Vec<String> = token.split('.').map(String::from).collect();
        assert_eq!(parts.len(), 3);
        let mut payload: Vec<char> = parts[1].chars().collect();
        let i = payload.len() / 2;
        payload[i] = if payload[i] == 'A' { 'B' } else { 'A' };
        parts[1] = payload.into_iter().collect();
        let tampered = parts.join(".");

        assert!(verify_token(&tampered, SECRET).is_err());
    }

    #[test]
    fn test_token_without_expiry_stays_valid() {
        // Claims stamped far in the past still verify: there is no exp claim.
        let claims = Claims {
            sub: Uuid::new_v4(),
            iat: 0,
        };

        let token = create_token(&claims, SECRET).unwrap();
        let verified = verify_token(&token, SECRET).expect("Old tokens never expire");
        assert_eq!(verified.iat, 0);
    }

    #[test]
    fn test_two_users_get_distinct_tokens() {
        let a = create_token(&Claims::new(Uuid::new_v4()), SECRET).unwrap();
        let b = create_token(&Claims::new(Uuid::new_v4()), SECRET).unwrap();
        assert_ne!(a, b);
    }
}
