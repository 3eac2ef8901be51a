use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use std::fmt;

use crate::errors::auth::AuthError;
use crate::types::internal::auth::Claims;

/// Manages JWT issuance and verification
pub struct TokenService {
    jwt_secret: String,
    expiration_hours: i64,
}

impl TokenService {
    /// Create a new TokenService with the given signing secret and token lifetime
    pub fn new(jwt_secret: String, expiration_hours: i64) -> Self {
        Self {
            jwt_secret,
            expiration_hours,
        }
    }

    /// Issue a signed JWT for the given account
    ///
    /// # Arguments
    /// * `username` - Becomes the token subject
    /// * `role` - Role claim carried by the token
    ///
    /// # Returns
    /// * `Result<String, AuthError>` - The encoded JWT or an error
    pub fn issue_token(&self, username: &str, role: &str) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();

        let claims = Claims {
            sub: username.to_string(),
            role: role.to_string(),
            exp: now + self.expiration_hours * 3600,
            iat: now,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::internal_error(format!("Failed to generate JWT: {}", e)))
    }

    /// Verify a JWT and return its claims
    ///
    /// Expired tokens, bad signatures and structurally broken tokens map
    /// to distinct errors so callers can report which check failed.
    ///
    /// # Arguments
    /// * `token` - The JWT to verify
    ///
    /// # Returns
    /// * `Result<Claims, AuthError>` - The decoded claims or an error
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::expired_token(),
            ErrorKind::InvalidSignature => AuthError::invalid_signature(),
            _ => AuthError::malformed_token(),
        })?;

        Ok(token_data.claims)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("jwt_secret", &"<redacted>")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

impl fmt::Display for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenService {{ expiration: {}h }}", self.expiration_hours)
    }
}
