use serde::{Deserialize, Serialize};

/// Role granted full catalog write access.
pub const ROLE_ADMIN: &str = "ADMIN";

/// Role limited to authenticated read access.
pub const ROLE_USER: &str = "USER";

/// JWT Claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,

    /// Role carried by the token ("ADMIN" or "USER")
    pub role: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}
