use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Request model for user login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username for authentication
    pub username: String,

    /// Password for authentication
    pub password: String,
}

/// Response model for successful authentication
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Signed JWT for the Authorization header
    pub token: String,

    /// Username the token was issued for
    pub username: String,

    /// Token scheme (always "Bearer")
    #[oai(rename = "tokenType")]
    #[serde(rename = "tokenType")]
    pub token_type: String,
}
