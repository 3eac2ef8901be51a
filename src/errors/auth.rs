use poem_openapi::{payload::Json, ApiResponse};
use std::fmt;

use crate::types::dto::common::ErrorResponse;

/// Authentication and authorization error types
#[derive(ApiResponse, Debug)]
pub enum AuthError {
    /// Invalid username or password
    #[oai(status = 401)]
    InvalidCredentials(Json<ErrorResponse>),

    /// Username already exists
    #[oai(status = 400)]
    DuplicateUsername(Json<ErrorResponse>),

    /// JWT signature does not match
    #[oai(status = 401)]
    InvalidSignature(Json<ErrorResponse>),

    /// JWT has expired
    #[oai(status = 401)]
    ExpiredToken(Json<ErrorResponse>),

    /// JWT is structurally invalid
    #[oai(status = 401)]
    MalformedToken(Json<ErrorResponse>),

    /// Authorization header is missing
    #[oai(status = 401)]
    MissingAuthHeader(Json<ErrorResponse>),

    /// Authorization header format is invalid
    #[oai(status = 401)]
    InvalidAuthHeader(Json<ErrorResponse>),

    /// Authenticated but lacking the required role
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl AuthError {
    /// Create an InvalidCredentials error
    pub fn invalid_credentials() -> Self {
        AuthError::InvalidCredentials(Json(ErrorResponse {
            error: "invalid_credentials".to_string(),
            message: "Invalid username or password".to_string(),
            status_code: 401,
        }))
    }

    /// Create a DuplicateUsername error
    pub fn duplicate_username() -> Self {
        AuthError::DuplicateUsername(Json(ErrorResponse {
            error: "duplicate_username".to_string(),
            message: "Username already exists".to_string(),
            status_code: 400,
        }))
    }

    /// Create an InvalidSignature error
    pub fn invalid_signature() -> Self {
        AuthError::InvalidSignature(Json(ErrorResponse {
            error: "invalid_signature".to_string(),
            message: "JWT signature verification failed".to_string(),
            status_code: 401,
        }))
    }

    /// Create an ExpiredToken error
    pub fn expired_token() -> Self {
        AuthError::ExpiredToken(Json(ErrorResponse {
            error: "expired_token".to_string(),
            message: "JWT has expired".to_string(),
            status_code: 401,
        }))
    }

    /// Create a MalformedToken error
    pub fn malformed_token() -> Self {
        AuthError::MalformedToken(Json(ErrorResponse {
            error: "malformed_token".to_string(),
            message: "JWT is malformed".to_string(),
            status_code: 401,
        }))
    }

    /// Create a MissingAuthHeader error
    pub fn missing_auth_header() -> Self {
        AuthError::MissingAuthHeader(Json(ErrorResponse {
            error: "missing_auth_header".to_string(),
            message: "Authorization header is required".to_string(),
            status_code: 401,
        }))
    }

    /// Create an InvalidAuthHeader error
    pub fn invalid_auth_header() -> Self {
        AuthError::InvalidAuthHeader(Json(ErrorResponse {
            error: "invalid_auth_header".to_string(),
            message: "Invalid Authorization header format".to_string(),
            status_code: 401,
        }))
    }

    /// Create a Forbidden error
    pub fn forbidden(required_role: &str) -> Self {
        AuthError::Forbidden(Json(ErrorResponse {
            error: "forbidden".to_string(),
            message: format!("Requires the {} role", required_role),
            status_code: 403,
        }))
    }

    /// Create an InternalError
    pub fn internal_error(message: String) -> Self {
        AuthError::InternalError(Json(ErrorResponse {
            error: "internal_error".to_string(),
            message,
            status_code: 500,
        }))
    }

    /// Get the response body for the error variant
    pub fn body(&self) -> &ErrorResponse {
        match self {
            AuthError::InvalidCredentials(json) => &json.0,
            AuthError::DuplicateUsername(json) => &json.0,
            AuthError::InvalidSignature(json) => &json.0,
            AuthError::ExpiredToken(json) => &json.0,
            AuthError::MalformedToken(json) => &json.0,
            AuthError::MissingAuthHeader(json) => &json.0,
            AuthError::InvalidAuthHeader(json) => &json.0,
            AuthError::Forbidden(json) => &json.0,
            AuthError::InternalError(json) => &json.0,
        }
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        self.body().message.clone()
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
