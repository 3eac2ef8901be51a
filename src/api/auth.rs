use poem_openapi::{payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::errors::auth::AuthError;
use crate::services::AuthService;
use crate::types::dto::auth::{LoginRequest, LoginResponse};

/// Authentication API endpoints
pub struct AuthApi {
    auth_service: Arc<AuthService>,
}

impl AuthApi {
    /// Create a new AuthApi backed by the given AuthService
    pub fn new(auth_service: Arc<AuthService>) -> Self {
        Self { auth_service }
    }
}

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Login with username and password to receive a bearer token
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(&self, body: Json<LoginRequest>) -> Result<Json<LoginResponse>, AuthError> {
        let response = self
            .auth_service
            .login(&body.username, &body.password)
            .await?;

        Ok(Json(response))
    }
}
