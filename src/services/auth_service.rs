use std::sync::Arc;

use crate::errors::auth::AuthError;
use crate::services::TokenService;
use crate::stores::CredentialStore;
use crate::types::dto::auth::LoginResponse;

/// Authentication service that orchestrates the login flow
///
/// Coordinates CredentialStore and TokenService: verify the credentials,
/// then issue a stateless bearer token for the account.
pub struct AuthService {
    credential_store: Arc<CredentialStore>,
    token_service: Arc<TokenService>,
}

impl AuthService {
    /// Create a new AuthService
    pub fn new(credential_store: Arc<CredentialStore>, token_service: Arc<TokenService>) -> Self {
        Self {
            credential_store,
            token_service,
        }
    }

    /// Authenticate a user and issue a bearer token
    ///
    /// # Arguments
    /// * `username` - Username to authenticate
    /// * `password` - Password to verify
    ///
    /// # Returns
    /// * `Result<LoginResponse, AuthError>` - Token payload or InvalidCredentials
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, AuthError> {
        let user = self
            .credential_store
            .verify_credentials(username, password)
            .await?;

        let token = self.token_service.issue_token(&user.username, &user.role)?;

        tracing::info!(username = %user.username, "User logged in");

        Ok(LoginResponse {
            token,
            username: user.username,
            token_type: "Bearer".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::internal::auth::{ROLE_ADMIN, ROLE_USER};
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    async fn setup_auth_service() -> (Arc<CredentialStore>, AuthService, Arc<TokenService>) {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");

        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let credential_store = Arc::new(CredentialStore::new(db));
        let token_service = Arc::new(TokenService::new(
            "test-secret-key-minimum-32-characters-long".to_string(),
            24,
        ));
        let auth_service = AuthService::new(credential_store.clone(), token_service.clone());

        (credential_store, auth_service, token_service)
    }

    #[tokio::test]
    async fn test_login_returns_bearer_token_for_valid_credentials() {
        let (credential_store, auth_service, token_service) = setup_auth_service().await;

        credential_store
            .add_user(
                "admin".to_string(),
                "correct-horse".to_string(),
                ROLE_ADMIN.to_string(),
            )
            .await
            .expect("Failed to add user");

        let response = auth_service
            .login("admin", "correct-horse")
            .await
            .expect("Login should succeed");

        assert_eq!(response.username, "admin");
        assert_eq!(response.token_type, "Bearer");

        let claims = token_service
            .verify_token(&response.token)
            .expect("Issued token should verify");
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.role, ROLE_ADMIN);
    }

    #[tokio::test]
    async fn test_login_token_carries_user_role() {
        let (credential_store, auth_service, token_service) = setup_auth_service().await;

        credential_store
            .add_user(
                "reader".to_string(),
                "some-password".to_string(),
                ROLE_USER.to_string(),
            )
            .await
            .expect("Failed to add user");

        let response = auth_service
            .login("reader", "some-password")
            .await
            .expect("Login should succeed");

        let claims = token_service
            .verify_token(&response.token)
            .expect("Issued token should verify");
        assert_eq!(claims.role, ROLE_USER);
    }

    #[tokio::test]
    async fn test_login_fails_with_wrong_password() {
        let (credential_store, auth_service, _token_service) = setup_auth_service().await;

        credential_store
            .add_user(
                "admin".to_string(),
                "correct-horse".to_string(),
                ROLE_ADMIN.to_string(),
            )
            .await
            .expect("Failed to add user");

        let result = auth_service.login("admin", "wrong-horse").await;

        assert!(result.is_err());
        match result {
            Err(AuthError::InvalidCredentials(_)) => {
                // Expected error type
            }
            _ => panic!("Expected InvalidCredentials error"),
        }
    }

    #[tokio::test]
    async fn test_login_fails_identically_for_unknown_user() {
        let (credential_store, auth_service, _token_service) = setup_auth_service().await;

        credential_store
            .add_user(
                "admin".to_string(),
                "correct-horse".to_string(),
                ROLE_ADMIN.to_string(),
            )
            .await
            .expect("Failed to add user");

        let wrong_password = auth_service
            .login("admin", "nope")
            .await
            .expect_err("Expected error");
        let unknown_user = auth_service
            .login("ghost", "nope")
            .await
            .expect_err("Expected error");

        assert_eq!(wrong_password.message(), unknown_user.message());
    }
}
