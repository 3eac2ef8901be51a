use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use uuid::Uuid;

use crate::errors::auth::AuthError;
use crate::types::db::user::{self, ActiveModel, Entity as User};

/// CredentialStore manages user accounts and password verification
pub struct CredentialStore {
    db: DatabaseConnection,
}

impl CredentialStore {
    /// Create a new CredentialStore with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Add a new user to the database
    ///
    /// # Arguments
    /// * `username` - The username for the new user
    /// * `password` - The plaintext password to hash and store
    /// * `role` - The role to grant ("ADMIN" or "USER")
    ///
    /// # Returns
    /// * `Ok(String)` - The user id (UUID) of the created user
    /// * `Err(AuthError)` - DuplicateUsername if username already exists, or InternalError
    pub async fn add_user(
        &self,
        username: String,
        password: String,
        role: String,
    ) -> Result<String, AuthError> {
        let existing_user = User::find()
            .filter(user::Column::Username.eq(&username))
            .one(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))?;

        if existing_user.is_some() {
            return Err(AuthError::duplicate_username());
        }

        let user_id = Uuid::new_v4().to_string();

        // Hash password with Argon2id (PHC string carries salt and parameters)
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::internal_error(format!("Password hashing error: {}", e)))?
            .to_string();

        let new_user = ActiveModel {
            id: Set(user_id.clone()),
            username: Set(username),
            password_hash: Set(password_hash),
            role: Set(role),
            created_at: Set(Utc::now().timestamp()),
        };

        new_user.insert(&self.db).await.map_err(|e| {
            if e.to_string().contains("UNIQUE") {
                AuthError::duplicate_username()
            } else {
                AuthError::internal_error(format!("Database error: {}", e))
            }
        })?;

        Ok(user_id)
    }

    /// Verify user credentials and return the account on success
    ///
    /// Every failure mode (unknown username, bad password, unparseable
    /// hash) collapses into the same InvalidCredentials error so the
    /// response does not reveal whether the username exists.
    ///
    /// # Arguments
    /// * `username` - The username to verify
    /// * `password` - The plaintext password to verify
    ///
    /// # Returns
    /// * `Ok(user::Model)` - The account if credentials are valid
    /// * `Err(AuthError)` - InvalidCredentials otherwise
    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<user::Model, AuthError> {
        let user = User::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|_| AuthError::invalid_credentials())?;

        let user = user.ok_or_else(AuthError::invalid_credentials)?;

        let parsed_hash =
            PasswordHash::new(&user.password_hash).map_err(|_| AuthError::invalid_credentials())?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| AuthError::invalid_credentials())?;

        Ok(user)
    }

    /// Look up a user by username
    pub async fn find_by_username(&self, username: &str) -> Result<Option<user::Model>, AuthError> {
        User::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))
    }

    /// Count all user accounts
    pub async fn count_users(&self) -> Result<u64, AuthError> {
        User::find()
            .count(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("db", &"<connection>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::internal::auth::{ROLE_ADMIN, ROLE_USER};
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{Database, DatabaseConnection};

    async fn setup_test_db() -> (DatabaseConnection, CredentialStore) {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");

        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let credential_store = CredentialStore::new(db.clone());

        (db, credential_store)
    }

    #[tokio::test]
    async fn test_add_user_creates_user_in_database() {
        let (_db, credential_store) = setup_test_db().await;

        let result = credential_store
            .add_user(
                "newuser".to_string(),
                "password123".to_string(),
                ROLE_USER.to_string(),
            )
            .await;

        assert!(result.is_ok());
        let user_id = result.unwrap();
        assert!(!user_id.is_empty());

        let verify_result = credential_store
            .verify_credentials("newuser", "password123")
            .await;

        assert!(verify_result.is_ok());
        assert_eq!(verify_result.unwrap().id, user_id);
    }

    #[tokio::test]
    async fn test_add_user_persists_role() {
        let (db, credential_store) = setup_test_db().await;

        credential_store
            .add_user(
                "admin".to_string(),
                "password123".to_string(),
                ROLE_ADMIN.to_string(),
            )
            .await
            .expect("Failed to add user");

        let user = User::find()
            .filter(user::Column::Username.eq("admin"))
            .one(&db)
            .await
            .expect("Failed to query user")
            .expect("User not found");

        assert_eq!(user.role, ROLE_ADMIN);
    }

    #[tokio::test]
    async fn test_add_user_hashes_password() {
        let (db, credential_store) = setup_test_db().await;

        let password = "mysecretpassword";
        let result = credential_store
            .add_user(
                "testuser".to_string(),
                password.to_string(),
                ROLE_USER.to_string(),
            )
            .await;

        assert!(result.is_ok());

        let user = User::find()
            .filter(user::Column::Username.eq("testuser"))
            .one(&db)
            .await
            .expect("Failed to query user")
            .expect("User not found");

        // Password must not be stored in plaintext
        assert_ne!(user.password_hash, password);

        // Stored value is an Argon2 PHC string
        assert!(user.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_add_user_fails_with_duplicate_username() {
        let (_db, credential_store) = setup_test_db().await;

        let result1 = credential_store
            .add_user(
                "duplicate".to_string(),
                "password1".to_string(),
                ROLE_USER.to_string(),
            )
            .await;

        assert!(result1.is_ok());

        let result2 = credential_store
            .add_user(
                "duplicate".to_string(),
                "password2".to_string(),
                ROLE_ADMIN.to_string(),
            )
            .await;

        assert!(result2.is_err());
        match result2 {
            Err(AuthError::DuplicateUsername(_)) => {
                // Expected error type
            }
            _ => panic!("Expected DuplicateUsername error"),
        }
    }

    #[tokio::test]
    async fn test_verify_credentials_succeeds_with_correct_password() {
        let (_db, credential_store) = setup_test_db().await;

        let user_id = credential_store
            .add_user(
                "validuser".to_string(),
                "correctpass".to_string(),
                ROLE_ADMIN.to_string(),
            )
            .await
            .expect("Failed to add user");

        let result = credential_store
            .verify_credentials("validuser", "correctpass")
            .await;

        assert!(result.is_ok());
        let user = result.unwrap();
        assert_eq!(user.id, user_id);
        assert_eq!(user.username, "validuser");
        assert_eq!(user.role, ROLE_ADMIN);
    }

    #[tokio::test]
    async fn test_verify_credentials_fails_with_incorrect_password() {
        let (_db, credential_store) = setup_test_db().await;

        credential_store
            .add_user(
                "validuser".to_string(),
                "correctpass".to_string(),
                ROLE_USER.to_string(),
            )
            .await
            .expect("Failed to add user");

        let result = credential_store
            .verify_credentials("validuser", "wrongpass")
            .await;

        assert!(result.is_err());
        match result {
            Err(AuthError::InvalidCredentials(_)) => {
                // Expected error type
            }
            _ => panic!("Expected InvalidCredentials error"),
        }
    }

    #[tokio::test]
    async fn test_verify_credentials_fails_with_nonexistent_username() {
        let (_db, credential_store) = setup_test_db().await;

        let result = credential_store
            .verify_credentials("nonexistent", "anypassword")
            .await;

        assert!(result.is_err());
        match result {
            Err(AuthError::InvalidCredentials(_)) => {
                // Expected error type
            }
            _ => panic!("Expected InvalidCredentials error"),
        }
    }

    #[tokio::test]
    async fn test_unknown_user_and_wrong_password_are_indistinguishable() {
        let (_db, credential_store) = setup_test_db().await;

        credential_store
            .add_user(
                "realuser".to_string(),
                "realpass".to_string(),
                ROLE_USER.to_string(),
            )
            .await
            .expect("Failed to add user");

        let wrong_password = credential_store
            .verify_credentials("realuser", "badpass")
            .await
            .expect_err("Expected error for wrong password");

        let unknown_user = credential_store
            .verify_credentials("ghost", "badpass")
            .await
            .expect_err("Expected error for unknown user");

        // Both failures surface the same error body
        assert_eq!(wrong_password.message(), unknown_user.message());
        assert_eq!(
            wrong_password.body().status_code,
            unknown_user.body().status_code
        );
    }

    #[tokio::test]
    async fn test_find_by_username_returns_none_for_missing_user() {
        let (_db, credential_store) = setup_test_db().await;

        let result = credential_store
            .find_by_username("missing")
            .await
            .expect("Query failed");

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_count_users_tracks_inserts() {
        let (_db, credential_store) = setup_test_db().await;

        assert_eq!(credential_store.count_users().await.unwrap(), 0);

        credential_store
            .add_user(
                "first".to_string(),
                "password".to_string(),
                ROLE_ADMIN.to_string(),
            )
            .await
            .expect("Failed to add user");

        credential_store
            .add_user(
                "second".to_string(),
                "password".to_string(),
                ROLE_USER.to_string(),
            )
            .await
            .expect("Failed to add user");

        assert_eq!(credential_store.count_users().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_debug_trait_does_not_expose_connection_details() {
        let (_db, credential_store) = setup_test_db().await;

        let debug_output = format!("{:?}", credential_store);

        assert!(debug_output.contains("CredentialStore"));
        assert!(debug_output.contains("<connection>"));
    }
}
