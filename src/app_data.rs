use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::Settings;
use crate::services::{AuthService, ProductService, TokenService};
use crate::stores::{CredentialStore, ProductStore};

/// Centralized application data following the main-owned stores pattern
///
/// All dependencies are created once in main.rs and shared across the API
/// layer, so every handler works against the same store instances.
///
/// # Architecture
///
/// ```text
/// main.rs
///   ↓
/// AppData::init()
///   ↓ creates once
///   ├─ credential_store (Arc<CredentialStore>)
///   ├─ product_store (Arc<ProductStore>)
///   ├─ token_service (Arc<TokenService>)
///   ├─ auth_service (Arc<AuthService>)
///   └─ product_service (Arc<ProductService>)
///   ↓ wrapped in Arc<AppData>
///   ↓ passed to build_app() and bootstrap::run()
/// ```
pub struct AppData {
    pub db: DatabaseConnection,
    pub settings: Settings,
    pub credential_store: Arc<CredentialStore>,
    pub product_store: Arc<ProductStore>,
    pub token_service: Arc<TokenService>,
    pub auth_service: Arc<AuthService>,
    pub product_service: Arc<ProductService>,
}

impl AppData {
    /// Wire up stores and services over an already-migrated connection
    pub fn init(db: DatabaseConnection, settings: Settings) -> Self {
        tracing::info!("Initializing AppData...");

        tracing::debug!("Creating stores...");
        let credential_store = Arc::new(CredentialStore::new(db.clone()));
        let product_store = Arc::new(ProductStore::new(db.clone()));

        tracing::debug!("Creating services...");
        let token_service = Arc::new(TokenService::new(
            settings.jwt_secret().to_string(),
            settings.jwt_expiration_hours(),
        ));
        let auth_service = Arc::new(AuthService::new(
            credential_store.clone(),
            token_service.clone(),
        ));
        let product_service = Arc::new(ProductService::new(product_store.clone()));

        tracing::info!("AppData initialization complete");

        Self {
            db,
            settings,
            credential_store,
            product_store,
            token_service,
            auth_service,
            product_service,
        }
    }
}
