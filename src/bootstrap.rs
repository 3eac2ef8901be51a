use rust_decimal::Decimal;

use crate::app_data::AppData;
use crate::types::dto::product::ProductDraft;
use crate::types::internal::auth::ROLE_ADMIN;

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Failed to create admin account: {0}")]
    Admin(String),

    #[error("Failed to seed demo catalog: {0}")]
    Seed(String),
}

/// Seed the initial admin account and, optionally, a demo catalog
///
/// Runs once at startup after migrations. The admin account is only
/// created when the users table is empty, so changing `ADMIN_USERNAME`
/// later does not produce a second admin. Demo products are only
/// inserted into an empty catalog.
pub async fn run(app_data: &AppData) -> Result<(), BootstrapError> {
    ensure_admin_account(app_data).await?;

    if app_data.settings.seed_demo_catalog() {
        seed_demo_catalog(app_data).await?;
    }

    Ok(())
}

async fn ensure_admin_account(app_data: &AppData) -> Result<(), BootstrapError> {
    let existing = app_data
        .credential_store
        .count_users()
        .await
        .map_err(|e| BootstrapError::Admin(e.message()))?;

    if existing > 0 {
        tracing::debug!("Users already present, skipping admin bootstrap");
        return Ok(());
    }

    let settings = &app_data.settings;

    if settings.uses_default_admin_password() {
        tracing::warn!(
            "ADMIN_PASSWORD is not set; the bootstrap admin account uses the default password"
        );
    }

    let user_id = app_data
        .credential_store
        .add_user(
            settings.admin_username().to_string(),
            settings.admin_password().to_string(),
            ROLE_ADMIN.to_string(),
        )
        .await
        .map_err(|e| BootstrapError::Admin(e.message()))?;

    tracing::info!(
        username = %settings.admin_username(),
        user_id = %user_id,
        "Bootstrap admin account created"
    );

    Ok(())
}

async fn seed_demo_catalog(app_data: &AppData) -> Result<(), BootstrapError> {
    let existing = app_data
        .product_store
        .count_all()
        .await
        .map_err(|e| BootstrapError::Seed(e.message()))?;

    if existing > 0 {
        tracing::debug!("Catalog already has products, skipping demo seed");
        return Ok(());
    }

    for draft in demo_products() {
        app_data
            .product_store
            .insert(&draft)
            .await
            .map_err(|e| BootstrapError::Seed(e.message()))?;
    }

    tracing::info!("Demo catalog seeded");

    Ok(())
}

fn demo_products() -> Vec<ProductDraft> {
    vec![
        ProductDraft {
            name: "Laptop".to_string(),
            description: Some("15-inch developer laptop".to_string()),
            price: Decimal::new(150_000, 2),
            category: "Electronics".to_string(),
            active: true,
        },
        ProductDraft {
            name: "Systems Design Handbook".to_string(),
            description: Some("Field guide to designing reliable services".to_string()),
            price: Decimal::new(3_999, 2),
            category: "Books".to_string(),
            active: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MockEnvironment, Settings};
    use crate::types::internal::auth::ROLE_USER;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    fn base_env() -> MockEnvironment {
        MockEnvironment::empty().with_var("JWT_SECRET", "bootstrap-test-secret")
    }

    async fn setup_app(env: MockEnvironment) -> AppData {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");

        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let settings = Settings::from_env_provider(&env).expect("Failed to load settings");

        AppData::init(db, settings)
    }

    #[tokio::test]
    async fn test_bootstrap_creates_admin_in_empty_database() {
        let app = setup_app(base_env()).await;

        run(&app).await.expect("Bootstrap failed");

        let admin = app
            .credential_store
            .find_by_username("admin")
            .await
            .expect("Query failed")
            .expect("Admin account should exist");
        assert_eq!(admin.role, ROLE_ADMIN);

        // The default credentials must actually work
        app.credential_store
            .verify_credentials("admin", "password")
            .await
            .expect("Admin login should succeed");
    }

    #[tokio::test]
    async fn test_bootstrap_honors_custom_admin_credentials() {
        let env = base_env()
            .with_var("ADMIN_USERNAME", "root")
            .with_var("ADMIN_PASSWORD", "hunter2hunter2");
        let app = setup_app(env).await;

        run(&app).await.expect("Bootstrap failed");

        let user = app
            .credential_store
            .verify_credentials("root", "hunter2hunter2")
            .await
            .expect("Custom admin login should succeed");
        assert_eq!(user.role, ROLE_ADMIN);
    }

    #[tokio::test]
    async fn test_bootstrap_skips_admin_when_users_exist() {
        let app = setup_app(base_env()).await;

        app.credential_store
            .add_user(
                "resident".to_string(),
                "resident-pw".to_string(),
                ROLE_USER.to_string(),
            )
            .await
            .expect("Failed to add user");

        run(&app).await.expect("Bootstrap failed");

        let count = app
            .credential_store
            .count_users()
            .await
            .expect("Count failed");
        assert_eq!(count, 1);

        let admin = app
            .credential_store
            .find_by_username("admin")
            .await
            .expect("Query failed");
        assert!(admin.is_none());
    }

    #[tokio::test]
    async fn test_bootstrap_seeds_demo_products_into_empty_catalog() {
        let app = setup_app(base_env()).await;

        run(&app).await.expect("Bootstrap failed");

        assert_eq!(app.product_store.count_all().await.expect("Count failed"), 2);

        let (items, total) = app
            .product_store
            .find_page(
                &crate::stores::product_query::ProductFilter::new(None, None),
                &crate::stores::product_query::PageRequest::new(None, None),
                None,
            )
            .await
            .expect("Listing failed");

        assert_eq!(total, 2);
        let names: Vec<&str> = items.iter().map(|p| p.name.as_str()).collect();
        assert!(names.contains(&"Laptop"));
        assert!(names.contains(&"Systems Design Handbook"));
    }

    #[tokio::test]
    async fn test_bootstrap_respects_disabled_seed_flag() {
        let env = base_env().with_var("SEED_DEMO_CATALOG", "false");
        let app = setup_app(env).await;

        run(&app).await.expect("Bootstrap failed");

        assert_eq!(app.product_store.count_all().await.expect("Count failed"), 0);
    }

    #[tokio::test]
    async fn test_bootstrap_skips_seed_when_catalog_has_products() {
        let app = setup_app(base_env()).await;

        let existing = ProductDraft {
            name: "Incumbent".to_string(),
            description: None,
            price: Decimal::new(100, 2),
            category: "Food".to_string(),
            active: true,
        };
        app.product_store
            .insert(&existing)
            .await
            .expect("Failed to insert product");

        run(&app).await.expect("Bootstrap failed");

        assert_eq!(app.product_store.count_all().await.expect("Count failed"), 1);
    }

    #[tokio::test]
    async fn test_bootstrap_run_twice_is_idempotent() {
        let app = setup_app(base_env()).await;

        run(&app).await.expect("First bootstrap failed");
        run(&app).await.expect("Second bootstrap failed");

        assert_eq!(
            app.credential_store
                .count_users()
                .await
                .expect("Count failed"),
            1
        );
        assert_eq!(app.product_store.count_all().await.expect("Count failed"), 2);
    }
}
