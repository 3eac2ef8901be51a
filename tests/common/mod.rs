// Common test utilities for integration tests

use std::collections::HashMap;
use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use poem::{endpoint::BoxEndpoint, test::TestClient, EndpointExt, Response};
use sea_orm::Database;

use catalog_backend::api::build_app;
use catalog_backend::app_data::AppData;
use catalog_backend::bootstrap;
use catalog_backend::config::{EnvironmentProvider, Settings};

/// JWT secret the test application is configured with
pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Environment provider backed by a fixed map
///
/// Starts with the JWT secret set and demo seeding disabled so tests get
/// an empty catalog plus the bootstrap admin account.
pub struct TestEnv {
    vars: HashMap<String, String>,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
        }
        .with_var("JWT_SECRET", TEST_JWT_SECRET)
        .with_var("SEED_DEMO_CATALOG", "false")
    }

    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }
}

impl EnvironmentProvider for TestEnv {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// A fully wired application over an in-memory database
pub struct TestApp {
    pub cli: TestClient<BoxEndpoint<'static, Response>>,
    pub data: Arc<AppData>,
}

/// Build the application with default test settings
pub async fn spawn_app() -> TestApp {
    spawn_app_with_env(TestEnv::new()).await
}

/// Build the application with custom environment variables
pub async fn spawn_app_with_env(env: TestEnv) -> TestApp {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let settings = Settings::from_env_provider(&env).expect("Failed to load settings");
    let data = Arc::new(AppData::init(db, settings));

    bootstrap::run(&data).await.expect("Bootstrap failed");

    let app = build_app(&data).boxed();

    TestApp {
        cli: TestClient::new(app),
        data,
    }
}

/// Log in through the API and return the bearer token
pub async fn login(app: &TestApp, username: &str, password: &str) -> String {
    let resp = app
        .cli
        .post("/api/auth/login")
        .body_json(&serde_json::json!({
            "username": username,
            "password": password,
        }))
        .send()
        .await;

    resp.assert_status_is_ok();

    let json = resp.json().await;
    json.value().object().get("token").string().to_string()
}

/// Token for the bootstrap admin account
pub async fn admin_token(app: &TestApp) -> String {
    login(app, "admin", "password").await
}
