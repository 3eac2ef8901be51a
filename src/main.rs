use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use poem::{listener::TcpListener, Server};
use sea_orm::{Database, DatabaseConnection};

use catalog_backend::api;
use catalog_backend::app_data::AppData;
use catalog_backend::bootstrap;
use catalog_backend::config::{init_logging, Settings};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging().expect("Failed to initialize logging");

    // Load configuration from environment
    let settings = Settings::from_env().expect("Failed to load settings");

    // Connect to database
    let db: DatabaseConnection = Database::connect(settings.database_url())
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database: {}", settings.database_url());

    // Run migrations
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    tracing::info!("Database migrations completed");

    let app_data = Arc::new(AppData::init(db, settings));

    // Seed the admin account and demo catalog where applicable
    bootstrap::run(&app_data)
        .await
        .expect("Bootstrap seeding failed");

    let app = api::build_app(&app_data);

    let address = app_data.settings.server_address();
    tracing::info!("Starting server on http://{}", address);
    tracing::info!("Swagger UI available at http://{}/swagger", address);
    tracing::info!("API endpoints available at http://{}/api", address);

    // Start Poem server with composed routes
    Server::new(TcpListener::bind(address)).run(app).await
}
