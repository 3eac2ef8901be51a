// API layer - HTTP endpoints and route assembly
pub mod auth;
pub mod guard;
pub mod health;
pub mod products;
pub mod timeout;

use std::sync::Arc;

use poem::{Endpoint, EndpointExt, Response, Route};
use poem_openapi::OpenApiService;

pub use auth::AuthApi;
pub use guard::{Access, AuthGuard, RouteRule};
pub use health::HealthApi;
pub use products::ProductsApi;
pub use timeout::RequestTimeout;

use crate::app_data::AppData;

/// Assemble the HTTP application
///
/// Nests the OpenAPI service under `/api` and the generated Swagger UI
/// under `/swagger`, then wraps the whole tree in the auth guard and the
/// request deadline. The guard sits inside the timeout so token checks
/// count against the deadline too.
pub fn build_app(app_data: &Arc<AppData>) -> impl Endpoint<Output = Response> {
    let auth_api = AuthApi::new(app_data.auth_service.clone());
    let products_api = ProductsApi::new(app_data.product_service.clone());

    // Create OpenAPI service with API implementations
    let api_service = OpenApiService::new(
        (HealthApi, auth_api, products_api),
        "Catalog API",
        env!("CARGO_PKG_VERSION"),
    )
    .server("/api");

    // Generate Swagger UI from OpenAPI service
    let ui = api_service.swagger_ui();

    Route::new()
        .nest("/api", api_service)
        .nest("/swagger", ui)
        .with(AuthGuard::for_catalog(app_data.token_service.clone()))
        .with(RequestTimeout::new(app_data.settings.request_timeout()))
}
