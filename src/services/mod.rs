// Services layer - Business logic and orchestration
pub mod auth_service;
pub mod product_service;
pub mod product_validator;
pub mod token_service;

pub use auth_service::AuthService;
pub use product_service::ProductService;
pub use token_service::TokenService;
