// Errors layer - Error type definitions
pub mod auth;
pub mod product;

// Re-exports for convenience
pub use auth::AuthError;
pub use product::ProductError;
