// Stores layer - Data access and repository pattern
pub mod credential_store;
pub mod product_query;
pub mod product_store;

pub use credential_store::CredentialStore;
pub use product_store::ProductStore;
