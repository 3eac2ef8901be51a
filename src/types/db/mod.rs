// Database entities - SeaORM models
pub mod product;
pub mod user;
