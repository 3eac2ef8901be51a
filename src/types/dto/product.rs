use poem_openapi::{payload::Json, ApiResponse, Object};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::db::product;

fn default_active() -> bool {
    true
}

/// Request model for creating or fully replacing a product
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct ProductDraft {
    /// Product display name
    pub name: String,

    /// Optional longer description
    pub description: Option<String>,

    /// Unit price, at most two decimal places
    pub price: Decimal,

    /// Catalog category
    pub category: String,

    /// Whether the product shows up in listings (defaults to true)
    #[oai(default = "default_active")]
    #[serde(default = "default_active")]
    pub active: bool,
}

/// Request model for partially updating a product.
///
/// Absent fields are left untouched. The id and active flag cannot be
/// changed through a patch.
#[derive(Object, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    /// New product name
    pub name: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New unit price
    pub price: Option<Decimal>,

    /// New catalog category
    pub category: Option<String>,
}

impl ProductPatch {
    /// True when no field is present, which makes the patch a no-op.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category.is_none()
    }
}

/// Response model for a single product
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct ProductResponse {
    /// Product identifier (UUID)
    pub id: String,

    /// Product display name
    pub name: String,

    /// Longer description, if any
    pub description: Option<String>,

    /// Unit price
    pub price: Decimal,

    /// Catalog category
    pub category: String,

    /// Whether the product shows up in listings
    pub active: bool,
}

impl From<product::Model> for ProductResponse {
    fn from(model: product::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            price: model.price,
            category: model.category,
            active: model.active,
        }
    }
}

/// One page of products plus the unpaginated match count
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ProductPage {
    /// Products on this page
    pub content: Vec<ProductResponse>,

    /// Total number of products matching the filter
    #[oai(rename = "totalElements")]
    #[serde(rename = "totalElements")]
    pub total_elements: u64,

    /// Zero-based page index that was served
    pub page: u64,

    /// Page size that was applied
    pub size: u64,
}

/// API response for product creation
#[derive(ApiResponse)]
pub enum CreateProductApiResponse {
    /// Product created
    #[oai(status = 201)]
    Created(Json<ProductResponse>),
}

/// API response for product deletion
#[derive(ApiResponse)]
pub enum DeleteProductApiResponse {
    /// Product deactivated
    #[oai(status = 204)]
    Deleted,
}
