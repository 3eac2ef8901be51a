use poem_openapi::{
    param::{Path, Query},
    payload::Json,
    OpenApi, Tags,
};
use std::sync::Arc;

use crate::errors::product::ProductError;
use crate::services::ProductService;
use crate::stores::product_query::{PageRequest, ProductFilter, SortSpec};
use crate::types::dto::product::{
    CreateProductApiResponse, DeleteProductApiResponse, ProductDraft, ProductPage, ProductPatch,
    ProductResponse,
};

/// Product catalog API endpoints
pub struct ProductsApi {
    product_service: Arc<ProductService>,
}

impl ProductsApi {
    /// Create a new ProductsApi backed by the given ProductService
    pub fn new(product_service: Arc<ProductService>) -> Self {
        Self { product_service }
    }
}

/// API tags for product endpoints
#[derive(Tags)]
enum ProductTags {
    /// Product catalog endpoints
    Products,
}

#[OpenApi]
impl ProductsApi {
    /// List active products with optional filtering, sorting and pagination
    ///
    /// `name` matches a case-insensitive substring of the product name,
    /// `category` matches exactly, and `sort` takes `field` or
    /// `field,direction` over the whitelisted sort fields.
    #[oai(path = "/products", method = "get", tag = "ProductTags::Products")]
    async fn list_products(
        &self,
        name: Query<Option<String>>,
        category: Query<Option<String>>,
        page: Query<Option<u64>>,
        size: Query<Option<u64>>,
        sort: Query<Option<String>>,
    ) -> Result<Json<ProductPage>, ProductError> {
        let filter = ProductFilter::new(name.0, category.0);
        let page_request = PageRequest::new(page.0, size.0);
        let sort_spec = sort.0.as_deref().and_then(SortSpec::parse);

        let (items, total) = self
            .product_service
            .list(&filter, &page_request, sort_spec.as_ref())
            .await?;

        Ok(Json(ProductPage {
            content: items.into_iter().map(ProductResponse::from).collect(),
            total_elements: total,
            page: page_request.page,
            size: page_request.size,
        }))
    }

    /// Fetch a single product by id
    ///
    /// Soft-deleted products are still returned here even though listings
    /// exclude them.
    #[oai(path = "/products/:id", method = "get", tag = "ProductTags::Products")]
    async fn get_product(&self, id: Path<String>) -> Result<Json<ProductResponse>, ProductError> {
        let product = self.product_service.get(&id.0).await?;

        Ok(Json(product.into()))
    }

    /// Create a new product
    #[oai(path = "/products", method = "post", tag = "ProductTags::Products")]
    async fn create_product(
        &self,
        body: Json<ProductDraft>,
    ) -> Result<CreateProductApiResponse, ProductError> {
        let created = self.product_service.create(body.0).await?;

        Ok(CreateProductApiResponse::Created(Json(created.into())))
    }

    /// Replace every mutable field of an existing product
    #[oai(path = "/products/:id", method = "put", tag = "ProductTags::Products")]
    async fn update_product(
        &self,
        id: Path<String>,
        body: Json<ProductDraft>,
    ) -> Result<Json<ProductResponse>, ProductError> {
        let updated = self.product_service.update(&id.0, body.0).await?;

        Ok(Json(updated.into()))
    }

    /// Update only the fields present in the patch
    #[oai(path = "/products/:id", method = "patch", tag = "ProductTags::Products")]
    async fn patch_product(
        &self,
        id: Path<String>,
        body: Json<ProductPatch>,
    ) -> Result<Json<ProductResponse>, ProductError> {
        let updated = self.product_service.partial_update(&id.0, body.0).await?;

        Ok(Json(updated.into()))
    }

    /// Soft-delete a product so listings stop showing it
    #[oai(path = "/products/:id", method = "delete", tag = "ProductTags::Products")]
    async fn delete_product(
        &self,
        id: Path<String>,
    ) -> Result<DeleteProductApiResponse, ProductError> {
        self.product_service.delete(&id.0).await?;

        Ok(DeleteProductApiResponse::Deleted)
    }
}
