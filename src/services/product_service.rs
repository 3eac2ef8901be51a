use std::sync::Arc;

use crate::errors::product::ProductError;
use crate::services::product_validator;
use crate::stores::product_query::{PageRequest, ProductFilter, SortSpec};
use crate::stores::ProductStore;
use crate::types::db::product;
use crate::types::dto::product::{ProductDraft, ProductPatch};

/// Catalog business logic: validation, lookup and soft deletion on top
/// of the product store.
pub struct ProductService {
    store: Arc<ProductStore>,
}

impl ProductService {
    /// Create a new ProductService
    pub fn new(store: Arc<ProductStore>) -> Self {
        Self { store }
    }

    /// List one page of active products matching the filter
    ///
    /// # Returns
    /// * `Ok((items, total))` - Page rows and the unpaginated match count
    pub async fn list(
        &self,
        filter: &ProductFilter,
        page: &PageRequest,
        sort: Option<&SortSpec>,
    ) -> Result<(Vec<product::Model>, u64), ProductError> {
        self.store.find_page(filter, page, sort).await
    }

    /// Fetch a product by id.
    ///
    /// Deliberately ignores the active flag: a soft-deleted product stays
    /// reachable by id even though listings hide it.
    pub async fn get(&self, id: &str) -> Result<product::Model, ProductError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ProductError::not_found(id))
    }

    /// Validate and store a new product
    pub async fn create(&self, draft: ProductDraft) -> Result<product::Model, ProductError> {
        product_validator::validate_draft(&draft).map_err(ProductError::validation)?;

        let created = self.store.insert(&draft).await?;

        tracing::info!(product_id = %created.id, name = %created.name, "Product created");

        Ok(created)
    }

    /// Validate and apply a full replacement of an existing product.
    ///
    /// Validation runs before the existence check, so an invalid payload
    /// is rejected with 400 even when the id is unknown.
    pub async fn update(
        &self,
        id: &str,
        draft: ProductDraft,
    ) -> Result<product::Model, ProductError> {
        product_validator::validate_draft(&draft).map_err(ProductError::validation)?;

        let existing = self.get(id).await?;
        let updated = self.store.update_full(existing, &draft).await?;

        tracing::info!(product_id = %updated.id, "Product replaced");

        Ok(updated)
    }

    /// Validate and apply a partial update.
    ///
    /// An empty patch (no recognized fields) returns the product as-is
    /// without touching the database.
    pub async fn partial_update(
        &self,
        id: &str,
        patch: ProductPatch,
    ) -> Result<product::Model, ProductError> {
        product_validator::validate_patch(&patch).map_err(ProductError::validation)?;

        let existing = self.get(id).await?;

        if patch.is_empty() {
            return Ok(existing);
        }

        let patched = self.store.apply_patch(existing, &patch).await?;

        tracing::info!(product_id = %patched.id, "Product patched");

        Ok(patched)
    }

    /// Soft-delete a product.
    ///
    /// The row is kept and flagged inactive; repeating the call succeeds.
    pub async fn delete(&self, id: &str) -> Result<(), ProductError> {
        let existing = self.get(id).await?;
        let deleted = self.store.mark_inactive(existing).await?;

        tracing::info!(product_id = %deleted.id, "Product deactivated");

        Ok(())
    }
}

impl std::fmt::Debug for ProductService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductService").finish()
    }
}
