use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use crate::errors::product::ProductError;
use crate::stores::product_query::{PageRequest, ProductFilter, SortSpec};
use crate::types::db::product::{self, ActiveModel, Entity as Product};
use crate::types::dto::product::{ProductDraft, ProductPatch};

/// ProductStore persists catalog products
pub struct ProductStore {
    db: DatabaseConnection,
}

impl ProductStore {
    /// Create a new ProductStore with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert a new product, assigning its id and timestamps
    pub async fn insert(&self, draft: &ProductDraft) -> Result<product::Model, ProductError> {
        let now = Utc::now().timestamp();

        let new_product = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(draft.name.clone()),
            description: Set(draft.description.clone()),
            price: Set(draft.price),
            category: Set(draft.category.clone()),
            active: Set(draft.active),
            created_at: Set(now),
            updated_at: Set(now),
        };

        new_product
            .insert(&self.db)
            .await
            .map_err(|e| ProductError::internal_error(format!("Database error: {}", e)))
    }

    /// Look up a product by primary key.
    ///
    /// Inactive products are returned too; only listings hide them.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<product::Model>, ProductError> {
        Product::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ProductError::internal_error(format!("Database error: {}", e)))
    }

    /// Count every product row, active or not.
    ///
    /// Startup seeding uses this to decide whether the catalog is empty.
    pub async fn count_all(&self) -> Result<u64, ProductError> {
        Product::find()
            .count(&self.db)
            .await
            .map_err(|e| ProductError::internal_error(format!("Database error: {}", e)))
    }

    /// Fetch one page of active products matching the filter, plus the
    /// total match count before pagination.
    pub async fn find_page(
        &self,
        filter: &ProductFilter,
        page: &PageRequest,
        sort: Option<&SortSpec>,
    ) -> Result<(Vec<product::Model>, u64), ProductError> {
        let mut query = Product::find().filter(filter.condition());

        if let Some(sort) = sort {
            query = query.order_by(sort.key.column(), sort.order.clone());
        }

        let paginator = query.paginate(&self.db, page.size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| ProductError::internal_error(format!("Database error: {}", e)))?;

        let items = paginator
            .fetch_page(page.page)
            .await
            .map_err(|e| ProductError::internal_error(format!("Database error: {}", e)))?;

        Ok((items, total))
    }

    /// Replace every mutable field of an existing product.
    ///
    /// The id and created_at of the stored row are preserved.
    pub async fn update_full(
        &self,
        existing: product::Model,
        draft: &ProductDraft,
    ) -> Result<product::Model, ProductError> {
        let mut model: product::ActiveModel = existing.into();
        model.name = Set(draft.name.clone());
        model.description = Set(draft.description.clone());
        model.price = Set(draft.price);
        model.category = Set(draft.category.clone());
        model.active = Set(draft.active);
        model.updated_at = Set(Utc::now().timestamp());

        model
            .update(&self.db)
            .await
            .map_err(|e| ProductError::internal_error(format!("Database error: {}", e)))
    }

    /// Apply the present fields of a patch to an existing product
    pub async fn apply_patch(
        &self,
        existing: product::Model,
        patch: &ProductPatch,
    ) -> Result<product::Model, ProductError> {
        let mut model: product::ActiveModel = existing.into();

        if let Some(name) = &patch.name {
            model.name = Set(name.clone());
        }
        if let Some(description) = &patch.description {
            model.description = Set(Some(description.clone()));
        }
        if let Some(price) = patch.price {
            model.price = Set(price);
        }
        if let Some(category) = &patch.category {
            model.category = Set(category.clone());
        }
        model.updated_at = Set(Utc::now().timestamp());

        model
            .update(&self.db)
            .await
            .map_err(|e| ProductError::internal_error(format!("Database error: {}", e)))
    }

    /// Soft-delete a product by clearing its active flag.
    ///
    /// Safe to repeat; deactivating an inactive product is a no-op.
    pub async fn mark_inactive(
        &self,
        existing: product::Model,
    ) -> Result<product::Model, ProductError> {
        let mut model: product::ActiveModel = existing.into();
        model.active = Set(false);
        model.updated_at = Set(Utc::now().timestamp());

        model
            .update(&self.db)
            .await
            .map_err(|e| ProductError::internal_error(format!("Database error: {}", e)))
    }
}

impl std::fmt::Debug for ProductStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductStore")
            .field("db", &"<connection>")
            .finish()
    }
}
