use std::sync::Arc;

use thiserror::Error;

use catalog_core::ProductId;
use catalog_products::{Product, ProductFields};

/// Record store error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// No row with this id (also returned by `update`/`delete` when the row
    /// disappeared after a successful lookup).
    #[error("product not found: {0}")]
    NotFound(ProductId),

    /// Anything the backend failed at: connectivity, constraint, decoding.
    #[error("storage error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Single-table product store.
///
/// Each method is one atomic operation against the backing table; no method
/// spans more than one row write. Implementations assign `id`, `created_at`
/// and `updated_at`; callers only ever supply validated [`ProductFields`].
#[async_trait::async_trait]
pub trait ProductStore: Send + Sync {
    /// Every stored product. Ordering is whatever the backend returns.
    async fn list(&self) -> Result<Vec<Product>, StoreError>;

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// Persist a new product and return it with its assigned id.
    async fn insert(&self, fields: ProductFields) -> Result<Product, StoreError>;

    /// Replace all writable fields of an existing product.
    async fn update(&self, id: ProductId, fields: ProductFields) -> Result<Product, StoreError>;

    /// Permanently remove a product.
    async fn delete(&self, id: ProductId) -> Result<(), StoreError>;
}

#[async_trait::async_trait]
impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        (**self).list().await
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        (**self).find_by_id(id).await
    }

    async fn insert(&self, fields: ProductFields) -> Result<Product, StoreError> {
        (**self).insert(fields).await
    }

    async fn update(&self, id: ProductId, fields: ProductFields) -> Result<Product, StoreError> {
        (**self).update(id, fields).await
    }

    async fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        (**self).delete(id).await
    }
}
