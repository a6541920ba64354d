use std::collections::BTreeMap;
use std::sync::RwLock;

use chrono::Utc;

use catalog_core::{Entity, ProductId};
use catalog_products::{Product, ProductFields};

use super::r#trait::{ProductStore, StoreError};

/// In-memory product store for tests/dev.
///
/// Ids come from a counter that only moves forward, so a deleted id is never
/// handed out again (same as a serial column).
#[derive(Debug)]
pub struct InMemoryProductStore {
    inner: RwLock<Inner>,
}

#[derive(Debug)]
struct Inner {
    rows: BTreeMap<ProductId, Product>,
    last_id: i64,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                rows: BTreeMap::new(),
                last_id: 0,
            }),
        }
    }
}

impl Default for InMemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::backend("in-memory store lock poisoned")
}

#[async_trait::async_trait]
impl ProductStore for InMemoryProductStore {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.rows.get(&id).cloned())
    }

    async fn insert(&self, fields: ProductFields) -> Result<Product, StoreError> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        inner.last_id += 1;
        let id = ProductId::from_raw(inner.last_id);
        let now = Utc::now();
        let product = Product::new(id, fields, now, now);
        inner.rows.insert(*product.id(), product.clone());
        Ok(product)
    }

    async fn update(&self, id: ProductId, fields: ProductFields) -> Result<Product, StoreError> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        let product = inner.rows.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        product.apply(fields, Utc::now());
        Ok(product.clone())
    }

    async fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        inner
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}
