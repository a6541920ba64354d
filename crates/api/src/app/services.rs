use std::sync::Arc;

use thiserror::Error;

use catalog_core::{DomainError, Entity, ProductId};
use catalog_infra::{
    AppConfig, InMemoryProductStore, PostgresProductStore, ProductStore, StatusPolicy, StoreConfig,
    StoreError,
};
use catalog_observability::{OperationLogger, TracingLogger};
use catalog_products::{Product, ProductFields, ProductInput, ValidationErrors};

/// Failure of a product operation, tagged by kind so the HTTP layer can pick a
/// status without inspecting messages.
#[derive(Debug, Error)]
pub enum ProductError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("no product with id {0}")]
    NotFound(ProductId),

    /// The path id could not name any product.
    #[error(transparent)]
    InvalidId(#[from] DomainError),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for ProductError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

/// Product resource operations: validate, delegate to the store, log around it.
///
/// Stateless apart from its two injected collaborators; every call stands alone.
#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn ProductStore>,
    logger: Arc<dyn OperationLogger>,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>, logger: Arc<dyn OperationLogger>) -> Self {
        Self { store, logger }
    }

    pub async fn list(&self) -> Result<Vec<Product>, ProductError> {
        self.logger.info("Fetching all products");

        self.store
            .list()
            .await
            .map_err(|e| self.failed("Error fetching products", e.into()))
    }

    pub async fn store(&self, input: &ProductInput) -> Result<Product, ProductError> {
        self.logger
            .info(&format!("Incoming request to create product: {input}"));

        let fields = ProductFields::from_input(input)
            .map_err(|e| self.failed("Error creating product", e.into()))?;
        let product = self
            .store
            .insert(fields)
            .await
            .map_err(|e| self.failed("Error creating product", e.into()))?;

        self.logger.info(&format!(
            "Product created successfully: {}",
            to_json(&product)
        ));
        Ok(product)
    }

    /// Lookup comes before validation: a missing product is reported as such even
    /// when the payload is also invalid.
    pub async fn update(&self, id: &str, input: &ProductInput) -> Result<Product, ProductError> {
        self.logger.info(&format!(
            "Incoming request to update product with ID {id}: {input}"
        ));

        let result = async {
            let id = self.existing_id(id).await?;
            let fields = ProductFields::from_input(input)?;
            Ok::<_, ProductError>(self.store.update(id, fields).await?)
        }
        .await;

        match result {
            Ok(product) => {
                self.logger.info(&format!(
                    "Product updated successfully: {}",
                    to_json(&product)
                ));
                Ok(product)
            }
            Err(e) => Err(self.failed("Error updating product", e)),
        }
    }

    pub async fn destroy(&self, id: &str) -> Result<(), ProductError> {
        self.logger
            .info(&format!("Incoming request to delete product with ID {id}"));

        let result = async {
            let id = self.existing_id(id).await?;
            self.store.delete(id).await?;
            Ok::<_, ProductError>(())
        }
        .await;

        match result {
            Ok(()) => {
                self.logger
                    .info(&format!("Product deleted successfully with ID {id}"));
                Ok(())
            }
            Err(e) => Err(self.failed("Error deleting product", e)),
        }
    }

    async fn existing_id(&self, raw: &str) -> Result<ProductId, ProductError> {
        let id: ProductId = raw.parse()?;
        match self.store.find_by_id(id).await? {
            Some(product) => Ok(*product.id()),
            None => Err(ProductError::NotFound(id)),
        }
    }

    fn failed(&self, context: &str, err: ProductError) -> ProductError {
        self.logger.error(&format!("{context}: {err}"));
        err
    }
}

fn to_json(product: &Product) -> String {
    serde_json::to_string(product).unwrap_or_default()
}

/// Everything the HTTP handlers need, shared behind an `Arc`.
#[derive(Clone)]
pub struct AppServices {
    pub products: ProductService,
    pub status_policy: StatusPolicy,
}

impl AppServices {
    pub fn new(products: ProductService, status_policy: StatusPolicy) -> Self {
        Self {
            products,
            status_policy,
        }
    }

    /// In-memory store + tracing logger (dev/test).
    pub fn in_memory(status_policy: StatusPolicy) -> Self {
        let store: Arc<dyn ProductStore> = Arc::new(InMemoryProductStore::new());
        Self::new(
            ProductService::new(store, Arc::new(TracingLogger)),
            status_policy,
        )
    }
}

/// Wire the store selected by configuration.
pub async fn build_services(config: &AppConfig) -> Result<AppServices, StoreError> {
    let store: Arc<dyn ProductStore> = match &config.store {
        StoreConfig::InMemory => {
            tracing::warn!("USE_PERSISTENT_STORES is off; products live in memory only");
            Arc::new(InMemoryProductStore::new())
        }
        StoreConfig::Postgres {
            database_url,
            max_connections,
        } => {
            let store = PostgresProductStore::connect(database_url, *max_connections).await?;
            store.ensure_schema().await?;
            tracing::info!(max_connections, "connected to postgres product store");
            Arc::new(store)
        }
    };

    Ok(AppServices::new(
        ProductService::new(store, Arc::new(TracingLogger)),
        config.status_policy,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_observability::{CapturingLogger, LogLevel};
    use serde_json::json;

    fn service() -> (ProductService, Arc<InMemoryProductStore>, Arc<CapturingLogger>) {
        let store = Arc::new(InMemoryProductStore::new());
        let logger = Arc::new(CapturingLogger::new());
        let svc = ProductService::new(store.clone(), logger.clone());
        (svc, store, logger)
    }

    fn widget() -> ProductInput {
        ProductInput::from(json!({
            "productName": "Widget",
            "color": "Red",
            "category": "Tools",
            "price": 9.99,
        }))
    }

    /// Store whose every call fails, for the infrastructure-error path.
    struct BrokenStore;

    #[async_trait::async_trait]
    impl ProductStore for BrokenStore {
        async fn list(&self) -> Result<Vec<Product>, StoreError> {
            Err(StoreError::backend("connection refused"))
        }
        async fn find_by_id(&self, _id: ProductId) -> Result<Option<Product>, StoreError> {
            Err(StoreError::backend("connection refused"))
        }
        async fn insert(&self, _fields: ProductFields) -> Result<Product, StoreError> {
            Err(StoreError::backend("connection refused"))
        }
        async fn update(&self, _id: ProductId, _f: ProductFields) -> Result<Product, StoreError> {
            Err(StoreError::backend("connection refused"))
        }
        async fn delete(&self, _id: ProductId) -> Result<(), StoreError> {
            Err(StoreError::backend("connection refused"))
        }
    }

    #[tokio::test]
    async fn store_then_list_contains_the_new_record() {
        let (svc, _, logger) = service();

        let created = svc.store(&widget()).await.unwrap();
        assert_eq!(created.product_name, "Widget");
        assert_eq!(created.price, 9.99);

        let all = svc.list().await.unwrap();
        assert_eq!(all, vec![created.clone()]);

        let info = logger.messages(LogLevel::Info);
        assert!(info[0].starts_with("Incoming request to create product: {"));
        assert!(info[1].starts_with("Product created successfully: {"));
        assert!(info[1].contains("\"productName\":\"Widget\""));
        assert_eq!(info[2], "Fetching all products");
        assert!(logger.messages(LogLevel::Error).is_empty());
    }

    #[tokio::test]
    async fn invalid_input_is_not_persisted() {
        let (svc, store, logger) = service();
        let input = ProductInput::from(json!({
            "productName": "",
            "color": "Red",
            "category": "Tools",
            "price": 9.99,
        }));

        let err = svc.store(&input).await.unwrap_err();
        assert!(matches!(err, ProductError::Validation(_)));
        assert!(store.list().await.unwrap().is_empty());
        assert_eq!(
            logger.messages(LogLevel::Error),
            vec!["Error creating product: The productName field is required."]
        );
    }

    #[tokio::test]
    async fn update_replaces_fields_and_keeps_id() {
        let (svc, _, logger) = service();
        let created = svc.store(&widget()).await.unwrap();

        let input = ProductInput::from(json!({
            "productName": "Gadget",
            "color": "Blue",
            "category": "Toys",
            "price": "4.50",
        }));
        let updated = svc.update(&created.id.to_string(), &input).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.color, "Blue");
        assert_eq!(updated.price, 4.5);
        assert_eq!(svc.list().await.unwrap(), vec![updated]);
        assert!(
            logger
                .messages(LogLevel::Info)
                .iter()
                .any(|m| m.starts_with(&format!("Incoming request to update product with ID {}: ", created.id)))
        );
    }

    #[tokio::test]
    async fn update_of_missing_id_wins_over_validation() {
        let (svc, store, logger) = service();
        svc.store(&widget()).await.unwrap();
        let before = store.list().await.unwrap();

        let err = svc.update("999999", &ProductInput::default()).await.unwrap_err();
        assert!(matches!(err, ProductError::NotFound(id) if id.get() == 999_999));
        assert_eq!(store.list().await.unwrap(), before);
        assert_eq!(
            logger.messages(LogLevel::Error),
            vec!["Error updating product: no product with id 999999"]
        );
    }

    #[tokio::test]
    async fn update_with_invalid_payload_leaves_record_untouched() {
        let (svc, store, _) = service();
        let created = svc.store(&widget()).await.unwrap();

        let input = ProductInput::from(json!({
            "productName": "Widget",
            "color": "Red",
            "category": "Tools",
            "price": -3,
        }));
        let err = svc.update(&created.id.to_string(), &input).await.unwrap_err();

        assert!(matches!(err, ProductError::Validation(_)));
        assert_eq!(store.find_by_id(created.id).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn destroy_removes_the_record() {
        let (svc, _, logger) = service();
        let a = svc.store(&widget()).await.unwrap();
        let b = svc.store(&widget()).await.unwrap();

        svc.destroy(&a.id.to_string()).await.unwrap();

        let remaining = svc.list().await.unwrap();
        assert_eq!(remaining, vec![b]);
        assert!(
            logger
                .messages(LogLevel::Info)
                .contains(&format!("Product deleted successfully with ID {}", a.id))
        );
    }

    #[tokio::test]
    async fn destroy_of_unknown_or_malformed_id_changes_nothing() {
        let (svc, store, _) = service();
        svc.store(&widget()).await.unwrap();
        let before = store.list().await.unwrap();

        assert!(matches!(
            svc.destroy("999999").await.unwrap_err(),
            ProductError::NotFound(_)
        ));
        assert!(matches!(
            svc.destroy("abc").await.unwrap_err(),
            ProductError::InvalidId(_)
        ));
        assert_eq!(store.list().await.unwrap(), before);
    }

    #[tokio::test]
    async fn store_failures_are_logged_with_detail() {
        let logger = Arc::new(CapturingLogger::new());
        let svc = ProductService::new(Arc::new(BrokenStore), logger.clone());

        assert!(matches!(svc.list().await.unwrap_err(), ProductError::Store(_)));
        assert!(matches!(svc.store(&widget()).await.unwrap_err(), ProductError::Store(_)));
        assert!(matches!(svc.destroy("1").await.unwrap_err(), ProductError::Store(_)));

        assert_eq!(
            logger.messages(LogLevel::Error),
            vec![
                "Error fetching products: storage error: connection refused",
                "Error creating product: storage error: connection refused",
                "Error deleting product: storage error: connection refused",
            ]
        );
    }
}
