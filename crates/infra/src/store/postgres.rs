//! Postgres-backed product store.
//!
//! ## Error Mapping
//!
//! SQLx errors are mapped to `StoreError` as follows:
//!
//! | SQLx Error | PostgreSQL Error Code | StoreError | Scenario |
//! |------------|----------------------|------------|----------|
//! | Database (check constraint violation) | `23514` | `Backend` | Row failed a column check (e.g. negative price) |
//! | Database (other) | Any other | `Backend` | Other database errors |
//! | PoolClosed | N/A | `Backend` | Connection pool was closed |
//! | Other | N/A | `Backend` | Network errors, decode failures, etc. |
//!
//! Missing rows are never reported through SQLx errors: lookups use
//! `fetch_optional` and deletes check `rows_affected`, which become
//! `StoreError::NotFound`.

use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{FromRow, PgPool, Row};
use tracing::instrument;

use catalog_core::ProductId;
use catalog_products::{Product, ProductFields};

use super::r#trait::{ProductStore, StoreError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id           BIGSERIAL PRIMARY KEY,
    product_name VARCHAR(255) NOT NULL,
    color        VARCHAR(100) NOT NULL,
    category     VARCHAR(100) NOT NULL,
    price        DOUBLE PRECISION NOT NULL CHECK (price >= 0),
    created_at   TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at   TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

/// Postgres-backed product store.
///
/// ## Thread Safety
///
/// Uses the SQLx connection pool, which is `Send + Sync` and cheap to clone.
/// Every method is a single statement, so row-level atomicity comes from Postgres.
#[derive(Debug, Clone)]
pub struct PostgresProductStore {
    pool: PgPool,
}

impl PostgresProductStore {
    /// Create a store over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the `products` table if it does not exist yet.
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl ProductStore for PostgresProductStore {
    #[instrument(skip(self), err)]
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, product_name, color, category, price, created_at, updated_at
            FROM products
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list", e))?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    #[instrument(skip(self), fields(product_id = %id), err)]
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, product_name, color, category, price, created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_by_id", e))?;

        Ok(row.map(Product::from))
    }

    #[instrument(skip(self, fields), err)]
    async fn insert(&self, fields: ProductFields) -> Result<Product, StoreError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO products (product_name, color, category, price)
            VALUES ($1, $2, $3, $4)
            RETURNING id, product_name, color, category, price, created_at, updated_at
            "#,
        )
        .bind(fields.product_name())
        .bind(fields.color())
        .bind(fields.category())
        .bind(fields.price())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert", e))?;

        Ok(row.into())
    }

    #[instrument(skip(self, fields), fields(product_id = %id), err)]
    async fn update(&self, id: ProductId, fields: ProductFields) -> Result<Product, StoreError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            UPDATE products
            SET product_name = $2,
                color = $3,
                category = $4,
                price = $5,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, product_name, color, category, price, created_at, updated_at
            "#,
        )
        .bind(id.get())
        .bind(fields.product_name())
        .bind(fields.color())
        .bind(fields.category())
        .bind(fields.price())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update", e))?;

        row.map(Product::from).ok_or(StoreError::NotFound(id))
    }

    #[instrument(skip(self), fields(product_id = %id), err)]
    async fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

/// Map SQLx errors to StoreError.
fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code().as_deref() {
                Some("23514") => StoreError::backend(format!("check constraint violated: {msg}")),
                _ => StoreError::backend(msg),
            }
        }
        sqlx::Error::PoolClosed => {
            StoreError::backend(format!("connection pool closed in {}", operation))
        }
        _ => StoreError::backend(format!("sqlx error in {}: {}", operation, err)),
    }
}

// SQLx row types

#[derive(Debug)]
struct ProductRow {
    id: i64,
    product_name: String,
    color: String,
    category: String,
    price: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, PgRow> for ProductRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(ProductRow {
            id: row.try_get("id")?,
            product_name: row.try_get("product_name")?,
            color: row.try_get("color")?,
            category: row.try_get("category")?,
            price: row.try_get("price")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: ProductId::from_raw(row.id),
            product_name: row.product_name,
            color: row.color,
            category: row.category,
            price: row.price,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
