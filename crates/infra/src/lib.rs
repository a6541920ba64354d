//! Infrastructure layer: record stores and configuration.

pub mod config;
pub mod store;

pub use config::{AppConfig, ConfigError, StatusPolicy, StoreConfig};
pub use store::{InMemoryProductStore, PostgresProductStore, ProductStore, StoreError};
