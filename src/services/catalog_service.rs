//! src/services/catalog_service.rs
//!
//! Read-only access to the `products` table through a bounded MySQL pool.
//! The handler only sees the `ProductCatalog` trait so tests can swap in an
//! in-memory catalog.

use crate::models::product::Product;
use async_trait::async_trait;
use sqlx::MySqlPool;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

const LIST_PRODUCTS_SQL: &str = "SELECT id, name, description, price FROM products ORDER BY id";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("readiness probe returned unexpected value {0}")]
    UnexpectedProbe(i64),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

#[async_trait]
pub trait ProductCatalog: Send + Sync + 'static {
    /// Run the fixed listing query. No parameters, no caching.
    async fn list_products(&self) -> CatalogResult<Vec<Product>>;

    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> CatalogResult<()>;
}

/// MySQL-backed catalog. Checkout and return of connections is left to the pool.
#[derive(Clone)]
pub struct MySqlCatalog {
    db: Arc<MySqlPool>,
}

impl MySqlCatalog {
    pub fn new(db: Arc<MySqlPool>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductCatalog for MySqlCatalog {
    async fn list_products(&self) -> CatalogResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(LIST_PRODUCTS_SQL)
            .fetch_all(&*self.db)
            .await?;
        debug!("fetched {} products", products.len());
        Ok(products)
    }

    async fn ping(&self) -> CatalogResult<()> {
        match sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&*self.db)
            .await?
        {
            1 => Ok(()),
            other => Err(CatalogError::UnexpectedProbe(other)),
        }
    }
}
