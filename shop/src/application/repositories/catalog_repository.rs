use crate::domain::{entities::Product, value_objects::ProductId};
use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by catalog reads.
///
/// Network failures, non-success statuses and undecodable bodies all collapse
/// into `FetchFailed`; callers only need to show the message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Failed to fetch {resource}: {reason}")]
    FetchFailed { resource: String, reason: String },

    #[error("Invalid catalog base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl CatalogError {
    pub fn fetch_failed(resource: impl Into<String>, reason: impl ToString) -> Self {
        CatalogError::FetchFailed {
            resource: resource.into(),
            reason: reason.to_string(),
        }
    }

    pub fn is_fetch_failed(&self) -> bool {
        matches!(self, CatalogError::FetchFailed { .. })
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Read-only access to the product catalog.
///
/// Implementations issue one read per call. Caching and retries belong to
/// decorators such as `CachedCatalog`.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Returns every product in the catalog.
    async fn get_all(&self) -> CatalogResult<Vec<Product>>;

    /// Returns one product.
    ///
    /// An unknown id is an error, never an empty success.
    async fn get_by_id(&self, id: ProductId) -> CatalogResult<Product>;

    /// Returns the products of one category.
    async fn get_by_category(&self, category: &str) -> CatalogResult<Vec<Product>>;

    /// Returns the category labels.
    async fn get_categories(&self) -> CatalogResult<Vec<String>>;
}
