/// Query cache in front of a catalog repository
use crate::application::repositories::{CatalogRepository, CatalogResult};
use crate::domain::{entities::Product, value_objects::ProductId};
use async_trait::async_trait;
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

/// How long cached reads stay fresh and how often failed reads are retried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryPolicy {
    pub stale_time: Duration,
    pub retry: u32,
}

impl Default for QueryPolicy {
    fn default() -> Self {
        QueryPolicy {
            stale_time: Duration::from_secs(5 * 60),
            retry: 1,
        }
    }
}

/// Identity of a cached catalog read
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Products,
    Product(ProductId),
    Category(String),
    Categories,
}

#[derive(Debug, Clone)]
enum CachedValue {
    Products(Vec<Product>),
    Product(Product),
    Categories(Vec<String>),
}

#[derive(Debug)]
struct CacheEntry {
    value: CachedValue,
    fetched_at: Instant,
}

/// Catalog decorator that caches successful reads per `QueryKey`.
///
/// Fresh entries are served without touching the inner repository. Stale or
/// missing entries are fetched with up to `retry` extra attempts. Errors are
/// returned to the caller and never cached. Concurrent misses for the same key
/// are not deduplicated.
pub struct CachedCatalog<R> {
    inner: R,
    policy: QueryPolicy,
    entries: Mutex<HashMap<QueryKey, CacheEntry>>,
}

impl<R: CatalogRepository> CachedCatalog<R> {
    pub fn new(inner: R, policy: QueryPolicy) -> Self {
        CachedCatalog {
            inner,
            policy,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn policy(&self) -> QueryPolicy {
        self.policy
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Drop one cached read
    pub async fn invalidate(&self, key: &QueryKey) {
        self.entries.lock().await.remove(key);
    }

    /// Drop every cached read
    pub async fn invalidate_all(&self) {
        self.entries.lock().await.clear();
    }

    /// Whether a fresh entry exists for the key
    pub async fn is_fresh(&self, key: &QueryKey) -> bool {
        self.entries
            .lock()
            .await
            .get(key)
            .is_some_and(|entry| entry.fetched_at.elapsed() < self.policy.stale_time)
    }

    async fn query<T, F, Fut>(
        &self,
        key: QueryKey,
        fetch: F,
        wrap: fn(T) -> CachedValue,
        unwrap: fn(&CachedValue) -> Option<T>,
    ) -> CatalogResult<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = CatalogResult<T>>,
        T: Clone,
    {
        {
            let entries = self.entries.lock().await;
            if let Some(entry) = entries.get(&key) {
                if entry.fetched_at.elapsed() < self.policy.stale_time {
                    if let Some(value) = unwrap(&entry.value) {
                        debug!(?key, "catalog cache: hit");
                        return Ok(value);
                    }
                }
            }
        }

        let attempts = self.policy.retry.saturating_add(1);
        let mut attempt = 1;
        let value = loop {
            match fetch().await {
                Ok(value) => break value,
                Err(e) if attempt < attempts => {
                    warn!(?key, attempt, error = %e, "catalog cache: read failed, retrying");
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        };

        self.entries.lock().await.insert(
            key,
            CacheEntry {
                value: wrap(value.clone()),
                fetched_at: Instant::now(),
            },
        );
        Ok(value)
    }
}

#[async_trait]
impl<R: CatalogRepository> CatalogRepository for CachedCatalog<R> {
    async fn get_all(&self) -> CatalogResult<Vec<Product>> {
        self.query(
            QueryKey::Products,
            || self.inner.get_all(),
            CachedValue::Products,
            |value| match value {
                CachedValue::Products(products) => Some(products.clone()),
                _ => None,
            },
        )
        .await
    }

    async fn get_by_id(&self, id: ProductId) -> CatalogResult<Product> {
        self.query(
            QueryKey::Product(id),
            || self.inner.get_by_id(id),
            CachedValue::Product,
            |value| match value {
                CachedValue::Product(product) => Some(product.clone()),
                _ => None,
            },
        )
        .await
    }

    async fn get_by_category(&self, category: &str) -> CatalogResult<Vec<Product>> {
        self.query(
            QueryKey::Category(category.to_string()),
            || self.inner.get_by_category(category),
            CachedValue::Products,
            |value| match value {
                CachedValue::Products(products) => Some(products.clone()),
                _ => None,
            },
        )
        .await
    }

    async fn get_categories(&self) -> CatalogResult<Vec<String>> {
        self.query(
            QueryKey::Categories,
            || self.inner.get_categories(),
            CachedValue::Categories,
            |value| match value {
                CachedValue::Categories(categories) => Some(categories.clone()),
                _ => None,
            },
        )
        .await
    }
}
