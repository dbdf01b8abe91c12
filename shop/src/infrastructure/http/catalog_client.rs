/// HTTP client for the fakestore catalog API
use crate::application::repositories::{CatalogError, CatalogRepository, CatalogResult};
use crate::domain::{entities::Product, value_objects::ProductId};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

/// Public demo catalog endpoint
pub const DEFAULT_BASE_URL: &str = "https://fakestoreapi.com";

/// Catalog repository backed by plain HTTP GETs.
/// One request per call; no retries, no timeout policy.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    http: Client,
    base_url: Url,
}

impl HttpCatalogClient {
    /// Create a client for the given base URL, e.g. `https://fakestoreapi.com`
    pub fn new(base_url: &str) -> CatalogResult<Self> {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client for the public endpoint
    pub fn default_endpoint() -> CatalogResult<Self> {
        Self::new(DEFAULT_BASE_URL)
    }

    pub fn with_client(http: Client, base_url: &str) -> CatalogResult<Self> {
        let invalid = |reason: String| CatalogError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };

        let url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(invalid("URL cannot be used as a base".to_string()));
        }
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }

        Ok(HttpCatalogClient {
            http,
            base_url: url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `<base>/<segments...>`, percent-encoding each segment
    fn endpoint(&self, resource: &str, segments: &[&str]) -> CatalogResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CatalogError::fetch_failed(resource, "base URL cannot take a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, resource: &str, url: Url) -> CatalogResult<T> {
        info!(%url, "catalog: GET");

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| CatalogError::fetch_failed(resource, e))?;

        let status = response.status();
        if !status.is_success() {
            debug!(%url, %status, "catalog: unsuccessful response");
            return Err(CatalogError::fetch_failed(
                resource,
                format!("HTTP status {}", status),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CatalogError::fetch_failed(resource, e))?;

        decode_body(resource, &body)
    }
}

/// Decode a JSON body. The catalog answers unknown ids with `200` and an
/// empty body (or `null`), which is treated as a failure.
fn decode_body<T: DeserializeOwned>(resource: &str, body: &[u8]) -> CatalogResult<T> {
    let text = std::str::from_utf8(body).map_err(|e| CatalogError::fetch_failed(resource, e))?;
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(CatalogError::fetch_failed(resource, "empty response body"));
    }

    serde_json::from_str(trimmed).map_err(|e| CatalogError::fetch_failed(resource, e))
}

#[async_trait]
impl CatalogRepository for HttpCatalogClient {
    async fn get_all(&self) -> CatalogResult<Vec<Product>> {
        let url = self.endpoint("products", &["products"])?;
        self.fetch_json("products", url).await
    }

    async fn get_by_id(&self, id: ProductId) -> CatalogResult<Product> {
        let id = id.to_string();
        let url = self.endpoint("product", &["products", id.as_str()])?;
        self.fetch_json("product", url).await
    }

    async fn get_by_category(&self, category: &str) -> CatalogResult<Vec<Product>> {
        let url = self.endpoint("products", &["products", "category", category])?;
        self.fetch_json("products", url).await
    }

    async fn get_categories(&self) -> CatalogResult<Vec<String>> {
        let url = self.endpoint("categories", &["products", "categories"])?;
        self.fetch_json("categories", url).await
    }
}
