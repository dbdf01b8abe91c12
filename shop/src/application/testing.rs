//! Fixtures shared by unit tests
use crate::application::repositories::{CatalogError, CatalogRepository, CatalogResult};
use crate::domain::{
    base::Entity,
    entities::Product,
    value_objects::{Category, Price, ProductId, Rating},
};
use async_trait::async_trait;

/// Catalog held in memory; unknown ids fail like the HTTP client does
pub(crate) struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    pub(crate) fn new(products: Vec<Product>) -> Self {
        StaticCatalog { products }
    }

    pub(crate) fn sample() -> Self {
        StaticCatalog::new(vec![
            product(1, "Fjallraven Backpack", 109.95, "men's clothing"),
            product(2, "Mens Casual T-Shirt", 22.3, "men's clothing"),
            product(5, "Dragon Bracelet", 695.0, "jewelery"),
            product(9, "WD 2TB Portable Drive", 64.0, "electronics"),
        ])
    }
}

pub(crate) fn product(id: u64, title: &str, price: f64, category: &str) -> Product {
    Product::new(
        ProductId::new(id),
        title,
        Price::new(price).unwrap(),
        Category::new(category).unwrap(),
    )
    .with_description(format!("{} description", title))
    .with_rating(Rating { rate: 4.1, count: 259 })
}

#[async_trait]
impl CatalogRepository for StaticCatalog {
    async fn get_all(&self) -> CatalogResult<Vec<Product>> {
        Ok(self.products.clone())
    }

    async fn get_by_id(&self, id: ProductId) -> CatalogResult<Product> {
        self.products
            .iter()
            .find(|p| *p.id() == id)
            .cloned()
            .ok_or_else(|| CatalogError::fetch_failed("product", "empty response body"))
    }

    async fn get_by_category(&self, category: &str) -> CatalogResult<Vec<Product>> {
        Ok(self
            .products
            .iter()
            .filter(|p| p.category().as_str() == category)
            .cloned()
            .collect())
    }

    async fn get_categories(&self) -> CatalogResult<Vec<String>> {
        let mut categories: Vec<String> = Vec::new();
        for p in &self.products {
            let label = p.category().as_str().to_string();
            if !categories.contains(&label) {
                categories.push(label);
            }
        }
        Ok(categories)
    }
}
