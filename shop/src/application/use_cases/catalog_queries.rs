use crate::application::repositories::{CatalogRepository, CatalogResult};
use crate::domain::{entities::Product, value_objects::ProductId};

/// Use case for listing products, optionally restricted to one category
pub struct ListProducts<'a, R: CatalogRepository + ?Sized> {
    catalog: &'a R,
}

impl<'a, R: CatalogRepository + ?Sized> ListProducts<'a, R> {
    pub fn new(catalog: &'a R) -> Self {
        Self { catalog }
    }

    pub async fn execute(&self, category: Option<&str>) -> CatalogResult<Vec<Product>> {
        match category {
            Some(category) => self.catalog.get_by_category(category).await,
            None => self.catalog.get_all().await,
        }
    }
}

/// Use case for loading one product's details
pub struct GetProduct<'a, R: CatalogRepository + ?Sized> {
    catalog: &'a R,
}

impl<'a, R: CatalogRepository + ?Sized> GetProduct<'a, R> {
    pub fn new(catalog: &'a R) -> Self {
        Self { catalog }
    }

    pub async fn execute(&self, id: ProductId) -> CatalogResult<Product> {
        self.catalog.get_by_id(id).await
    }
}

/// Use case for listing category labels
pub struct ListCategories<'a, R: CatalogRepository + ?Sized> {
    catalog: &'a R,
}

impl<'a, R: CatalogRepository + ?Sized> ListCategories<'a, R> {
    pub fn new(catalog: &'a R) -> Self {
        Self { catalog }
    }

    pub async fn execute(&self) -> CatalogResult<Vec<String>> {
        self.catalog.get_categories().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::StaticCatalog;
    use crate::domain::base::Entity;

    #[tokio::test]
    async fn test_list_all_products() {
        let catalog = StaticCatalog::sample();
        let products = ListProducts::new(&catalog).execute(None).await.unwrap();

        assert_eq!(products.len(), 4);
    }

    #[tokio::test]
    async fn test_list_products_by_category() {
        let catalog = StaticCatalog::sample();
        let products = ListProducts::new(&catalog)
            .execute(Some("men's clothing"))
            .await
            .unwrap();

        assert_eq!(products.len(), 2);
        assert!(products
            .iter()
            .all(|p| p.category().as_str() == "men's clothing"));
    }

    #[tokio::test]
    async fn test_get_product() {
        let catalog = StaticCatalog::sample();
        let product = GetProduct::new(&catalog)
            .execute(ProductId::new(5))
            .await
            .unwrap();

        assert_eq!(product.id().value(), 5);
        assert_eq!(product.title(), "Dragon Bracelet");
    }

    #[tokio::test]
    async fn test_get_missing_product_fails() {
        let catalog = StaticCatalog::sample();
        let error = GetProduct::new(&catalog)
            .execute(ProductId::new(404))
            .await
            .unwrap_err();

        assert!(error.is_fetch_failed());
    }

    #[tokio::test]
    async fn test_list_categories_through_trait_object() {
        let catalog: Box<dyn CatalogRepository> = Box::new(StaticCatalog::sample());
        let categories = ListCategories::new(catalog.as_ref()).execute().await.unwrap();

        assert_eq!(categories, vec!["men's clothing", "jewelery", "electronics"]);
    }
}
