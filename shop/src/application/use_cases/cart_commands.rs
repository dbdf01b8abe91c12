use crate::application::repositories::{CatalogRepository, CatalogResult};
use crate::application::store::CartStore;
use crate::domain::{entities::LineItem, value_objects::ProductId};
use tracing::info;

/// Use case for putting a catalog product into the cart by id.
///
/// The product is read from the catalog first so the line carries current
/// display fields. A failed read leaves the cart untouched.
pub struct AddProductToCart<'a, R: CatalogRepository + ?Sized> {
    catalog: &'a R,
    cart: &'a CartStore,
}

impl<'a, R: CatalogRepository + ?Sized> AddProductToCart<'a, R> {
    pub fn new(catalog: &'a R, cart: &'a CartStore) -> Self {
        Self { catalog, cart }
    }

    /// Returns the line as it stands after the add
    pub async fn execute(&self, id: ProductId) -> CatalogResult<LineItem> {
        let product = self.catalog.get_by_id(id).await?;
        self.cart.add_item(&product);

        let line = self
            .cart
            .line(id)
            .unwrap_or_else(|| LineItem::from_product(&product));
        info!(product_id = id.value(), quantity = line.quantity().value(), "added to cart");
        Ok(line)
    }
}
