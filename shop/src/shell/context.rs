use crate::application::{repositories::CatalogRepository, store::CartStore};
use std::sync::Arc;

/// What the shell hands to every remote view: one cart store and one catalog.
///
/// Cloning the context clones handles, never the cart itself, so every view
/// built from it observes the same cart.
#[derive(Clone)]
pub struct AppContext {
    cart: CartStore,
    catalog: Arc<dyn CatalogRepository>,
}

impl AppContext {
    pub fn new(cart: CartStore, catalog: Arc<dyn CatalogRepository>) -> Self {
        AppContext { cart, catalog }
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn catalog(&self) -> &dyn CatalogRepository {
        self.catalog.as_ref()
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("cart", &self.cart)
            .finish_non_exhaustive()
    }
}
