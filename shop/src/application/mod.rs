pub mod dto;
pub mod repositories;
pub mod services;
pub mod store;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod testing;

// Re-export key types to avoid naming conflicts
pub use dto::{CartLineView, CartSummary};
pub use repositories::{CatalogError, CatalogRepository, CatalogResult};
pub use services::{CachedCatalog, QueryKey, QueryPolicy};
pub use store::{CartSnapshot, CartStore, Subscription, WeakCartStore};
pub use use_cases::{AddProductToCart, GetCartSummary, GetProduct, ListCategories, ListProducts};
