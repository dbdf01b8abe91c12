pub mod cart_commands;
pub mod cart_summary;
pub mod catalog_queries;

pub use cart_commands::AddProductToCart;
pub use cart_summary::GetCartSummary;
pub use catalog_queries::{GetProduct, ListCategories, ListProducts};
