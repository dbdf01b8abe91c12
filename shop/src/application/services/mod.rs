pub mod catalog_cache;

pub use catalog_cache::{CachedCatalog, QueryKey, QueryPolicy};
