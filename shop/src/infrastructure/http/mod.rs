mod catalog_client;

pub use catalog_client::{HttpCatalogClient, DEFAULT_BASE_URL};
