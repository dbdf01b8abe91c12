pub mod http;

pub use http::{HttpCatalogClient, DEFAULT_BASE_URL};
