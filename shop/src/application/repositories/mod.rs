pub mod catalog_repository;

pub use catalog_repository::{CatalogError, CatalogRepository, CatalogResult};
