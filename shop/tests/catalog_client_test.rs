mod common;

use common::spawn_fake_store;
use mini_shop::application::{
    CachedCatalog, CatalogError, CatalogRepository, GetProduct, ListCategories, ListProducts,
    QueryKey, QueryPolicy,
};
use mini_shop::domain::{Entity, ProductId};
use mini_shop::infrastructure::HttpCatalogClient;
use std::time::Duration;

#[tokio::test]
async fn test_get_all_decodes_products() {
    let (base_url, _store) = spawn_fake_store().await;
    let client = HttpCatalogClient::new(&base_url).unwrap();

    let products = client.get_all().await.unwrap();

    assert_eq!(products.len(), 4);
    assert_eq!(*products[0].id(), ProductId::new(1));
    assert_eq!(products[0].category().as_str(), "men's clothing");
    assert_eq!(products[2].price().amount(), 695.0);
    assert_eq!(products[3].rating().count, 203);
}

#[tokio::test]
async fn test_get_by_id() {
    let (base_url, _store) = spawn_fake_store().await;
    let client = HttpCatalogClient::new(&base_url).unwrap();

    let product = client.get_by_id(ProductId::new(9)).await.unwrap();

    assert_eq!(product.title(), "WD 2TB Elements Portable External Hard Drive - USB 3.0");
}

#[tokio::test]
async fn test_unknown_id_is_fetch_failed() {
    let (base_url, _store) = spawn_fake_store().await;
    let client = HttpCatalogClient::new(&base_url).unwrap();

    let err = client.get_by_id(ProductId::new(999)).await.unwrap_err();

    assert!(err.is_fetch_failed());
    assert!(err.to_string().starts_with("Failed to fetch product"));
}

#[tokio::test]
async fn test_error_status_is_fetch_failed() {
    let (base_url, store) = spawn_fake_store().await;
    let client = HttpCatalogClient::new(&base_url).unwrap();
    store.set_failing(true);

    let err = client.get_all().await.unwrap_err();

    assert!(matches!(err, CatalogError::FetchFailed { ref resource, .. } if resource == "products"));
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_unreachable_host_is_fetch_failed() {
    let client = HttpCatalogClient::new("http://127.0.0.1:1").unwrap();

    let err = client.get_categories().await.unwrap_err();

    assert!(err.is_fetch_failed());
}

#[tokio::test]
async fn test_category_names_are_path_encoded() {
    let (base_url, _store) = spawn_fake_store().await;
    let client = HttpCatalogClient::new(&base_url).unwrap();

    let clothing = client.get_by_category("men's clothing").await.unwrap();
    let toys = client.get_by_category("toys").await.unwrap();

    assert_eq!(clothing.len(), 2);
    assert!(clothing.iter().all(|p| p.category().as_str() == "men's clothing"));
    assert!(toys.is_empty());
}

#[tokio::test]
async fn test_base_url_with_trailing_slash() {
    let (base_url, _store) = spawn_fake_store().await;
    let client = HttpCatalogClient::new(&format!("{}/", base_url)).unwrap();

    let categories = client.get_categories().await.unwrap();

    assert_eq!(categories.len(), 4);
    assert_eq!(categories[1], "jewelery");
}

#[tokio::test]
async fn test_cache_serves_repeat_reads() {
    let (base_url, store) = spawn_fake_store().await;
    let catalog = CachedCatalog::new(
        HttpCatalogClient::new(&base_url).unwrap(),
        QueryPolicy::default(),
    );

    ListProducts::new(&catalog).execute(None).await.unwrap();
    ListProducts::new(&catalog).execute(None).await.unwrap();
    GetProduct::new(&catalog).execute(ProductId::new(1)).await.unwrap();
    GetProduct::new(&catalog).execute(ProductId::new(1)).await.unwrap();

    assert_eq!(store.hits(), 2);
    assert!(catalog.is_fresh(&QueryKey::Products).await);
    assert!(!catalog.is_fresh(&QueryKey::Categories).await);
}

#[tokio::test]
async fn test_cache_retries_once_and_does_not_keep_errors() {
    let (base_url, store) = spawn_fake_store().await;
    let catalog = CachedCatalog::new(
        HttpCatalogClient::new(&base_url).unwrap(),
        QueryPolicy {
            stale_time: Duration::from_secs(60),
            retry: 1,
        },
    );

    store.set_failing(true);
    assert!(ListCategories::new(&catalog).execute().await.is_err());
    assert_eq!(store.hits(), 2);

    store.set_failing(false);
    let categories = ListCategories::new(&catalog).execute().await.unwrap();
    assert_eq!(categories.len(), 4);
    assert_eq!(store.hits(), 3);
}

#[tokio::test]
async fn test_invalidate_forces_refetch() {
    let (base_url, store) = spawn_fake_store().await;
    let catalog = CachedCatalog::new(
        HttpCatalogClient::new(&base_url).unwrap(),
        QueryPolicy::default(),
    );

    catalog.get_by_category("jewelery").await.unwrap();
    catalog
        .invalidate(&QueryKey::Category("jewelery".to_string()))
        .await;
    catalog.get_by_category("jewelery").await.unwrap();

    assert_eq!(store.hits(), 2);
}
