/// Route table of the composition shell
use crate::domain::value_objects::ProductId;
use regex::Regex;
use std::fmt;
use url::{form_urlencoded, Url};

/// A navigable location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/` or `/?category=<name>`
    Products { category: Option<String> },
    /// `/products/{id}`
    ProductDetail(ProductId),
    /// `/cart`
    Cart,
    /// Anything else; keeps the requested path
    NotFound(String),
}

impl Route {
    pub fn home() -> Self {
        Route::Products { category: None }
    }

    /// Path that parses back to this route
    pub fn path(&self) -> String {
        match self {
            Route::Products { category: None } => "/".to_string(),
            Route::Products {
                category: Some(category),
            } => {
                let encoded: String = form_urlencoded::Serializer::new(String::new())
                    .append_pair("category", category)
                    .finish();
                format!("/?{}", encoded)
            }
            Route::ProductDetail(id) => format!("/products/{}", id),
            Route::Cart => "/cart".to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Parses shell paths into routes
pub struct Router {
    origin: Url,
    products: Regex,
    product_detail: Regex,
    cart: Regex,
}

impl Router {
    pub fn new() -> Self {
        Router {
            origin: Url::parse("http://shell.local/").expect("static origin URL"),
            products: Regex::new(r"^/$").expect("static route pattern"),
            product_detail: Regex::new(r"^/products/(\d+)/?$").expect("static route pattern"),
            cart: Regex::new(r"^/cart/?$").expect("static route pattern"),
        }
    }

    /// Resolve a path such as `/products/3` or `/?category=jewelery`
    pub fn resolve(&self, path: &str) -> Route {
        let raw = path.trim();
        let not_found = || Route::NotFound(raw.to_string());

        if !raw.starts_with('/') {
            return not_found();
        }
        let Ok(url) = self.origin.join(raw) else {
            return not_found();
        };
        if url.host() != self.origin.host() {
            return not_found();
        }
        let path = url.path();

        if self.products.is_match(path) {
            let category = url
                .query_pairs()
                .find(|(key, _)| key == "category")
                .map(|(_, value)| value.trim().to_string())
                .filter(|value| !value.is_empty());
            return Route::Products { category };
        }

        if let Some(captures) = self.product_detail.captures(path) {
            return match captures[1].parse::<ProductId>() {
                Ok(id) => Route::ProductDetail(id),
                Err(_) => not_found(),
            };
        }

        if self.cart.is_match(path) {
            return Route::Cart;
        }

        not_found()
    }
}

impl Default for Router {
    fn default() -> Self {
        Router::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_home() {
        let router = Router::new();
        assert_eq!(router.resolve("/"), Route::home());
        assert_eq!(router.resolve("  /  "), Route::home());
    }

    #[test]
    fn test_resolve_category_query() {
        let router = Router::new();
        assert_eq!(
            router.resolve("/?category=men%27s+clothing"),
            Route::Products {
                category: Some("men's clothing".to_string())
            }
        );
        assert_eq!(router.resolve("/?category="), Route::home());
    }

    #[test]
    fn test_resolve_product_detail() {
        let router = Router::new();
        assert_eq!(
            router.resolve("/products/12"),
            Route::ProductDetail(ProductId::new(12))
        );
        assert_eq!(
            router.resolve("/products/12/"),
            Route::ProductDetail(ProductId::new(12))
        );
    }

    #[test]
    fn test_resolve_cart() {
        let router = Router::new();
        assert_eq!(router.resolve("/cart"), Route::Cart);
    }

    #[test]
    fn test_unknown_paths_are_not_found() {
        let router = Router::new();
        assert_eq!(
            router.resolve("/products/abc"),
            Route::NotFound("/products/abc".to_string())
        );
        assert_eq!(
            router.resolve("/products/99999999999999999999999"),
            Route::NotFound("/products/99999999999999999999999".to_string())
        );
        assert_eq!(router.resolve("cart"), Route::NotFound("cart".to_string()));
        assert_eq!(router.resolve("/checkout"), Route::NotFound("/checkout".to_string()));
    }

    #[test]
    fn test_path_parses_back() {
        let router = Router::new();
        let routes = [
            Route::home(),
            Route::Products {
                category: Some("women's clothing".to_string()),
            },
            Route::ProductDetail(ProductId::new(7)),
            Route::Cart,
        ];

        for route in routes {
            assert_eq!(router.resolve(&route.path()), route);
        }
    }
}
