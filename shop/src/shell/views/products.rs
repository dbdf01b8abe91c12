/// Products remote: catalog list and product detail
use crate::application::use_cases::{GetProduct, ListProducts};
use crate::domain::{base::Entity, entities::Product};
use crate::shell::context::AppContext;
use crate::shell::remote::RemoteView;
use crate::shell::router::Route;
use anyhow::bail;
use async_trait::async_trait;
use std::fmt::Write;

pub struct ProductsRemote;

impl ProductsRemote {
    pub const NAME: &'static str = "products";

    pub fn handles(route: &Route) -> bool {
        matches!(route, Route::Products { .. } | Route::ProductDetail(_))
    }

    fn render_list(category: Option<&str>, products: &[Product]) -> String {
        let mut out = String::new();
        match category {
            Some(category) => {
                let _ = writeln!(out, "Products in {}", category);
            }
            None => {
                let _ = writeln!(out, "Products");
            }
        }

        if products.is_empty() {
            out.push_str("No products found.\n");
            return out;
        }

        for product in products {
            let _ = writeln!(
                out,
                "  #{:<4} {:<48} {:>10}  [{}]",
                product.id().value(),
                truncate(product.title(), 48),
                product.price().to_string(),
                product.category()
            );
        }
        out
    }

    fn render_detail(product: &Product, in_cart: Option<u32>) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", product.title());
        let _ = writeln!(out, "  Price:    {}", product.price());
        let _ = writeln!(out, "  Category: {}", product.category());
        let _ = writeln!(out, "  Rating:   {}", product.rating());
        if !product.description().is_empty() {
            let _ = writeln!(out, "\n  {}", product.description());
        }
        match in_cart {
            Some(quantity) => {
                let _ = writeln!(out, "\n  In cart: {}", quantity);
            }
            None => {
                let _ = writeln!(out, "\n  Type `add {}` to put it in the cart.", product.id());
            }
        }
        out
    }
}

#[async_trait]
impl RemoteView for ProductsRemote {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn render(&self, ctx: &AppContext, route: &Route) -> anyhow::Result<String> {
        match route {
            Route::Products { category } => {
                let products = ListProducts::new(ctx.catalog())
                    .execute(category.as_deref())
                    .await?;
                Ok(Self::render_list(category.as_deref(), &products))
            }
            Route::ProductDetail(id) => {
                let product = GetProduct::new(ctx.catalog()).execute(*id).await?;
                let in_cart = ctx.cart().line(*id).map(|line| line.quantity().value());
                Ok(Self::render_detail(&product, in_cart))
            }
            other => bail!("products view cannot render {}", other),
        }
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}
