/// Cart remote: line items and order summary
use crate::application::dto::CartSummary;
use crate::application::use_cases::GetCartSummary;
use crate::shell::context::AppContext;
use crate::shell::remote::RemoteView;
use crate::shell::router::Route;
use anyhow::bail;
use async_trait::async_trait;
use std::fmt::Write;

pub struct CartRemote;

impl CartRemote {
    pub const NAME: &'static str = "cart";

    pub fn handles(route: &Route) -> bool {
        matches!(route, Route::Cart)
    }

    fn render_summary(summary: &CartSummary) -> String {
        let mut out = String::from("Shopping Cart\n");
        if summary.is_empty() {
            out.push_str("Your cart is empty.\n");
            return out;
        }

        for line in &summary.lines {
            let _ = writeln!(
                out,
                "  #{:<4} {:<40} {:>10} x {:<3} = {:>10}",
                line.product_id.value(),
                line.title,
                line.unit_price_display(),
                line.quantity,
                line.subtotal_display()
            );
        }

        let total = summary.total_price_display();
        let _ = writeln!(out, "\nOrder Summary");
        let _ = writeln!(out, "  Items ({}){:>20}", summary.total_count, total);
        let _ = writeln!(out, "  Shipping{:>20}", "Free");
        let _ = writeln!(out, "  Total{:>23}", total);
        out
    }
}

#[async_trait]
impl RemoteView for CartRemote {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn render(&self, ctx: &AppContext, route: &Route) -> anyhow::Result<String> {
        if !Self::handles(route) {
            bail!("cart view cannot render {}", route);
        }
        let summary = GetCartSummary::new(ctx.cart()).execute();
        Ok(Self::render_summary(&summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::store::CartStore;
    use crate::application::testing::{product, StaticCatalog};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_render_empty_cart() {
        let ctx = AppContext::new(CartStore::new(), Arc::new(StaticCatalog::sample()));
        let out = CartRemote.render(&ctx, &Route::Cart).await.unwrap();

        assert_eq!(out, "Shopping Cart\nYour cart is empty.\n");
    }

    #[tokio::test]
    async fn test_render_lines_and_totals() {
        let ctx = AppContext::new(CartStore::new(), Arc::new(StaticCatalog::sample()));
        let a = product(1, "A", 10.0, "electronics");
        ctx.cart().add_item(&a);
        ctx.cart().add_item(&a);
        ctx.cart().add_item(&product(2, "B", 5.0, "electronics"));

        let out = CartRemote.render(&ctx, &Route::Cart).await.unwrap();

        assert!(out.contains("$10.00 x 2"));
        assert!(out.contains("$20.00"));
        assert!(out.contains("Items (3)"));
        assert!(out.contains("$25.00"));
        assert!(out.contains("Free"));
    }

    #[tokio::test]
    async fn test_rejects_other_routes() {
        let ctx = AppContext::new(CartStore::new(), Arc::new(StaticCatalog::sample()));
        assert!(CartRemote.render(&ctx, &Route::home()).await.is_err());
    }
}
