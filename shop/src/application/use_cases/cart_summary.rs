use crate::application::dto::{CartLineView, CartSummary};
use crate::application::store::CartStore;

/// Use case for building the order summary shown by the cart view
pub struct GetCartSummary<'a> {
    cart: &'a CartStore,
}

impl<'a> GetCartSummary<'a> {
    pub fn new(cart: &'a CartStore) -> Self {
        Self { cart }
    }

    pub fn execute(&self) -> CartSummary {
        let snapshot = self.cart.snapshot();

        let lines = snapshot
            .lines()
            .iter()
            .map(|line| CartLineView {
                product_id: line.product_id(),
                title: line.title().to_string(),
                image: line.image().to_string(),
                unit_price: line.price().amount(),
                quantity: line.quantity().value(),
                subtotal: line.subtotal(),
            })
            .collect();

        CartSummary {
            lines,
            total_count: snapshot.total_count(),
            total_price: snapshot.total_price(),
        }
    }
}
