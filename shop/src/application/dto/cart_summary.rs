use crate::domain::value_objects::{Price, ProductId};
use serde::Serialize;

/// One cart line prepared for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLineView {
    pub product_id: ProductId,
    pub title: String,
    pub image: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub subtotal: f64,
}

impl CartLineView {
    pub fn unit_price_display(&self) -> String {
        Price::display(self.unit_price)
    }

    pub fn subtotal_display(&self) -> String {
        Price::display(self.subtotal)
    }
}

/// Order summary: lines plus derived totals.
/// Amounts stay unrounded; the `*_display` helpers format to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartSummary {
    pub lines: Vec<CartLineView>,
    pub total_count: u64,
    pub total_price: f64,
}

impl CartSummary {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total_price_display(&self) -> String {
        Price::display(self.total_price)
    }
}
