/// Domain aggregates
use super::base::{AggregateRoot, Entity};
use super::entities::{LineItem, Product};
use super::events::CartEvent;
use super::value_objects::{CartId, ProductId, Quantity};

/// A Cart is the aggregate root for the shopper's line items.
/// Lines keep insertion order and there is at most one line per product.
/// Totals are derived on every read and never stored.
#[derive(Debug, Clone)]
pub struct Cart {
    id: CartId,
    lines: Vec<LineItem>,
}

impl Cart {
    /// Create a new empty cart
    pub fn new() -> Self {
        Cart::with_id(CartId::generate())
    }

    pub fn with_id(id: CartId) -> Self {
        Cart {
            id,
            lines: Vec::new(),
        }
    }

    /// Add one unit of a product. A new line starts at quantity 1,
    /// an existing line is incremented. `None` when the quantity is already
    /// at its ceiling and cannot grow.
    pub fn add_item(&mut self, product: &Product) -> Option<CartEvent> {
        let event = match self.line(product.id()) {
            Some(line) => {
                let quantity = line.quantity().incremented();
                if quantity == line.quantity() {
                    return None;
                }
                CartEvent::QuantityChanged {
                    cart_id: self.id,
                    product_id: *product.id(),
                    quantity,
                }
            }
            None => CartEvent::LineAdded {
                cart_id: self.id,
                line: LineItem::from_product(product),
            },
        };
        self.apply_event(&event);
        Some(event)
    }

    /// Remove the line for a product. `None` when there was no such line.
    pub fn remove_item(&mut self, product_id: &ProductId) -> Option<CartEvent> {
        self.line(product_id)?;
        let event = CartEvent::LineRemoved {
            cart_id: self.id,
            product_id: *product_id,
        };
        self.apply_event(&event);
        Some(event)
    }

    /// Set the quantity of an existing line. Zero or negative removes the line.
    /// Lines are never created here; an unknown product is a no-op.
    pub fn update_quantity(&mut self, product_id: &ProductId, requested: i64) -> Option<CartEvent> {
        let Some(quantity) = Quantity::from_requested(requested) else {
            return self.remove_item(product_id);
        };

        let current = self.line(product_id)?.quantity();
        if current == quantity {
            return None;
        }

        let event = CartEvent::QuantityChanged {
            cart_id: self.id,
            product_id: *product_id,
            quantity,
        };
        self.apply_event(&event);
        Some(event)
    }

    /// Remove every line. `None` when the cart was already empty.
    pub fn clear(&mut self) -> Option<CartEvent> {
        if self.lines.is_empty() {
            return None;
        }
        let event = CartEvent::CartCleared { cart_id: self.id };
        self.apply_event(&event);
        Some(event)
    }

    /// Get the line for a product
    pub fn line(&self, product_id: &ProductId) -> Option<&LineItem> {
        self.lines.iter().find(|line| line.product_id() == *product_id)
    }

    /// All lines in insertion order
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities across all lines
    pub fn total_count(&self) -> u64 {
        total_count(&self.lines)
    }

    /// Sum of `price * quantity` across all lines, unrounded
    pub fn total_price(&self) -> f64 {
        total_price(&self.lines)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

impl Entity for Cart {
    type Id = CartId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for Cart {
    type Event = CartEvent;

    fn apply_event(&mut self, event: &CartEvent) {
        if event.cart_id() != self.id {
            return;
        }

        match event {
            CartEvent::LineAdded { line, .. } => {
                match self
                    .lines
                    .iter_mut()
                    .find(|existing| existing.product_id() == line.product_id())
                {
                    Some(existing) => existing.set_quantity(line.quantity()),
                    None => self.lines.push(line.clone()),
                }
            }
            CartEvent::QuantityChanged {
                product_id,
                quantity,
                ..
            } => {
                if let Some(line) = self
                    .lines
                    .iter_mut()
                    .find(|line| line.product_id() == *product_id)
                {
                    line.set_quantity(*quantity);
                }
            }
            CartEvent::LineRemoved { product_id, .. } => {
                self.lines.retain(|line| line.product_id() != *product_id);
            }
            CartEvent::CartCleared { .. } => self.lines.clear(),
        }
    }
}

/// Sum of quantities
pub fn total_count(lines: &[LineItem]) -> u64 {
    lines
        .iter()
        .map(|line| u64::from(line.quantity().value()))
        .sum()
}

/// Sum of subtotals, folded in line order
pub fn total_price(lines: &[LineItem]) -> f64 {
    lines.iter().fold(0.0, |total, line| total + line.subtotal())
}
