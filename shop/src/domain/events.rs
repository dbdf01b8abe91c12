/// Domain events
use super::base::DomainEvent;
use super::entities::LineItem;
use super::value_objects::{CartId, ProductId, Quantity};

/// Something that happened to a cart
#[derive(Debug, Clone, PartialEq)]
pub enum CartEvent {
    /// A product entered the cart for the first time
    LineAdded { cart_id: CartId, line: LineItem },
    /// An existing line changed quantity (repeat add or explicit update)
    QuantityChanged {
        cart_id: CartId,
        product_id: ProductId,
        quantity: Quantity,
    },
    /// A line left the cart
    LineRemoved {
        cart_id: CartId,
        product_id: ProductId,
    },
    /// Every line left the cart
    CartCleared { cart_id: CartId },
}

impl CartEvent {
    pub fn cart_id(&self) -> CartId {
        match self {
            CartEvent::LineAdded { cart_id, .. }
            | CartEvent::QuantityChanged { cart_id, .. }
            | CartEvent::LineRemoved { cart_id, .. }
            | CartEvent::CartCleared { cart_id } => *cart_id,
        }
    }

    /// The product the event is about, if it concerns a single line
    pub fn product_id(&self) -> Option<ProductId> {
        match self {
            CartEvent::LineAdded { line, .. } => Some(line.product_id()),
            CartEvent::QuantityChanged { product_id, .. }
            | CartEvent::LineRemoved { product_id, .. } => Some(*product_id),
            CartEvent::CartCleared { .. } => None,
        }
    }
}

impl DomainEvent for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::LineAdded { .. } => "LineAdded",
            CartEvent::QuantityChanged { .. } => "QuantityChanged",
            CartEvent::LineRemoved { .. } => "LineRemoved",
            CartEvent::CartCleared { .. } => "CartCleared",
        }
    }

    fn aggregate_id(&self) -> String {
        self.cart_id().to_string()
    }
}
