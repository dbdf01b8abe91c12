/// Shell chrome: header with navigation and the cart badge
use crate::application::store::{CartStore, Subscription};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Item count shown next to the cart link.
/// Kept current by a `total_count` subscription, so adds made from any view show up.
pub struct CartBadge {
    count: Arc<AtomicU64>,
    _subscription: Subscription,
}

impl CartBadge {
    pub fn new(cart: &CartStore) -> Self {
        let count = Arc::new(AtomicU64::new(cart.total_count()));
        let sink = Arc::clone(&count);
        let subscription = cart.select(
            |snapshot| snapshot.total_count(),
            move |total| sink.store(*total, Ordering::SeqCst),
        );

        CartBadge {
            count,
            _subscription: subscription,
        }
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::SeqCst)
    }

    /// `Cart (3)`, or plain `Cart` when empty
    pub fn label(&self) -> String {
        match self.count() {
            0 => "Cart".to_string(),
            n => format!("Cart ({})", n),
        }
    }
}

pub struct Layout {
    badge: CartBadge,
}

impl Layout {
    pub fn new(cart: &CartStore) -> Self {
        Layout {
            badge: CartBadge::new(cart),
        }
    }

    pub fn badge(&self) -> &CartBadge {
        &self.badge
    }

    pub fn header(&self) -> String {
        format!("Mini Shop [MFE]  |  Products  |  {}", self.badge.label())
    }

    /// Wrap a view body in the header
    pub fn render(&self, body: &str) -> String {
        let header = self.header();
        let rule = "-".repeat(header.chars().count());
        format!("{}\n{}\n{}", header, rule, body)
    }
}
