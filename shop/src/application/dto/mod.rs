pub mod cart_summary;

pub use cart_summary::{CartLineView, CartSummary};
