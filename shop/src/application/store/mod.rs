mod cart_store;

pub use cart_store::{CartListener, CartSnapshot, CartStore, Subscription, WeakCartStore};
