mod cart;
mod products;

pub use cart::CartRemote;
pub use products::ProductsRemote;
