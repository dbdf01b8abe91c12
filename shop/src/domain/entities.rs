/// Domain entities
use super::base::Entity;
use super::value_objects::{Category, Price, ProductId, Quantity, Rating};
use serde::{Deserialize, Serialize};

/// A product as returned by the catalog service.
/// Products are read-only on this side; the catalog owns them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    title: String,
    price: Price,
    #[serde(default)]
    description: String,
    category: Category,
    #[serde(default)]
    image: String,
    #[serde(default)]
    rating: Rating,
}

impl Product {
    pub fn new(
        id: ProductId,
        title: impl Into<String>,
        price: Price,
        category: Category,
    ) -> Self {
        Product {
            id,
            title: title.into(),
            price,
            description: String::new(),
            category,
            image: String::new(),
            rating: Rating::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.rating = rating;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// One product inside the cart.
/// Display fields are copied from the product when the line is created and are
/// not refreshed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    product_id: ProductId,
    title: String,
    price: Price,
    image: String,
    quantity: Quantity,
}

impl LineItem {
    /// Create a line for a product with quantity 1
    pub fn from_product(product: &Product) -> Self {
        LineItem {
            product_id: *product.id(),
            title: product.title().to_string(),
            price: product.price(),
            image: product.image().to_string(),
            quantity: Quantity::one(),
        }
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub(crate) fn set_quantity(&mut self, quantity: Quantity) {
        self.quantity = quantity;
    }

    /// `price * quantity`, unrounded
    pub fn subtotal(&self) -> f64 {
        self.price.times(self.quantity)
    }
}

impl Entity for LineItem {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.product_id
    }
}
