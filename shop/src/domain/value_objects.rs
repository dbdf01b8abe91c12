/// Value objects for the domain layer
use super::base::{DomainError, DomainResult, ValueObject};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifier of a catalog product, assigned by the catalog service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    pub fn new(id: u64) -> Self {
        ProductId(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl ValueObject for ProductId {}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        ProductId(id)
    }
}

impl FromStr for ProductId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(ProductId)
            .map_err(|_| DomainError::InvalidValue(format!("'{}' is not a product id", s)))
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a cart aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartId(Uuid);

impl CartId {
    pub fn generate() -> Self {
        CartId(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl ValueObject for CartId {}

impl fmt::Display for CartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unit price. Non-negative and finite; arithmetic stays in plain `f64`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(f64);

impl Price {
    pub fn new(amount: f64) -> DomainResult<Self> {
        if !amount.is_finite() {
            return Err(DomainError::InvalidValue(
                "Price must be a finite number".to_string(),
            ));
        }
        if amount < 0.0 {
            return Err(DomainError::InvalidValue(
                "Price cannot be negative".to_string(),
            ));
        }
        Ok(Price(amount))
    }

    pub fn zero() -> Self {
        Price(0.0)
    }

    pub fn amount(&self) -> f64 {
        self.0
    }

    /// Price of `quantity` units, unrounded
    pub fn times(&self, quantity: Quantity) -> f64 {
        self.0 * f64::from(quantity.value())
    }

    /// Two-decimal display form, e.g. `$12.50`
    pub fn display(amount: f64) -> String {
        format!("${:.2}", amount)
    }
}

impl ValueObject for Price {}

impl TryFrom<f64> for Price {
    type Error = DomainError;

    fn try_from(amount: f64) -> Result<Self, Self::Error> {
        Price::new(amount)
    }
}

impl From<Price> for f64 {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Price::display(self.0))
    }
}

/// Quantity of a line item. Always at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    pub fn new(value: u32) -> DomainResult<Self> {
        if value == 0 {
            return Err(DomainError::InvalidValue(
                "Quantity must be at least 1".to_string(),
            ));
        }
        Ok(Quantity(value))
    }

    pub fn one() -> Self {
        Quantity(1)
    }

    /// Build a quantity from a signed request. Returns `None` for zero or negative
    /// values; values above `u32::MAX` saturate.
    pub fn from_requested(requested: i64) -> Option<Self> {
        if requested <= 0 {
            return None;
        }
        Some(Quantity(u32::try_from(requested).unwrap_or(u32::MAX)))
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn incremented(&self) -> Self {
        Quantity(self.0.saturating_add(1))
    }
}

impl ValueObject for Quantity {}

impl TryFrom<u32> for Quantity {
    type Error = DomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Quantity::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A category label, e.g. "electronics" or "men's clothing"
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Category(String);

impl Category {
    pub fn new(label: impl Into<String>) -> DomainResult<Self> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(DomainError::InvalidValue(
                "Category cannot be empty".to_string(),
            ));
        }
        Ok(Category(label))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Category {}

impl TryFrom<String> for Category {
    type Error = DomainError;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        Category::new(label)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Average customer rating and number of ratings
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    pub count: u32,
}

impl ValueObject for Rating {}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} ({} reviews)", self.rate, self.count)
    }
}
