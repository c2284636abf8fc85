//! Product catalog model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that make a [`Product`] unacceptable for the catalog.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductError {
    /// Title is missing or whitespace-only.
    #[error("product title cannot be empty")]
    EmptyTitle,
    /// Price is below zero.
    #[error("product price cannot be negative: {0}")]
    NegativePrice(Decimal),
}

/// A product as stored in the catalog.
///
/// Field constraints are enforced by [`Product::validate`], which the
/// catalog runs before any write. Optional descriptive fields default to
/// `None`; `category` and `in_stock` carry catalog defaults so a minimal
/// submission still produces a complete record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    /// Product name.
    pub title: String,
    /// Longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Price in USD.
    pub price: Decimal,
    /// Product category.
    #[serde(default = "default_category")]
    pub category: String,
    /// Whether the product is currently in stock.
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    /// Primary image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Storage capacity, e.g. "128GB".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<String>,
    /// Color variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

fn default_category() -> String {
    "iPhone".to_owned()
}

const fn default_in_stock() -> bool {
    true
}

impl Product {
    /// Check the field constraints the catalog requires.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError`] if the title is empty or the price is
    /// negative.
    pub fn validate(&self) -> Result<(), ProductError> {
        if self.title.trim().is_empty() {
            return Err(ProductError::EmptyTitle);
        }
        if self.price < Decimal::ZERO {
            return Err(ProductError::NegativePrice(self.price));
        }
        Ok(())
    }
}
