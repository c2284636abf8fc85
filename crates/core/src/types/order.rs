//! Order model: cart input, line-item snapshots, and totals.
//!
//! An [`Order`] stores point-in-time copies of the products it references.
//! Each [`OrderItem`] carries the title and price observed when the order
//! was assembled; a later change to the product never alters an existing
//! order, and client-supplied prices are never trusted.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::email::Email;
use super::id::DocumentId;

/// Number of decimal places an order total is rounded to.
pub const TOTAL_SCALE: u32 = 2;

/// A single entry of a client-submitted cart.
///
/// This is transient, unvalidated input: `product_id` is a raw string until
/// the catalog parses it, and `quantity` may be zero or negative.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartItem {
    /// Reference to a catalog product, as submitted by the client.
    pub product_id: String,
    /// Desired quantity.
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

const fn default_quantity() -> i64 {
    1
}

impl CartItem {
    /// Quantity clamped to the minimum the store accepts.
    ///
    /// Zero and negative quantities are coerced up to 1 rather than
    /// rejected. That leniency is deliberate and covered by tests.
    #[must_use]
    pub fn clamped_quantity(&self) -> u32 {
        u32::try_from(self.quantity.max(1)).unwrap_or(u32::MAX)
    }
}

/// A line item inside a persisted order.
///
/// `title` and `price` are snapshots of the referenced product at
/// order-assembly time. They are never re-read from the catalog afterward.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderItem {
    /// Id of the product this line was priced from.
    pub product_id: DocumentId,
    /// Product title at time of purchase.
    pub title: String,
    /// Unit price at time of purchase.
    pub price: Decimal,
    /// Quantity ordered (at least 1).
    pub quantity: u32,
}

impl OrderItem {
    /// Price times quantity for this line, unrounded.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Contact and shipping details for an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomerInfo {
    /// Customer name.
    pub name: String,
    /// Contact email; validated on deserialization.
    pub email: Email,
    /// Shipping address.
    pub address: String,
}

/// Order lifecycle status.
///
/// New orders always start in [`OrderStatus::Processing`]; transitions are
/// handled outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

/// Error returned when an order is built without any items.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("order must contain at least one item")]
pub struct EmptyOrder;

/// A persisted order with a server-computed total.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Order {
    /// Line-item snapshots, in cart order.
    pub items: Vec<OrderItem>,
    /// Sum of line totals, rounded to [`TOTAL_SCALE`] decimal places.
    pub total: Decimal,
    /// Customer contact details.
    pub customer: CustomerInfo,
    /// Lifecycle status.
    #[serde(default)]
    pub status: OrderStatus,
}

impl Order {
    /// Build an order from item snapshots, computing the total.
    ///
    /// The total is the sum of `price * quantity` over all items, rounded
    /// to 2 decimal places with round-half-up
    /// ([`RoundingStrategy::MidpointAwayFromZero`]), so a midpoint like
    /// 10.005 becomes 10.01. The fresh order is always in
    /// [`OrderStatus::Processing`].
    ///
    /// # Errors
    ///
    /// Returns [`EmptyOrder`] if `items` is empty.
    pub fn from_items(items: Vec<OrderItem>, customer: CustomerInfo) -> Result<Self, EmptyOrder> {
        if items.is_empty() {
            return Err(EmptyOrder);
        }

        let total = items
            .iter()
            .map(OrderItem::line_total)
            .sum::<Decimal>()
            .round_dp_with_strategy(TOTAL_SCALE, RoundingStrategy::MidpointAwayFromZero);

        Ok(Self {
            items,
            total,
            customer,
            status: OrderStatus::Processing,
        })
    }
}
