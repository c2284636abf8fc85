//! Core types for the Orchard Store.
//!
//! This module provides validated wrappers for common domain concepts and
//! the product/order data model.

pub mod email;
pub mod id;
pub mod order;
pub mod product;

pub use email::{Email, EmailError};
pub use id::{DocumentId, IdError};
pub use order::{CartItem, CustomerInfo, EmptyOrder, Order, OrderItem, OrderStatus};
pub use product::{Product, ProductError};
