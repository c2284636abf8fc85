//! Business services on top of the catalog and the document store.

pub mod orders;

pub use orders::{OrderError, OrderService};
