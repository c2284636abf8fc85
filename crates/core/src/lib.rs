//! Orchard Core - Shared domain types.
//!
//! This crate provides the domain types used by the Orchard Store backend:
//! validated newtypes (`DocumentId`, `Email`) and the product/order model.
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP handlers. Anything that talks to the document store or
//! the network lives in the `api` crate.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
