//! Orchard Store API library.
//!
//! This crate provides the storefront backend as a library, allowing it to
//! be tested and reused. The `orchard-api` binary wires it to Postgres and
//! serves it.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
