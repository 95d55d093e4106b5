//! Sales domain module.
//!
//! The order transaction: validating and fulfilling a multi-item purchase
//! against the catalog.

pub mod order;

pub use order::{place_order, OrderLine};
