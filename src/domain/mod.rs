//! Domain layer: money, catalog items and the pricing rules applied to them.
//!
//! Everything here is immutable once built and free of I/O.

pub mod item;
pub mod money;
pub mod ports;
pub mod pricing;
