//! Application layer: the checkout session that scans items and prices a basket.
//!
//! A `Checkout` is built per basket and used by one caller at a time; the rule
//! set and items it refers to are shared read-only through `Arc`.

pub mod checkout;
