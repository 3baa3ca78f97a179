//! Adapters between the pricing core and the outside world: CSV input and
//! human-readable money.

pub mod csv;
pub mod format;
