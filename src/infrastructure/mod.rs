//! Concrete implementations of the domain ports.

pub mod in_memory;
