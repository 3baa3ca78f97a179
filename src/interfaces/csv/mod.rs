//! CSV readers for the catalog and pricing rules consumed by the CLI.

pub mod catalog_reader;
pub mod rule_reader;
