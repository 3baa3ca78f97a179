use super::item::Item;
use std::sync::Arc;

/// Lookup of catalog items by code.
///
/// Items handed out are shared; a checkout or rule keeps its own `Arc`.
pub trait Catalog: Send + Sync {
    fn get(&self, code: &str) -> Option<Arc<Item>>;
    fn items(&self) -> Vec<Arc<Item>>;
}
