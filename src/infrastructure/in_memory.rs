use crate::domain::item::Item;
use crate::domain::ports::Catalog;
use crate::error::{CheckoutError, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// An in-memory catalog keyed by item code.
///
/// Filled once at setup; lookups hand out shared `Arc<Item>` handles and
/// `items()` lists entries in insertion order.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalog {
    items: Vec<Arc<Item>>,
    by_code: HashMap<String, usize>,
}

impl InMemoryCatalog {
    /// Creates a new, empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from items, failing on the first duplicate code.
    pub fn from_items<I>(items: I) -> Result<Self>
    where
        I: IntoIterator<Item = Item>,
    {
        let mut catalog = Self::new();
        for item in items {
            catalog.insert(item)?;
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, item: Item) -> Result<Arc<Item>> {
        if self.by_code.contains_key(item.code()) {
            return Err(CheckoutError::DuplicateItem(item.code().to_string()));
        }
        let item = Arc::new(item);
        self.by_code.insert(item.code().to_string(), self.items.len());
        self.items.push(Arc::clone(&item));
        Ok(item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Like [`Catalog::get`], but unknown codes are an error.
    pub fn require(&self, code: &str) -> Result<Arc<Item>> {
        self.get(code)
            .ok_or_else(|| CheckoutError::UnknownItem(code.to_string()))
    }
}

impl Catalog for InMemoryCatalog {
    fn get(&self, code: &str) -> Option<Arc<Item>> {
        self.by_code
            .get(code)
            .map(|&position| Arc::clone(&self.items[position]))
    }

    fn items(&self) -> Vec<Arc<Item>> {
        self.items.clone()
    }
}
