use crate::domain::item::Item;
use crate::domain::money::{Currency, Money};
use crate::error::{CheckoutError, Result};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct CatalogRecord {
    code: String,
    name: String,
    /// Unit price in minor units.
    price: i64,
    currency: String,
}

impl CatalogRecord {
    fn into_item(self) -> Result<Item> {
        let currency: Currency = self.currency.parse()?;
        Item::new(self.code, self.name, Money::new(self.price, currency))
    }
}

/// Reads catalog items from a CSV source with a `code,name,price,currency` header.
///
/// Prices are integers in the smallest currency unit.
pub struct CatalogReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CatalogReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes and validates one item per row.
    pub fn items(self) -> impl Iterator<Item = Result<Item>> {
        self.reader.into_deserialize().map(|result| {
            result
                .map_err(CheckoutError::from)
                .and_then(CatalogRecord::into_item)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_valid_catalog() {
        let data = "code, name, price, currency\nGR1, Green tea, 311, GBP\nCF1, Coffee, 1123, gbp";
        let reader = CatalogReader::new(data.as_bytes());
        let results: Vec<Result<Item>> = reader.items().collect();

        assert_eq!(results.len(), 2);
        let tea = results[0].as_ref().unwrap();
        assert_eq!(tea.code(), "GR1");
        assert_eq!(tea.name(), "Green tea");
        assert_eq!(tea.unit_price(), Money::new(311, Currency::GBP));
        assert_eq!(
            results[1].as_ref().unwrap().unit_price().currency(),
            Currency::GBP
        );
    }

    #[test]
    fn test_reader_rejects_bad_rows() {
        let data = "code, name, price, currency\nGR1, Green tea, abc, GBP\n, Nameless, 10, GBP\nSR1, Strawberries, 500, POUNDS\nCF1, Coffee, 1123, GBP";
        let reader = CatalogReader::new(data.as_bytes());
        let results: Vec<Result<Item>> = reader.items().collect();

        assert!(matches!(results[0], Err(CheckoutError::CsvError(_))));
        assert!(matches!(results[1], Err(CheckoutError::InvalidItem(_))));
        assert!(matches!(results[2], Err(CheckoutError::InvalidCurrency(_))));
        assert!(results[3].is_ok());
    }
}
