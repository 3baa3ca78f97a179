use crate::domain::money::Rate;
use crate::domain::ports::Catalog;
use crate::domain::pricing::{FreeItemRule, PercentageDiscountRule, PricingRule};
use crate::error::{CheckoutError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;
use std::str::FromStr;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum RuleKind {
    Free,
    Discount,
}

#[derive(Debug, Deserialize)]
struct RuleRecord {
    kind: RuleKind,
    item: String,
    threshold: u32,
    rate: Option<String>,
}

/// Parses a discount rate written either as a decimal (`0.1`) or a fraction (`1/3`).
pub fn parse_rate(raw: &str) -> Result<Rate> {
    let invalid = || CheckoutError::InvalidRule(format!("unreadable discount rate {raw:?}"));
    let value = match raw.split_once('/') {
        Some((numerator, denominator)) => {
            let numerator = Decimal::from_str(numerator.trim()).map_err(|_| invalid())?;
            let denominator = Decimal::from_str(denominator.trim()).map_err(|_| invalid())?;
            numerator.checked_div(denominator).ok_or_else(invalid)?
        }
        None => Decimal::from_str(raw.trim()).map_err(|_| invalid())?,
    };
    Rate::new(value)
}

/// Reads pricing rules from a CSV source with a `kind,item,threshold,rate` header.
///
/// `kind` is `free` (buy `threshold`, get one free) or `discount` (more than
/// `threshold` takes `rate` off every unit). Item codes are resolved against a catalog.
pub struct RuleReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> RuleReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn rules<'a>(self, catalog: &'a dyn Catalog) -> impl Iterator<Item = Result<PricingRule>> + 'a
    where
        R: 'a,
    {
        self.reader.into_deserialize().map(move |result| {
            result
                .map_err(CheckoutError::from)
                .and_then(|record: RuleRecord| build_rule(record, catalog))
        })
    }
}

fn build_rule(record: RuleRecord, catalog: &dyn Catalog) -> Result<PricingRule> {
    let item = catalog
        .get(&record.item)
        .ok_or_else(|| CheckoutError::UnknownItem(record.item.clone()))?;

    match record.kind {
        RuleKind::Free => Ok(FreeItemRule::new(item, record.threshold)?.into()),
        RuleKind::Discount => {
            let raw = record.rate.as_deref().filter(|raw| !raw.is_empty()).ok_or_else(|| {
                CheckoutError::InvalidRule(format!("discount rule for {} needs a rate", record.item))
            })?;
            Ok(PercentageDiscountRule::new(item, record.threshold, parse_rate(raw)?).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::item::Item;
    use crate::domain::money::{Currency, Money};
    use crate::domain::pricing::DiscountResult;
    use crate::infrastructure::in_memory::InMemoryCatalog;
    use rust_decimal_macros::dec;

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::from_items([
            Item::new("GR1", "Green tea", Money::new(311, Currency::GBP)).unwrap(),
            Item::new("SR1", "Strawberries", Money::new(500, Currency::GBP)).unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn test_parse_rate_forms() {
        assert_eq!(parse_rate("0.1").unwrap().value(), dec!(0.1));
        assert_eq!(parse_rate("1/3").unwrap().value(), dec!(1) / dec!(3));
        assert!(matches!(parse_rate("3/2"), Err(CheckoutError::InvalidRule(_))));
        assert!(matches!(parse_rate("1/0"), Err(CheckoutError::InvalidRule(_))));
        assert!(matches!(parse_rate("ten"), Err(CheckoutError::InvalidRule(_))));
    }

    #[test]
    fn test_reader_valid_rules() {
        let catalog = catalog();
        let data = "kind, item, threshold, rate\nfree, GR1, 2, \ndiscount, SR1, 3, 0.1";
        let rules: Vec<PricingRule> = RuleReader::new(data.as_bytes())
            .rules(&catalog)
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(rules.len(), 2);
        let tea = catalog.require("GR1").unwrap();
        assert_eq!(rules[0].apply(&tea, 2), vec![DiscountResult::FreeUnits(1)]);
        assert_eq!(
            rules[1].description(),
            "If you buy Strawberries 3 times, you can get a great discount!"
        );
    }

    #[test]
    fn test_reader_reports_bad_rows() {
        let catalog = catalog();
        let data = "kind, item, threshold, rate\nfree, XX9, 2, \ndiscount, SR1, 3, \nbogus, GR1, 1, \nfree, GR1, 0, ";
        let results: Vec<Result<PricingRule>> =
            RuleReader::new(data.as_bytes()).rules(&catalog).collect();

        assert!(matches!(results[0], Err(CheckoutError::UnknownItem(_))));
        assert!(matches!(results[1], Err(CheckoutError::InvalidRule(_))));
        assert!(matches!(results[2], Err(CheckoutError::CsvError(_))));
        assert!(matches!(results[3], Err(CheckoutError::InvalidRule(_))));
    }
}
