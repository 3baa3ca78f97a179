//! The sample shop: three teas-and-coffee items, their promotions and four
//! baskets. Everything is built locally on each call.

use crate::domain::item::Item;
use crate::domain::money::{Currency, Money, Rate};
use crate::domain::pricing::{FreeItemRule, PercentageDiscountRule, RuleSet};
use crate::error::Result;
use crate::infrastructure::in_memory::InMemoryCatalog;
use rust_decimal_macros::dec;

pub fn sample_catalog() -> Result<InMemoryCatalog> {
    InMemoryCatalog::from_items([
        Item::new("GR1", "Green tea", Money::new(311, Currency::GBP))?,
        Item::new("SR1", "Strawberries", Money::new(500, Currency::GBP))?,
        Item::new("CF1", "Coffee", Money::new(1123, Currency::GBP))?,
    ])
}

/// Green tea: buy 2, one free. Strawberries: more than 3, 10% off.
/// Coffee: more than 3, a third off.
pub fn sample_rules(catalog: &InMemoryCatalog) -> Result<RuleSet> {
    Ok(RuleSet::new()
        .add(FreeItemRule::new(catalog.require("GR1")?, 2)?)
        .add(PercentageDiscountRule::new(
            catalog.require("SR1")?,
            3,
            Rate::new(dec!(0.1))?,
        ))
        .add(PercentageDiscountRule::new(
            catalog.require("CF1")?,
            3,
            Rate::new(dec!(1) / dec!(3))?,
        )))
}

pub fn sample_baskets() -> Vec<Vec<&'static str>> {
    vec![
        vec!["GR1", "SR1", "GR1", "GR1", "CF1"],
        vec!["GR1", "GR1"],
        vec!["SR1", "SR1", "GR1", "SR1"],
        vec!["GR1", "CF1", "SR1", "CF1", "CF1"],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::checkout::Checkout;
    use std::sync::Arc;

    #[test]
    fn test_sample_baskets_totals() {
        let catalog = sample_catalog().unwrap();
        let rules = Arc::new(sample_rules(&catalog).unwrap());

        let totals: Vec<i64> = sample_baskets()
            .into_iter()
            .map(|basket| {
                let mut checkout = Checkout::with_rules(Arc::clone(&rules));
                for code in basket {
                    checkout.scan(&catalog.require(code).unwrap());
                }
                checkout.total().unwrap().amount_minor()
            })
            .collect();

        // Three strawberries or coffees is not more than 3, so neither is discounted.
        assert_eq!(totals, vec![2245, 311, 1811, 4180]);
    }
}
