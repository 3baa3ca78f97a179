#![allow(dead_code)]

use checkout::domain::item::Item;
use checkout::domain::money::{Currency, Money, Rate};
use checkout::domain::pricing::{FreeItemRule, PercentageDiscountRule, RuleSet};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rust_decimal_macros::dec;
use std::sync::Arc;

pub fn gbp_item(code: &str, name: &str, price: i64) -> Arc<Item> {
    Arc::new(Item::new(code, name, Money::new(price, Currency::GBP)).unwrap())
}

pub struct Shop {
    pub tea: Arc<Item>,
    pub strawberries: Arc<Item>,
    pub coffee: Arc<Item>,
    pub rules: Arc<RuleSet>,
}

impl Shop {
    pub fn items(&self) -> Vec<Arc<Item>> {
        vec![
            Arc::clone(&self.tea),
            Arc::clone(&self.strawberries),
            Arc::clone(&self.coffee),
        ]
    }
}

/// Green tea free after 2, strawberries 10% off above 3, coffee a third off above 3.
pub fn shop() -> Shop {
    let tea = gbp_item("GR1", "Green tea", 311);
    let strawberries = gbp_item("SR1", "Strawberries", 500);
    let coffee = gbp_item("CF1", "Coffee", 1123);

    let rules = RuleSet::new()
        .add(FreeItemRule::new(Arc::clone(&tea), 2).unwrap())
        .add(PercentageDiscountRule::new(
            Arc::clone(&strawberries),
            3,
            Rate::new(dec!(0.1)).unwrap(),
        ))
        .add(PercentageDiscountRule::new(
            Arc::clone(&coffee),
            3,
            Rate::new(dec!(1) / dec!(3)).unwrap(),
        ));

    Shop {
        tea,
        strawberries,
        coffee,
        rules: Arc::new(rules),
    }
}

/// A basket of `size` random picks from `items`.
pub fn random_basket(items: &[Arc<Item>], size: usize, seed: u64) -> Vec<Arc<Item>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..size)
        .map(|_| Arc::clone(&items[rng.gen_range(0..items.len())]))
        .collect()
}

/// The same basket in a different scan order.
pub fn shuffled(basket: &[Arc<Item>], seed: u64) -> Vec<Arc<Item>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut basket = basket.to_vec();
    basket.shuffle(&mut rng);
    basket
}
