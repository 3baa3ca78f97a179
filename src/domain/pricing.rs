use super::item::Item;
use super::money::Rate;
use crate::error::{CheckoutError, Result};
use std::sync::Arc;

/// What a single rule grants to a checkout line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DiscountResult {
    #[default]
    None,
    /// Whole units of the line's item that cost nothing.
    FreeUnits(u32),
    /// One rate per unit in the line; each takes that fraction off the unit price.
    PerUnitRates(Vec<Rate>),
}

/// Buy `threshold` or more of an item and one unit is free.
///
/// Only ever one unit per line, however far the quantity goes past the threshold.
#[derive(Debug, Clone)]
pub struct FreeItemRule {
    target: Arc<Item>,
    threshold: u32,
}

impl FreeItemRule {
    pub fn new(target: Arc<Item>, threshold: u32) -> Result<Self> {
        if threshold == 0 {
            return Err(CheckoutError::InvalidRule(format!(
                "free item threshold for {} must be at least 1",
                target.code()
            )));
        }
        Ok(Self { target, threshold })
    }

    pub fn target(&self) -> &Item {
        &self.target
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn apply(&self, item: &Item, quantity: u32) -> DiscountResult {
        if item.code() == self.target.code() && quantity >= self.threshold {
            DiscountResult::FreeUnits(1)
        } else {
            DiscountResult::None
        }
    }

    pub fn description(&self) -> String {
        format!(
            "If you buy {} {} times, you can get one free!",
            self.target.name(),
            self.threshold
        )
    }
}

/// Buy more than `threshold` of an item and every unit in the line is discounted by `rate`.
#[derive(Debug, Clone)]
pub struct PercentageDiscountRule {
    target: Arc<Item>,
    threshold: u32,
    rate: Rate,
}

impl PercentageDiscountRule {
    pub fn new(target: Arc<Item>, threshold: u32, rate: Rate) -> Self {
        Self {
            target,
            threshold,
            rate,
        }
    }

    pub fn target(&self) -> &Item {
        &self.target
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn rate(&self) -> Rate {
        self.rate
    }

    pub fn apply(&self, item: &Item, quantity: u32) -> DiscountResult {
        // Strictly greater, unlike the free item rule.
        if item.code() == self.target.code() && quantity > self.threshold {
            DiscountResult::PerUnitRates(vec![self.rate; quantity as usize])
        } else {
            DiscountResult::None
        }
    }

    pub fn description(&self) -> String {
        format!(
            "If you buy {} {} times, you can get a great discount!",
            self.target.name(),
            self.threshold
        )
    }
}

/// The closed set of promotions a checkout understands.
#[derive(Debug, Clone)]
pub enum PricingRule {
    FreeItem(FreeItemRule),
    PercentageDiscount(PercentageDiscountRule),
    Set(RuleSet),
}

impl PricingRule {
    /// Evaluates the rule against one line. Leaf rules yield exactly one result,
    /// a set yields one per leaf in order.
    pub fn apply(&self, item: &Item, quantity: u32) -> Vec<DiscountResult> {
        match self {
            PricingRule::FreeItem(rule) => vec![rule.apply(item, quantity)],
            PricingRule::PercentageDiscount(rule) => vec![rule.apply(item, quantity)],
            PricingRule::Set(set) => set.apply(item, quantity),
        }
    }

    pub fn description(&self) -> String {
        match self {
            PricingRule::FreeItem(rule) => rule.description(),
            PricingRule::PercentageDiscount(rule) => rule.description(),
            PricingRule::Set(set) => set.description(),
        }
    }
}

impl From<FreeItemRule> for PricingRule {
    fn from(rule: FreeItemRule) -> Self {
        PricingRule::FreeItem(rule)
    }
}

impl From<PercentageDiscountRule> for PricingRule {
    fn from(rule: PercentageDiscountRule) -> Self {
        PricingRule::PercentageDiscount(rule)
    }
}

impl From<RuleSet> for PricingRule {
    fn from(set: RuleSet) -> Self {
        PricingRule::Set(set)
    }
}

/// An ordered composite of pricing rules evaluated together against a line.
///
/// Results are returned unmerged; stacking them into a deduction is the
/// checkout's job.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<PricingRule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules<I, R>(rules: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<PricingRule>,
    {
        Self {
            rules: rules.into_iter().map(Into::into).collect(),
        }
    }

    /// Appends a rule, builder style.
    pub fn add(mut self, rule: impl Into<PricingRule>) -> Self {
        self.push(rule);
        self
    }

    pub fn push(&mut self, rule: impl Into<PricingRule>) {
        self.rules.push(rule.into());
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PricingRule> {
        self.rules.iter()
    }

    pub fn apply(&self, item: &Item, quantity: u32) -> Vec<DiscountResult> {
        self.rules
            .iter()
            .flat_map(|rule| rule.apply(item, quantity))
            .collect()
    }

    pub fn description(&self) -> String {
        self.rules
            .iter()
            .map(|rule| {
                let mut line = rule.description();
                line.truncate(line.trim_end_matches('\n').len());
                line.push('\n');
                line
            })
            .collect()
    }
}
