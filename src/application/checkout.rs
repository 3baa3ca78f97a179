use crate::domain::item::Item;
use crate::domain::money::{Currency, Money};
use crate::domain::pricing::{DiscountResult, RuleSet};
use crate::error::{CheckoutError, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// The aggregated record of one distinct item code within a checkout.
#[derive(Debug, Clone)]
pub struct CheckoutLine {
    item: Arc<Item>,
    quantity: u32,
    discounts: Vec<Money>,
}

impl CheckoutLine {
    fn new(item: Arc<Item>) -> Self {
        Self {
            item,
            quantity: 1,
            discounts: Vec::new(),
        }
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Deductions computed by the most recent `total`/`receipt` call.
    pub fn discounts(&self) -> &[Money] {
        &self.discounts
    }
}

/// Per-line figures of a priced basket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiptLine {
    pub code: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub gross: Money,
    pub discount: Money,
    pub net: Money,
}

/// A priced basket: the lines in first-scan order plus the basket totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Receipt {
    pub lines: Vec<ReceiptLine>,
    pub gross: Money,
    pub discount: Money,
    pub total: Money,
}

/// A single checkout session.
///
/// Owns its lines; the rule set and the items are shared with other sessions.
/// Discounts stack additively with no cap, so a line whose rules add up to
/// more than its gross price yields a negative net.
#[derive(Debug, Clone)]
pub struct Checkout {
    rules: Option<Arc<RuleSet>>,
    lines: Vec<CheckoutLine>,
    index: HashMap<String, usize>,
    default_currency: Currency,
}

impl Checkout {
    /// Creates an empty checkout. `None` means no discounts apply.
    pub fn new(rules: Option<Arc<RuleSet>>) -> Self {
        Self {
            rules,
            lines: Vec::new(),
            index: HashMap::new(),
            default_currency: Currency::GBP,
        }
    }

    pub fn with_rules(rules: Arc<RuleSet>) -> Self {
        Self::new(Some(rules))
    }

    pub fn without_rules() -> Self {
        Self::new(None)
    }

    /// Currency of the total reported for an empty basket.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.default_currency = currency;
        self
    }

    pub fn rules(&self) -> Option<&RuleSet> {
        self.rules.as_deref()
    }

    pub fn scan(&mut self, item: &Arc<Item>) {
        match self.index.get(item.code()) {
            Some(&position) => self.lines[position].quantity += 1,
            None => {
                self.index.insert(item.code().to_string(), self.lines.len());
                self.lines.push(CheckoutLine::new(Arc::clone(item)));
            }
        }
    }

    /// Lines in the order their codes were first scanned.
    pub fn lines(&self) -> &[CheckoutLine] {
        &self.lines
    }

    pub fn line(&self, code: &str) -> Option<&CheckoutLine> {
        self.index.get(code).map(|&position| &self.lines[position])
    }

    /// Number of units scanned across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total(&mut self) -> Result<Money> {
        Ok(self.receipt()?.total)
    }

    /// Prices every line against the rule set and rebuilds the per-line discounts.
    ///
    /// The operating currency is that of the first line; any other currency
    /// fails with [`CheckoutError::CurrencyMismatch`] and leaves the previous
    /// discount state untouched.
    pub fn receipt(&mut self) -> Result<Receipt> {
        let currency = self
            .lines
            .first()
            .map_or(self.default_currency, |line| line.item.unit_price().currency());

        let mut gross = Money::zero(currency);
        let mut discount = Money::zero(currency);
        let mut receipt_lines = Vec::with_capacity(self.lines.len());
        let mut line_discounts = Vec::with_capacity(self.lines.len());

        for line in &self.lines {
            let unit_price = line.item.unit_price();
            if unit_price.currency() != currency {
                return Err(CheckoutError::CurrencyMismatch {
                    expected: currency,
                    found: unit_price.currency(),
                });
            }

            let line_gross = unit_price.times(line.quantity)?;
            let results = match &self.rules {
                Some(rules) => rules.apply(&line.item, line.quantity),
                None => Vec::new(),
            };
            let amounts = deductions(unit_price, &results)?;
            let line_discount = amounts
                .iter()
                .try_fold(Money::zero(currency), |sum, amount| sum.checked_add(*amount))?;
            let line_net = line_gross.checked_sub(line_discount)?;

            debug!(
                code = line.item.code(),
                quantity = line.quantity,
                gross = line_gross.amount_minor(),
                discount = line_discount.amount_minor(),
                "priced checkout line"
            );
            if line_net.is_negative() {
                warn!(
                    code = line.item.code(),
                    net = line_net.amount_minor(),
                    "stacked discounts exceed line price"
                );
            }

            gross = gross.checked_add(line_gross)?;
            discount = discount.checked_add(line_discount)?;
            line_discounts.push(amounts);
            receipt_lines.push(ReceiptLine {
                code: line.item.code().to_string(),
                name: line.item.name().to_string(),
                quantity: line.quantity,
                unit_price,
                gross: line_gross,
                discount: line_discount,
                net: line_net,
            });
        }

        for (line, amounts) in self.lines.iter_mut().zip(line_discounts) {
            line.discounts = amounts;
        }

        let total = gross.checked_sub(discount)?;
        debug!(
            lines = receipt_lines.len(),
            gross = gross.amount_minor(),
            discount = discount.amount_minor(),
            total = total.amount_minor(),
            currency = %currency,
            "computed checkout total"
        );

        Ok(Receipt {
            lines: receipt_lines,
            gross,
            discount,
            total,
        })
    }
}

/// Turns rule results into concrete deductions against one unit price.
fn deductions(unit_price: Money, results: &[DiscountResult]) -> Result<Vec<Money>> {
    let mut amounts = Vec::new();
    for result in results {
        match result {
            DiscountResult::None => {}
            DiscountResult::FreeUnits(count) => {
                amounts.extend(std::iter::repeat_n(unit_price, *count as usize));
            }
            DiscountResult::PerUnitRates(rates) => {
                for rate in rates {
                    amounts.push(unit_price.scale(*rate)?);
                }
            }
        }
    }
    Ok(amounts)
}
