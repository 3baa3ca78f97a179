use crate::domain::money::Currency;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("Invalid item: {0}")]
    InvalidItem(String),
    #[error("Invalid currency code: {0:?}")]
    InvalidCurrency(String),
    #[error("Invalid pricing rule: {0}")]
    InvalidRule(String),
    #[error("Currency mismatch: expected {expected}, found {found}")]
    CurrencyMismatch { expected: Currency, found: Currency },
    #[error("Amount overflow in {0}")]
    AmountOverflow(&'static str),
    /// Reserved for rule compositions that need explicit conflict resolution.
    #[error("Unknown rule interaction: {0}")]
    UnknownRuleInteraction(String),
    #[error("Unknown item code: {0}")]
    UnknownItem(String),
    #[error("Duplicate item code: {0}")]
    DuplicateItem(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CheckoutError>;
