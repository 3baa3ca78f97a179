use super::money::Money;
use crate::error::{CheckoutError, Result};
use serde::Serialize;

/// An immutable catalog entry.
///
/// Items are built once at setup and shared between pricing rules and
/// checkout lines; nothing mutates them afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    code: String,
    name: String,
    unit_price: Money,
}

impl Item {
    pub fn new(code: impl Into<String>, name: impl Into<String>, unit_price: Money) -> Result<Self> {
        let code = code.into();
        let name = name.into();

        if code.trim().is_empty() {
            return Err(CheckoutError::InvalidItem("code must not be empty".to_string()));
        }
        if name.trim().is_empty() {
            return Err(CheckoutError::InvalidItem(format!(
                "name of {code} must not be empty"
            )));
        }
        if unit_price.is_negative() {
            return Err(CheckoutError::InvalidItem(format!(
                "unit price of {code} must not be negative"
            )));
        }

        Ok(Self {
            code,
            name,
            unit_price,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }
}
