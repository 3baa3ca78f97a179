use crate::error::{CheckoutError, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An ISO 4217 currency code, stored as three upper-case ASCII letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Currency([u8; 3]);

impl Currency {
    pub const GBP: Self = Self(*b"GBP");
    pub const EUR: Self = Self(*b"EUR");
    pub const USD: Self = Self(*b"USD");
    pub const JPY: Self = Self(*b"JPY");

    pub fn code(&self) -> &str {
        // Only ever built from ASCII upper-case letters.
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl FromStr for Currency {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = s.trim().as_bytes();
        match bytes {
            [a, b, c] if bytes.iter().all(u8::is_ascii_alphabetic) => Ok(Self([
                a.to_ascii_uppercase(),
                b.to_ascii_uppercase(),
                c.to_ascii_uppercase(),
            ])),
            _ => Err(CheckoutError::InvalidCurrency(s.to_string())),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Currency {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.code())
    }
}

/// A monetary amount in the smallest unit of its currency (pence, cents).
///
/// Arithmetic between two values is only defined when the currencies agree,
/// so the combinators here are fallible instead of implementing `Add`/`Sub`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Money {
    amount_minor: i64,
    currency: Currency,
}

impl Money {
    pub const fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    pub const fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    pub const fn amount_minor(&self) -> i64 {
        self.amount_minor
    }

    pub const fn currency(&self) -> Currency {
        self.currency
    }

    pub const fn is_negative(&self) -> bool {
        self.amount_minor < 0
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<()> {
        if self.currency == other.currency {
            Ok(())
        } else {
            Err(CheckoutError::CurrencyMismatch {
                expected: self.currency,
                found: other.currency,
            })
        }
    }

    pub fn checked_add(self, rhs: Money) -> Result<Money> {
        self.ensure_same_currency(&rhs)?;
        let amount = self
            .amount_minor
            .checked_add(rhs.amount_minor)
            .ok_or(CheckoutError::AmountOverflow("addition"))?;
        Ok(Self::new(amount, self.currency))
    }

    pub fn checked_sub(self, rhs: Money) -> Result<Money> {
        self.ensure_same_currency(&rhs)?;
        let amount = self
            .amount_minor
            .checked_sub(rhs.amount_minor)
            .ok_or(CheckoutError::AmountOverflow("subtraction"))?;
        Ok(Self::new(amount, self.currency))
    }

    /// Multiplies by a whole number of units.
    pub fn times(self, quantity: u32) -> Result<Money> {
        let amount = self
            .amount_minor
            .checked_mul(i64::from(quantity))
            .ok_or(CheckoutError::AmountOverflow("multiplication"))?;
        Ok(Self::new(amount, self.currency))
    }

    /// Multiplies by a fractional rate, rounding half-to-even to a whole minor unit.
    pub fn scale(self, rate: Rate) -> Result<Money> {
        let amount = Decimal::from(self.amount_minor)
            .checked_mul(rate.value())
            .map(|exact| exact.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven))
            .and_then(|rounded| rounded.to_i64())
            .ok_or(CheckoutError::AmountOverflow("scaling"))?;
        Ok(Self::new(amount, self.currency))
    }
}

/// The fraction of a unit price taken off by a discount, in `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Serialize)]
pub struct Rate(Decimal);

impl Rate {
    pub fn new(value: Decimal) -> Result<Self> {
        if value >= Decimal::ZERO && value < Decimal::ONE {
            Ok(Self(value))
        } else {
            Err(CheckoutError::InvalidRule(format!(
                "discount rate must be in [0, 1), got {value}"
            )))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Rate {
    type Error = CheckoutError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Rate> for Decimal {
    fn from(rate: Rate) -> Self {
        rate.0
    }
}
