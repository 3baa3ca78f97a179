use crate::domain::money::{Currency, Money};

/// Display symbol and minor-unit exponent for a currency.
fn presentation(currency: Currency) -> (Option<&'static str>, u32) {
    match currency {
        Currency::GBP => (Some("£"), 2),
        Currency::EUR => (Some("€"), 2),
        Currency::USD => (Some("$"), 2),
        Currency::JPY => (Some("¥"), 0),
        _ => (None, 2),
    }
}

/// Renders an amount for people, e.g. 311 GBP as `£3.11`.
///
/// Currencies without a known symbol are prefixed with their code (`CHF 3.11`).
pub fn format_money(money: &Money) -> String {
    let (symbol, exponent) = presentation(money.currency());
    let sign = if money.is_negative() { "-" } else { "" };
    let prefix = match symbol {
        Some(symbol) => symbol.to_string(),
        None => format!("{} ", money.currency()),
    };

    let minor = money.amount_minor().unsigned_abs();
    if exponent == 0 {
        return format!("{sign}{prefix}{minor}");
    }
    let scale = 10u64.pow(exponent);
    format!(
        "{sign}{prefix}{}.{:0width$}",
        minor / scale,
        minor % scale,
        width = exponent as usize
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_known_currencies() {
        assert_eq!(format_money(&Money::new(311, Currency::GBP)), "£3.11");
        assert_eq!(format_money(&Money::new(2245, Currency::GBP)), "£22.45");
        assert_eq!(format_money(&Money::new(5, Currency::EUR)), "€0.05");
        assert_eq!(format_money(&Money::new(1000, Currency::USD)), "$10.00");
        assert_eq!(format_money(&Money::new(500, Currency::JPY)), "¥500");
    }

    #[test]
    fn test_format_negative_and_unknown() {
        assert_eq!(format_money(&Money::new(-90, Currency::GBP)), "-£0.90");
        let francs = Money::new(311, "CHF".parse().unwrap());
        assert_eq!(format_money(&francs), "CHF 3.11");
    }
}
