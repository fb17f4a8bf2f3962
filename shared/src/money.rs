//! Money parsing and display
//!
//! Prices travel as decimal strings so no floating-point drift creeps into
//! totals. Member-entered amounts may use either `,` or `.` as the decimal
//! separator, with the other as a thousands separator.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use thiserror::Error;

/// Error when an amount cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid amount: {0:?}")]
pub struct AmountParseError(pub String);

/// Parse a user-facing amount into a decimal
///
/// Accepted: `1234.50`, `1234,50`, `1.234,50`, `1,234.50`, `$ 1.234,50`.
/// The right-most separator is taken as the decimal point when it is
/// followed by one or two digits; otherwise separators are grouping.
pub fn parse_amount(text: &str) -> Result<Decimal, AmountParseError> {
    let err = || AmountParseError(text.to_string());

    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect();
    if cleaned.is_empty() || !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return Err(err());
    }

    let normalized = match cleaned.rfind([',', '.']) {
        Some(idx) if (1..=2).contains(&(cleaned.len() - idx - 1)) => {
            let (int_part, frac_part) = cleaned.split_at(idx);
            let int_part: String = int_part.chars().filter(|c| !matches!(c, ',' | '.')).collect();
            format!("{}.{}", int_part, &frac_part[1..])
        }
        _ => cleaned.chars().filter(|c| !matches!(c, ',' | '.')).collect(),
    };

    Decimal::from_str(&normalized).map_err(|_| err())
}

/// Render an amount with two decimals, `1234.50`
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Serde adapter for amount fields
///
/// Written as a decimal string. Read from a JSON number or from any string
/// [`parse_amount`] accepts, since older endpoints send formatted prices.
pub mod amount {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&amount.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawAmount {
            Text(String),
            Number(Decimal),
        }

        match RawAmount::deserialize(deserializer)? {
            RawAmount::Text(text) => super::parse_amount(&text).map_err(serde::de::Error::custom),
            RawAmount::Number(n) => Ok(n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::FromPrimitive;
    use serde::{Deserialize, Serialize};

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_plain_and_comma_decimal() {
        assert_eq!(parse_amount("1234.50").unwrap(), dec("1234.50"));
        assert_eq!(parse_amount("1234,5").unwrap(), dec("1234.5"));
        assert_eq!(parse_amount("15000").unwrap(), dec("15000"));
    }

    #[test]
    fn test_parse_grouped_amounts() {
        assert_eq!(parse_amount("1.234,50").unwrap(), dec("1234.50"));
        assert_eq!(parse_amount("1,234.50").unwrap(), dec("1234.50"));
        assert_eq!(parse_amount("$ 12.000").unwrap(), dec("12000"));
        assert_eq!(parse_amount("-1.500,25").unwrap(), dec("-1500.25"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_amount("").is_err());
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("$ ,").is_err());
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(dec("1234.5")), "1234.50");
        assert_eq!(format_amount(dec("0.125")), "0.13");
        assert_eq!(format_amount(Decimal::from_i64(7000).unwrap()), "7000.00");
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct Priced {
        #[serde(with = "amount")]
        price: Decimal,
    }

    #[test]
    fn test_amount_field_accepts_numbers_and_formatted_text() {
        let p: Priced = serde_json::from_str(r#"{"price":"$ 12.000"}"#).unwrap();
        assert_eq!(p.price, dec("12000"));
        let p: Priced = serde_json::from_str(r#"{"price":"1.234,50"}"#).unwrap();
        assert_eq!(p.price, dec("1234.50"));
        let p: Priced = serde_json::from_str(r#"{"price":7000}"#).unwrap();
        assert_eq!(p.price, dec("7000"));
        assert!(serde_json::from_str::<Priced>(r#"{"price":"free"}"#).is_err());

        let p = Priced { price: dec("15000.50") };
        assert_eq!(serde_json::to_value(&p).unwrap()["price"], "15000.50");
    }
}
