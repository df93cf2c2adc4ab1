//! Fixed-point money
//!
//! Balances and withdrawal amounts are [`Money`]: a `rust_decimal::Decimal`
//! with at most two fractional digits, always carried at scale 2 so that
//! `30` and `30.00` compare, store and render identically.
//!
//! JSON numbers reach [`parse_decimal`] with their original digits because
//! `serde_json` is built with `arbitrary_precision`.

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Fractional digits carried by [`Money`]
pub const MONEY_SCALE: u32 = 2;

/// Integer digits that fit a `NUMERIC(18,2)` column
pub const MONEY_INTEGER_DIGITS: u32 = 16;

/// 金額の解析・検証エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    #[error("Value must be a number")]
    NotNumeric,

    #[error("Value must have at most {max} decimal places")]
    TooPrecise { max: u32 },

    #[error("Value must be greater than zero")]
    NotPositive,

    #[error("Value must not be negative")]
    Negative,

    #[error("Value must have at most {max} integer digits")]
    TooLarge { max: u32 },
}

/// Parse a JSON number or numeric string into a [`Decimal`] without going
/// through `f64`.
///
/// ```
/// use kernel::money::parse_decimal;
/// use serde_json::json;
///
/// assert_eq!(parse_decimal(&json!(30.5)).unwrap().to_string(), "30.5");
/// assert_eq!(parse_decimal(&json!("12.34")).unwrap().to_string(), "12.34");
/// assert!(parse_decimal(&json!("NaN")).is_err());
/// assert!(parse_decimal(&json!(null)).is_err());
/// ```
pub fn parse_decimal(value: &Value) -> Result<Decimal, MoneyError> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return Err(MoneyError::NotNumeric),
    };

    if text.is_empty() {
        return Err(MoneyError::NotNumeric);
    }

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| MoneyError::NotNumeric)
}

/// Check a decimal against a maximum number of fractional digits,
/// ignoring trailing zeros.
pub fn ensure_scale(value: Decimal, max: u32) -> Result<Decimal, MoneyError> {
    let normalized = value.normalize();
    if normalized.scale() > max {
        return Err(MoneyError::TooPrecise { max });
    }
    Ok(normalized)
}

/// Reject magnitudes of `10^max` or more
pub fn ensure_integer_digits(value: Decimal, max: u32) -> Result<Decimal, MoneyError> {
    let limit = 10_i64
        .checked_pow(max)
        .map(Decimal::from)
        .unwrap_or(Decimal::MAX);
    if value.abs() >= limit {
        return Err(MoneyError::TooLarge { max });
    }
    Ok(value)
}

/// Monetary amount at scale 2
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::from_parts(0, 0, 0, false, MONEY_SCALE));

    /// Validate precision and range, then rescale to two fractional digits
    pub fn new(value: Decimal) -> Result<Self, MoneyError> {
        let mut value = ensure_scale(value, MONEY_SCALE)?;
        ensure_integer_digits(value, MONEY_INTEGER_DIGITS)?;
        value.rescale(MONEY_SCALE);
        Ok(Self(value))
    }

    /// Parse request input (JSON number or numeric string)
    pub fn from_json(value: &Value) -> Result<Self, MoneyError> {
        Self::new(parse_decimal(value)?)
    }

    /// Wrap a value read back from a `NUMERIC(18,2)` column
    pub fn from_db(mut value: Decimal) -> Self {
        value.rescale(MONEY_SCALE);
        Self(value)
    }

    /// Require a strictly positive amount (withdrawals)
    pub fn positive(self) -> Result<Self, MoneyError> {
        if self.0 > Decimal::ZERO {
            Ok(self)
        } else {
            Err(MoneyError::NotPositive)
        }
    }

    /// Require a non-negative amount (balances)
    pub fn non_negative(self) -> Result<Self, MoneyError> {
        if self.0.is_sign_negative() && !self.0.is_zero() {
            Err(MoneyError::Negative)
        } else {
            Ok(self)
        }
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Subtract, yielding `None` when the result would be negative
    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        let result = self.0.checked_sub(rhs.0)?;
        if result < Decimal::ZERO {
            return None;
        }
        Some(Money::from_db(result))
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_money_is_rescaled() {
        let money = Money::new(dec!(30)).unwrap();
        assert_eq!(money.to_string(), "30.00");
        assert_eq!(money, Money::new(dec!(30.000)).unwrap());
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn test_money_rejects_sub_cent_precision() {
        assert_eq!(
            Money::new(dec!(0.001)),
            Err(MoneyError::TooPrecise { max: 2 })
        );
    }

    #[test]
    fn test_money_from_json() {
        assert_eq!(Money::from_json(&json!(30)).unwrap().amount(), dec!(30.00));
        assert_eq!(Money::from_json(&json!(0.1)).unwrap().amount(), dec!(0.10));
        assert_eq!(Money::from_json(&json!(" 12.5 ")).unwrap().amount(), dec!(12.50));
        assert_eq!(Money::from_json(&json!("abc")), Err(MoneyError::NotNumeric));
        assert_eq!(Money::from_json(&json!(true)), Err(MoneyError::NotNumeric));
        assert_eq!(Money::from_json(&json!("")), Err(MoneyError::NotNumeric));
    }

    #[test]
    fn test_money_from_json_keeps_every_digit() {
        let body: Value =
            serde_json::from_str(r#"{"amount": 1234567890123456.78, "tiny": 0.30000000000000001}"#)
                .unwrap();

        let money = Money::from_json(&body["amount"]).unwrap();
        assert_eq!(money.to_string(), "1234567890123456.78");
        assert_eq!(
            Money::from_json(&body["tiny"]),
            Err(MoneyError::TooPrecise { max: 2 })
        );
    }

    #[test]
    fn test_money_rejects_values_wider_than_column() {
        let body: Value = serde_json::from_str(r#"{"balance": 1e20}"#).unwrap();
        assert_eq!(
            Money::from_json(&body["balance"]),
            Err(MoneyError::TooLarge { max: 16 })
        );
        assert_eq!(
            Money::new(dec!(10000000000000000)),
            Err(MoneyError::TooLarge { max: 16 })
        );
        assert!(Money::new(dec!(9999999999999999.99)).is_ok());
        assert!(Money::new(dec!(-10000000000000000)).is_err());
    }

    #[test]
    fn test_money_sign_checks() {
        assert_eq!(Money::new(dec!(0)).unwrap().positive(), Err(MoneyError::NotPositive));
        assert_eq!(Money::new(dec!(-5)).unwrap().positive(), Err(MoneyError::NotPositive));
        assert!(Money::new(dec!(0.01)).unwrap().positive().is_ok());
        assert_eq!(Money::new(dec!(-1)).unwrap().non_negative(), Err(MoneyError::Negative));
        assert!(Money::ZERO.non_negative().is_ok());
    }

    #[test]
    fn test_checked_sub_is_exact() {
        let balance = Money::new(dec!(0.3)).unwrap();
        let amount = Money::new(dec!(0.1)).unwrap();
        let rest = balance.checked_sub(amount).unwrap();
        assert_eq!(rest.amount(), dec!(0.20));
        assert!(amount.checked_sub(balance).is_none());
    }

    #[test]
    fn test_money_serializes_as_string() {
        let money = Money::new(dec!(70)).unwrap();
        assert_eq!(serde_json::to_string(&money).unwrap(), r#""70.00""#);
    }
}
