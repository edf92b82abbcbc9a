use crate::types::json_kind;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use tracing::{debug, warn};

/// Two-slot wallet balance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// Spendable funds
    #[serde(with = "rust_decimal::serde::str")]
    pub available: Decimal,
    /// Funds held in lockups
    #[serde(with = "rust_decimal::serde::str")]
    pub locked: Decimal,
}

impl Balance {
    pub fn new(available: Decimal, locked: Decimal) -> Self {
        Self { available, locked }
    }

    pub fn total(&self) -> Decimal {
        self.available + self.locked
    }
}

/// Turns the loosely-typed `balance` field into a [`Balance`].
///
/// The field is expected to be `[available, locked]`. Every slot that is
/// missing or not numeric becomes zero, so this never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct BalanceNormalizer;

impl BalanceNormalizer {
    pub fn normalize(raw: Option<&Value>) -> Balance {
        let slots = match raw {
            None | Some(Value::Null) => return Balance::default(),
            Some(Value::Array(slots)) => slots,
            Some(other) => {
                warn!("Balance is a {}, expected [available, locked]", json_kind(other));
                return Balance::default();
            }
        };

        let balance = Balance {
            available: slots.first().and_then(decimal_from_value).unwrap_or_default(),
            locked: slots.get(1).and_then(decimal_from_value).unwrap_or_default(),
        };
        debug!("Normalized balance: available={} locked={}", balance.available, balance.locked);
        balance
    }
}

/// JSON numbers and numeric strings map to a decimal; everything else is `None`.
///
/// Values beyond the decimal range saturate to `Decimal::MAX` / `Decimal::MIN`
/// and values too small to represent become zero, both with a warning.
pub(crate) fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(Decimal::from(i));
            }
            if let Some(u) = n.as_u64() {
                return Some(Decimal::from(u));
            }
            let text = n.to_string();
            decimal_from_text(&text).or_else(|| n.as_f64().and_then(saturating_decimal))
        }
        Value::String(s) => {
            let s = s.trim();
            decimal_from_text(s).or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .and_then(saturating_decimal)
            })
        }
        _ => None,
    }
}

fn decimal_from_text(text: &str) -> Option<Decimal> {
    // Out-of-range magnitudes go straight to the saturating path
    if let Ok(f) = text.parse::<f64>() {
        if !f.is_finite() || f.abs() > DECIMAL_MAX_F64 || (f != 0.0 && f.abs() < DECIMAL_MIN_POSITIVE_F64) {
            return None;
        }
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Largest magnitude safely inside `Decimal`'s range (~7.9e28)
const DECIMAL_MAX_F64: f64 = 7.9e28;
/// Smallest non-zero magnitude `Decimal` can hold (scale 28)
const DECIMAL_MIN_POSITIVE_F64: f64 = 1e-28;

fn saturating_decimal(f: f64) -> Option<Decimal> {
    if !f.is_finite() {
        return None;
    }
    if f.abs() > DECIMAL_MAX_F64 {
        warn!("Balance value {} exceeds the decimal range, saturating", f);
        return Some(if f > 0.0 { Decimal::MAX } else { Decimal::MIN });
    }
    if f != 0.0 && f.abs() < DECIMAL_MIN_POSITIVE_F64 {
        warn!("Balance value {} is below decimal precision, using 0", f);
        return Some(Decimal::ZERO);
    }
    Decimal::from_f64(f)
}
