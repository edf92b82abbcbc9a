use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use tracing::warn;

/// Wallet response as returned by `GET <api_base>/<address>`.
///
/// Both fields are kept as raw JSON: the API is not schema-guaranteed, so
/// shape checks happen in the normalizer and classifier rather than at
/// deserialization time. Unknown fields (such as the lockup list) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawWalletPayload {
    #[serde(default)]
    pub balance: Option<Value>,
    #[serde(default)]
    pub last_10_transactions: Option<Value>,
}

impl RawWalletPayload {
    /// Decode a response body. Only invalid JSON is an error; any JSON shape
    /// that is not an object degrades to an empty payload.
    pub fn from_json_str(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body)?;
        Ok(Self::from_value(value))
    }

    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(mut fields) => Self {
                balance: fields.remove("balance").filter(|v| !v.is_null()),
                last_10_transactions: fields
                    .remove("last_10_transactions")
                    .filter(|v| !v.is_null()),
            },
            other => {
                warn!("Wallet payload is not a JSON object ({}), using empty payload", json_kind(&other));
                Self::default()
            }
        }
    }

    /// Raw transactions in API order. A non-array value yields no transactions.
    pub fn transactions(&self) -> Vec<RawTransaction> {
        match &self.last_10_transactions {
            None => Vec::new(),
            Some(Value::Array(items)) => items.iter().map(RawTransaction::from_value).collect(),
            Some(other) => {
                warn!("last_10_transactions is a {}, expected array", json_kind(other));
                Vec::new()
            }
        }
    }
}

/// One transaction record with every field optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTransaction {
    pub sender: Option<String>,
    pub recipient: Option<String>,
    pub amount: Option<Value>,
    /// Whole seconds since the Unix epoch; 0 when absent
    pub timestamp: i64,
    pub note: Option<Value>,
}

impl RawTransaction {
    pub fn from_value(value: &Value) -> Self {
        let Some(fields) = value.as_object() else {
            warn!("Transaction record is a {}, treating all fields as absent", json_kind(value));
            return Self::default();
        };

        Self {
            sender: fields.get("sender").and_then(Value::as_str).map(str::to_owned),
            recipient: fields.get("recipient").and_then(Value::as_str).map(str::to_owned),
            amount: fields.get("amount").filter(|v| !v.is_null()).cloned(),
            timestamp: fields.get("timestamp").map(epoch_seconds).unwrap_or(0),
            note: fields.get("note").filter(|v| !v.is_null()).cloned(),
        }
    }
}

/// The chain writes float timestamps; they are floored to whole seconds.
fn epoch_seconds(value: &Value) -> i64 {
    if let Some(secs) = value.as_i64() {
        return secs;
    }
    let float = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match float {
        Some(f) if f.is_finite() && f >= i64::MIN as f64 && f <= i64::MAX as f64 => f.floor() as i64,
        _ => 0,
    }
}

/// Text form of a JSON scalar as it appears in titles.
pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Number(n) => number_text(n),
        other => other.to_string(),
    }
}

/// Number text in the style wallet screens print it: integral floats have no
/// fraction (`5.0` is `5`), and exponents appear only below `1e-6` or from
/// `1e21` up, written as `1e-7` / `1e+21`.
pub(crate) fn number_text(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    let Some(f) = n.as_f64() else {
        return n.to_string();
    };

    if f == 0.0 {
        return "0".to_string();
    }
    let magnitude = f.abs();
    if magnitude < 1e21 && magnitude >= 1e-6 {
        // f64 Display is the shortest round-trip form without an exponent
        return f.to_string();
    }

    let text = format!("{:e}", f);
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => text,
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
