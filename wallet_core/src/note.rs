use crate::types::scalar_text;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Token movement recorded in a note as `{"type": {"token_transfer": {...}}}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenTransferNote {
    pub sender: Option<String>,
    pub token_symbol: String,
    pub amount: String,
    pub note: String,
}

/// Node fee recorded in a note as `{"type": {"gas": {"fee": ...}}}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GasFeeNote {
    pub fee: String,
}

/// Closed set of note shapes the wallet view understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotePayload {
    TokenTransfer(TokenTransferNote),
    GasFee(GasFeeNote),
    /// Absent note, or a shape none of the variants above accept
    Unrecognized,
}

#[derive(Debug, Deserialize)]
struct RawTokenTransfer {
    #[serde(default)]
    sender: Option<Value>,
    #[serde(default)]
    token_symbol: Option<Value>,
    #[serde(default)]
    amount: Option<Value>,
    #[serde(default)]
    note: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawGas {
    #[serde(default)]
    fee: Option<Value>,
}

impl NotePayload {
    /// Decode a raw transaction note. Token transfers take precedence over
    /// gas fees; each kind is checked on its own so a malformed entry for one
    /// kind does not hide the other.
    pub fn decode(note: Option<&Value>) -> Self {
        let Some(kinds) = note.and_then(|n| n.get("type")).filter(|t| t.is_object()) else {
            return NotePayload::Unrecognized;
        };

        if let Some(transfer) = kinds.get("token_transfer").and_then(decode_token_transfer) {
            return NotePayload::TokenTransfer(transfer);
        }
        if let Some(gas) = kinds.get("gas").and_then(decode_gas) {
            return NotePayload::GasFee(gas);
        }

        debug!("Unrecognized note type: {}", kinds);
        NotePayload::Unrecognized
    }
}

fn decode_token_transfer(value: &Value) -> Option<TokenTransferNote> {
    let raw: RawTokenTransfer = serde_json::from_value(value.clone()).ok()?;
    let token_symbol = raw.token_symbol.filter(|v| !v.is_null())?;
    let amount = raw.amount.filter(|v| !v.is_null())?;

    Some(TokenTransferNote {
        sender: raw.sender.as_ref().and_then(Value::as_str).map(str::to_owned),
        token_symbol: scalar_text(&token_symbol),
        amount: scalar_text(&amount),
        note: raw.note.as_ref().map(scalar_text).unwrap_or_default(),
    })
}

fn decode_gas(value: &Value) -> Option<GasFeeNote> {
    let raw: RawGas = serde_json::from_value(value.clone()).ok()?;
    let fee = raw.fee.filter(|v| !v.is_null())?;
    Some(GasFeeNote {
        fee: scalar_text(&fee),
    })
}
