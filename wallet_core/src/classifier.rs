use crate::note::{NotePayload, TokenTransferNote};
use crate::types::{scalar_text, RawTransaction};
use serde::{Serialize, Serializer};
use std::fmt;
use tracing::debug;

/// Which way a token transfer moved relative to the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Incoming,
    Outgoing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransactionKind {
    TokenTransfer { direction: Direction },
    GasFee,
    Generic,
}

/// Display glyph attached to a classified transaction.
///
/// Outgoing transfers show the down arrow and incoming ones the up arrow.
/// Existing wallet screens use this polarity, so it is kept as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    ArrowDown,
    ArrowUp,
    Fuel,
    Bell,
}

impl Icon {
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::ArrowDown => "🔽",
            Icon::ArrowUp => "🔼",
            Icon::Fuel => "⛽",
            Icon::Bell => "🔔",
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

impl Serialize for Icon {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.glyph())
    }
}

impl From<Direction> for Icon {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Outgoing => Icon::ArrowDown,
            Direction::Incoming => Icon::ArrowUp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedTransaction {
    pub icon: Icon,
    pub title: String,
    pub sender: Option<String>,
    pub recipient: Option<String>,
    /// Seconds since the Unix epoch
    pub timestamp: i64,
    pub kind: TransactionKind,
}

/// Classifies raw transactions from the point of view of one wallet
#[derive(Debug, Clone)]
pub struct TransactionClassifier {
    viewer: String,
}

impl TransactionClassifier {
    pub fn new(viewer: impl Into<String>) -> Self {
        Self {
            viewer: viewer.into(),
        }
    }

    pub fn classify(&self, tx: &RawTransaction) -> ClassifiedTransaction {
        let (kind, icon, title) = match NotePayload::decode(tx.note.as_ref()) {
            NotePayload::TokenTransfer(transfer) => {
                let direction = self.direction_of(&transfer);
                (
                    TransactionKind::TokenTransfer { direction },
                    Icon::from(direction),
                    format!("{} {} — {}", transfer.token_symbol, transfer.amount, transfer.note),
                )
            }
            NotePayload::GasFee(gas) => (TransactionKind::GasFee, Icon::Fuel, format!("Gas {}", gas.fee)),
            NotePayload::Unrecognized => {
                let amount = tx
                    .amount
                    .as_ref()
                    .map(scalar_text)
                    .unwrap_or_else(|| "0".to_string());
                (TransactionKind::Generic, Icon::Bell, format!("Amt {}", amount))
            }
        };

        debug!("Classified transaction as {:?}: {}", kind, title);

        ClassifiedTransaction {
            icon,
            title,
            sender: tx.sender.clone(),
            recipient: tx.recipient.clone(),
            timestamp: tx.timestamp,
            kind,
        }
    }

    fn direction_of(&self, transfer: &TokenTransferNote) -> Direction {
        if transfer.sender.as_deref() == Some(self.viewer.as_str()) {
            Direction::Outgoing
        } else {
            Direction::Incoming
        }
    }
}
