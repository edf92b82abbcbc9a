pub mod address;
pub mod balance;
pub mod classifier;
pub mod error;
pub mod format;
pub mod note;
pub mod snapshot;
pub mod types;

pub use address::Address;
pub use balance::{Balance, BalanceNormalizer};
pub use classifier::{ClassifiedTransaction, Direction, Icon, TransactionClassifier, TransactionKind};
pub use error::{Result, WalletError};
pub use format::{format_amount, format_timestamp, format_timestamp_in, truncate_address, NumberFormat};
pub use note::{GasFeeNote, NotePayload, TokenTransferNote};
pub use snapshot::{SnapshotBuilder, WalletView};
pub use types::{RawTransaction, RawWalletPayload};
