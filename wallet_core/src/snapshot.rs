use crate::address::Address;
use crate::balance::{Balance, BalanceNormalizer};
use crate::classifier::{ClassifiedTransaction, TransactionClassifier};
use crate::error::Result;
use crate::types::RawWalletPayload;
use serde::Serialize;
use tracing::debug;

/// Display-ready snapshot of one wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletView {
    pub address: Address,
    pub balance: Balance,
    /// Same order as the API returned them, most recent first
    pub transactions: Vec<ClassifiedTransaction>,
}

/// Builds a [`WalletView`] from a raw API payload. Holds no state, so a
/// single value can be shared between threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotBuilder;

impl SnapshotBuilder {
    pub fn build(payload: &RawWalletPayload, viewer: &Address) -> WalletView {
        let balance = BalanceNormalizer::normalize(payload.balance.as_ref());
        let classifier = TransactionClassifier::new(viewer.as_str());

        let transactions: Vec<ClassifiedTransaction> = payload
            .transactions()
            .iter()
            .map(|tx| classifier.classify(tx))
            .collect();

        debug!(
            "Built wallet view for {}: {} transactions",
            viewer,
            transactions.len()
        );

        WalletView {
            address: viewer.clone(),
            balance,
            transactions,
        }
    }

    /// Decode a response body and build the view. Fails only when the body
    /// is not JSON.
    pub fn build_from_json(body: &str, viewer: &Address) -> Result<WalletView> {
        let payload = RawWalletPayload::from_json_str(body)?;
        Ok(Self::build(&payload, viewer))
    }
}
