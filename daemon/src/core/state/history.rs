use serde::{Deserialize, Serialize};
use tessel_common::transaction::OperationKind;

/// One entry of an account's operation history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Height of the block the operation was applied in
    pub block_height: u64,
    pub kind: OperationKind,
    /// Produced by the ledger itself rather than submitted
    pub is_virtual: bool,
}

impl HistoryEntry {
    pub fn new(block_height: u64, kind: OperationKind) -> Self {
        Self {
            block_height,
            kind,
            is_virtual: kind.is_virtual(),
        }
    }
}
