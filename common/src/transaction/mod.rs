use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter};

use crate::hard_fork::Feature;

pub mod verify;

mod error;
mod fee;
mod payload;

pub use error::*;
pub use fee::*;
pub use payload::*;


/// Operations accepted by the ledger
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    HtlcCreate(HtlcCreatePayload),
    HtlcExtend(HtlcExtendPayload),
    HtlcRedeem(HtlcRedeemPayload),
    AssetUpdate(AssetUpdatePayload),
    AccountWhitelist(AccountWhitelistPayload),
    VestingBalanceCreate(VestingBalanceCreatePayload),
    VestingBalanceWithdraw(VestingBalanceWithdrawPayload),
}

/// Kind of an operation history entry
///
/// Virtual kinds are produced by the ledger itself, never submitted.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OperationKind {
    HtlcCreate,
    HtlcExtend,
    HtlcRedeem,
    AssetUpdate,
    AccountWhitelist,
    VestingBalanceCreate,
    VestingBalanceWithdraw,
    // Virtual
    HtlcRedeemed,
    HtlcRefund,
    FillOrder,
}

impl OperationKind {
    pub fn is_virtual(&self) -> bool {
        matches!(
            self,
            OperationKind::HtlcRedeemed | OperationKind::HtlcRefund | OperationKind::FillOrder
        )
    }
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::HtlcCreate(_) => OperationKind::HtlcCreate,
            Operation::HtlcExtend(_) => OperationKind::HtlcExtend,
            Operation::HtlcRedeem(_) => OperationKind::HtlcRedeem,
            Operation::AssetUpdate(_) => OperationKind::AssetUpdate,
            Operation::AccountWhitelist(_) => OperationKind::AccountWhitelist,
            Operation::VestingBalanceCreate(_) => OperationKind::VestingBalanceCreate,
            Operation::VestingBalanceWithdraw(_) => OperationKind::VestingBalanceWithdraw,
        }
    }

    /// Declared fee, paid in the core asset
    pub fn fee(&self) -> u64 {
        match self {
            Operation::HtlcCreate(p) => p.fee,
            Operation::HtlcExtend(p) => p.fee,
            Operation::HtlcRedeem(p) => p.fee,
            Operation::AssetUpdate(p) => p.fee,
            Operation::AccountWhitelist(p) => p.fee,
            Operation::VestingBalanceCreate(p) => p.fee,
            Operation::VestingBalanceWithdraw(p) => p.fee,
        }
    }

    pub fn set_fee(&mut self, fee: u64) {
        match self {
            Operation::HtlcCreate(p) => p.fee = fee,
            Operation::HtlcExtend(p) => p.fee = fee,
            Operation::HtlcRedeem(p) => p.fee = fee,
            Operation::AssetUpdate(p) => p.fee = fee,
            Operation::AccountWhitelist(p) => p.fee = fee,
            Operation::VestingBalanceCreate(p) => p.fee = fee,
            Operation::VestingBalanceWithdraw(p) => p.fee = fee,
        }
    }

    /// Feature that must be active before the operation is considered at all.
    ///
    /// Asset updates are gated on their content instead.
    pub fn required_feature(&self) -> Option<Feature> {
        match self {
            Operation::HtlcCreate(_) | Operation::HtlcRedeem(_) => Some(Feature::Htlc),
            Operation::HtlcExtend(_) => Some(Feature::HtlcExtension),
            Operation::AssetUpdate(_)
            | Operation::AccountWhitelist(_)
            | Operation::VestingBalanceCreate(_)
            | Operation::VestingBalanceWithdraw(_) => None,
        }
    }
}
