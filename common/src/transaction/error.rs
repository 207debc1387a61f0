use strum::Display;
use thiserror::Error;

use crate::{
    asset::AssetOptionsError,
    crypto::PreimageError,
    hard_fork::Feature,
    ids::{AccountId, AssetId, HtlcId, VestingBalanceId},
    time::DurationSeconds,
};

/// Broad category of an operation rejection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed input or unknown object
    Validation,
    /// Caller lacks the right to act on the object
    Authorization,
    /// Input is well formed but the ledger is not in a state allowing it
    Precondition,
    /// Preimage does not match the committed hash
    CryptoMismatch,
    /// Not enough funds or capacity
    Resource,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OperationError {
    #[error("Feature {0} is not active yet")]
    FeatureNotActive(Feature),
    #[error("Invalid amount")]
    InvalidAmount,
    #[error("Invalid period")]
    InvalidPeriod,
    #[error("Invalid digest: {0}")]
    InvalidDigest(PreimageError),
    #[error("Insufficient fee: required {required}, provided {provided}")]
    InsufficientFee { required: u64, provided: u64 },
    #[error("Asset mismatch: expected {expected}, got {got}")]
    AssetMismatch { expected: AssetId, got: AssetId },
    #[error("Invalid percent {0}")]
    InvalidPercent(u16),
    #[error("Account {0} not found")]
    AccountNotFound(AccountId),
    #[error("Asset {0} not found")]
    AssetNotFound(AssetId),
    #[error("HTLC {0} not found")]
    HtlcNotFound(HtlcId),
    #[error("Vesting balance {0} not found")]
    VestingBalanceNotFound(VestingBalanceId),
    #[error("Unauthorized caller {0}")]
    Unauthorized(AccountId),
    #[error("Reward percent {0} must be below 100%")]
    RewardPercentTooHigh(u16),
    #[error("Extension too large: total lock of {requested}s exceeds {max}s")]
    ExtensionTooLarge {
        requested: DurationSeconds,
        max: DurationSeconds,
    },
    #[error("Claim period of {requested}s exceeds {max}s")]
    ClaimPeriodTooLong {
        requested: DurationSeconds,
        max: DurationSeconds,
    },
    #[error("Preimage size {requested} exceeds {max}")]
    PreimageTooLarge { requested: u64, max: u64 },
    #[error("HTLC {0} is not pending")]
    HtlcNotPending(HtlcId),
    #[error("Preimage mismatch: {0}")]
    PreimageMismatch(PreimageError),
    #[error("Insufficient funds: available {available}, required {required}")]
    InsufficientFunds { available: u64, required: u64 },
    #[error("Insufficient vested amount: available {available}, requested {requested}")]
    InsufficientVested { available: u64, requested: u64 },
    #[error("Account {owner} already has a market fee sharing balance for asset {asset}")]
    DuplicateCategory { owner: AccountId, asset: AssetId },
    #[error("Arithmetic overflow")]
    Overflow,
}

impl OperationError {
    pub fn kind(&self) -> ErrorKind {
        use OperationError::*;
        match self {
            InvalidAmount
            | InvalidPeriod
            | InvalidDigest(_)
            | InsufficientFee { .. }
            | AssetMismatch { .. }
            | InvalidPercent(_)
            | AccountNotFound(_)
            | AssetNotFound(_)
            | HtlcNotFound(_)
            | VestingBalanceNotFound(_) => ErrorKind::Validation,
            Unauthorized(_) => ErrorKind::Authorization,
            FeatureNotActive(_)
            | RewardPercentTooHigh(_)
            | ExtensionTooLarge { .. }
            | ClaimPeriodTooLong { .. }
            | PreimageTooLarge { .. }
            | HtlcNotPending(_) => ErrorKind::Precondition,
            PreimageMismatch(_) => ErrorKind::CryptoMismatch,
            InsufficientFunds { .. }
            | InsufficientVested { .. }
            | DuplicateCategory { .. }
            | Overflow => ErrorKind::Resource,
        }
    }
}

impl From<PreimageError> for OperationError {
    fn from(err: PreimageError) -> Self {
        match err {
            PreimageError::InvalidDigestLength { .. } => OperationError::InvalidDigest(err),
            PreimageError::LengthMismatch { .. } | PreimageError::DigestMismatch(_) => {
                OperationError::PreimageMismatch(err)
            }
        }
    }
}

impl From<AssetOptionsError> for OperationError {
    fn from(err: AssetOptionsError) -> Self {
        match err {
            AssetOptionsError::InvalidMarketFeePercent(percent) => {
                OperationError::InvalidPercent(percent)
            }
            AssetOptionsError::RewardPercentTooHigh(percent) => {
                OperationError::RewardPercentTooHigh(percent)
            }
            AssetOptionsError::MarketFeeSharingNotActive => {
                OperationError::FeatureNotActive(Feature::MarketFeeSharing)
            }
        }
    }
}
