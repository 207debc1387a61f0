use thiserror::Error;
use tessel_common::{
    ids::{AccountId, AssetId},
    time::TimestampSeconds,
    transaction::OperationError,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockchainError {
    #[error("Block timestamp {got} is not after the current chain time {current}")]
    TimestampNotIncreasing {
        current: TimestampSeconds,
        got: TimestampSeconds,
    },
    #[error("Account name {0} is already registered")]
    AccountNameTaken(String),
    #[error("Asset symbol {0} is already registered")]
    AssetSymbolTaken(String),
    #[error("Account {0} not found")]
    AccountNotFound(AccountId),
    #[error("Asset {0} not found")]
    AssetNotFound(AssetId),
    #[error("Balance overflow")]
    BalanceOverflow,
    #[error(transparent)]
    Operation(#[from] OperationError),
}
