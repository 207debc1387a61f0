use thiserror::Error;

/// Errors raised while validating asset options
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AssetOptionsError {
    #[error("Market fee percent {0} exceeds 10000 (100%)")]
    InvalidMarketFeePercent(u16),

    #[error("Reward percent {0} must be strictly less than 10000 (100%)")]
    RewardPercentTooHigh(u16),

    #[error("Market fee sharing options are not active yet")]
    MarketFeeSharingNotActive,
}
