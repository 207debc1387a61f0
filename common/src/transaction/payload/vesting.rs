use serde::{Deserialize, Serialize};

use crate::{
    asset::AssetAmount,
    ids::{AccountId, VestingBalanceId},
    vesting::{VestingBalanceType, VestingPolicyInitializer},
};

/// Create a vesting balance funded by `creator` for `owner`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct VestingBalanceCreatePayload {
    pub creator: AccountId,
    pub owner: AccountId,
    pub amount: AssetAmount,
    #[serde(default)]
    pub balance_type: VestingBalanceType,
    pub policy: VestingPolicyInitializer,
    pub fee: u64,
}

/// Withdraw released funds from a vesting balance to its owner.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct VestingBalanceWithdrawPayload {
    pub vesting_balance: VestingBalanceId,
    pub owner: AccountId,
    pub amount: AssetAmount,
    pub fee: u64,
}
