//! Vesting balances and their release policies.
//!
//! A vesting balance holds funds on behalf of an owner and releases them
//! according to a policy. Market fee rewards are credited into balances of
//! the `MarketFeeSharing` category with an instant policy.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter};

use crate::{
    asset::AssetAmount,
    ids::{AccountId, VestingBalanceId},
    time::{DurationSeconds, TimestampSeconds},
};

/// Category of a vesting balance
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum VestingBalanceType {
    #[default]
    Unspecified,
    Cashback,
    Witness,
    MarketFeeSharing,
}

impl VestingBalanceType {
    /// Categories allowing a single balance per (owner, asset)
    pub fn is_unique_per_asset(&self) -> bool {
        matches!(self, VestingBalanceType::MarketFeeSharing)
    }
}

/// Release policy requested when creating a balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum VestingPolicyInitializer {
    Linear {
        begin_timestamp: TimestampSeconds,
        vesting_cliff_seconds: DurationSeconds,
        vesting_duration_seconds: DurationSeconds,
    },
    Instant,
}

impl VestingPolicyInitializer {
    /// Build the policy for a balance created with `amount`
    pub fn init(&self, amount: u64) -> VestingPolicy {
        match *self {
            VestingPolicyInitializer::Linear {
                begin_timestamp,
                vesting_cliff_seconds,
                vesting_duration_seconds,
            } => VestingPolicy::Linear(LinearVestingPolicy {
                begin_timestamp,
                vesting_cliff_seconds,
                vesting_duration_seconds,
                begin_balance: amount,
            }),
            VestingPolicyInitializer::Instant => VestingPolicy::Instant,
        }
    }
}

/// Linear release over `vesting_duration_seconds` after an optional cliff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearVestingPolicy {
    pub begin_timestamp: TimestampSeconds,
    pub vesting_cliff_seconds: DurationSeconds,
    pub vesting_duration_seconds: DurationSeconds,
    /// Balance the schedule is computed against
    pub begin_balance: u64,
}

impl LinearVestingPolicy {
    /// Amount of `begin_balance` released at `now`
    pub fn vested_amount(&self, now: TimestampSeconds) -> u64 {
        let elapsed = now.saturating_sub(self.begin_timestamp);
        if elapsed < self.vesting_cliff_seconds {
            return 0;
        }
        if elapsed >= self.vesting_duration_seconds {
            return self.begin_balance;
        }
        // elapsed < duration so the quotient is below begin_balance
        ((self.begin_balance as u128) * (elapsed as u128)
            / (self.vesting_duration_seconds as u128)) as u64
    }

    /// Deposits leave `begin_balance` untouched, so they show up as a
    /// negative withdrawn amount and are released one for one
    fn allowed_withdraw(&self, balance: u64, now: TimestampSeconds) -> u64 {
        let withdrawn = self.begin_balance as i128 - balance as i128;
        let allowed = self.vested_amount(now) as i128 - withdrawn;
        allowed.clamp(0, balance as i128) as u64
    }
}

/// Release policy of an existing balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum VestingPolicy {
    Linear(LinearVestingPolicy),
    /// Everything is withdrawable at any time
    Instant,
}

impl VestingPolicy {
    pub fn allowed_withdraw(&self, balance: u64, now: TimestampSeconds) -> u64 {
        match self {
            VestingPolicy::Linear(policy) => policy.allowed_withdraw(balance, now),
            VestingPolicy::Instant => balance,
        }
    }
}

/// A vesting balance object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingBalance {
    pub id: VestingBalanceId,
    pub owner: AccountId,
    pub balance_type: VestingBalanceType,
    pub policy: VestingPolicy,
    pub balance: AssetAmount,
}

impl VestingBalance {
    pub fn new(
        id: VestingBalanceId,
        owner: AccountId,
        balance_type: VestingBalanceType,
        policy: VestingPolicy,
        balance: AssetAmount,
    ) -> Self {
        Self {
            id,
            owner,
            balance_type,
            policy,
            balance,
        }
    }

    pub fn allowed_withdraw(&self, now: TimestampSeconds) -> u64 {
        self.policy.allowed_withdraw(self.balance.amount, now)
    }

    /// Add funds, returns None on overflow without touching the balance
    pub fn deposit(&mut self, amount: u64) -> Option<u64> {
        let balance = self.balance.amount.checked_add(amount)?;
        self.balance.amount = balance;
        Some(balance)
    }

    /// Remove funds, returns None if `amount` exceeds what is allowed at `now`
    pub fn withdraw(&mut self, amount: u64, now: TimestampSeconds) -> Option<u64> {
        if amount > self.allowed_withdraw(now) {
            return None;
        }
        self.balance.amount -= amount;
        Some(self.balance.amount)
    }
}
