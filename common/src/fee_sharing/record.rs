// Market fee sharing result structures

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::{
    asset::RewardEligibility,
    ids::{AccountId, AssetId},
};

/// Referrer and registrar shares of a reward
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RewardSplit {
    pub referrer: u64,
    pub registrar: u64,
}

impl RewardSplit {
    pub fn total(&self) -> u64 {
        self.referrer + self.registrar
    }
}

/// Role of a reward recipient relative to the trading account
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RewardRole {
    Registrar,
    Referrer,
}

/// Reward distribution entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RewardDistribution {
    /// Recipient account
    pub recipient: AccountId,

    /// Amount credited
    pub amount: u64,

    pub role: RewardRole,
}

/// Result of routing one market fee
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DistributionResult {
    pub asset: AssetId,

    /// Raw market fee collected by the fill
    pub market_fee: u64,

    /// Reward computed from the fee before eligibility
    pub reward: u64,

    /// Credits actually made
    pub distributions: Vec<RewardDistribution>,

    /// Total amount credited to reward balances
    pub total_distributed: u64,

    /// Amount kept in the asset's accumulated fees
    pub retained: u64,
}

impl DistributionResult {
    /// Create a new distribution result
    pub fn new(
        asset: AssetId,
        market_fee: u64,
        reward: u64,
        distributions: Vec<RewardDistribution>,
    ) -> Self {
        let total_distributed: u64 = distributions.iter().map(|d| d.amount).sum();
        Self {
            asset,
            market_fee,
            reward,
            distributions,
            total_distributed,
            retained: market_fee - total_distributed,
        }
    }

    /// No reward routed, the whole fee is retained
    pub fn retained_only(asset: AssetId, market_fee: u64) -> Self {
        Self::new(asset, market_fee, 0, Vec::new())
    }

    /// Amount credited to a recipient across roles
    pub fn credited_to(&self, account: AccountId) -> u64 {
        self.distributions
            .iter()
            .filter(|d| d.recipient == account)
            .map(|d| d.amount)
            .sum()
    }
}

/// Eligibility of both sponsors of a trading account for one asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SponsorEligibility {
    pub registrar: RewardEligibility,
    pub referrer: RewardEligibility,
}

impl SponsorEligibility {
    pub const ELIGIBLE: Self = Self {
        registrar: RewardEligibility::Eligible,
        referrer: RewardEligibility::Eligible,
    };

    /// Zero the share of every ineligible sponsor
    /// A zeroed share is not handed to the other sponsor
    pub fn apply(&self, split: RewardSplit) -> RewardSplit {
        RewardSplit {
            referrer: if self.referrer.is_eligible() {
                split.referrer
            } else {
                0
            },
            registrar: if self.registrar.is_eligible() {
                split.registrar
            } else {
                0
            },
        }
    }
}
