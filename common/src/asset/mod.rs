//! Asset Module
//!
//! Asset metadata and the reward configuration carried in an asset's
//! options: market fee percent, reward percent, the reward whitelist and
//! the blacklist authorities.

mod authorization;
mod error;

pub use authorization::*;
pub use error::*;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{
    config::HUNDRED_PERCENT,
    fee_sharing::calculate_percent,
    ids::{AccountId, AssetId},
};

/// An amount of a given asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetAmount {
    pub asset: AssetId,
    pub amount: u64,
}

impl AssetAmount {
    pub const fn new(asset: AssetId, amount: u64) -> Self {
        Self { asset, amount }
    }

    pub const fn is_zero(&self) -> bool {
        self.amount == 0
    }
}

/// Options an issuer can set on an asset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetOptions {
    /// Percent of each fill charged as market fee (10000 = 100%)
    pub market_fee_percent: u16,
    /// Upper bound of the market fee of a single fill
    pub max_market_fee: u64,
    /// Whether fills receiving this asset pay a market fee
    pub charge_market_fee: bool,
    /// Percent of the market fee routed to registrar and referrer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward_percent: Option<u16>,
    /// Accounts allowed to receive rewards (None or empty = everyone)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whitelist_market_fee_sharing: Option<BTreeSet<AccountId>>,
    /// Accounts whose black listings make an account ineligible
    #[serde(default)]
    pub blacklist_authorities: BTreeSet<AccountId>,
}

impl AssetOptions {
    /// Whether any option gated behind market fee sharing is set
    pub fn uses_market_fee_sharing(&self) -> bool {
        self.reward_percent.is_some() || self.whitelist_market_fee_sharing.is_some()
    }

    /// Reward percent, zero when unset
    pub fn effective_reward_percent(&self) -> u16 {
        self.reward_percent.unwrap_or(0)
    }

    /// Validate the options
    /// `market_fee_sharing_active` tells if the reward options may be set yet
    pub fn validate(&self, market_fee_sharing_active: bool) -> Result<(), AssetOptionsError> {
        if self.market_fee_percent > HUNDRED_PERCENT {
            return Err(AssetOptionsError::InvalidMarketFeePercent(
                self.market_fee_percent,
            ));
        }

        if !market_fee_sharing_active && self.uses_market_fee_sharing() {
            return Err(AssetOptionsError::MarketFeeSharingNotActive);
        }

        if let Some(percent) = self.reward_percent {
            if percent >= HUNDRED_PERCENT {
                return Err(AssetOptionsError::RewardPercentTooHigh(percent));
            }
        }

        Ok(())
    }

    /// Apply a partial update, each present field replaces the current one
    pub fn apply(&mut self, update: &AssetOptionsUpdate) {
        if let Some(percent) = update.market_fee_percent {
            self.market_fee_percent = percent;
        }
        if let Some(max) = update.max_market_fee {
            self.max_market_fee = max;
        }
        if let Some(charge) = update.charge_market_fee {
            self.charge_market_fee = charge;
        }
        if let Some(percent) = update.reward_percent {
            self.reward_percent = Some(percent);
        }
        if let Some(whitelist) = update.whitelist_market_fee_sharing.as_ref() {
            self.whitelist_market_fee_sharing = Some(whitelist.clone());
        }
        if let Some(authorities) = update.blacklist_authorities.as_ref() {
            self.blacklist_authorities = authorities.clone();
        }
    }

    /// Market fee charged on a fill receiving `amount` of this asset
    pub fn calculate_market_fee(&self, amount: u64) -> u64 {
        if !self.charge_market_fee || self.market_fee_percent == 0 {
            return 0;
        }
        calculate_percent(amount, self.market_fee_percent).min(self.max_market_fee)
    }
}

/// Partial update of asset options, carried by the asset update operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetOptionsUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_fee_percent: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_market_fee: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charge_market_fee: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward_percent: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whitelist_market_fee_sharing: Option<BTreeSet<AccountId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blacklist_authorities: Option<BTreeSet<AccountId>>,
}

impl AssetOptionsUpdate {
    /// Whether the update touches options gated behind market fee sharing
    pub fn uses_market_fee_sharing(&self) -> bool {
        self.reward_percent.is_some() || self.whitelist_market_fee_sharing.is_some()
    }
}

/// Asset data tracked by the ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetData {
    pub id: AssetId,
    /// Asset symbol/ticker
    pub symbol: String,
    /// Decimal places
    pub precision: u8,
    /// Account allowed to update the options
    pub issuer: AccountId,
    pub options: AssetOptions,
    /// Market fees retained by the network for this asset
    pub accumulated_fees: u64,
}

impl AssetData {
    pub fn new(
        id: AssetId,
        symbol: impl Into<String>,
        precision: u8,
        issuer: AccountId,
        options: AssetOptions,
    ) -> Self {
        Self {
            id,
            symbol: symbol.into(),
            precision,
            issuer,
            options,
            accumulated_fees: 0,
        }
    }

    pub fn amount(&self, amount: u64) -> AssetAmount {
        AssetAmount::new(self.id, amount)
    }
}
