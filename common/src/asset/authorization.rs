//! Reward eligibility of an account for an asset.

use strum::Display;

use super::AssetOptions;
use crate::{account::AccountListings, ids::AccountId};

/// Outcome of the authorization filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum RewardEligibility {
    Eligible,
    /// Black-listed by one of the asset's blacklist authorities
    Blacklisted,
    /// The asset has a non-empty whitelist without this account
    NotWhitelisted,
}

impl RewardEligibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, RewardEligibility::Eligible)
    }
}

/// Evaluate whether `account` may receive market fee rewards of an asset.
///
/// The blacklist is checked first and wins over the whitelist.
pub fn reward_eligibility(
    options: &AssetOptions,
    listings: &AccountListings,
    account: AccountId,
) -> RewardEligibility {
    if listings.is_blacklisted_by_any(&options.blacklist_authorities, account) {
        return RewardEligibility::Blacklisted;
    }

    if let Some(whitelist) = options.whitelist_market_fee_sharing.as_ref() {
        if !whitelist.is_empty() && !whitelist.contains(&account) {
            return RewardEligibility::NotWhitelisted;
        }
    }

    RewardEligibility::Eligible
}
