// Market fee sharing
//
// A share of each market fee can be rebated to the registrar and referrer
// of the account that paid it. This module holds the exact integer
// arithmetic; routing the shares into vesting balances is done by the
// ledger.
//
// Key points:
// - All percentages are fixed point (10000 = 100%)
// - Every division floors, no floating point anywhere
// - The registrar absorbs the rounding remainder of the split

mod record;

pub use record::*;

use crate::config::HUNDRED_PERCENT;

/// `floor(value * percent / 100%)` computed without overflow
///
/// ```
/// use tessel_common::fee_sharing::calculate_percent;
///
/// assert_eq!(calculate_percent(1000, 1000), 100); // 10%
/// assert_eq!(calculate_percent(99, 5000), 49); // floors
/// ```
#[inline]
pub fn calculate_percent(value: u64, percent: u16) -> u64 {
    let result = (value as u128) * (percent as u128) / (HUNDRED_PERCENT as u128);
    // percent is at most u16::MAX so the result stays within ~6.5x value
    u64::try_from(result).unwrap_or(u64::MAX)
}

/// Reward routed from a market fee for a given reward percent
#[inline]
pub fn calculate_reward(market_fee: u64, reward_percent: u16) -> u64 {
    calculate_percent(market_fee, reward_percent)
}

/// Split a reward between referrer and registrar
///
/// The referrer receives `floor(reward * referrer_percent / 100%)`, the
/// registrar the rest, so both shares always add up to the reward.
pub fn split_reward(reward: u64, referrer_percent: u16) -> RewardSplit {
    let referrer = calculate_percent(reward, referrer_percent.min(HUNDRED_PERCENT));
    RewardSplit {
        referrer,
        registrar: reward - referrer,
    }
}
