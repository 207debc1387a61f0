// Market fee distribution engine
//
// Every fee-bearing fill side hands its raw market fee to the engine. Once
// market fee sharing is active and the asset sets a reward percent, a share
// of the fee is credited to the trader's registrar and referrer vesting
// balances. Everything not credited stays in the asset's accumulated fees.
//
// Key points:
// - A distribution is planned against the current state, then committed
// - An ineligible sponsor's share is dropped, never handed to the other one
// - Registrar and referrer may be the same account, credits are merged

use indexmap::IndexMap;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use tessel_common::{
    asset::{reward_eligibility, AssetAmount},
    fee_sharing::{
        calculate_reward, split_reward, DistributionResult, RewardDistribution, RewardRole,
        SponsorEligibility,
    },
    hard_fork::Feature,
    ids::{AccountId, AssetId},
    transaction::{OperationError, OperationKind},
};

use crate::{config::ChainConfig, core::state::ChainState};

/// One side of a matched trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillOrder {
    pub account: AccountId,
    pub pays: AssetAmount,
    pub receives: AssetAmount,
}

/// Result of settling one fill side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillOutcome {
    pub fill: FillOrder,
    pub market_fee: u64,
    /// Amount of the receive asset actually credited to the trader
    pub received: u64,
    pub distribution: DistributionResult,
}

// A distribution ready to be committed
#[derive(Debug)]
struct DistributionPlan {
    result: DistributionResult,
    // Merged credits per recipient, in the order they were computed
    credits: IndexMap<AccountId, u64>,
}

fn plan_distribution(
    state: &ChainState,
    config: &ChainConfig,
    account: AccountId,
    asset: AssetId,
    market_fee: u64,
) -> Result<DistributionPlan, OperationError> {
    let asset_data = state.require_asset(asset)?;
    let trader = state.require_account(account)?;
    let reward_percent = asset_data.options.effective_reward_percent();

    let sharing_active = config
        .activations
        .is_active(Feature::MarketFeeSharing, state.chain_time());
    let result = if market_fee == 0 || !sharing_active || reward_percent == 0 {
        DistributionResult::retained_only(asset, market_fee)
    } else {
        let reward = calculate_reward(market_fee, reward_percent);
        let eligibility = SponsorEligibility {
            registrar: reward_eligibility(&asset_data.options, state.listings(), trader.registrar),
            referrer: reward_eligibility(&asset_data.options, state.listings(), trader.referrer),
        };
        if log::log_enabled!(log::Level::Debug) && eligibility != SponsorEligibility::ELIGIBLE {
            debug!(
                "Reward of {} for {} on {}: registrar {}, referrer {}",
                reward, account, asset, eligibility.registrar, eligibility.referrer
            );
        }

        let split = eligibility.apply(split_reward(reward, trader.referrer_rewards_percentage));
        let mut distributions = Vec::with_capacity(2);
        if split.registrar > 0 {
            distributions.push(RewardDistribution {
                recipient: trader.registrar,
                amount: split.registrar,
                role: RewardRole::Registrar,
            });
        }
        if split.referrer > 0 {
            distributions.push(RewardDistribution {
                recipient: trader.referrer,
                amount: split.referrer,
                role: RewardRole::Referrer,
            });
        }
        DistributionResult::new(asset, market_fee, reward, distributions)
    };

    let mut credits: IndexMap<AccountId, u64> = IndexMap::new();
    for distribution in result.distributions.iter() {
        let credit = credits.entry(distribution.recipient).or_insert(0);
        *credit = credit
            .checked_add(distribution.amount)
            .ok_or(OperationError::Overflow)?;
    }
    for (recipient, amount) in credits.iter() {
        state
            .vesting()
            .ensure_can_credit_reward(*recipient, AssetAmount::new(asset, *amount))?;
    }
    asset_data
        .accumulated_fees
        .checked_add(result.retained)
        .ok_or(OperationError::Overflow)?;

    Ok(DistributionPlan { result, credits })
}

fn commit_distribution(
    state: &mut ChainState,
    plan: DistributionPlan,
) -> Result<DistributionResult, OperationError> {
    let asset = plan.result.asset;
    for (recipient, amount) in plan.credits {
        let id = state
            .vesting_mut()
            .credit_market_fee_reward(recipient, AssetAmount::new(asset, amount))?;
        if log::log_enabled!(log::Level::Trace) {
            trace!("Market fee reward of {} {} to {} in {}", amount, asset, recipient, id);
        }
    }

    let asset_data = state.asset_mut(asset)?;
    asset_data.accumulated_fees += plan.result.retained;
    Ok(plan.result)
}

/// Route the market fee paid by `account` on `asset`.
pub fn distribute_market_fee(
    state: &mut ChainState,
    config: &ChainConfig,
    account: AccountId,
    asset: AssetId,
    market_fee: u64,
) -> Result<DistributionResult, OperationError> {
    let plan = plan_distribution(state, config, account, asset, market_fee)?;
    commit_distribution(state, plan)
}

// Checks of one fill side, returns the market fee, the net amount and the plan
fn plan_fill(
    state: &ChainState,
    config: &ChainConfig,
    fill: &FillOrder,
) -> Result<(u64, u64, DistributionPlan), OperationError> {
    if fill.pays.is_zero() || fill.receives.is_zero() {
        return Err(OperationError::InvalidAmount);
    }
    state.require_account(fill.account)?;
    state.require_asset(fill.pays.asset)?;
    let receive_asset = state.require_asset(fill.receives.asset)?;
    state.ensure_funds(fill.account, &[fill.pays])?;

    let market_fee = receive_asset
        .options
        .calculate_market_fee(fill.receives.amount)
        .min(fill.receives.amount);
    let received = fill.receives.amount - market_fee;
    state.ensure_can_credit(
        fill.account,
        AssetAmount::new(fill.receives.asset, received),
    )?;

    let plan = plan_distribution(state, config, fill.account, fill.receives.asset, market_fee)?;
    Ok((market_fee, received, plan))
}

fn commit_fill(
    state: &mut ChainState,
    fill: &FillOrder,
    market_fee: u64,
    received: u64,
    plan: DistributionPlan,
) -> Result<FillOutcome, OperationError> {
    state.debit(fill.account, fill.pays)?;
    state.credit(
        fill.account,
        AssetAmount::new(fill.receives.asset, received),
    )?;
    let distribution = commit_distribution(state, plan)?;
    state.push_history(fill.account, OperationKind::FillOrder);

    if log::log_enabled!(log::Level::Debug) {
        debug!(
            "Fill for {}: paid {} of {}, received {} of {} (market fee {})",
            fill.account,
            fill.pays.amount,
            fill.pays.asset,
            received,
            fill.receives.asset,
            market_fee
        );
    }
    Ok(FillOutcome {
        fill: *fill,
        market_fee,
        received,
        distribution,
    })
}

/// Settle one fill side: debit what it pays, credit what it receives minus
/// the market fee, then route the market fee.
pub fn settle_fill(
    state: &mut ChainState,
    config: &ChainConfig,
    fill: &FillOrder,
) -> Result<FillOutcome, OperationError> {
    let (market_fee, received, plan) = plan_fill(state, config, fill)?;
    commit_fill(state, fill, market_fee, received, plan)
}

/// Settle both sides of a match, each paying the market fee of what it receives.
///
/// The sides must mirror each other. Both are checked before either is settled.
pub fn settle_match(
    state: &mut ChainState,
    config: &ChainConfig,
    maker: &FillOrder,
    taker: &FillOrder,
) -> Result<(FillOutcome, FillOutcome), OperationError> {
    for (paid, received) in [(maker.pays, taker.receives), (taker.pays, maker.receives)] {
        if paid.asset != received.asset {
            return Err(OperationError::AssetMismatch {
                expected: paid.asset,
                got: received.asset,
            });
        }
        if paid.amount != received.amount {
            return Err(OperationError::InvalidAmount);
        }
    }

    let (maker_fee, maker_received, maker_plan) = plan_fill(state, config, maker)?;
    let (taker_fee, taker_received, taker_plan) = plan_fill(state, config, taker)?;
    if maker.account == taker.account {
        // Self trade: the combined debits must be covered at once
        state.ensure_funds(maker.account, &[maker.pays, taker.pays])?;
    }

    let maker_outcome = commit_fill(state, maker, maker_fee, maker_received, maker_plan)?;
    let taker_outcome = commit_fill(state, taker, taker_fee, taker_received, taker_plan)?;
    Ok((maker_outcome, taker_outcome))
}
