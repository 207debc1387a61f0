mod common;

use std::error::Error;

use common::*;
use tessel_common::{
    account::AccountListing,
    asset::{AssetAmount, AssetOptions, AssetOptionsUpdate},
    config::{CORE_ASSET, HUNDRED_PERCENT, ONE_PERCENT},
    hard_fork::{ActivationSchedule, Feature, ForkCondition},
    ids::{AccountId, AssetId},
    transaction::{
        AccountWhitelistPayload, AssetUpdatePayload, Operation, OperationError, OperationKind,
        VestingBalanceCreatePayload, VestingBalanceWithdrawPayload,
    },
    vesting::{VestingBalanceType, VestingPolicyInitializer},
};
use tessel_daemon::core::{
    blockchain::Blockchain,
    error::BlockchainError,
    fee_sharing::{FillOrder, FillOutcome},
};

struct Market {
    izzy: AccountId,
    jill: AccountId,
    alice: AccountId,
    bob: AccountId,
    issuer: AccountId,
}

/// alice is registered by izzy and referred by jill, who gets 30% of rewards
fn setup_market(chain: &mut Blockchain) -> Market {
    let izzy = create_actor(chain, "izzy");
    let jill = create_actor(chain, "jill");
    let alice = chain
        .register_account("alice", izzy, jill, 30 * ONE_PERCENT)
        .unwrap();
    let bob = create_actor(chain, "bob");
    let issuer = create_actor(chain, "issuer");
    fund_core(chain, issuer, 100);
    Market {
        izzy,
        jill,
        alice,
        bob,
        issuer,
    }
}

fn usd_options(reward_percent: Option<u16>) -> AssetOptions {
    AssetOptions {
        market_fee_percent: 10 * ONE_PERCENT,
        max_market_fee: u64::MAX,
        charge_market_fee: true,
        reward_percent,
        ..Default::default()
    }
}

/// bob sells 1000 USD to alice for 100 core units
fn trade_usd(
    chain: &mut Blockchain,
    market: &Market,
    usd: AssetId,
) -> Result<(FillOutcome, FillOutcome), Box<dyn Error>> {
    chain.fund(market.bob, AssetAmount::new(usd, 1_000))?;
    chain.fund(market.alice, AssetAmount::new(CORE_ASSET, 100))?;
    let outcomes = chain.settle_match(
        &FillOrder {
            account: market.bob,
            pays: AssetAmount::new(usd, 1_000),
            receives: AssetAmount::new(CORE_ASSET, 100),
        },
        &FillOrder {
            account: market.alice,
            pays: AssetAmount::new(CORE_ASSET, 100),
            receives: AssetAmount::new(usd, 1_000),
        },
    )?;
    Ok(outcomes)
}

fn asset_update(
    chain: &Blockchain,
    issuer: AccountId,
    asset: AssetId,
    new_options: AssetOptionsUpdate,
) -> Operation {
    with_required_fee(
        chain,
        Operation::AssetUpdate(AssetUpdatePayload {
            issuer,
            asset_to_update: asset,
            new_options,
            fee: 0,
        }),
    )
}

#[test]
fn test_reward_split_between_registrar_and_referrer() -> Result<(), Box<dyn Error>> {
    let mut chain = devnet();
    let market = setup_market(&mut chain);
    let usd = chain.register_asset("USD", 4, market.issuer, usd_options(Some(20 * ONE_PERCENT)))?;

    let (maker, taker) = trade_usd(&mut chain, &market, usd)?;

    // The core asset charges nothing
    assert_eq!(maker.market_fee, 0);
    assert_eq!(maker.received, 100);

    assert_eq!(taker.market_fee, 100);
    assert_eq!(taker.received, 900);
    assert_eq!(taker.distribution.reward, 20);
    assert_eq!(taker.distribution.credited_to(market.izzy), 14);
    assert_eq!(taker.distribution.credited_to(market.jill), 6);
    assert_eq!(taker.distribution.retained, 80);

    let api = chain.api();
    assert_eq!(api.get_balance(market.alice, usd), 900);
    assert_eq!(api.get_balance(market.bob, CORE_ASSET), 100);
    assert_eq!(api.get_market_fee_reward(market.izzy, usd), 14);
    assert_eq!(api.get_market_fee_reward(market.jill, usd), 6);
    assert_eq!(api.get_accumulated_fees(usd), 80);
    // Rewards are not spendable balances
    assert_eq!(api.get_balance(market.izzy, usd), 0);

    let history = api.get_account_history(market.alice);
    assert_eq!(
        history.last().map(|entry| entry.kind),
        Some(OperationKind::FillOrder)
    );
    Ok(())
}

#[test]
fn test_rewards_accumulate_in_one_balance() -> Result<(), Box<dyn Error>> {
    let mut chain = devnet();
    let market = setup_market(&mut chain);
    let usd = chain.register_asset("USD", 4, market.issuer, usd_options(Some(20 * ONE_PERCENT)))?;

    trade_usd(&mut chain, &market, usd)?;
    trade_usd(&mut chain, &market, usd)?;

    let api = chain.api();
    assert_eq!(api.get_market_fee_reward(market.izzy, usd), 28);
    assert_eq!(api.get_market_fee_reward(market.jill, usd), 12);
    assert_eq!(api.get_accumulated_fees(usd), 160);
    let balances: Vec<_> = api
        .get_vesting_balances(market.izzy)
        .into_iter()
        .filter(|vb| vb.balance_type == VestingBalanceType::MarketFeeSharing)
        .collect();
    assert_eq!(balances.len(), 1);
    Ok(())
}

#[test]
fn test_same_registrar_and_referrer() -> Result<(), Box<dyn Error>> {
    let mut chain = devnet();
    let market = setup_market(&mut chain);
    let carl = chain.register_account("carl", market.izzy, market.izzy, 30 * ONE_PERCENT)?;
    let usd = chain.register_asset("USD", 4, market.issuer, usd_options(Some(20 * ONE_PERCENT)))?;

    chain.fund(market.bob, AssetAmount::new(usd, 1_000))?;
    chain.fund(carl, AssetAmount::new(CORE_ASSET, 100))?;
    let (_, taker) = chain.settle_match(
        &FillOrder {
            account: market.bob,
            pays: AssetAmount::new(usd, 1_000),
            receives: AssetAmount::new(CORE_ASSET, 100),
        },
        &FillOrder {
            account: carl,
            pays: AssetAmount::new(CORE_ASSET, 100),
            receives: AssetAmount::new(usd, 1_000),
        },
    )?;
    assert_eq!(taker.distribution.credited_to(market.izzy), 20);

    let api = chain.api();
    let balances = api.get_vesting_balances(market.izzy);
    assert_eq!(balances.len(), 1);
    assert_eq!(balances[0].balance, AssetAmount::new(usd, 20));
    assert_eq!(api.get_accumulated_fees(usd), 80);
    Ok(())
}

#[test]
fn test_whitelist_limits_recipients() -> Result<(), Box<dyn Error>> {
    let mut chain = devnet();
    let market = setup_market(&mut chain);
    let options = AssetOptions {
        whitelist_market_fee_sharing: Some([market.jill].into_iter().collect()),
        ..usd_options(Some(20 * ONE_PERCENT))
    };
    let usd = chain.register_asset("USD", 4, market.issuer, options)?;

    trade_usd(&mut chain, &market, usd)?;

    // izzy's share is dropped, not handed to jill
    let api = chain.api();
    assert_eq!(api.get_market_fee_reward(market.izzy, usd), 0);
    assert_eq!(api.get_market_fee_reward(market.jill, usd), 6);
    assert_eq!(api.get_accumulated_fees(usd), 94);
    assert!(api.get_vesting_balances(market.izzy).is_empty());
    Ok(())
}

#[test]
fn test_blacklist_authority_listing() -> Result<(), Box<dyn Error>> {
    let mut chain = devnet();
    let market = setup_market(&mut chain);
    let authority = create_actor(&mut chain, "authority");
    fund_core(&mut chain, authority, 10);
    let options = AssetOptions {
        blacklist_authorities: [authority].into_iter().collect(),
        // Blacklisting wins over whitelisting
        whitelist_market_fee_sharing: Some([market.izzy, market.jill].into_iter().collect()),
        ..usd_options(Some(20 * ONE_PERCENT))
    };
    let usd = chain.register_asset("USD", 4, market.issuer, options)?;

    let op = with_required_fee(
        &chain,
        Operation::AccountWhitelist(AccountWhitelistPayload {
            authorizing_account: authority,
            account_to_list: market.jill,
            new_listing: AccountListing::BlackListed,
            fee: 0,
        }),
    );
    chain.push_operation(op)?;
    assert!(chain
        .state()
        .listings()
        .is_blacklisted_by(authority, market.jill));

    trade_usd(&mut chain, &market, usd)?;

    let api = chain.api();
    assert_eq!(api.get_market_fee_reward(market.izzy, usd), 14);
    assert_eq!(api.get_market_fee_reward(market.jill, usd), 0);
    assert_eq!(api.get_accumulated_fees(usd), 86);
    Ok(())
}

#[test]
fn test_listing_by_other_account_is_ignored() -> Result<(), Box<dyn Error>> {
    let mut chain = devnet();
    let market = setup_market(&mut chain);
    let stranger = create_actor(&mut chain, "stranger");
    fund_core(&mut chain, stranger, 10);
    let usd = chain.register_asset("USD", 4, market.issuer, usd_options(Some(20 * ONE_PERCENT)))?;

    let op = with_required_fee(
        &chain,
        Operation::AccountWhitelist(AccountWhitelistPayload {
            authorizing_account: stranger,
            account_to_list: market.jill,
            new_listing: AccountListing::BlackListed,
            fee: 0,
        }),
    );
    chain.push_operation(op)?;
    trade_usd(&mut chain, &market, usd)?;

    assert_eq!(chain.api().get_market_fee_reward(market.jill, usd), 6);
    Ok(())
}

#[test]
fn test_self_listing_is_recorded() -> Result<(), Box<dyn Error>> {
    let mut chain = devnet();
    let market = setup_market(&mut chain);
    fund_core(&mut chain, market.jill, 10);
    let usd = chain.register_asset("USD", 4, market.issuer, usd_options(Some(20 * ONE_PERCENT)))?;

    let op = with_required_fee(
        &chain,
        Operation::AccountWhitelist(AccountWhitelistPayload {
            authorizing_account: market.jill,
            account_to_list: market.jill,
            new_listing: AccountListing::BlackListed,
            fee: 0,
        }),
    );
    chain.push_operation(op)?;
    assert!(chain
        .state()
        .listings()
        .is_blacklisted_by(market.jill, market.jill));

    // jill is no blacklist authority of USD
    trade_usd(&mut chain, &market, usd)?;
    assert_eq!(chain.api().get_market_fee_reward(market.jill, usd), 6);
    Ok(())
}

#[test]
fn test_fee_retained_before_activation() -> Result<(), Box<dyn Error>> {
    let activation = GENESIS + 1_000;
    let mut chain = chain_with_activations(ActivationSchedule {
        market_fee_sharing: ForkCondition::Timestamp(activation),
        ..ActivationSchedule::all_active()
    });
    let market = setup_market(&mut chain);

    assert_eq!(
        chain
            .register_asset("USD", 4, market.issuer, usd_options(Some(20 * ONE_PERCENT)))
            .unwrap_err(),
        BlockchainError::Operation(OperationError::FeatureNotActive(Feature::MarketFeeSharing))
    );
    let usd = chain.register_asset("USD", 4, market.issuer, usd_options(None))?;

    let update = AssetOptionsUpdate {
        reward_percent: Some(20 * ONE_PERCENT),
        ..Default::default()
    };
    let op = asset_update(&chain, market.issuer, usd, update.clone());
    assert_eq!(
        chain.push_operation(op).unwrap_err(),
        BlockchainError::Operation(OperationError::FeatureNotActive(Feature::MarketFeeSharing))
    );

    let (_, taker) = trade_usd(&mut chain, &market, usd)?;
    assert_eq!(taker.market_fee, 100);
    assert!(taker.distribution.distributions.is_empty());
    assert_eq!(chain.api().get_accumulated_fees(usd), 100);

    chain.generate_block_at(activation)?;
    chain.push_operation(asset_update(&chain, market.issuer, usd, update))?;
    let options = chain.api().get_asset(usd).ok_or("missing asset")?.options;
    assert_eq!(options.reward_percent, Some(20 * ONE_PERCENT));

    trade_usd(&mut chain, &market, usd)?;
    let api = chain.api();
    assert_eq!(api.get_market_fee_reward(market.izzy, usd), 14);
    assert_eq!(api.get_market_fee_reward(market.jill, usd), 6);
    assert_eq!(api.get_accumulated_fees(usd), 180);
    Ok(())
}

#[test]
fn test_reward_percent_bounds() -> Result<(), Box<dyn Error>> {
    let mut chain = devnet();
    let market = setup_market(&mut chain);

    assert_eq!(
        chain
            .register_asset("USD", 4, market.issuer, usd_options(Some(HUNDRED_PERCENT)))
            .unwrap_err(),
        BlockchainError::Operation(OperationError::RewardPercentTooHigh(HUNDRED_PERCENT))
    );

    let usd = chain.register_asset("USD", 4, market.issuer, usd_options(Some(0)))?;
    let op = asset_update(
        &chain,
        market.issuer,
        usd,
        AssetOptionsUpdate {
            reward_percent: Some(HUNDRED_PERCENT),
            ..Default::default()
        },
    );
    assert_eq!(
        chain.push_operation(op).unwrap_err(),
        BlockchainError::Operation(OperationError::RewardPercentTooHigh(HUNDRED_PERCENT))
    );

    // A zero reward routes nothing
    trade_usd(&mut chain, &market, usd)?;
    assert_eq!(chain.api().get_accumulated_fees(usd), 100);
    assert!(chain.api().get_vesting_balances(market.izzy).is_empty());
    Ok(())
}

#[test]
fn test_only_issuer_updates_asset() -> Result<(), Box<dyn Error>> {
    let mut chain = devnet();
    let market = setup_market(&mut chain);
    fund_core(&mut chain, market.bob, 10);
    let usd = chain.register_asset("USD", 4, market.issuer, usd_options(None))?;

    let op = asset_update(
        &chain,
        market.bob,
        usd,
        AssetOptionsUpdate {
            market_fee_percent: Some(0),
            ..Default::default()
        },
    );
    assert_eq!(
        chain.push_operation(op).unwrap_err(),
        BlockchainError::Operation(OperationError::Unauthorized(market.bob))
    );
    let options = chain.api().get_asset(usd).ok_or("missing asset")?.options;
    assert_eq!(options.market_fee_percent, 10 * ONE_PERCENT);
    Ok(())
}

#[test]
fn test_claim_reward() -> Result<(), Box<dyn Error>> {
    let mut chain = devnet();
    let market = setup_market(&mut chain);
    fund_core(&mut chain, market.izzy, 10);
    let usd = chain.register_asset("USD", 4, market.issuer, usd_options(Some(20 * ONE_PERCENT)))?;
    trade_usd(&mut chain, &market, usd)?;

    let vesting_balance = chain
        .state()
        .vesting()
        .market_fee_sharing_balance(market.izzy, usd)
        .map(|vb| vb.id)
        .ok_or("missing reward balance")?;
    let withdraw = |amount: u64, owner: AccountId| {
        with_required_fee(
            &chain,
            Operation::VestingBalanceWithdraw(VestingBalanceWithdrawPayload {
                vesting_balance,
                owner,
                amount: AssetAmount::new(usd, amount),
                fee: 0,
            }),
        )
    };
    let too_much = withdraw(15, market.izzy);
    let by_jill = withdraw(14, market.jill);
    let partial = withdraw(10, market.izzy);
    let rest = withdraw(4, market.izzy);

    assert_eq!(
        chain.push_operation(too_much).unwrap_err(),
        BlockchainError::Operation(OperationError::InsufficientVested {
            available: 14,
            requested: 15,
        })
    );
    assert_eq!(
        chain.push_operation(by_jill).unwrap_err(),
        BlockchainError::Operation(OperationError::Unauthorized(market.jill))
    );

    chain.push_operation(partial)?;
    assert_eq!(chain.api().get_balance(market.izzy, usd), 10);
    assert_eq!(chain.api().get_market_fee_reward(market.izzy, usd), 4);

    chain.push_operation(rest)?;
    assert_eq!(chain.api().get_balance(market.izzy, usd), 14);
    assert_eq!(chain.api().get_market_fee_reward(market.izzy, usd), 0);

    // The emptied balance is reused by the next reward
    trade_usd(&mut chain, &market, usd)?;
    assert_eq!(chain.api().get_market_fee_reward(market.izzy, usd), 14);
    assert_eq!(
        chain
            .state()
            .vesting()
            .market_fee_sharing_balance(market.izzy, usd)
            .map(|vb| vb.id),
        Some(vesting_balance)
    );
    Ok(())
}

#[test]
fn test_single_market_fee_sharing_balance_per_asset() -> Result<(), Box<dyn Error>> {
    let mut chain = devnet();
    let market = setup_market(&mut chain);
    fund_core(&mut chain, market.izzy, 10);
    let usd = chain.register_asset("USD", 4, market.issuer, usd_options(Some(20 * ONE_PERCENT)))?;
    trade_usd(&mut chain, &market, usd)?;
    chain.fund(market.izzy, AssetAmount::new(usd, 50))?;

    let create = |balance_type: VestingBalanceType| {
        with_required_fee(
            &chain,
            Operation::VestingBalanceCreate(VestingBalanceCreatePayload {
                creator: market.izzy,
                owner: market.izzy,
                amount: AssetAmount::new(usd, 50),
                balance_type,
                policy: VestingPolicyInitializer::Instant,
                fee: 0,
            }),
        )
    };
    let duplicate = create(VestingBalanceType::MarketFeeSharing);
    let unspecified = create(VestingBalanceType::Unspecified);

    assert_eq!(
        chain.push_operation(duplicate).unwrap_err(),
        BlockchainError::Operation(OperationError::DuplicateCategory {
            owner: market.izzy,
            asset: usd,
        })
    );
    // Other categories are not unique
    chain.push_operation(unspecified)?;
    assert_eq!(chain.api().get_vesting_balances(market.izzy).len(), 2);
    Ok(())
}

#[test]
fn test_rewards_claimable_from_linear_balance() -> Result<(), Box<dyn Error>> {
    let mut chain = devnet();
    let market = setup_market(&mut chain);
    fund_core(&mut chain, market.izzy, 10);
    let usd = chain.register_asset("USD", 4, market.issuer, usd_options(Some(20 * ONE_PERCENT)))?;
    chain.fund(market.izzy, AssetAmount::new(usd, 50))?;

    // A locked schedule that has not started yet
    let op = with_required_fee(
        &chain,
        Operation::VestingBalanceCreate(VestingBalanceCreatePayload {
            creator: market.izzy,
            owner: market.izzy,
            amount: AssetAmount::new(usd, 50),
            balance_type: VestingBalanceType::MarketFeeSharing,
            policy: VestingPolicyInitializer::Linear {
                begin_timestamp: chain.chain_time() + 10_000,
                vesting_cliff_seconds: 0,
                vesting_duration_seconds: 1_000,
            },
            fee: 0,
        }),
    );
    chain.push_operation(op)?;
    trade_usd(&mut chain, &market, usd)?;

    let reward_balance = chain
        .state()
        .vesting()
        .market_fee_sharing_balance(market.izzy, usd)
        .ok_or("missing reward balance")?;
    assert_eq!(reward_balance.balance, AssetAmount::new(usd, 64));
    assert_eq!(reward_balance.allowed_withdraw(chain.chain_time()), 14);

    let vesting_balance = reward_balance.id;
    let withdraw = |amount: u64| {
        with_required_fee(
            &chain,
            Operation::VestingBalanceWithdraw(VestingBalanceWithdrawPayload {
                vesting_balance,
                owner: market.izzy,
                amount: AssetAmount::new(usd, amount),
                fee: 0,
            }),
        )
    };
    let reward = withdraw(14);
    let locked = withdraw(1);

    chain.push_operation(reward)?;
    assert_eq!(chain.api().get_balance(market.izzy, usd), 14);
    assert_eq!(
        chain.push_operation(locked).unwrap_err(),
        BlockchainError::Operation(OperationError::InsufficientVested {
            available: 0,
            requested: 1,
        })
    );
    Ok(())
}

#[test]
fn test_match_sides_must_mirror() -> Result<(), Box<dyn Error>> {
    let mut chain = devnet();
    let market = setup_market(&mut chain);
    let usd = chain.register_asset("USD", 4, market.issuer, usd_options(Some(20 * ONE_PERCENT)))?;
    chain.fund(market.bob, AssetAmount::new(usd, 1_000))?;
    chain.fund(market.alice, AssetAmount::new(CORE_ASSET, 100))?;

    let maker = FillOrder {
        account: market.bob,
        pays: AssetAmount::new(usd, 1_000),
        receives: AssetAmount::new(CORE_ASSET, 100),
    };
    let taker = FillOrder {
        account: market.alice,
        pays: AssetAmount::new(CORE_ASSET, 100),
        receives: AssetAmount::new(usd, 999),
    };
    assert_eq!(
        chain.settle_match(&maker, &taker).unwrap_err(),
        OperationError::InvalidAmount
    );

    let taker = FillOrder {
        account: market.alice,
        pays: AssetAmount::new(CORE_ASSET, 100),
        receives: AssetAmount::new(CORE_ASSET, 1_000),
    };
    assert_eq!(
        chain.settle_match(&maker, &taker).unwrap_err(),
        OperationError::AssetMismatch {
            expected: usd,
            got: CORE_ASSET,
        }
    );

    // A side that cannot pay aborts the whole match
    let taker = FillOrder {
        account: market.alice,
        pays: AssetAmount::new(CORE_ASSET, 100),
        receives: AssetAmount::new(usd, 1_000),
    };
    chain.transfer(market.bob, market.issuer, AssetAmount::new(usd, 1))?;
    assert!(matches!(
        chain.settle_match(&maker, &taker),
        Err(OperationError::InsufficientFunds { .. })
    ));
    assert_eq!(chain.api().get_balance(market.alice, CORE_ASSET), 100);
    assert_eq!(chain.api().get_accumulated_fees(usd), 0);
    Ok(())
}
