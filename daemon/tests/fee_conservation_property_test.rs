//! Property tests: market fees and HTLC amounts are never created or lost.

mod common;

use common::*;
use proptest::prelude::*;
use tessel_common::{
    asset::{AssetAmount, AssetOptions},
    config::{COMMITTEE_ACCOUNT, CORE_ASSET, HUNDRED_PERCENT},
    crypto::HashAlgorithm,
};
use tessel_daemon::core::fee_sharing::FillOrder;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_market_fee_is_fully_accounted(
        amount in 1u64..1_000_000_000,
        market_fee_percent in 0u16..=HUNDRED_PERCENT,
        reward_percent in 0u16..HUNDRED_PERCENT,
        referrer_percent in 0u16..=HUNDRED_PERCENT,
    ) {
        let mut chain = devnet();
        let registrar = create_actor(&mut chain, "registrar");
        let referrer = create_actor(&mut chain, "referrer");
        let trader = chain
            .register_account("trader", registrar, referrer, referrer_percent)
            .unwrap();
        let seller = create_actor(&mut chain, "seller");
        let options = AssetOptions {
            market_fee_percent,
            max_market_fee: u64::MAX,
            charge_market_fee: true,
            reward_percent: Some(reward_percent),
            ..Default::default()
        };
        let usd = chain.register_asset("USD", 4, COMMITTEE_ACCOUNT, options).unwrap();
        chain.fund(seller, AssetAmount::new(usd, amount)).unwrap();
        chain.fund(trader, AssetAmount::new(CORE_ASSET, 1)).unwrap();

        let (_, taker) = chain
            .settle_match(
                &FillOrder {
                    account: seller,
                    pays: AssetAmount::new(usd, amount),
                    receives: AssetAmount::new(CORE_ASSET, 1),
                },
                &FillOrder {
                    account: trader,
                    pays: AssetAmount::new(CORE_ASSET, 1),
                    receives: AssetAmount::new(usd, amount),
                },
            )
            .unwrap();

        let api = chain.api();
        let rewards = api.get_market_fee_reward(registrar, usd) + api.get_market_fee_reward(referrer, usd);
        prop_assert!(taker.distribution.reward <= taker.market_fee);
        prop_assert_eq!(taker.received + taker.market_fee, amount);
        prop_assert_eq!(rewards, taker.distribution.total_distributed);
        prop_assert_eq!(api.get_accumulated_fees(usd) + rewards, taker.market_fee);
        prop_assert_eq!(api.get_balance(trader, usd), taker.received);
    }

    #[test]
    fn prop_expired_htlcs_refund_in_full(
        amounts in proptest::collection::vec(1u64..1_000_000, 1..8),
        periods in proptest::collection::vec(1u64..600, 8),
    ) {
        let mut chain = devnet();
        let alice = create_actor(&mut chain, "alice");
        let bob = create_actor(&mut chain, "bob");
        fund_core(&mut chain, alice, 100);

        let mut fees = 0;
        let ops: Vec<_> = amounts
            .iter()
            .zip(periods.iter())
            .map(|(amount, period)| {
                let op = htlc_create(
                    &chain,
                    alice,
                    bob,
                    AssetAmount::new(CORE_ASSET, *amount),
                    HashAlgorithm::Sha256,
                    b"secret",
                    *period,
                );
                fees += op.fee();
                op
            })
            .collect();
        let before = core_balance(&chain, alice);
        let receipt = chain.generate_block(ops).unwrap();
        prop_assert!(receipt.is_fully_applied());

        let receipt = chain.generate_block_at(chain.chain_time() + 600).unwrap();
        prop_assert_eq!(receipt.expired_htlcs.len(), amounts.len());
        // Refunds come back in id order
        let mut sorted = receipt.expired_htlcs.clone();
        sorted.sort();
        prop_assert_eq!(&sorted, &receipt.expired_htlcs);
        prop_assert_eq!(core_balance(&chain, alice), before - fees);
        prop_assert_eq!(core_balance(&chain, bob), 0);
    }
}
