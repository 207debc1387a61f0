// Common test utilities for ledger integration tests
//
// Builds a devnet chain with the committee account and core asset, and
// helpers to register actors and craft operations paying the scheduled fee.

#![allow(dead_code)]

use tessel_common::{
    asset::AssetAmount,
    config::{COIN_VALUE, COMMITTEE_ACCOUNT, CORE_ASSET},
    crypto::{HashAlgorithm, PreimageHash},
    hard_fork::ActivationSchedule,
    ids::{AccountId, HtlcId},
    time::{DurationSeconds, TimestampSeconds},
    transaction::{HtlcCreatePayload, HtlcExtendPayload, HtlcRedeemPayload, Operation},
};
use tessel_daemon::{
    config::ChainConfig,
    core::blockchain::{Blockchain, OperationResult},
};

pub const GENESIS: TimestampSeconds = 1_700_000_000;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Devnet chain, every feature active from genesis
pub fn devnet() -> Blockchain {
    init_logger();
    Blockchain::new(ChainConfig::devnet().with_genesis_timestamp(GENESIS))
}

pub fn chain_with_activations(activations: ActivationSchedule) -> Blockchain {
    init_logger();
    Blockchain::new(
        ChainConfig::devnet()
            .with_genesis_timestamp(GENESIS)
            .with_activations(activations),
    )
}

/// Account registered and referred by the committee
pub fn create_actor(chain: &mut Blockchain, name: &str) -> AccountId {
    chain
        .register_account(name, COMMITTEE_ACCOUNT, COMMITTEE_ACCOUNT, 0)
        .unwrap()
}

pub fn fund_core(chain: &mut Blockchain, account: AccountId, coins: u64) {
    chain
        .fund(account, AssetAmount::new(CORE_ASSET, coins * COIN_VALUE))
        .unwrap();
}

pub fn core_balance(chain: &Blockchain, account: AccountId) -> u64 {
    chain.api().get_balance(account, CORE_ASSET)
}

/// Set the fee required by the chain's fee schedule
pub fn with_required_fee(chain: &Blockchain, mut operation: Operation) -> Operation {
    let fee = chain.config().fees.calculate_fee(&operation);
    operation.set_fee(fee);
    operation
}

pub fn htlc_create(
    chain: &Blockchain,
    from: AccountId,
    to: AccountId,
    amount: AssetAmount,
    algorithm: HashAlgorithm,
    preimage: &[u8],
    claim_period_seconds: DurationSeconds,
) -> Operation {
    with_required_fee(
        chain,
        Operation::HtlcCreate(HtlcCreatePayload {
            from,
            to,
            amount,
            preimage_hash: PreimageHash::of(algorithm, preimage),
            preimage_size: preimage.len() as u64,
            claim_period_seconds,
            fee: 0,
        }),
    )
}

pub fn htlc_redeem(
    chain: &Blockchain,
    htlc_id: HtlcId,
    redeemer: AccountId,
    preimage: &[u8],
) -> Operation {
    with_required_fee(
        chain,
        Operation::HtlcRedeem(HtlcRedeemPayload {
            htlc_id,
            redeemer,
            preimage: preimage.to_vec(),
            fee: 0,
        }),
    )
}

pub fn htlc_extend(
    chain: &Blockchain,
    htlc_id: HtlcId,
    update_issuer: AccountId,
    seconds_to_add: DurationSeconds,
) -> Operation {
    with_required_fee(
        chain,
        Operation::HtlcExtend(HtlcExtendPayload {
            htlc_id,
            update_issuer,
            seconds_to_add,
            fee: 0,
        }),
    )
}

pub fn expect_htlc_id(result: OperationResult) -> HtlcId {
    match result {
        OperationResult::HtlcId(id) => id,
        other => panic!("expected an HTLC id, got {:?}", other),
    }
}
