use log::debug;
use tessel_common::{
    asset::AssetAmount,
    config::CORE_ASSET,
    ids::VestingBalanceId,
    transaction::{
        verify::{verify_vesting_balance_create, verify_vesting_balance_withdraw},
        OperationError, OperationKind, VestingBalanceCreatePayload, VestingBalanceWithdrawPayload,
    },
};

use crate::core::state::ChainState;

/// Fund a new vesting balance for `owner` from the creator's balance.
pub fn apply_vesting_balance_create(
    state: &mut ChainState,
    payload: &VestingBalanceCreatePayload,
) -> Result<VestingBalanceId, OperationError> {
    verify_vesting_balance_create(payload)?;
    state.require_account(payload.creator)?;
    state.require_account(payload.owner)?;
    state.require_asset(payload.amount.asset)?;
    state
        .vesting()
        .ensure_can_create(payload.owner, payload.balance_type, payload.amount.asset)?;
    state.ensure_funds(
        payload.creator,
        &[AssetAmount::new(CORE_ASSET, payload.fee), payload.amount],
    )?;
    state.ensure_can_collect_fee(payload.fee)?;

    state.collect_fee(payload.creator, payload.fee)?;
    state.debit(payload.creator, payload.amount)?;
    let id = state.vesting_mut().create(
        payload.owner,
        payload.balance_type,
        payload.amount,
        payload.policy.init(payload.amount.amount),
    )?;

    state.push_history(payload.creator, OperationKind::VestingBalanceCreate);
    if payload.owner != payload.creator {
        state.push_history(payload.owner, OperationKind::VestingBalanceCreate);
    }
    Ok(id)
}

/// Withdraw released funds from a vesting balance into the owner's balance.
pub fn apply_vesting_balance_withdraw(
    state: &mut ChainState,
    payload: &VestingBalanceWithdrawPayload,
) -> Result<u64, OperationError> {
    let now = state.chain_time();
    state.require_account(payload.owner)?;
    let balance = state.vesting().require(payload.vesting_balance)?;
    verify_vesting_balance_withdraw(payload, balance, now)?;
    state.ensure_funds(payload.owner, &[AssetAmount::new(CORE_ASSET, payload.fee)])?;
    state.ensure_can_collect_fee(payload.fee)?;
    state.ensure_can_credit(payload.owner, payload.amount)?;

    state.collect_fee(payload.owner, payload.fee)?;
    let remaining = state.vesting_mut().withdraw(payload, now)?;
    state.credit(payload.owner, payload.amount)?;
    state.push_history(payload.owner, OperationKind::VestingBalanceWithdraw);

    if log::log_enabled!(log::Level::Debug) {
        debug!(
            "{} claimed {} of {} from {}",
            payload.owner, payload.amount.amount, payload.amount.asset, payload.vesting_balance
        );
    }
    Ok(remaining)
}
