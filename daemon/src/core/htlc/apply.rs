use log::debug;
use tessel_common::{
    asset::AssetAmount,
    config::CORE_ASSET,
    hard_fork::Feature,
    htlc::{HtlcRecord, HtlcStatus},
    ids::HtlcId,
    time::TimestampSeconds,
    transaction::{
        verify::{verify_htlc_create, verify_htlc_extend, verify_htlc_extend_record, verify_htlc_redeem},
        HtlcCreatePayload, HtlcExtendPayload, HtlcRedeemPayload, OperationError, OperationKind,
    },
};

use crate::{config::ChainConfig, core::state::ChainState};

pub(crate) fn ensure_feature_active(
    config: &ChainConfig,
    feature: Feature,
    chain_time: TimestampSeconds,
) -> Result<(), OperationError> {
    if !config.activations.is_active(feature, chain_time) {
        return Err(OperationError::FeatureNotActive(feature));
    }
    Ok(())
}

/// Lock the sender's funds under a new pending HTLC.
pub fn apply_htlc_create(
    state: &mut ChainState,
    config: &ChainConfig,
    payload: &HtlcCreatePayload,
) -> Result<HtlcId, OperationError> {
    let now = state.chain_time();
    ensure_feature_active(config, Feature::Htlc, now)?;
    verify_htlc_create(payload, &config.htlc)?;

    state.require_account(payload.from)?;
    state.require_account(payload.to)?;
    state.require_asset(payload.amount.asset)?;
    state.ensure_funds(
        payload.from,
        &[AssetAmount::new(CORE_ASSET, payload.fee), payload.amount],
    )?;
    state.ensure_can_collect_fee(payload.fee)?;
    let expiration = now
        .checked_add(payload.claim_period_seconds)
        .ok_or(OperationError::Overflow)?;

    state.collect_fee(payload.from, payload.fee)?;
    state.debit(payload.from, payload.amount)?;
    let id = state.htlcs_mut().insert(HtlcRecord {
        id: HtlcId::default(),
        from: payload.from,
        to: payload.to,
        amount: payload.amount,
        preimage_hash: payload.preimage_hash.clone(),
        preimage_size: payload.preimage_size,
        created_at: now,
        expiration,
        redeemer: None,
        status: HtlcStatus::Pending,
    });
    state.push_history(payload.from, OperationKind::HtlcCreate);
    state.push_history(payload.to, OperationKind::HtlcCreate);

    if log::log_enabled!(log::Level::Debug) {
        debug!(
            "HTLC {} created: {} of {} from {} to {}, expires at {}",
            id, payload.amount.amount, payload.amount.asset, payload.from, payload.to, expiration
        );
    }
    Ok(id)
}

/// Move the expiration of a pending HTLC, only its sender may do so.
pub fn apply_htlc_extend(
    state: &mut ChainState,
    config: &ChainConfig,
    payload: &HtlcExtendPayload,
) -> Result<TimestampSeconds, OperationError> {
    let now = state.chain_time();
    ensure_feature_active(config, Feature::HtlcExtension, now)?;
    verify_htlc_extend(payload)?;

    let htlc = state.htlcs().require(payload.htlc_id)?;
    let expiration = verify_htlc_extend_record(payload, htlc, &config.htlc, now)?;
    state.ensure_funds(
        payload.update_issuer,
        &[AssetAmount::new(CORE_ASSET, payload.fee)],
    )?;
    state.ensure_can_collect_fee(payload.fee)?;

    state.collect_fee(payload.update_issuer, payload.fee)?;
    state.htlcs_mut().get_mut(payload.htlc_id)?.expiration = expiration;
    state.push_history(payload.update_issuer, OperationKind::HtlcExtend);

    if log::log_enabled!(log::Level::Debug) {
        debug!(
            "HTLC {} extended by {}s, now expires at {}",
            payload.htlc_id, payload.seconds_to_add, expiration
        );
    }
    Ok(expiration)
}

/// Release a pending HTLC to its receiver given the right preimage.
///
/// On a mismatch the record stays pending and redeemable.
pub fn apply_htlc_redeem(
    state: &mut ChainState,
    config: &ChainConfig,
    payload: &HtlcRedeemPayload,
) -> Result<(), OperationError> {
    let now = state.chain_time();
    ensure_feature_active(config, Feature::Htlc, now)?;

    state.require_account(payload.redeemer)?;
    let htlc = state.htlcs().require(payload.htlc_id)?;
    verify_htlc_redeem(payload, htlc, now)?;
    let (from, to, amount) = (htlc.from, htlc.to, htlc.amount);

    state.ensure_funds(payload.redeemer, &[AssetAmount::new(CORE_ASSET, payload.fee)])?;
    state.ensure_can_collect_fee(payload.fee)?;
    state.ensure_can_credit(to, amount)?;

    state.collect_fee(payload.redeemer, payload.fee)?;
    state.credit(to, amount)?;
    let htlc = state.htlcs_mut().get_mut(payload.htlc_id)?;
    htlc.status = HtlcStatus::Redeemed;
    htlc.redeemer = Some(payload.redeemer);

    for account in [from, to, payload.redeemer] {
        state.push_history(account, OperationKind::HtlcRedeemed);
    }

    if log::log_enabled!(log::Level::Debug) {
        debug!(
            "HTLC {} redeemed by {}: {} of {} released to {}",
            payload.htlc_id, payload.redeemer, amount.amount, amount.asset, to
        );
    }
    Ok(())
}
