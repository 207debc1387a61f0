use crate::{
    crypto::verify_preimage,
    htlc::{HtlcParameters, HtlcRecord},
    time::TimestampSeconds,
    transaction::{HtlcCreatePayload, HtlcExtendPayload, HtlcRedeemPayload, OperationError},
};

/// Verify HTLC create payload (stateless).
pub fn verify_htlc_create(
    payload: &HtlcCreatePayload,
    params: &HtlcParameters,
) -> Result<(), OperationError> {
    if payload.amount.is_zero() {
        return Err(OperationError::InvalidAmount);
    }
    if payload.claim_period_seconds == 0 {
        return Err(OperationError::InvalidPeriod);
    }
    if payload.claim_period_seconds > params.max_timeout_secs {
        return Err(OperationError::ClaimPeriodTooLong {
            requested: payload.claim_period_seconds,
            max: params.max_timeout_secs,
        });
    }
    if payload.preimage_size > params.max_preimage_size {
        return Err(OperationError::PreimageTooLarge {
            requested: payload.preimage_size,
            max: params.max_preimage_size,
        });
    }
    payload.preimage_hash.validate()?;
    Ok(())
}

/// Verify HTLC extend payload (stateless).
pub fn verify_htlc_extend(payload: &HtlcExtendPayload) -> Result<(), OperationError> {
    if payload.seconds_to_add == 0 {
        return Err(OperationError::InvalidPeriod);
    }
    Ok(())
}

/// Verify HTLC extend against the stored record (read-only).
/// Returns the new expiration.
pub fn verify_htlc_extend_record(
    payload: &HtlcExtendPayload,
    htlc: &HtlcRecord,
    params: &HtlcParameters,
    now: TimestampSeconds,
) -> Result<TimestampSeconds, OperationError> {
    if payload.update_issuer != htlc.from {
        return Err(OperationError::Unauthorized(payload.update_issuer));
    }
    if !htlc.is_redeemable(now) {
        return Err(OperationError::HtlcNotPending(htlc.id));
    }
    let requested = htlc
        .lock_duration_after(payload.seconds_to_add)
        .ok_or(OperationError::Overflow)?;
    if requested > params.max_timeout_secs {
        return Err(OperationError::ExtensionTooLarge {
            requested,
            max: params.max_timeout_secs,
        });
    }
    Ok(htlc.expiration + payload.seconds_to_add)
}

/// Verify HTLC redeem against the stored record (read-only).
pub fn verify_htlc_redeem(
    payload: &HtlcRedeemPayload,
    htlc: &HtlcRecord,
    now: TimestampSeconds,
) -> Result<(), OperationError> {
    if !htlc.is_redeemable(now) {
        return Err(OperationError::HtlcNotPending(htlc.id));
    }
    verify_preimage(&htlc.preimage_hash, htlc.preimage_size, &payload.preimage)?;
    Ok(())
}
