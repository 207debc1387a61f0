use crate::{
    time::TimestampSeconds,
    transaction::{OperationError, VestingBalanceCreatePayload, VestingBalanceWithdrawPayload},
    vesting::{VestingBalance, VestingPolicyInitializer},
};

/// Verify vesting balance create payload (stateless).
pub fn verify_vesting_balance_create(
    payload: &VestingBalanceCreatePayload,
) -> Result<(), OperationError> {
    if payload.amount.is_zero() {
        return Err(OperationError::InvalidAmount);
    }
    if let VestingPolicyInitializer::Linear {
        vesting_cliff_seconds,
        vesting_duration_seconds,
        ..
    } = payload.policy
    {
        if vesting_cliff_seconds > vesting_duration_seconds {
            return Err(OperationError::InvalidPeriod);
        }
    }
    Ok(())
}

/// Verify vesting balance withdraw against the stored balance (read-only).
pub fn verify_vesting_balance_withdraw(
    payload: &VestingBalanceWithdrawPayload,
    balance: &VestingBalance,
    now: TimestampSeconds,
) -> Result<(), OperationError> {
    if payload.owner != balance.owner {
        return Err(OperationError::Unauthorized(payload.owner));
    }
    if payload.amount.asset != balance.balance.asset {
        return Err(OperationError::AssetMismatch {
            expected: balance.balance.asset,
            got: payload.amount.asset,
        });
    }
    if payload.amount.is_zero() {
        return Err(OperationError::InvalidAmount);
    }
    let available = balance.allowed_withdraw(now);
    if payload.amount.amount > available {
        return Err(OperationError::InsufficientVested {
            available,
            requested: payload.amount.amount,
        });
    }
    Ok(())
}
