// Stateless and read-only operation checks
//
// Each `verify_*` function only reads its inputs. The ledger runs them all
// before mutating anything, which keeps a rejected operation free of side
// effects.

mod asset;
mod htlc;
mod vesting;

pub use asset::*;
pub use htlc::*;
pub use vesting::*;

use super::{FeeSchedule, Operation, OperationError};

/// Check the declared fee covers the schedule, returns the required fee
pub fn verify_fee(schedule: &FeeSchedule, operation: &Operation) -> Result<u64, OperationError> {
    let required = schedule.calculate_fee(operation);
    let provided = operation.fee();
    if provided < required {
        return Err(OperationError::InsufficientFee { required, provided });
    }
    Ok(required)
}
