// Operation fees
//
// HTLC fees scale with the resources an operation holds: create and extend
// pay per started day of lock time, redeem pays per started kilobyte of
// preimage. Every other operation pays a flat fee.

use serde::{Deserialize, Serialize};

use super::Operation;
use crate::{
    config::*,
    time::{days_rounded_up, DurationSeconds},
};

/// Base fee plus a fee per started day
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PerDayFee {
    pub fee: u64,
    pub fee_per_day: u64,
}

impl PerDayFee {
    pub fn calculate(&self, seconds: DurationSeconds) -> u64 {
        self.fee_per_day
            .saturating_mul(days_rounded_up(seconds))
            .saturating_add(self.fee)
    }
}

/// Base fee plus a fee per started kilobyte
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PerKbFee {
    pub fee: u64,
    pub fee_per_kb: u64,
}

impl PerKbFee {
    pub fn calculate(&self, bytes: u64) -> u64 {
        self.fee_per_kb
            .saturating_mul(bytes.div_ceil(BYTES_PER_KB))
            .saturating_add(self.fee)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FeeSchedule {
    pub htlc_create: PerDayFee,
    pub htlc_extend: PerDayFee,
    pub htlc_redeem: PerKbFee,
    pub asset_update: u64,
    pub account_whitelist: u64,
    pub vesting_balance_create: u64,
    pub vesting_balance_withdraw: u64,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            htlc_create: PerDayFee {
                fee: FEE_HTLC_CREATE,
                fee_per_day: FEE_HTLC_CREATE_PER_DAY,
            },
            htlc_extend: PerDayFee {
                fee: FEE_HTLC_EXTEND,
                fee_per_day: FEE_HTLC_EXTEND_PER_DAY,
            },
            htlc_redeem: PerKbFee {
                fee: FEE_HTLC_REDEEM,
                fee_per_kb: FEE_HTLC_REDEEM_PER_KB,
            },
            asset_update: FEE_ASSET_UPDATE,
            account_whitelist: FEE_ACCOUNT_WHITELIST,
            vesting_balance_create: FEE_VESTING_BALANCE_CREATE,
            vesting_balance_withdraw: FEE_VESTING_BALANCE_WITHDRAW,
        }
    }
}

impl FeeSchedule {
    /// A schedule where every operation is free
    pub fn zero() -> Self {
        Self {
            htlc_create: PerDayFee {
                fee: 0,
                fee_per_day: 0,
            },
            htlc_extend: PerDayFee {
                fee: 0,
                fee_per_day: 0,
            },
            htlc_redeem: PerKbFee {
                fee: 0,
                fee_per_kb: 0,
            },
            asset_update: 0,
            account_whitelist: 0,
            vesting_balance_create: 0,
            vesting_balance_withdraw: 0,
        }
    }

    /// Minimum fee required by an operation
    pub fn calculate_fee(&self, operation: &Operation) -> u64 {
        match operation {
            Operation::HtlcCreate(p) => self.htlc_create.calculate(p.claim_period_seconds),
            Operation::HtlcExtend(p) => self.htlc_extend.calculate(p.seconds_to_add),
            Operation::HtlcRedeem(p) => self.htlc_redeem.calculate(p.preimage.len() as u64),
            Operation::AssetUpdate(_) => self.asset_update,
            Operation::AccountWhitelist(_) => self.account_whitelist,
            Operation::VestingBalanceCreate(_) => self.vesting_balance_create,
            Operation::VestingBalanceWithdraw(_) => self.vesting_balance_withdraw,
        }
    }
}
