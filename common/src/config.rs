use crate::{
    ids::{AccountId, AssetId},
    static_assert,
    time::DurationSeconds,
};

pub const VERSION: &str = env!("BUILD_VERSION");

// Native core asset, used to pay operation fees
pub const CORE_ASSET: AssetId = AssetId::new(0);
pub const CORE_ASSET_SYMBOL: &str = "TSL";

// Account created at genesis, issuer of the core asset
pub const COMMITTEE_ACCOUNT: AccountId = AccountId::new(0);
pub const COMMITTEE_ACCOUNT_NAME: &str = "committee-account";

// 8 decimals numbers
pub const COIN_DECIMALS: u8 = 8;
// 100 000 000 to represent 1 coin
pub const COIN_VALUE: u64 = 10u64.pow(COIN_DECIMALS as u32);

// Fixed point percentages: 10000 = 100%, 100 = 1%
pub const HUNDRED_PERCENT: u16 = 10_000;
pub const ONE_PERCENT: u16 = 100;

// ===== HTLC =====

// Longest total lock duration of an HTLC, including extensions (28 days)
pub const DEFAULT_HTLC_MAX_TIMEOUT_SECS: DurationSeconds = 60 * 60 * 24 * 28;
// Largest preimage an HTLC may commit to
pub const DEFAULT_HTLC_MAX_PREIMAGE_SIZE: u64 = 1024 * 10;

// ===== Fees =====

pub const FEE_HTLC_CREATE: u64 = COIN_VALUE;
pub const FEE_HTLC_CREATE_PER_DAY: u64 = COIN_VALUE / 10;
pub const FEE_HTLC_EXTEND: u64 = COIN_VALUE;
pub const FEE_HTLC_EXTEND_PER_DAY: u64 = COIN_VALUE / 10;
pub const FEE_HTLC_REDEEM: u64 = COIN_VALUE;
pub const FEE_HTLC_REDEEM_PER_KB: u64 = COIN_VALUE / 10;
pub const FEE_ASSET_UPDATE: u64 = COIN_VALUE * 5;
pub const FEE_ACCOUNT_WHITELIST: u64 = COIN_VALUE / 2;
pub const FEE_VESTING_BALANCE_CREATE: u64 = COIN_VALUE;
pub const FEE_VESTING_BALANCE_WITHDRAW: u64 = COIN_VALUE / 10;

// 1 KB = 1024 bytes
pub const BYTES_PER_KB: u64 = 1024;

// ===== Queries =====

// Maximum number of HTLC records returned by a single listing query
pub const MAX_HTLC_QUERY_LIMIT: usize = 100;

// Static checks
static_assert!(
    ONE_PERCENT as u32 * 100 == HUNDRED_PERCENT as u32,
    "One percent must be a hundredth of the full scale"
);
static_assert!(
    DEFAULT_HTLC_MAX_TIMEOUT_SECS > 0,
    "HTLC max timeout must allow at least one second"
);
