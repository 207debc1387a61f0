// Allow some clippy lints for protocol types
#![allow(clippy::module_inception)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::upper_case_acronyms)]

pub mod account;
pub mod asset;
pub mod crypto;
pub mod transaction;

pub mod config;
pub mod fee_sharing;
pub mod hard_fork;
pub mod htlc;
pub mod ids;
pub mod network;
pub mod time;
pub mod vesting;

// Compile-time assertion helper used by the configuration constants
#[macro_export]
macro_rules! static_assert {
    ($cond:expr, $msg:expr $(,)?) => {
        const _: () = assert!($cond, $msg);
    };
}
