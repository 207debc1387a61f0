pub mod asset;
pub mod blockchain;
pub mod error;
pub mod fee_sharing;
pub mod htlc;
pub mod state;
pub mod vesting;
