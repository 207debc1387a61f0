mod asset;
mod htlc;
mod vesting;

pub use asset::*;
pub use htlc::*;
pub use vesting::*;
