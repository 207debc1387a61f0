mod htlc;

pub use htlc::*;
