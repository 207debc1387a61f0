use serde::{Deserialize, Serialize};

use crate::{
    asset::AssetAmount,
    crypto::PreimageHash,
    ids::{AccountId, HtlcId},
    time::DurationSeconds,
};

/// Lock funds until a preimage is presented or the claim period ends.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct HtlcCreatePayload {
    /// Account locking the funds and paying the fee.
    pub from: AccountId,
    /// Account credited on redemption.
    pub to: AccountId,
    pub amount: AssetAmount,
    pub preimage_hash: PreimageHash,
    /// Exact size in bytes of the expected preimage.
    pub preimage_size: u64,
    /// Seconds after creation at which the HTLC expires.
    pub claim_period_seconds: DurationSeconds,
    /// Fee in the core asset.
    pub fee: u64,
}

/// Push the expiration of a pending HTLC further in time.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct HtlcExtendPayload {
    pub htlc_id: HtlcId,
    /// Must be the account that created the HTLC.
    pub update_issuer: AccountId,
    pub seconds_to_add: DurationSeconds,
    pub fee: u64,
}

/// Present the preimage of a pending HTLC.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct HtlcRedeemPayload {
    pub htlc_id: HtlcId,
    /// Anyone knowing the preimage may redeem, funds still go to the receiver.
    pub redeemer: AccountId,
    #[serde(with = "hex::serde")]
    pub preimage: Vec<u8>,
    pub fee: u64,
}
