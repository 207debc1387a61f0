use serde::{Deserialize, Serialize};
use strum::Display;

use crate::{
    asset::AssetAmount,
    config::{DEFAULT_HTLC_MAX_PREIMAGE_SIZE, DEFAULT_HTLC_MAX_TIMEOUT_SECS},
    crypto::PreimageHash,
    ids::{AccountId, HtlcId},
    time::{DurationSeconds, TimestampSeconds},
};

/// HTLC state.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum HtlcStatus {
    /// Funds locked, waiting for the preimage.
    Pending,
    /// Preimage accepted, funds released to the receiver.
    Redeemed,
    /// Deadline passed without redemption, funds refunded to the sender.
    Expired,
}

impl HtlcStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, HtlcStatus::Pending)
    }
}

/// Chain-wide HTLC limits.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HtlcParameters {
    /// Longest total lock duration, extensions included.
    pub max_timeout_secs: DurationSeconds,
    /// Largest preimage an HTLC may commit to.
    pub max_preimage_size: u64,
}

impl Default for HtlcParameters {
    fn default() -> Self {
        Self {
            max_timeout_secs: DEFAULT_HTLC_MAX_TIMEOUT_SECS,
            max_preimage_size: DEFAULT_HTLC_MAX_PREIMAGE_SIZE,
        }
    }
}

/// On-chain HTLC record.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HtlcRecord {
    pub id: HtlcId,
    /// Account that locked the funds.
    pub from: AccountId,
    /// Account credited on redemption.
    pub to: AccountId,
    /// Locked amount, immutable after creation.
    pub amount: AssetAmount,
    /// Committed hash of the preimage.
    pub preimage_hash: PreimageHash,
    /// Exact byte length the preimage must have.
    pub preimage_size: u64,
    /// Chain time of the creating block.
    pub created_at: TimestampSeconds,
    /// Chain time at which the HTLC stops being redeemable.
    pub expiration: TimestampSeconds,
    /// Account that presented the preimage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redeemer: Option<AccountId>,
    pub status: HtlcStatus,
}

impl HtlcRecord {
    /// Redeemable at `now`: pending and before the deadline.
    pub fn is_redeemable(&self, now: TimestampSeconds) -> bool {
        self.status == HtlcStatus::Pending && now < self.expiration
    }

    /// Due for refund by the expiry sweep at `now`.
    pub fn is_due_for_refund(&self, now: TimestampSeconds) -> bool {
        self.status == HtlcStatus::Pending && self.expiration <= now
    }

    /// Total lock duration if the expiration moved by `seconds_to_add`.
    pub fn lock_duration_after(&self, seconds_to_add: DurationSeconds) -> Option<DurationSeconds> {
        self.expiration
            .checked_add(seconds_to_add)
            .map(|expiration| expiration - self.created_at)
    }
}
