//! Feature activation (hard fork) types.
//!
//! Features of the ledger core are switched on at a fixed point in chain
//! time. The activation schedule is plain configuration handed to the
//! ledger: gating depends on nothing but the schedule and the chain time.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter};

use crate::time::TimestampSeconds;

/// Protocol features gated behind an activation point
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Feature {
    /// HTLC create and redeem
    Htlc,
    /// Extending the expiration of a pending HTLC
    HtlcExtension,
    /// Market fee rewards for registrars and referrers
    MarketFeeSharing,
}

/// Condition under which a feature becomes active
///
/// ```
/// use tessel_common::hard_fork::ForkCondition;
///
/// assert!(ForkCondition::Timestamp(100).is_satisfied(100));
/// assert!(!ForkCondition::Timestamp(100).is_satisfied(99));
/// assert!(!ForkCondition::Never.is_satisfied(u64::MAX));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForkCondition {
    /// Active from genesis
    Always,
    /// Activate at a specific chain time (Unix timestamp in seconds)
    Timestamp(TimestampSeconds),
    /// Never activate this feature
    /// Used for features that are disabled on a network
    Never,
}

impl ForkCondition {
    /// Check if this fork condition is satisfied at the given chain time
    pub fn is_satisfied(&self, chain_time: TimestampSeconds) -> bool {
        match self {
            ForkCondition::Always => true,
            ForkCondition::Timestamp(activation) => chain_time >= *activation,
            ForkCondition::Never => false,
        }
    }

    pub fn is_never(&self) -> bool {
        matches!(self, ForkCondition::Never)
    }
}

impl fmt::Display for ForkCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForkCondition::Always => write!(f, "Always"),
            ForkCondition::Timestamp(ts) => write!(f, "Timestamp({})", ts),
            ForkCondition::Never => write!(f, "Never"),
        }
    }
}

/// A hard fork: one feature and when it activates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HardFork {
    pub feature: Feature,
    pub condition: ForkCondition,
    /// Description of changes in this hard fork
    pub changelog: &'static str,
}

/// Activation point of every gated feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationSchedule {
    pub htlc: ForkCondition,
    pub htlc_extension: ForkCondition,
    pub market_fee_sharing: ForkCondition,
}

impl ActivationSchedule {
    /// Every feature active from genesis
    pub const fn all_active() -> Self {
        Self {
            htlc: ForkCondition::Always,
            htlc_extension: ForkCondition::Always,
            market_fee_sharing: ForkCondition::Always,
        }
    }

    /// Build a schedule from a list of hard forks
    /// Features missing from the list never activate
    pub fn from_hard_forks(hard_forks: &[HardFork]) -> Self {
        let mut schedule = Self {
            htlc: ForkCondition::Never,
            htlc_extension: ForkCondition::Never,
            market_fee_sharing: ForkCondition::Never,
        };
        for hard_fork in hard_forks {
            *schedule.condition_mut(hard_fork.feature) = hard_fork.condition;
        }
        schedule
    }

    pub fn condition(&self, feature: Feature) -> ForkCondition {
        match feature {
            Feature::Htlc => self.htlc,
            Feature::HtlcExtension => self.htlc_extension,
            Feature::MarketFeeSharing => self.market_fee_sharing,
        }
    }

    fn condition_mut(&mut self, feature: Feature) -> &mut ForkCondition {
        match feature {
            Feature::Htlc => &mut self.htlc,
            Feature::HtlcExtension => &mut self.htlc_extension,
            Feature::MarketFeeSharing => &mut self.market_fee_sharing,
        }
    }

    /// Activation gate: is `feature` active at `chain_time`
    #[inline]
    pub fn is_active(&self, feature: Feature, chain_time: TimestampSeconds) -> bool {
        self.condition(feature).is_satisfied(chain_time)
    }
}

impl Default for ActivationSchedule {
    fn default() -> Self {
        Self::all_active()
    }
}
