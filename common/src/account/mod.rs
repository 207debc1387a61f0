// Accounts and account listings
//
// Accounts are owned by the ledger substrate. The reward engine only
// consumes the registrar/referrer linkage stored here.

mod listing;

pub use listing::*;

use serde::{Deserialize, Serialize};

use crate::{config::HUNDRED_PERCENT, ids::AccountId};

/// An account with its sponsorship linkage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    /// Account that paid for the registration
    pub registrar: AccountId,
    /// Account that referred the user
    pub referrer: AccountId,
    /// Share of routed rewards that goes to the referrer (10000 = 100%)
    /// The registrar implicitly receives the complement
    pub referrer_rewards_percentage: u16,
}

impl Account {
    /// Create a new account, the referrer share is capped to 100%
    pub fn new(
        id: AccountId,
        name: impl Into<String>,
        registrar: AccountId,
        referrer: AccountId,
        referrer_rewards_percentage: u16,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            registrar,
            referrer,
            referrer_rewards_percentage: referrer_rewards_percentage.min(HUNDRED_PERCENT),
        }
    }
}
