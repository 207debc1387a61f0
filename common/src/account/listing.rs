// Account listings
//
// Any account may white-list or black-list other accounts. A listing only
// matters when the authorizing account is named as a blacklist authority
// by an asset: the listed account then loses reward eligibility for it.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

use crate::ids::AccountId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AccountListing {
    NoListing,
    WhiteListed,
    BlackListed,
}

/// Listings indexed by (authorizing account, listed account)
#[derive(Debug, Clone, Default)]
pub struct AccountListings {
    listings: BTreeMap<(AccountId, AccountId), AccountListing>,
}

impl AccountListings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a listing, `NoListing` removes any previous entry
    pub fn set(&mut self, authorizing: AccountId, listed: AccountId, listing: AccountListing) {
        match listing {
            AccountListing::NoListing => {
                self.listings.remove(&(authorizing, listed));
            }
            _ => {
                self.listings.insert((authorizing, listed), listing);
            }
        }
    }

    pub fn get(&self, authorizing: AccountId, listed: AccountId) -> AccountListing {
        self.listings
            .get(&(authorizing, listed))
            .copied()
            .unwrap_or(AccountListing::NoListing)
    }

    pub fn is_blacklisted_by(&self, authorizing: AccountId, listed: AccountId) -> bool {
        self.get(authorizing, listed) == AccountListing::BlackListed
    }

    /// Is `listed` black-listed by any of the given authorities
    pub fn is_blacklisted_by_any(&self, authorities: &BTreeSet<AccountId>, listed: AccountId) -> bool {
        authorities
            .iter()
            .any(|authority| self.is_blacklisted_by(*authority, listed))
    }
}
