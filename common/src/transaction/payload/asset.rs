use serde::{Deserialize, Serialize};

use crate::{
    account::AccountListing,
    asset::AssetOptionsUpdate,
    ids::{AccountId, AssetId},
};

/// Update the options of an asset, only the issuer may do so.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AssetUpdatePayload {
    pub issuer: AccountId,
    pub asset_to_update: AssetId,
    pub new_options: AssetOptionsUpdate,
    pub fee: u64,
}

/// White-list or black-list an account on behalf of `authorizing_account`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AccountWhitelistPayload {
    pub authorizing_account: AccountId,
    pub account_to_list: AccountId,
    pub new_listing: AccountListing,
    pub fee: u64,
}
