// Asset options and account listings
//
// Issuers configure the market fee and the reward options of their asset.
// Listings made by an account only matter for assets naming that account
// as a blacklist authority.

use log::debug;
use tessel_common::{
    asset::AssetAmount,
    config::CORE_ASSET,
    hard_fork::Feature,
    transaction::{
        verify::verify_asset_update,
        AccountWhitelistPayload, AssetUpdatePayload, OperationError, OperationKind,
    },
};

use crate::{config::ChainConfig, core::state::ChainState};

/// Patch the options of an asset, only its issuer may do so.
pub fn apply_asset_update(
    state: &mut ChainState,
    config: &ChainConfig,
    payload: &AssetUpdatePayload,
) -> Result<(), OperationError> {
    let sharing_active = config
        .activations
        .is_active(Feature::MarketFeeSharing, state.chain_time());
    let asset = state.require_asset(payload.asset_to_update)?;
    let options = verify_asset_update(payload, asset, sharing_active)?;
    state.ensure_funds(payload.issuer, &[AssetAmount::new(CORE_ASSET, payload.fee)])?;
    state.ensure_can_collect_fee(payload.fee)?;

    state.collect_fee(payload.issuer, payload.fee)?;
    state.asset_mut(payload.asset_to_update)?.options = options;
    state.push_history(payload.issuer, OperationKind::AssetUpdate);

    if log::log_enabled!(log::Level::Debug) {
        debug!("Asset {} options updated by {}", payload.asset_to_update, payload.issuer);
    }
    Ok(())
}

/// Record or clear the listing of an account.
pub fn apply_account_whitelist(
    state: &mut ChainState,
    payload: &AccountWhitelistPayload,
) -> Result<(), OperationError> {
    state.require_account(payload.authorizing_account)?;
    state.require_account(payload.account_to_list)?;
    state.ensure_funds(
        payload.authorizing_account,
        &[AssetAmount::new(CORE_ASSET, payload.fee)],
    )?;
    state.ensure_can_collect_fee(payload.fee)?;

    state.collect_fee(payload.authorizing_account, payload.fee)?;
    state.listings_mut().set(
        payload.authorizing_account,
        payload.account_to_list,
        payload.new_listing,
    );
    state.push_history(payload.authorizing_account, OperationKind::AccountWhitelist);

    if log::log_enabled!(log::Level::Debug) {
        debug!(
            "{} set listing of {} to {}",
            payload.authorizing_account, payload.account_to_list, payload.new_listing
        );
    }
    Ok(())
}
