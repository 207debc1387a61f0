use crate::{
    asset::{AssetData, AssetOptions},
    hard_fork::Feature,
    transaction::{AssetUpdatePayload, OperationError},
};

/// Verify asset update against the stored asset (read-only).
/// Returns the options the asset will carry once the update is applied.
pub fn verify_asset_update(
    payload: &AssetUpdatePayload,
    asset: &AssetData,
    market_fee_sharing_active: bool,
) -> Result<AssetOptions, OperationError> {
    if payload.issuer != asset.issuer {
        return Err(OperationError::Unauthorized(payload.issuer));
    }
    if !market_fee_sharing_active && payload.new_options.uses_market_fee_sharing() {
        return Err(OperationError::FeatureNotActive(Feature::MarketFeeSharing));
    }

    let mut options = asset.options.clone();
    options.apply(&payload.new_options);
    options.validate(market_fee_sharing_active)?;
    Ok(options)
}
