use log::{debug, info, warn};
use tessel_common::{
    htlc::HtlcStatus,
    ids::HtlcId,
    transaction::{OperationError, OperationKind},
};

use crate::core::state::ChainState;

/// Refund every pending HTLC whose deadline passed, in ascending id order.
///
/// Runs once per block close. The outcome depends only on the records and
/// the chain time. A refund the sender's balance cannot take is skipped and
/// the record stays pending, so a later block retries it. Returns the ids of
/// the expired HTLCs.
pub fn apply_htlc_expiry_sweep(state: &mut ChainState) -> Vec<HtlcId> {
    let now = state.chain_time();
    let due = state.htlcs().due_for_refund(now);
    if due.is_empty() {
        return due;
    }

    let mut expired = Vec::with_capacity(due.len());
    for id in due {
        match refund_expired(state, id) {
            Ok(()) => expired.push(id),
            Err(e) => {
                if log::log_enabled!(log::Level::Warn) {
                    warn!("HTLC {} expired but could not be refunded: {}", id, e);
                }
            }
        }
    }

    if log::log_enabled!(log::Level::Info) {
        info!("Expired {} HTLC(s) at chain time {}", expired.len(), now);
    }
    expired
}

fn refund_expired(state: &mut ChainState, id: HtlcId) -> Result<(), OperationError> {
    let htlc = state.htlcs().require(id)?;
    let (from, amount) = (htlc.from, htlc.amount);
    state.ensure_can_credit(from, amount)?;

    state.credit(from, amount)?;
    state.htlcs_mut().get_mut(id)?.status = HtlcStatus::Expired;
    state.push_history(from, OperationKind::HtlcRefund);

    if log::log_enabled!(log::Level::Debug) {
        debug!(
            "HTLC {} expired, refunded {} of {} to {}",
            id, amount.amount, amount.asset, from
        );
    }
    Ok(())
}
