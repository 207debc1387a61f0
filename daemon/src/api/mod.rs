// Read-only queries over the ledger state
//
// Listings walk records in ascending id order starting at `start` inclusive.
// Limits above the maximum are clamped, an out of range start yields an
// empty list. No query ever fails.

use tessel_common::{
    account::Account,
    asset::AssetData,
    config::MAX_HTLC_QUERY_LIMIT,
    htlc::HtlcRecord,
    ids::{AccountId, AssetId, HtlcId, VestingBalanceId},
    vesting::VestingBalance,
};

use crate::core::state::{ChainState, HistoryEntry};

pub struct QueryApi<'a> {
    state: &'a ChainState,
}

impl<'a> QueryApi<'a> {
    pub fn new(state: &'a ChainState) -> Self {
        Self { state }
    }

    pub fn get_htlc(&self, id: HtlcId) -> Option<HtlcRecord> {
        self.state.htlcs().get(id).cloned()
    }

    pub fn list_htlc(&self, start: HtlcId, limit: usize) -> Vec<HtlcRecord> {
        self.state
            .htlcs()
            .iter_from(start)
            .take(limit.min(MAX_HTLC_QUERY_LIMIT))
            .cloned()
            .collect()
    }

    pub fn list_htlc_by_sender(
        &self,
        sender: AccountId,
        start: HtlcId,
        limit: usize,
    ) -> Vec<HtlcRecord> {
        self.state
            .htlcs()
            .iter_from_sender(sender, start)
            .take(limit.min(MAX_HTLC_QUERY_LIMIT))
            .cloned()
            .collect()
    }

    pub fn list_htlc_by_receiver(
        &self,
        receiver: AccountId,
        start: HtlcId,
        limit: usize,
    ) -> Vec<HtlcRecord> {
        self.state
            .htlcs()
            .iter_from_receiver(receiver, start)
            .take(limit.min(MAX_HTLC_QUERY_LIMIT))
            .cloned()
            .collect()
    }

    pub fn get_vesting_balance(&self, id: VestingBalanceId) -> Option<VestingBalance> {
        self.state.vesting().get(id).cloned()
    }

    pub fn get_vesting_balances(&self, owner: AccountId) -> Vec<VestingBalance> {
        self.state.vesting().by_owner(owner).cloned().collect()
    }

    /// Market fee rewards of `owner` for `asset` not yet claimed
    pub fn get_market_fee_reward(&self, owner: AccountId, asset: AssetId) -> u64 {
        self.state
            .vesting()
            .market_fee_sharing_balance(owner, asset)
            .map(|vb| vb.balance.amount)
            .unwrap_or(0)
    }

    pub fn get_account_history(&self, account: AccountId) -> Vec<HistoryEntry> {
        self.state.history(account).to_vec()
    }

    pub fn get_balance(&self, account: AccountId, asset: AssetId) -> u64 {
        self.state.balance(account, asset)
    }

    pub fn get_account(&self, id: AccountId) -> Option<Account> {
        self.state.account(id).cloned()
    }

    pub fn get_asset(&self, id: AssetId) -> Option<AssetData> {
        self.state.asset(id).cloned()
    }

    /// Market fees kept by the network for `asset`
    pub fn get_accumulated_fees(&self, asset: AssetId) -> u64 {
        self.state
            .asset(asset)
            .map(|asset| asset.accumulated_fees)
            .unwrap_or(0)
    }

    pub fn get_fee_pool(&self) -> u64 {
        self.state.fee_pool()
    }
}
