mod history;

pub use history::*;

use std::collections::{BTreeMap, HashMap};

use log::trace;
use tessel_common::{
    account::{Account, AccountListings},
    asset::{AssetAmount, AssetData},
    config::CORE_ASSET,
    ids::{AccountId, AssetId},
    time::TimestampSeconds,
    transaction::{OperationError, OperationKind},
};

use super::{htlc::HtlcRegistry, vesting::VestingStore};

/// In-memory ledger state
///
/// Every mutating method either fails before touching anything or
/// succeeds entirely. Operation handlers run all their checks first and
/// only then call the mutating methods.
#[derive(Debug, Clone)]
pub struct ChainState {
    height: u64,
    chain_time: TimestampSeconds,
    accounts: BTreeMap<AccountId, Account>,
    account_names: HashMap<String, AccountId>,
    next_account_id: AccountId,
    assets: BTreeMap<AssetId, AssetData>,
    next_asset_id: AssetId,
    balances: BTreeMap<(AccountId, AssetId), u64>,
    listings: AccountListings,
    htlcs: HtlcRegistry,
    vesting: VestingStore,
    history: BTreeMap<AccountId, Vec<HistoryEntry>>,
    // Operation fees collected by the network, in the core asset
    fee_pool: u64,
}

impl ChainState {
    pub fn new(genesis_timestamp: TimestampSeconds) -> Self {
        Self {
            height: 0,
            chain_time: genesis_timestamp,
            accounts: BTreeMap::new(),
            account_names: HashMap::new(),
            next_account_id: AccountId::default(),
            assets: BTreeMap::new(),
            next_asset_id: AssetId::default(),
            balances: BTreeMap::new(),
            listings: AccountListings::new(),
            htlcs: HtlcRegistry::new(),
            vesting: VestingStore::new(),
            history: BTreeMap::new(),
            fee_pool: 0,
        }
    }

    pub fn height(&self) -> u64 {
        self.height
    }

    pub fn chain_time(&self) -> TimestampSeconds {
        self.chain_time
    }

    pub(crate) fn set_head(&mut self, height: u64, chain_time: TimestampSeconds) {
        self.height = height;
        self.chain_time = chain_time;
    }

    // ===== Accounts =====

    pub fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.get(&id)
    }

    pub fn require_account(&self, id: AccountId) -> Result<&Account, OperationError> {
        self.account(id).ok_or(OperationError::AccountNotFound(id))
    }

    pub fn account_by_name(&self, name: &str) -> Option<&Account> {
        self.account_names
            .get(name)
            .and_then(|id| self.accounts.get(id))
    }

    pub fn next_account_id(&self) -> AccountId {
        self.next_account_id
    }

    pub(crate) fn insert_account(&mut self, mut account: Account) -> AccountId {
        let id = self.next_account_id;
        self.next_account_id = id.next();
        account.id = id;
        self.account_names.insert(account.name.clone(), id);
        self.accounts.insert(id, account);
        id
    }

    // ===== Assets =====

    pub fn asset(&self, id: AssetId) -> Option<&AssetData> {
        self.assets.get(&id)
    }

    pub fn require_asset(&self, id: AssetId) -> Result<&AssetData, OperationError> {
        self.asset(id).ok_or(OperationError::AssetNotFound(id))
    }

    pub(crate) fn asset_mut(&mut self, id: AssetId) -> Result<&mut AssetData, OperationError> {
        self.assets
            .get_mut(&id)
            .ok_or(OperationError::AssetNotFound(id))
    }

    pub fn asset_by_symbol(&self, symbol: &str) -> Option<&AssetData> {
        self.assets.values().find(|asset| asset.symbol == symbol)
    }

    pub fn next_asset_id(&self) -> AssetId {
        self.next_asset_id
    }

    pub(crate) fn insert_asset(&mut self, mut asset: AssetData) -> AssetId {
        let id = self.next_asset_id;
        self.next_asset_id = id.next();
        asset.id = id;
        self.assets.insert(id, asset);
        id
    }

    // ===== Balances =====

    pub fn balance(&self, account: AccountId, asset: AssetId) -> u64 {
        self.balances.get(&(account, asset)).copied().unwrap_or(0)
    }

    /// Check `account` holds every amount of `required` at once
    /// Amounts of the same asset are summed
    pub fn ensure_funds(
        &self,
        account: AccountId,
        required: &[AssetAmount],
    ) -> Result<(), OperationError> {
        let mut totals: BTreeMap<AssetId, u64> = BTreeMap::new();
        for amount in required {
            let total = totals.entry(amount.asset).or_insert(0);
            *total = total
                .checked_add(amount.amount)
                .ok_or(OperationError::Overflow)?;
        }

        for (asset, required) in totals {
            let available = self.balance(account, asset);
            if available < required {
                return Err(OperationError::InsufficientFunds {
                    available,
                    required,
                });
            }
        }
        Ok(())
    }

    /// Check `amount` can be credited to `account` without overflow
    pub fn ensure_can_credit(
        &self,
        account: AccountId,
        amount: AssetAmount,
    ) -> Result<(), OperationError> {
        self.balance(account, amount.asset)
            .checked_add(amount.amount)
            .ok_or(OperationError::Overflow)?;
        Ok(())
    }

    pub(crate) fn debit(
        &mut self,
        account: AccountId,
        amount: AssetAmount,
    ) -> Result<u64, OperationError> {
        let available = self.balance(account, amount.asset);
        let balance = available
            .checked_sub(amount.amount)
            .ok_or(OperationError::InsufficientFunds {
                available,
                required: amount.amount,
            })?;
        self.balances.insert((account, amount.asset), balance);

        if log::log_enabled!(log::Level::Trace) {
            trace!(
                "Debited {} of {} from {}, balance {}",
                amount.amount,
                amount.asset,
                account,
                balance
            );
        }
        Ok(balance)
    }

    pub(crate) fn credit(
        &mut self,
        account: AccountId,
        amount: AssetAmount,
    ) -> Result<u64, OperationError> {
        let balance = self
            .balance(account, amount.asset)
            .checked_add(amount.amount)
            .ok_or(OperationError::Overflow)?;
        self.balances.insert((account, amount.asset), balance);

        if log::log_enabled!(log::Level::Trace) {
            trace!(
                "Credited {} of {} to {}, balance {}",
                amount.amount,
                amount.asset,
                account,
                balance
            );
        }
        Ok(balance)
    }

    // ===== Fees =====

    pub fn fee_pool(&self) -> u64 {
        self.fee_pool
    }

    /// Check the fee pool can take `fee`
    pub fn ensure_can_collect_fee(&self, fee: u64) -> Result<(), OperationError> {
        self.fee_pool
            .checked_add(fee)
            .ok_or(OperationError::Overflow)?;
        Ok(())
    }

    /// Move an operation fee from its payer to the network fee pool
    pub(crate) fn collect_fee(&mut self, payer: AccountId, fee: u64) -> Result<(), OperationError> {
        if fee == 0 {
            return Ok(());
        }
        self.ensure_can_collect_fee(fee)?;
        self.debit(payer, AssetAmount::new(CORE_ASSET, fee))?;
        self.fee_pool += fee;
        Ok(())
    }

    // ===== Listings, HTLCs and vesting =====

    pub fn listings(&self) -> &AccountListings {
        &self.listings
    }

    pub(crate) fn listings_mut(&mut self) -> &mut AccountListings {
        &mut self.listings
    }

    pub fn htlcs(&self) -> &HtlcRegistry {
        &self.htlcs
    }

    pub(crate) fn htlcs_mut(&mut self) -> &mut HtlcRegistry {
        &mut self.htlcs
    }

    pub fn vesting(&self) -> &VestingStore {
        &self.vesting
    }

    pub(crate) fn vesting_mut(&mut self) -> &mut VestingStore {
        &mut self.vesting
    }

    // ===== History =====

    pub fn history(&self, account: AccountId) -> &[HistoryEntry] {
        self.history
            .get(&account)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub(crate) fn push_history(&mut self, account: AccountId, kind: OperationKind) {
        self.history
            .entry(account)
            .or_default()
            .push(HistoryEntry::new(self.height, kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: AccountId = AccountId::new(0);

    #[test]
    fn test_ensure_funds_sums_same_asset() {
        let mut state = ChainState::new(0);
        state.credit(ALICE, AssetAmount::new(CORE_ASSET, 10)).unwrap();

        assert!(state
            .ensure_funds(
                ALICE,
                &[
                    AssetAmount::new(CORE_ASSET, 4),
                    AssetAmount::new(CORE_ASSET, 6)
                ]
            )
            .is_ok());
        assert_eq!(
            state.ensure_funds(
                ALICE,
                &[
                    AssetAmount::new(CORE_ASSET, 4),
                    AssetAmount::new(CORE_ASSET, 7)
                ]
            ),
            Err(OperationError::InsufficientFunds {
                available: 10,
                required: 11
            })
        );
    }

    #[test]
    fn test_debit_leaves_balance_on_failure() {
        let mut state = ChainState::new(0);
        state.credit(ALICE, AssetAmount::new(CORE_ASSET, 3)).unwrap();
        assert!(state.debit(ALICE, AssetAmount::new(CORE_ASSET, 4)).is_err());
        assert_eq!(state.balance(ALICE, CORE_ASSET), 3);
    }

    #[test]
    fn test_collect_fee() {
        let mut state = ChainState::new(0);
        state.credit(ALICE, AssetAmount::new(CORE_ASSET, 3)).unwrap();
        state.collect_fee(ALICE, 2).unwrap();
        assert_eq!(state.fee_pool(), 2);
        assert_eq!(state.balance(ALICE, CORE_ASSET), 1);
    }
}
