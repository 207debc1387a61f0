// Vesting store
//
// Owns every vesting balance. Market fee rewards are kept in at most one
// `MarketFeeSharing` balance per (owner, asset), indexed so the fee
// distribution engine can find it without scanning.

mod apply;

pub use apply::*;

use std::collections::BTreeMap;

use log::{debug, trace};
use tessel_common::{
    asset::AssetAmount,
    ids::{AccountId, AssetId, VestingBalanceId},
    time::TimestampSeconds,
    transaction::{verify::verify_vesting_balance_withdraw, OperationError, VestingBalanceWithdrawPayload},
    vesting::{VestingBalance, VestingBalanceType, VestingPolicy},
};

#[derive(Debug, Clone, Default)]
pub struct VestingStore {
    balances: BTreeMap<VestingBalanceId, VestingBalance>,
    market_fee_sharing: BTreeMap<(AccountId, AssetId), VestingBalanceId>,
    next_id: VestingBalanceId,
}

impl VestingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: VestingBalanceId) -> Option<&VestingBalance> {
        self.balances.get(&id)
    }

    pub fn require(&self, id: VestingBalanceId) -> Result<&VestingBalance, OperationError> {
        self.get(id)
            .ok_or(OperationError::VestingBalanceNotFound(id))
    }

    /// All balances of an owner, ascending by id
    pub fn by_owner(&self, owner: AccountId) -> impl Iterator<Item = &VestingBalance> {
        self.balances.values().filter(move |vb| vb.owner == owner)
    }

    pub fn market_fee_sharing_balance(
        &self,
        owner: AccountId,
        asset: AssetId,
    ) -> Option<&VestingBalance> {
        self.market_fee_sharing
            .get(&(owner, asset))
            .and_then(|id| self.balances.get(id))
    }

    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    /// Check a balance of this category may be created for (owner, asset)
    pub fn ensure_can_create(
        &self,
        owner: AccountId,
        balance_type: VestingBalanceType,
        asset: AssetId,
    ) -> Result<(), OperationError> {
        if balance_type.is_unique_per_asset() && self.market_fee_sharing.contains_key(&(owner, asset)) {
            return Err(OperationError::DuplicateCategory { owner, asset });
        }
        Ok(())
    }

    pub fn create(
        &mut self,
        owner: AccountId,
        balance_type: VestingBalanceType,
        balance: AssetAmount,
        policy: VestingPolicy,
    ) -> Result<VestingBalanceId, OperationError> {
        self.ensure_can_create(owner, balance_type, balance.asset)?;

        let id = self.next_id;
        self.next_id = id.next();
        if balance_type.is_unique_per_asset() {
            self.market_fee_sharing.insert((owner, balance.asset), id);
        }
        self.balances
            .insert(id, VestingBalance::new(id, owner, balance_type, policy, balance));

        if log::log_enabled!(log::Level::Debug) {
            debug!(
                "Created {} vesting balance {} for {} with {} of {}",
                balance_type, id, owner, balance.amount, balance.asset
            );
        }
        Ok(id)
    }

    /// Check `amount` can be deposited into balance `id`
    pub fn ensure_can_credit(
        &self,
        id: VestingBalanceId,
        amount: AssetAmount,
    ) -> Result<(), OperationError> {
        let vb = self.require(id)?;
        if vb.balance.asset != amount.asset {
            return Err(OperationError::AssetMismatch {
                expected: vb.balance.asset,
                got: amount.asset,
            });
        }
        vb.balance
            .amount
            .checked_add(amount.amount)
            .ok_or(OperationError::Overflow)?;
        Ok(())
    }

    /// Deposit into an existing balance, returns the new balance
    pub fn credit(
        &mut self,
        id: VestingBalanceId,
        amount: AssetAmount,
    ) -> Result<u64, OperationError> {
        self.ensure_can_credit(id, amount)?;
        let vb = self
            .balances
            .get_mut(&id)
            .ok_or(OperationError::VestingBalanceNotFound(id))?;
        let balance = vb.deposit(amount.amount).ok_or(OperationError::Overflow)?;

        if log::log_enabled!(log::Level::Trace) {
            trace!("Credited {} to vesting balance {}, now {}", amount.amount, id, balance);
        }
        Ok(balance)
    }

    /// Check a reward can be credited to the owner's market fee sharing balance
    pub fn ensure_can_credit_reward(
        &self,
        owner: AccountId,
        reward: AssetAmount,
    ) -> Result<(), OperationError> {
        match self.market_fee_sharing.get(&(owner, reward.asset)) {
            Some(id) => self.ensure_can_credit(*id, reward),
            None => Ok(()),
        }
    }

    /// Credit a market fee reward, creating the balance with an instant policy on first use
    pub fn credit_market_fee_reward(
        &mut self,
        owner: AccountId,
        reward: AssetAmount,
    ) -> Result<VestingBalanceId, OperationError> {
        match self.market_fee_sharing.get(&(owner, reward.asset)).copied() {
            Some(id) => {
                self.credit(id, reward)?;
                Ok(id)
            }
            None => self.create(
                owner,
                VestingBalanceType::MarketFeeSharing,
                reward,
                VestingPolicy::Instant,
            ),
        }
    }

    /// Withdraw released funds, returns the remaining balance
    ///
    /// The caller credits the withdrawn amount to the owner.
    pub fn withdraw(
        &mut self,
        payload: &VestingBalanceWithdrawPayload,
        now: TimestampSeconds,
    ) -> Result<u64, OperationError> {
        let vb = self.require(payload.vesting_balance)?;
        verify_vesting_balance_withdraw(payload, vb, now)?;
        let available = vb.allowed_withdraw(now);

        let vb = self
            .balances
            .get_mut(&payload.vesting_balance)
            .ok_or(OperationError::VestingBalanceNotFound(payload.vesting_balance))?;
        let remaining =
            vb.withdraw(payload.amount.amount, now)
                .ok_or(OperationError::InsufficientVested {
                    available,
                    requested: payload.amount.amount,
                })?;

        if log::log_enabled!(log::Level::Debug) {
            debug!(
                "Withdrew {} from vesting balance {}, {} remaining",
                payload.amount.amount, payload.vesting_balance, remaining
            );
        }
        Ok(remaining)
    }
}
