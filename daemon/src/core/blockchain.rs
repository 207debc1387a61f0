use log::{debug, info};
use serde::{Deserialize, Serialize};
use tessel_common::{
    account::Account,
    asset::{AssetAmount, AssetData, AssetOptions},
    config::{
        COIN_DECIMALS, COMMITTEE_ACCOUNT, COMMITTEE_ACCOUNT_NAME, CORE_ASSET, CORE_ASSET_SYMBOL,
        HUNDRED_PERCENT, VERSION,
    },
    hard_fork::Feature,
    ids::{AccountId, AssetId, HtlcId, VestingBalanceId},
    time::TimestampSeconds,
    transaction::{verify::verify_fee, Operation, OperationError},
};

use super::{
    asset::{apply_account_whitelist, apply_asset_update},
    error::BlockchainError,
    fee_sharing::{settle_fill, settle_match, FillOrder, FillOutcome},
    htlc::{apply_htlc_create, apply_htlc_expiry_sweep, apply_htlc_extend, apply_htlc_redeem},
    state::ChainState,
    vesting::{apply_vesting_balance_create, apply_vesting_balance_withdraw},
};
use crate::{api::QueryApi, config::ChainConfig};

/// A block: its chain time and the operations applied at that time, in order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub timestamp: TimestampSeconds,
    pub operations: Vec<Operation>,
}

impl Block {
    pub fn new(timestamp: TimestampSeconds, operations: Vec<Operation>) -> Self {
        Self {
            timestamp,
            operations,
        }
    }

    pub fn empty(timestamp: TimestampSeconds) -> Self {
        Self::new(timestamp, Vec::new())
    }
}

/// Value returned by a successful operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationResult {
    Void,
    HtlcId(HtlcId),
    VestingBalanceId(VestingBalanceId),
}

/// Outcome of a block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockReceipt {
    pub height: u64,
    pub timestamp: TimestampSeconds,
    /// One entry per operation, in block order
    pub results: Vec<Result<OperationResult, OperationError>>,
    /// HTLCs refunded by the sweep at block close
    pub expired_htlcs: Vec<HtlcId>,
}

impl BlockReceipt {
    pub fn is_fully_applied(&self) -> bool {
        self.results.iter().all(Result::is_ok)
    }
}

pub struct Blockchain {
    config: ChainConfig,
    state: ChainState,
}

impl Blockchain {
    /// Start a chain at its genesis: the committee account and the core asset
    pub fn new(config: ChainConfig) -> Self {
        let mut state = ChainState::new(config.genesis_timestamp);
        state.insert_account(Account::new(
            COMMITTEE_ACCOUNT,
            COMMITTEE_ACCOUNT_NAME,
            COMMITTEE_ACCOUNT,
            COMMITTEE_ACCOUNT,
            HUNDRED_PERCENT,
        ));
        state.insert_asset(AssetData::new(
            CORE_ASSET,
            CORE_ASSET_SYMBOL,
            COIN_DECIMALS,
            COMMITTEE_ACCOUNT,
            AssetOptions::default(),
        ));

        if log::log_enabled!(log::Level::Info) {
            info!(
                "Tessel ledger v{}: starting {} chain at {} with activations {:?}",
                VERSION, config.network, config.genesis_timestamp, config.activations
            );
        }
        Self { config, state }
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    pub fn state(&self) -> &ChainState {
        &self.state
    }

    pub fn api(&self) -> QueryApi<'_> {
        QueryApi::new(&self.state)
    }

    pub fn chain_time(&self) -> TimestampSeconds {
        self.state.chain_time()
    }

    pub fn height(&self) -> u64 {
        self.state.height()
    }

    pub fn is_feature_active(&self, feature: Feature) -> bool {
        self.config
            .activations
            .is_active(feature, self.state.chain_time())
    }

    // ===== Ledger substrate =====

    /// Register an account sponsored by an existing registrar and referrer
    pub fn register_account(
        &mut self,
        name: &str,
        registrar: AccountId,
        referrer: AccountId,
        referrer_rewards_percentage: u16,
    ) -> Result<AccountId, BlockchainError> {
        if self.state.account_by_name(name).is_some() {
            return Err(BlockchainError::AccountNameTaken(name.to_owned()));
        }
        for sponsor in [registrar, referrer] {
            if self.state.account(sponsor).is_none() {
                return Err(BlockchainError::AccountNotFound(sponsor));
            }
        }

        let id = self.state.insert_account(Account::new(
            self.state.next_account_id(),
            name,
            registrar,
            referrer,
            referrer_rewards_percentage,
        ));
        if log::log_enabled!(log::Level::Debug) {
            debug!(
                "Registered account {} ({}), registrar {}, referrer {}",
                id, name, registrar, referrer
            );
        }
        Ok(id)
    }

    /// Register a user issued asset, options are checked as on update
    pub fn register_asset(
        &mut self,
        symbol: &str,
        precision: u8,
        issuer: AccountId,
        options: AssetOptions,
    ) -> Result<AssetId, BlockchainError> {
        if self.state.asset_by_symbol(symbol).is_some() {
            return Err(BlockchainError::AssetSymbolTaken(symbol.to_owned()));
        }
        if self.state.account(issuer).is_none() {
            return Err(BlockchainError::AccountNotFound(issuer));
        }
        options
            .validate(self.is_feature_active(Feature::MarketFeeSharing))
            .map_err(OperationError::from)?;

        let id = self.state.insert_asset(AssetData::new(
            self.state.next_asset_id(),
            symbol,
            precision,
            issuer,
            options,
        ));
        if log::log_enabled!(log::Level::Debug) {
            debug!("Registered asset {} ({}) issued by {}", id, symbol, issuer);
        }
        Ok(id)
    }

    /// Credit an account out of thin air, for genesis allocations
    pub fn fund(&mut self, account: AccountId, amount: AssetAmount) -> Result<u64, BlockchainError> {
        if self.state.account(account).is_none() {
            return Err(BlockchainError::AccountNotFound(account));
        }
        if self.state.asset(amount.asset).is_none() {
            return Err(BlockchainError::AssetNotFound(amount.asset));
        }
        self.state
            .credit(account, amount)
            .map_err(|_| BlockchainError::BalanceOverflow)
    }

    pub fn transfer(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: AssetAmount,
    ) -> Result<(), BlockchainError> {
        self.state.require_account(from)?;
        self.state.require_account(to)?;
        self.state.ensure_funds(from, &[amount])?;
        if from != to {
            self.state.ensure_can_credit(to, amount)?;
        }

        self.state.debit(from, amount)?;
        self.state.credit(to, amount)?;
        Ok(())
    }

    // ===== Market =====

    /// Settle one side of a trade at the current chain time
    pub fn settle_fill(&mut self, fill: &FillOrder) -> Result<FillOutcome, OperationError> {
        settle_fill(&mut self.state, &self.config, fill)
    }

    /// Settle both sides of a trade at the current chain time
    pub fn settle_match(
        &mut self,
        maker: &FillOrder,
        taker: &FillOrder,
    ) -> Result<(FillOutcome, FillOutcome), OperationError> {
        settle_match(&mut self.state, &self.config, maker, taker)
    }

    // ===== Blocks =====

    /// Gate first, then the fee, then the operation's own checks
    fn apply_operation(&mut self, operation: &Operation) -> Result<OperationResult, OperationError> {
        if let Some(feature) = operation.required_feature() {
            if !self.is_feature_active(feature) {
                return Err(OperationError::FeatureNotActive(feature));
            }
        }
        verify_fee(&self.config.fees, operation)?;

        let state = &mut self.state;
        let config = &self.config;
        match operation {
            Operation::HtlcCreate(payload) => {
                apply_htlc_create(state, config, payload).map(OperationResult::HtlcId)
            }
            Operation::HtlcExtend(payload) => {
                apply_htlc_extend(state, config, payload).map(|_| OperationResult::Void)
            }
            Operation::HtlcRedeem(payload) => {
                apply_htlc_redeem(state, config, payload).map(|_| OperationResult::Void)
            }
            Operation::AssetUpdate(payload) => {
                apply_asset_update(state, config, payload).map(|_| OperationResult::Void)
            }
            Operation::AccountWhitelist(payload) => {
                apply_account_whitelist(state, payload).map(|_| OperationResult::Void)
            }
            Operation::VestingBalanceCreate(payload) => {
                apply_vesting_balance_create(state, payload).map(OperationResult::VestingBalanceId)
            }
            Operation::VestingBalanceWithdraw(payload) => {
                apply_vesting_balance_withdraw(state, payload).map(|_| OperationResult::Void)
            }
        }
    }

    /// Apply a block: its operations in order, then the HTLC expiry sweep.
    ///
    /// A rejected operation leaves the state untouched and is reported in
    /// the receipt, the other operations of the block still apply. A block
    /// whose timestamp does not move the chain time forward is rejected
    /// before any change.
    pub fn apply_block(&mut self, block: &Block) -> Result<BlockReceipt, BlockchainError> {
        let current = self.state.chain_time();
        if block.timestamp <= current {
            return Err(BlockchainError::TimestampNotIncreasing {
                current,
                got: block.timestamp,
            });
        }

        let height = self.state.height() + 1;
        self.state.set_head(height, block.timestamp);

        let mut results = Vec::with_capacity(block.operations.len());
        for (index, operation) in block.operations.iter().enumerate() {
            let result = self.apply_operation(operation);
            if let Err(e) = result.as_ref() {
                if log::log_enabled!(log::Level::Debug) {
                    debug!(
                        "Operation {} ({}) rejected in block {}: {} ({})",
                        index,
                        operation.kind(),
                        height,
                        e,
                        e.kind()
                    );
                }
            }
            results.push(result);
        }

        let expired_htlcs = apply_htlc_expiry_sweep(&mut self.state);
        Ok(BlockReceipt {
            height,
            timestamp: block.timestamp,
            results,
            expired_htlcs,
        })
    }

    /// Apply a block one interval after the current chain time
    pub fn generate_block(&mut self, operations: Vec<Operation>) -> Result<BlockReceipt, BlockchainError> {
        let timestamp = self.state.chain_time() + self.config.block_interval_secs;
        self.apply_block(&Block::new(timestamp, operations))
    }

    /// Apply an empty block at `timestamp`, skipping the slots in between
    pub fn generate_block_at(&mut self, timestamp: TimestampSeconds) -> Result<BlockReceipt, BlockchainError> {
        self.apply_block(&Block::empty(timestamp))
    }

    /// Apply a single operation in its own block
    pub fn push_operation(&mut self, operation: Operation) -> Result<OperationResult, BlockchainError> {
        let mut receipt = self.generate_block(vec![operation])?;
        match receipt.results.pop() {
            Some(result) => Ok(result?),
            None => Ok(OperationResult::Void),
        }
    }
}
