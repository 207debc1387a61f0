// HTLC registry
//
// Records are keyed by id in a BTreeMap so listings and the expiry sweep
// always walk them in ascending id order. Records in a terminal state are
// kept and stay queryable.

mod apply;
mod expiry;

pub use apply::*;
pub use expiry::*;

use std::collections::BTreeMap;

use tessel_common::{
    htlc::HtlcRecord,
    ids::{AccountId, HtlcId},
    time::TimestampSeconds,
    transaction::OperationError,
};

#[derive(Debug, Clone, Default)]
pub struct HtlcRegistry {
    records: BTreeMap<HtlcId, HtlcRecord>,
    next_id: HtlcId,
}

impl HtlcRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: HtlcId) -> Option<&HtlcRecord> {
        self.records.get(&id)
    }

    pub fn require(&self, id: HtlcId) -> Result<&HtlcRecord, OperationError> {
        self.get(id).ok_or(OperationError::HtlcNotFound(id))
    }

    pub(crate) fn get_mut(&mut self, id: HtlcId) -> Result<&mut HtlcRecord, OperationError> {
        self.records
            .get_mut(&id)
            .ok_or(OperationError::HtlcNotFound(id))
    }

    /// Id the next created HTLC will receive
    pub fn next_id(&self) -> HtlcId {
        self.next_id
    }

    pub(crate) fn insert(&mut self, mut record: HtlcRecord) -> HtlcId {
        let id = self.next_id;
        self.next_id = id.next();
        record.id = id;
        self.records.insert(id, record);
        id
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records with an id of at least `start`, ascending
    pub fn iter_from(&self, start: HtlcId) -> impl Iterator<Item = &HtlcRecord> {
        self.records.range(start..).map(|(_, record)| record)
    }

    pub fn iter_from_sender(
        &self,
        sender: AccountId,
        start: HtlcId,
    ) -> impl Iterator<Item = &HtlcRecord> {
        self.iter_from(start).filter(move |record| record.from == sender)
    }

    pub fn iter_from_receiver(
        &self,
        receiver: AccountId,
        start: HtlcId,
    ) -> impl Iterator<Item = &HtlcRecord> {
        self.iter_from(start).filter(move |record| record.to == receiver)
    }

    /// Pending records whose deadline passed at `now`, ascending by id
    pub fn due_for_refund(&self, now: TimestampSeconds) -> Vec<HtlcId> {
        self.records
            .values()
            .filter(|record| record.is_due_for_refund(now))
            .map(|record| record.id)
            .collect()
    }
}
