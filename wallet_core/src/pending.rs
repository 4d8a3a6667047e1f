//! Pending effects of submitted but not yet confirmed transactions.
//!
//! Entries are appended by the coordinator right after a successful commit and
//! removed by the external reconciliation process through [`PendingLedger::retire`]
//! once the base ledger confirms or drops the transaction. Balance guards read
//! [`PendingLedger::available_balance`], never the confirmed balance alone.

use std::collections::HashMap;

use overlay_store::{BalanceStore, StoreError};
use overlay_transactions::CommandKind;
use overlay_types::{Address, Amount, PropertyId, Timestamp, TxId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The provisional effect of one transaction on its sender.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingEffect {
    pub sender: Address,
    pub counterparty: Option<Address>,
    pub kind: CommandKind,
    pub property: PropertyId,
    pub amount: Amount,
    /// Property and amount asked for in return, for exchange commands.
    pub desired: Option<(PropertyId, Amount)>,
    /// Raw action code, for exchange commands.
    pub action: Option<u8>,
    /// Units of `property` the sender can no longer spend until retirement.
    pub outflow: Amount,
}

/// A recorded pending effect. Never mutated after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingEntry {
    pub txid: TxId,
    /// Monotonic insertion order within this ledger.
    pub sequence: u64,
    pub created_at: Timestamp,
    pub effect: PendingEffect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("transaction {0} already has a pending entry")]
pub struct DuplicateEntry(pub TxId);

/// Pending entries keyed by transaction id and indexed by `(sender, property)`.
#[derive(Debug, Default)]
pub struct PendingLedger {
    entries: HashMap<TxId, PendingEntry>,
    by_account: HashMap<(Address, PropertyId), Vec<TxId>>,
    next_sequence: u64,
}

impl PendingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry for `txid`. A transaction is never recorded twice.
    pub fn record(
        &mut self,
        txid: TxId,
        effect: PendingEffect,
        now: Timestamp,
    ) -> Result<&PendingEntry, DuplicateEntry> {
        if self.entries.contains_key(&txid) {
            return Err(DuplicateEntry(txid));
        }
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        self.by_account
            .entry((effect.sender.clone(), effect.property))
            .or_default()
            .push(txid);
        let entry = self.entries.entry(txid).or_insert(PendingEntry {
            txid,
            sequence,
            created_at: now,
            effect,
        });
        Ok(&*entry)
    }

    /// Remove the entry for `txid`, returning it if it was present.
    pub fn retire(&mut self, txid: &TxId) -> Option<PendingEntry> {
        let entry = self.entries.remove(txid)?;
        let key = (entry.effect.sender.clone(), entry.effect.property);
        if let Some(txids) = self.by_account.get_mut(&key) {
            txids.retain(|t| t != txid);
            if txids.is_empty() {
                self.by_account.remove(&key);
            }
        }
        Some(entry)
    }

    pub fn get(&self, txid: &TxId) -> Option<&PendingEntry> {
        self.entries.get(txid)
    }

    /// Sum of outflows recorded against `(address, property)`.
    pub fn pending_outflow(&self, address: &Address, property: PropertyId) -> Amount {
        let raw: i128 = self
            .by_account
            .get(&(address.clone(), property))
            .into_iter()
            .flatten()
            .filter_map(|txid| self.entries.get(txid))
            .map(|entry| i128::from(entry.effect.outflow.raw()))
            .sum();
        Amount::new(i64::try_from(raw).unwrap_or(i64::MAX))
    }

    /// Confirmed balance minus pending outflow.
    pub fn available_balance<S: BalanceStore + ?Sized>(
        &self,
        state: &S,
        address: &Address,
        property: PropertyId,
    ) -> Result<Amount, StoreError> {
        let confirmed = state.confirmed_balance(address, property)?;
        Ok(confirmed.saturating_sub(self.pending_outflow(address, property)))
    }

    /// Every entry sent from `address`, oldest first.
    pub fn entries_for(&self, address: &Address) -> Vec<&PendingEntry> {
        let mut entries: Vec<_> = self
            .entries
            .values()
            .filter(|entry| &entry.effect.sender == address)
            .collect();
        entries.sort_by_key(|entry| entry.sequence);
        entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
