//! Nullable transaction builder: record build requests instead of touching a wallet.

use overlay_transactions::{
    BuildOutcome, BuildRequest, CommitMode, FeePolicy, FeePolicyHandle, TransactionBuilder,
};
use overlay_types::{Address, Amount, TxId};
use std::collections::VecDeque;
use std::sync::Mutex;

/// One call into [`NullBuilder::build`], with owned copies of its inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedBuild {
    pub sender: Address,
    pub recipient: Option<Address>,
    pub redeem: Address,
    pub reference_amount: Amount,
    pub payload: Vec<u8>,
    pub mode: CommitMode,
    /// Fee policy in force while the build ran, if a handle was attached.
    pub fee_policy: Option<FeePolicy>,
}

/// A test builder with scripted outcomes.
///
/// Outcomes queued with [`push_outcome`](Self::push_outcome) are returned in
/// order. Once the queue is empty every call succeeds: a fresh txid in
/// auto-commit mode, a short raw encoding otherwise.
pub struct NullBuilder {
    outcomes: Mutex<VecDeque<BuildOutcome>>,
    calls: Mutex<Vec<RecordedBuild>>,
    fee_policy: Option<FeePolicyHandle>,
}

impl NullBuilder {
    pub fn new() -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            fee_policy: None,
        }
    }

    /// A builder that reads the given fee policy on every call, like a real wallet.
    pub fn with_fee_policy(fee_policy: FeePolicyHandle) -> Self {
        Self {
            fee_policy: Some(fee_policy),
            ..Self::new()
        }
    }

    /// Queue the outcome of the next unscripted call.
    pub fn push_outcome(&self, outcome: BuildOutcome) {
        self.outcomes.lock().unwrap().push_back(outcome);
    }

    /// Queue a failure with builder result `code`.
    pub fn fail_next(&self, code: i32) {
        self.push_outcome(BuildOutcome::failed(code));
    }

    /// All recorded calls (for assertions).
    pub fn calls(&self) -> Vec<RecordedBuild> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Clear all state.
    pub fn reset(&self) {
        self.outcomes.lock().unwrap().clear();
        self.calls.lock().unwrap().clear();
    }

    fn default_outcome(&self, mode: CommitMode, call: usize) -> BuildOutcome {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&(call as u64 + 1).to_be_bytes());
        match mode {
            CommitMode::AutoCommit => BuildOutcome::committed(TxId::new(bytes)),
            CommitMode::ReturnUnsigned => BuildOutcome::unsigned(bytes[..8].to_vec()),
        }
    }
}

impl Default for NullBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionBuilder for NullBuilder {
    fn build(&self, request: &BuildRequest<'_>) -> BuildOutcome {
        let mut calls = self.calls.lock().unwrap();
        calls.push(RecordedBuild {
            sender: request.sender.clone(),
            recipient: request.recipient.cloned(),
            redeem: request.redeem.clone(),
            reference_amount: request.reference_amount,
            payload: request.payload.to_vec(),
            mode: request.mode,
            fee_policy: self.fee_policy.as_ref().map(FeePolicyHandle::current),
        });
        let call = calls.len() - 1;
        drop(calls);

        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.default_outcome(request.mode, call))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_address;

    fn request<'a>(sender: &'a Address, mode: CommitMode) -> BuildRequest<'a> {
        BuildRequest {
            sender,
            recipient: None,
            redeem: sender,
            reference_amount: Amount::ZERO,
            payload: &[0, 0, 0, 0],
            mode,
        }
    }

    #[test]
    fn scripted_outcomes_come_first() {
        let builder = NullBuilder::new();
        let sender = test_address(1);
        builder.fail_next(-213);

        assert_eq!(builder.build(&request(&sender, CommitMode::AutoCommit)).code, -213);
        let second = builder.build(&request(&sender, CommitMode::AutoCommit));
        assert!(second.is_success());
        assert!(second.txid.is_some());
        assert_eq!(builder.call_count(), 2);
    }

    #[test]
    fn default_txids_are_distinct() {
        let builder = NullBuilder::new();
        let sender = test_address(1);
        let a = builder.build(&request(&sender, CommitMode::AutoCommit)).txid;
        let b = builder.build(&request(&sender, CommitMode::AutoCommit)).txid;
        assert_ne!(a, b);
    }

    #[test]
    fn unsigned_mode_returns_raw() {
        let builder = NullBuilder::new();
        let sender = test_address(1);
        let outcome = builder.build(&request(&sender, CommitMode::ReturnUnsigned));
        assert!(outcome.raw.is_some());
        assert!(outcome.txid.is_none());
    }

    #[test]
    fn observes_fee_policy() {
        let handle = FeePolicyHandle::default();
        let builder = NullBuilder::with_fee_policy(handle.clone());
        let sender = test_address(1);
        {
            let _guard = handle
                .scoped_override(FeePolicy::at_least(Amount::new(5_000)))
                .unwrap();
            builder.build(&request(&sender, CommitMode::AutoCommit));
        }
        assert_eq!(
            builder.calls()[0].fee_policy,
            Some(FeePolicy::at_least(Amount::new(5_000)))
        );
        assert_eq!(handle.current(), FeePolicy::default());
    }
}
