//! Submission coordinator.
//!
//! Drives one request through `Validating -> Assembling -> Submitting` and into
//! a terminal state: committed (pending effect recorded, txid returned),
//! returned unsigned (raw transaction returned, nothing recorded) or failed
//! (typed error, nothing recorded).
//!
//! Submissions are serialized: the pending ledger lock is held from the first
//! guard until the pending effect is recorded, so two requests can never both
//! spend the same available balance.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use overlay_store::ConsensusState;
use overlay_transactions::{
    BuildFailure, BuildOutcome, BuildRequest, CommitMode, FeeOverride, FeePolicy,
    FeePolicyHandle, PayloadCodec, TransactionBuilder, TransactionRequest, WireCodec,
};
use overlay_types::{Address, Amount, PropertyId, Timestamp, TxId};

use crate::assembler::assemble;
use crate::guards::{run_guards, GuardContext};
use crate::normalizer::Normalizer;
use crate::pending::{PendingEntry, PendingLedger};
use crate::plan::{plan_for, CommandPlan};
use crate::raw::RawCommand;
use crate::tracing_spans::{build_span, submit_span};
use crate::{WalletConfig, WalletError};

/// Successful terminal state of a submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    /// Signed and broadcast; the pending effect, if any, is recorded.
    Committed(TxId),
    /// Built but not signed; nothing was broadcast.
    Unsigned(Vec<u8>),
}

impl Submission {
    /// Hex form returned to command-surface callers.
    pub fn to_hex(&self) -> String {
        match self {
            Self::Committed(txid) => txid.to_hex(),
            Self::Unsigned(raw) => hex::encode(raw),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Validating,
    Assembling,
    Submitting,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Validating => "validating",
            Self::Assembling => "assembling",
            Self::Submitting => "submitting",
        })
    }
}

pub struct Coordinator<S, B, C = WireCodec> {
    state: S,
    builder: B,
    codec: C,
    config: WalletConfig,
    fee_policy: FeePolicyHandle,
    pending: Mutex<PendingLedger>,
}

impl<S, B> Coordinator<S, B, WireCodec> {
    /// `fee_policy` must be the handle the builder reads its fee rate from.
    pub fn new(state: S, builder: B, config: WalletConfig, fee_policy: FeePolicyHandle) -> Self {
        Self {
            state,
            builder,
            codec: WireCodec,
            config,
            fee_policy,
            pending: Mutex::new(PendingLedger::new()),
        }
    }
}

impl<S, B, C> Coordinator<S, B, C> {
    /// Swap the payload codec.
    pub fn with_codec<D>(self, codec: D) -> Coordinator<S, B, D> {
        Coordinator {
            state: self.state,
            builder: self.builder,
            codec,
            config: self.config,
            fee_policy: self.fee_policy,
            pending: self.pending,
        }
    }

    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn builder(&self) -> &B {
        &self.builder
    }

    pub fn fee_policy(&self) -> &FeePolicyHandle {
        &self.fee_policy
    }

    /// Drop the pending entry for `txid` once the base ledger has confirmed
    /// or evicted it.
    pub fn retire(&self, txid: &TxId) -> Option<PendingEntry> {
        let entry = self.lock_pending().retire(txid);
        if entry.is_some() {
            tracing::debug!(%txid, "pending entry retired");
        }
        entry
    }

    pub fn pending_entry(&self, txid: &TxId) -> Option<PendingEntry> {
        self.lock_pending().get(txid).cloned()
    }

    /// Pending entries sent from `address`, oldest first.
    pub fn pending_entries(&self, address: &Address) -> Vec<PendingEntry> {
        self.lock_pending()
            .entries_for(address)
            .into_iter()
            .cloned()
            .collect()
    }

    fn lock_pending(&self) -> MutexGuard<'_, PendingLedger> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S, B, C> Coordinator<S, B, C>
where
    S: ConsensusState,
    B: TransactionBuilder,
    C: PayloadCodec,
{
    /// Normalize and submit a raw command.
    pub fn submit(&self, raw: &RawCommand) -> Result<Submission, WalletError> {
        let mut pending = self.lock_pending();
        let request = Normalizer::new(&self.state, self.config.network).normalize(raw)?;
        self.run(&mut pending, &request)
    }

    /// Submit an already typed request. Guards still run.
    pub fn submit_request(&self, request: &TransactionRequest) -> Result<Submission, WalletError> {
        let mut pending = self.lock_pending();
        self.run(&mut pending, request)
    }

    /// Confirmed balance minus pending outflow.
    pub fn available_balance(
        &self,
        address: &Address,
        property: PropertyId,
    ) -> Result<Amount, WalletError> {
        Ok(self
            .lock_pending()
            .available_balance(&self.state, address, property)?)
    }

    fn run(
        &self,
        pending: &mut PendingLedger,
        request: &TransactionRequest,
    ) -> Result<Submission, WalletError> {
        let kind = request.kind();
        let sender = request.sender();
        let span = submit_span(kind.as_str(), sender.as_str());
        let _enter = span.enter();
        let plan = plan_for(request);

        tracing::debug!(stage = %Stage::Validating, "stage entered");
        let limits = self.config.guard_limits();
        run_guards(
            &plan.guards(),
            &GuardContext {
                state: &self.state,
                pending: &*pending,
                limits: &limits,
            },
        )?;

        tracing::debug!(stage = %Stage::Assembling, "stage entered");
        let payload = assemble(request, &self.codec)?;

        tracing::debug!(stage = %Stage::Submitting, payload_len = payload.len(), "stage entered");
        let mode = self.config.commit_mode();
        let route = plan.route();
        let outcome = {
            let _override = self.install_fee_override(plan)?;
            let _build = build_span(kind.as_str(), payload.len()).entered();
            self.builder.build(&BuildRequest {
                sender,
                recipient: route.recipient,
                redeem: route.redeem.unwrap_or(sender),
                reference_amount: route.reference_amount,
                payload: &payload,
                mode,
            })
        };

        self.finish(pending, plan, outcome, mode)
    }

    fn install_fee_override(
        &self,
        plan: &dyn CommandPlan,
    ) -> Result<Option<FeeOverride<'_>>, WalletError> {
        let Some((seller, property)) = plan.fee_source() else {
            return Ok(None);
        };
        let terms = self.state.get_offer(seller, property)?.ok_or_else(|| {
            WalletError::PreconditionFailed(format!(
                "no matching sell offer for property {property}"
            ))
        })?;
        let guard = self
            .fee_policy
            .scoped_override(FeePolicy::at_least(terms.min_accept_fee))
            .map_err(|e| WalletError::PreconditionFailed(e.to_string()))?;
        Ok(Some(guard))
    }

    fn finish(
        &self,
        pending: &mut PendingLedger,
        plan: &dyn CommandPlan,
        outcome: BuildOutcome,
        mode: CommitMode,
    ) -> Result<Submission, WalletError> {
        if !outcome.is_success() {
            let failure = BuildFailure::from_code(outcome.code);
            tracing::warn!(code = outcome.code, error = %failure, "transaction builder failed");
            return Err(WalletError::SubmissionFailed(failure));
        }

        match mode {
            CommitMode::ReturnUnsigned => {
                let raw = outcome.raw.ok_or_else(|| {
                    tracing::warn!("builder reported success without a raw transaction");
                    WalletError::SubmissionFailed(BuildFailure::CreateFailed)
                })?;
                tracing::info!(raw_len = raw.len(), "unsigned transaction returned");
                Ok(Submission::Unsigned(raw))
            }
            CommitMode::AutoCommit => {
                let txid = outcome.txid.ok_or_else(|| {
                    tracing::warn!("builder reported success without a transaction id");
                    WalletError::SubmissionFailed(BuildFailure::CreateFailed)
                })?;
                if let Some(effect) = plan.pending_effect() {
                    match pending.record(txid, effect, Timestamp::now()) {
                        Ok(entry) => tracing::debug!(
                            %txid,
                            sequence = entry.sequence,
                            outflow = %entry.effect.outflow,
                            "pending effect recorded"
                        ),
                        Err(e) => tracing::warn!(%txid, error = %e, "pending effect not recorded"),
                    }
                }
                tracing::info!(%txid, "transaction committed");
                Ok(Submission::Committed(txid))
            }
        }
    }
}
