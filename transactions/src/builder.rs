//! Boundary to the base-ledger transaction builder.
//!
//! Output encoding, input selection, fee selection, signing and broadcast all
//! live behind [`TransactionBuilder`]. The issuance pipeline treats a call to
//! [`TransactionBuilder::build`] as one atomic external step.

use overlay_types::{Address, Amount, TxId};
use thiserror::Error;

/// Whether a built transaction is signed and broadcast immediately.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitMode {
    /// Sign and broadcast; the builder returns the transaction id.
    AutoCommit,
    /// Hand the unsigned transaction back to the caller.
    ReturnUnsigned,
}

/// Everything the builder needs to wrap a payload into a base-ledger transaction.
#[derive(Clone, Copy, Debug)]
pub struct BuildRequest<'a> {
    pub sender: &'a Address,
    pub recipient: Option<&'a Address>,
    /// Address able to redeem data-carrying outputs.
    pub redeem: &'a Address,
    /// Base-currency value of the reference output to `recipient`.
    pub reference_amount: Amount,
    pub payload: &'a [u8],
    pub mode: CommitMode,
}

/// Raw result of a build call.
///
/// `txid` is meaningful only when `code` is [`BuildOutcome::SUCCESS`]; `raw` only
/// in [`CommitMode::ReturnUnsigned`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildOutcome {
    pub code: i32,
    pub txid: Option<TxId>,
    pub raw: Option<Vec<u8>>,
}

impl BuildOutcome {
    pub const SUCCESS: i32 = 0;

    pub fn committed(txid: TxId) -> Self {
        Self {
            code: Self::SUCCESS,
            txid: Some(txid),
            raw: None,
        }
    }

    pub fn unsigned(raw: Vec<u8>) -> Self {
        Self {
            code: Self::SUCCESS,
            txid: None,
            raw: Some(raw),
        }
    }

    pub fn failed(code: i32) -> Self {
        Self {
            code,
            txid: None,
            raw: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Self::SUCCESS
    }
}

/// Builder-level failures, one per non-zero result code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BuildFailure {
    #[error("wallet is unavailable")]
    WalletUnavailable,

    #[error("no spendable inputs")]
    NoSpendableInputs,

    #[error("insufficient base-currency funds for the fee")]
    InsufficientFeeFunds,

    #[error("failed to create the transaction")]
    CreateFailed,

    #[error("failed to sign the transaction")]
    SigningFailed,

    #[error("transaction rejected on broadcast")]
    BroadcastRejected,

    #[error("builder error code {0}")]
    Other(i32),
}

impl BuildFailure {
    pub fn from_code(code: i32) -> Self {
        match code {
            -205 => Self::WalletUnavailable,
            -206 => Self::NoSpendableInputs,
            -207 => Self::InsufficientFeeFunds,
            -211 => Self::CreateFailed,
            -212 => Self::SigningFailed,
            -213 => Self::BroadcastRejected,
            other => Self::Other(other),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::WalletUnavailable => -205,
            Self::NoSpendableInputs => -206,
            Self::InsufficientFeeFunds => -207,
            Self::CreateFailed => -211,
            Self::SigningFailed => -212,
            Self::BroadcastRejected => -213,
            Self::Other(code) => *code,
        }
    }
}

/// The external base-ledger transaction builder.
///
/// Implementations read the process-wide fee policy through a
/// [`FeePolicyHandle`](crate::FeePolicyHandle) they were constructed with.
pub trait TransactionBuilder {
    fn build(&self, request: &BuildRequest<'_>) -> BuildOutcome;
}
