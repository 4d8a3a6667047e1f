//! Transaction-issuance pipeline for the overlay token layer.
//!
//! Turns a high-level user instruction into a base-ledger transaction:
//! - Parameter normalization against live property metadata ([`normalizer`])
//! - Fail-fast precondition guards over a consensus-state snapshot ([`guards`])
//! - Per-command plans: guard order, builder routing, pending effect ([`plan`])
//! - Payload assembly through a pluggable codec ([`assembler`])
//! - Submission with a scoped fee-policy override ([`coordinator`])
//! - Provisional balance effects of just-submitted transactions ([`pending`])

pub mod assembler;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod guards;
pub mod normalizer;
pub mod pending;
pub mod plan;
pub mod raw;
pub mod tracing_spans;

pub use config::WalletConfig;
pub use coordinator::{Coordinator, Submission};
pub use error::WalletError;
pub use guards::{Guard, GuardContext, GuardLimits};
pub use normalizer::Normalizer;
pub use pending::{PendingEffect, PendingEntry, PendingLedger};
pub use plan::CommandPlan;
pub use raw::{RawCommand, RawPropertyInfo};
