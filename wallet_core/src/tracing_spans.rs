//! Pre-built [`tracing::Span`] constructors for the issuance pipeline.
//!
//! Consistent span names and field sets make submissions easy to filter and
//! correlate across the coordinator, the builder and the RPC surface.

use tracing::{info_span, Span};

/// Span covering one submission from normalization to its terminal state.
pub fn submit_span(command: &str, sender: &str) -> Span {
    info_span!("submit", command = %command, sender = %sender)
}

/// Span covering the delegated call into the ledger transaction builder.
pub fn build_span(command: &str, payload_len: usize) -> Span {
    info_span!("build", command = %command, payload_len = %payload_len)
}
