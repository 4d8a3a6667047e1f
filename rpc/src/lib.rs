//! JSON-RPC command surface for the overlay issuance pipeline.
//!
//! Provides one method per outbound command:
//! - Token transfers (`send`, `sendsto`)
//! - Legacy exchange (`senddexsell`, `senddexaccept`)
//! - Token-for-token exchange (`sendtrade`)
//! - Property issuance (`sendissuancefixed`, `sendissuancecrowdsale`, `sendissuancemanaged`)
//! - Property management (`sendgrant`, `sendrevoke`, `sendclosecrowdsale`, `sendchangeissuer`)
//!
//! Every method returns a hex string: the transaction id when auto-commit is
//! on, the raw unsigned transaction otherwise.

pub mod error;
pub mod handlers;
pub mod server;

pub use error::RpcError;
pub use server::RpcServer;
