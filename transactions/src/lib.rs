//! Overlay command types and the boundaries they cross on the way out.
//!
//! Command types:
//! - **SimpleSend**: Transfer tokens of one property to another address
//! - **SendToOwners**: Distribute tokens pro rata to every holder of a property
//! - **ExchangeOffer**: Place, update or cancel a legacy exchange sell offer
//! - **ExchangeAccept**: Accept a legacy exchange sell offer
//! - **IssuanceFixed / IssuanceCrowdsale / IssuanceManaged**: Create a property
//! - **Grant / Revoke**: Mint or destroy units of a managed property
//! - **CloseCrowdsale**: End an active crowdsale early
//! - **ExchangeTrade**: Place or cancel a token-for-token exchange order
//! - **ChangeIssuer**: Hand administrative control of a property to another address
//!
//! Alongside the commands live the payload codec ([`codec`]), the base-ledger
//! transaction builder boundary ([`builder`]) and the process-wide fee policy
//! handle the builder reads ([`fee`]).

pub mod builder;
pub mod codec;
pub mod dex;
pub mod error;
pub mod fee;
pub mod issuance;
pub mod management;
pub mod send;
pub mod trade;

pub use builder::{BuildFailure, BuildOutcome, BuildRequest, CommitMode, TransactionBuilder};
pub use codec::{PayloadCodec, WireCodec};
pub use error::PayloadError;
pub use fee::{FeeOverride, FeePolicy, FeePolicyHandle, OverrideBusy};

use overlay_types::Address;
use serde::{Deserialize, Serialize};

/// Protocol command identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandKind {
    SimpleSend,
    SendToOwners,
    ExchangeOffer,
    ExchangeTrade,
    ExchangeAccept,
    IssuanceFixed,
    IssuanceCrowdsale,
    CloseCrowdsale,
    IssuanceManaged,
    Grant,
    Revoke,
    ChangeIssuer,
}

impl CommandKind {
    /// Type identifier written into the payload header.
    pub fn type_id(&self) -> u16 {
        match self {
            Self::SimpleSend => 0,
            Self::SendToOwners => 3,
            Self::ExchangeOffer => 20,
            Self::ExchangeTrade => 21,
            Self::ExchangeAccept => 22,
            Self::IssuanceFixed => 50,
            Self::IssuanceCrowdsale => 51,
            Self::CloseCrowdsale => 53,
            Self::IssuanceManaged => 54,
            Self::Grant => 55,
            Self::Revoke => 56,
            Self::ChangeIssuer => 70,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SimpleSend => "simple_send",
            Self::SendToOwners => "send_to_owners",
            Self::ExchangeOffer => "exchange_offer",
            Self::ExchangeTrade => "exchange_trade",
            Self::ExchangeAccept => "exchange_accept",
            Self::IssuanceFixed => "issuance_fixed",
            Self::IssuanceCrowdsale => "issuance_crowdsale",
            Self::CloseCrowdsale => "close_crowdsale",
            Self::IssuanceManaged => "issuance_managed",
            Self::Grant => "grant",
            Self::Revoke => "revoke",
            Self::ChangeIssuer => "change_issuer",
        }
    }
}

/// A validated, typed user instruction. Immutable once constructed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionRequest {
    SimpleSend(send::SimpleSend),
    ExchangeOffer(dex::ExchangeOffer),
    ExchangeAccept(dex::ExchangeAccept),
    IssuanceCrowdsale(issuance::IssuanceCrowdsale),
    IssuanceFixed(issuance::IssuanceFixed),
    IssuanceManaged(issuance::IssuanceManaged),
    SendToOwners(send::SendToOwners),
    Grant(management::Grant),
    Revoke(management::Revoke),
    CloseCrowdsale(management::CloseCrowdsale),
    ExchangeTrade(trade::ExchangeTrade),
    ChangeIssuer(management::ChangeIssuer),
}

impl TransactionRequest {
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::SimpleSend(_) => CommandKind::SimpleSend,
            Self::ExchangeOffer(_) => CommandKind::ExchangeOffer,
            Self::ExchangeAccept(_) => CommandKind::ExchangeAccept,
            Self::IssuanceCrowdsale(_) => CommandKind::IssuanceCrowdsale,
            Self::IssuanceFixed(_) => CommandKind::IssuanceFixed,
            Self::IssuanceManaged(_) => CommandKind::IssuanceManaged,
            Self::SendToOwners(_) => CommandKind::SendToOwners,
            Self::Grant(_) => CommandKind::Grant,
            Self::Revoke(_) => CommandKind::Revoke,
            Self::CloseCrowdsale(_) => CommandKind::CloseCrowdsale,
            Self::ExchangeTrade(_) => CommandKind::ExchangeTrade,
            Self::ChangeIssuer(_) => CommandKind::ChangeIssuer,
        }
    }

    /// The address the transaction is sent from.
    pub fn sender(&self) -> &Address {
        match self {
            Self::SimpleSend(tx) => &tx.from,
            Self::ExchangeOffer(tx) => &tx.from,
            Self::ExchangeAccept(tx) => &tx.from,
            Self::IssuanceCrowdsale(tx) => &tx.from,
            Self::IssuanceFixed(tx) => &tx.from,
            Self::IssuanceManaged(tx) => &tx.from,
            Self::SendToOwners(tx) => &tx.from,
            Self::Grant(tx) => &tx.from,
            Self::Revoke(tx) => &tx.from,
            Self::CloseCrowdsale(tx) => &tx.from,
            Self::ExchangeTrade(tx) => &tx.from,
            Self::ChangeIssuer(tx) => &tx.from,
        }
    }
}
