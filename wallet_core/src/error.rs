use overlay_store::StoreError;
use overlay_transactions::{BuildFailure, PayloadError};
use overlay_types::{Amount, PropertyId, TypesError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("insufficient balance: need {needed}, available {available}")]
    InsufficientBalance { needed: Amount, available: Amount },

    #[error("sender is not authorized to manage property {0}")]
    Unauthorized(PropertyId),

    #[error("precondition failed: {0}")]
    PreconditionFailed(String),

    #[error("payload encoding failed: {0}")]
    PayloadEncodingFailed(#[from] PayloadError),

    #[error("submission failed: {0}")]
    SubmissionFailed(BuildFailure),

    #[error("state lookup failed: {0}")]
    State(#[from] StoreError),

    #[error("config error: {0}")]
    Config(String),
}

impl From<TypesError> for WalletError {
    fn from(e: TypesError) -> Self {
        match e {
            TypesError::InvalidAddress(raw) => WalletError::InvalidAddress(raw),
            TypesError::UnknownCode { .. } => WalletError::InvalidParameter(e.to_string()),
            other => WalletError::InvalidAmount(other.to_string()),
        }
    }
}
