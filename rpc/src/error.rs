//! RPC error types and their JSON-RPC codes.

use overlay_wallet_core::WalletError;
use thiserror::Error;

pub const RPC_MISC_ERROR: i32 = -1;
pub const RPC_TYPE_ERROR: i32 = -3;
pub const RPC_INVALID_ADDRESS_OR_KEY: i32 = -5;
pub const RPC_INVALID_PARAMETER: i32 = -8;
pub const RPC_INVALID_REQUEST: i32 = -32600;
pub const RPC_METHOD_NOT_FOUND: i32 = -32601;
pub const RPC_INTERNAL_ERROR: i32 = -32603;
pub const RPC_PARSE_ERROR: i32 = -32700;

#[derive(Debug, Error)]
pub enum RpcError {
    /// Wrong number of parameters; carries the method's usage line.
    #[error("{0}")]
    Usage(String),

    #[error("method not found: {0}")]
    MethodNotFound(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error("server error: {0}")]
    Server(String),
}

impl RpcError {
    pub fn code(&self) -> i32 {
        match self {
            Self::Usage(_) => RPC_MISC_ERROR,
            Self::MethodNotFound(_) => RPC_METHOD_NOT_FOUND,
            Self::InvalidRequest(_) => RPC_INVALID_REQUEST,
            Self::Parse(_) => RPC_PARSE_ERROR,
            Self::Server(_) => RPC_INTERNAL_ERROR,
            Self::Wallet(e) => match e {
                WalletError::InvalidAddress(_) => RPC_INVALID_ADDRESS_OR_KEY,
                WalletError::InvalidParameter(_) => RPC_INVALID_PARAMETER,
                WalletError::InvalidAmount(_)
                | WalletError::InsufficientBalance { .. }
                | WalletError::Unauthorized(_)
                | WalletError::PreconditionFailed(_)
                | WalletError::PayloadEncodingFailed(_) => RPC_TYPE_ERROR,
                WalletError::SubmissionFailed(failure) => failure.code(),
                WalletError::State(_) | WalletError::Config(_) => RPC_INTERNAL_ERROR,
            },
        }
    }
}

impl From<overlay_store::StoreError> for RpcError {
    fn from(e: overlay_store::StoreError) -> Self {
        RpcError::Wallet(WalletError::State(e))
    }
}
