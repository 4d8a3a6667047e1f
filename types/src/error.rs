//! Top-level error type shared across crates.

use thiserror::Error;

/// Errors raised while turning raw strings and codes into domain values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("too many decimal places in amount: {0}")]
    TooManyDecimals(String),

    #[error("indivisible amount must not contain a decimal point: {0}")]
    FractionalIndivisible(String),

    #[error("amount out of range: {0}")]
    AmountOutOfRange(String),

    #[error("unknown {field} code: {code}")]
    UnknownCode { field: &'static str, code: i64 },
}
