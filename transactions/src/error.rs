use thiserror::Error;

/// Raised when a field cannot be represented in the payload layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("{field} must not be negative")]
    NegativeAmount { field: &'static str },

    #[error("{field} is {len} bytes, the limit is {max}")]
    TextTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("{field} contains an embedded NUL byte")]
    EmbeddedNul { field: &'static str },

    #[error("{0}")]
    Other(String),
}
