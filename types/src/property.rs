//! Property identifiers and the closed code sets attached to properties.

use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric identifier of a token type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PropertyId(u32);

impl PropertyId {
    /// The base protocol token.
    pub const PRIMARY: Self = Self(1);
    /// The test-ecosystem counterpart of the base protocol token.
    pub const TEST_PRIMARY: Self = Self(2);
    /// Placeholder used by issuances that do not replace an earlier property.
    pub const NONE: Self = Self(0);
    /// First identifier handed out to tokens created in the test ecosystem.
    pub const FIRST_TEST_ISSUED: Self = Self(0x8000_0003);

    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// One of the two reserved identifiers tradable on the legacy exchange.
    pub fn is_primary(&self) -> bool {
        *self == Self::PRIMARY || *self == Self::TEST_PRIMARY
    }

    /// Ecosystem implied by the identifier's numbering range.
    pub fn ecosystem(&self) -> Ecosystem {
        if *self == Self::TEST_PRIMARY || *self >= Self::FIRST_TEST_ISSUED {
            Ecosystem::Test
        } else {
            Ecosystem::Main
        }
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Partition a property belongs to. Cross-ecosystem trades are disallowed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ecosystem {
    Main,
    Test,
}

impl Ecosystem {
    pub fn from_code(code: i64) -> Result<Self, TypesError> {
        match code {
            1 => Ok(Self::Main),
            2 => Ok(Self::Test),
            _ => Err(TypesError::UnknownCode { field: "ecosystem", code }),
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Self::Main => 1,
            Self::Test => 2,
        }
    }
}

/// Whether units of a new property can be split below one whole token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    Indivisible,
    Divisible,
}

impl PropertyType {
    pub fn from_code(code: i64) -> Result<Self, TypesError> {
        match code {
            1 => Ok(Self::Indivisible),
            2 => Ok(Self::Divisible),
            _ => Err(TypesError::UnknownCode { field: "property type", code }),
        }
    }

    pub fn code(&self) -> u16 {
        match self {
            Self::Indivisible => 1,
            Self::Divisible => 2,
        }
    }

    pub fn is_divisible(&self) -> bool {
        matches!(self, Self::Divisible)
    }
}
