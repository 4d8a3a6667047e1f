//! Token amounts in the smallest indivisible unit.
//!
//! Amounts are signed 64-bit integers. Divisible properties interpret user-facing
//! decimal strings at 1e-8 granularity; indivisible properties accept whole units only.
//! Parsing accumulates in 128-bit arithmetic and checks the protocol ceiling
//! explicitly, so over-range input is reported rather than wrapped.

use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Units per whole token of a divisible property (and of the base currency).
pub const COIN: i64 = 100_000_000;

/// Number of fractional digits a divisible amount may carry.
pub const DECIMALS: usize = 8;

/// Largest magnitude any protocol amount may take.
pub const MAX_AMOUNT: i64 = 9_223_372_036_854_775_807;

/// A quantity of a property (or of the base currency) in its smallest unit.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Self = Self(0);

    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> i64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Whether the amount lies within `1..=MAX_AMOUNT`.
    pub fn is_range_ok(&self) -> bool {
        in_range(i128::from(self.0))
    }

    /// Parse a user-facing amount string.
    ///
    /// Accepts ASCII digits with at most one decimal point. Zero is accepted here;
    /// positivity is a per-command rule enforced by callers.
    pub fn parse(input: &str, divisible: bool) -> Result<Self, TypesError> {
        let invalid = || TypesError::InvalidAmount(input.to_string());

        let (whole, fraction) = match input.split_once('.') {
            Some(_) if !divisible => {
                return Err(TypesError::FractionalIndivisible(input.to_string()))
            }
            Some((_, "")) => return Err(invalid()),
            Some(parts) => parts,
            None => (input, ""),
        };

        if whole.is_empty() || !is_digits(whole) || !is_digits(fraction) {
            return Err(invalid());
        }
        if fraction.len() > DECIMALS {
            return Err(TypesError::TooManyDecimals(input.to_string()));
        }

        let ceiling = i128::from(MAX_AMOUNT);
        let out_of_range = || TypesError::AmountOutOfRange(input.to_string());

        let mut value: i128 = 0;
        for digit in whole.bytes() {
            value = value * 10 + i128::from(digit - b'0');
            if value > ceiling {
                return Err(out_of_range());
            }
        }

        if divisible {
            value *= i128::from(COIN);
            let mut place = i128::from(COIN) / 10;
            for digit in fraction.bytes() {
                value += i128::from(digit - b'0') * place;
                place /= 10;
            }
        }

        if value > ceiling {
            return Err(out_of_range());
        }
        i64::try_from(value).map(Self).map_err(|_| out_of_range())
    }

    /// Render the amount the way users type it.
    pub fn format(&self, divisible: bool) -> String {
        if !divisible {
            return self.0.to_string();
        }
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        let coin = COIN.unsigned_abs();
        format!("{sign}{}.{:08}", magnitude / coin, magnitude % coin)
    }
}

/// Whether `value` lies within the protocol's representable range `1..=MAX_AMOUNT`.
pub fn in_range(value: i128) -> bool {
    (1..=i128::from(MAX_AMOUNT)).contains(&value)
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
