//! Base-ledger address type.

use crate::error::TypesError;
use crate::network::Network;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Length of a decoded address: version byte, 20-byte hash, 4-byte checksum.
const DECODED_LEN: usize = 25;

/// A Base58Check base-ledger address.
///
/// Only constructed through [`Address::parse`] or [`Address::from_hash160`], so
/// every value carries a valid checksum and a version byte known to some network.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    /// Validate `raw` as an address of `network`.
    pub fn parse(raw: &str, network: Network) -> Result<Self, TypesError> {
        let invalid = || TypesError::InvalidAddress(raw.to_string());

        let decoded = bs58::decode(raw).into_vec().map_err(|_| invalid())?;
        if decoded.len() != DECODED_LEN {
            return Err(invalid());
        }

        let (body, check) = decoded.split_at(DECODED_LEN - 4);
        if checksum(body) != check {
            return Err(invalid());
        }
        if !network.accepts_version(body[0]) {
            return Err(invalid());
        }

        Ok(Self(raw.to_string()))
    }

    /// Encode a version byte and a 20-byte key or script hash.
    pub fn from_hash160(version: u8, hash: &[u8; 20]) -> Self {
        let mut data = Vec::with_capacity(DECODED_LEN);
        data.push(version);
        data.extend_from_slice(hash);
        let check = checksum(&data);
        data.extend_from_slice(&check);
        Self(bs58::encode(data).into_string())
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// First four bytes of the double SHA-256 of `data`.
fn checksum(data: &[u8]) -> [u8; 4] {
    let digest = Sha256::digest(Sha256::digest(data));
    [digest[0], digest[1], digest[2], digest[3]]
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
