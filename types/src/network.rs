//! Base-ledger network selection.

use serde::{Deserialize, Serialize};

/// Identifies which base-ledger network addresses are validated against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// The production network.
    Main,
    /// The public test network.
    Test,
    /// Local regression-test network.
    Regtest,
}

impl Network {
    /// Version byte of pay-to-pubkey-hash addresses.
    pub fn pubkey_address_version(&self) -> u8 {
        match self {
            Self::Main => 0x00,
            Self::Test | Self::Regtest => 0x6f,
        }
    }

    /// Version byte of pay-to-script-hash addresses.
    pub fn script_address_version(&self) -> u8 {
        match self {
            Self::Main => 0x05,
            Self::Test | Self::Regtest => 0xc4,
        }
    }

    /// Whether an address with this version byte belongs to the network.
    pub fn accepts_version(&self, version: u8) -> bool {
        version == self.pubkey_address_version() || version == self.script_address_version()
    }

    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Test => "test",
            Self::Regtest => "regtest",
        }
    }
}
