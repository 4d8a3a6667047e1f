//! Pipeline configuration with TOML file support.

use overlay_transactions::CommitMode;
use overlay_types::{Amount, Network, COIN};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::guards::GuardLimits;
use crate::WalletError;

/// Configuration for the issuance pipeline.
///
/// Can be loaded from a TOML file via [`WalletConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Base-ledger network whose address versions are accepted.
    #[serde(default = "default_network")]
    pub network: Network,

    /// Sign and broadcast built transactions instead of returning them unsigned.
    #[serde(default = "default_true")]
    pub auto_commit: bool,

    /// Ceiling on the base-currency value of a reference output.
    #[serde(default = "default_max_reference_amount")]
    pub max_reference_amount: Amount,

    /// Exchange accepts above this minimum fee are refused unless overridden.
    #[serde(default = "default_max_accept_fee")]
    pub max_accept_fee: Amount,

    /// Exchange accepts with a shorter payment window are refused unless overridden.
    #[serde(default = "default_min_payment_window")]
    pub min_payment_window: u8,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_network() -> Network {
    Network::Main
}

fn default_true() -> bool {
    true
}

fn default_max_reference_amount() -> Amount {
    Amount::new(COIN / 100)
}

fn default_max_accept_fee() -> Amount {
    Amount::new(COIN / 100)
}

fn default_min_payment_window() -> u8 {
    10
}

// ── Impl ───────────────────────────────────────────────────────────────

impl WalletConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, WalletError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| WalletError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, WalletError> {
        toml::from_str(s).map_err(|e| WalletError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, WalletError> {
        toml::to_string_pretty(self).map_err(|e| WalletError::Config(e.to_string()))
    }

    pub fn commit_mode(&self) -> CommitMode {
        if self.auto_commit {
            CommitMode::AutoCommit
        } else {
            CommitMode::ReturnUnsigned
        }
    }

    pub fn guard_limits(&self) -> GuardLimits {
        GuardLimits {
            max_reference_amount: self.max_reference_amount,
            max_accept_fee: self.max_accept_fee,
            min_payment_window: self.min_payment_window,
        }
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            network: default_network(),
            auto_commit: default_true(),
            max_reference_amount: default_max_reference_amount(),
            max_accept_fee: default_max_accept_fee(),
            min_payment_window: default_min_payment_window(),
        }
    }
}
