//! Process-wide fee policy and its scoped override.
//!
//! The base-ledger builder reads the current policy through a shared
//! [`FeePolicyHandle`]. The exchange-accept flow temporarily installs a policy
//! matching the seller's minimum accept fee; [`FeeOverride`] restores the prior
//! policy when dropped, on every exit path.

use overlay_types::Amount;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

/// Fee rate handed to the base-ledger builder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeePolicy {
    /// Base-currency units per 1000 bytes.
    pub rate_per_kb: Amount,
    /// Pay at least `rate_per_kb`, even when the builder would choose less.
    pub enforce_minimum: bool,
}

impl FeePolicy {
    /// A policy that pays at least `rate_per_kb`.
    pub fn at_least(rate_per_kb: Amount) -> Self {
        Self {
            rate_per_kb,
            enforce_minimum: true,
        }
    }
}

/// Returned when an override is already installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("fee policy override already held")]
pub struct OverrideBusy;

#[derive(Debug, Default)]
struct PolicyState {
    policy: FeePolicy,
    overridden: bool,
}

/// Shared handle to the process-wide fee policy.
#[derive(Clone, Debug, Default)]
pub struct FeePolicyHandle {
    inner: Arc<Mutex<PolicyState>>,
}

impl FeePolicyHandle {
    pub fn new(policy: FeePolicy) -> Self {
        Self {
            inner: Arc::new(Mutex::new(PolicyState {
                policy,
                overridden: false,
            })),
        }
    }

    /// The policy the builder should apply right now.
    pub fn current(&self) -> FeePolicy {
        self.lock().policy
    }

    /// Whether a scoped override is installed.
    pub fn is_overridden(&self) -> bool {
        self.lock().overridden
    }

    /// Replace the global policy. Refused while an override is installed, since the
    /// override's release would silently undo the change.
    pub fn set(&self, policy: FeePolicy) -> Result<(), OverrideBusy> {
        let mut state = self.lock();
        if state.overridden {
            return Err(OverrideBusy);
        }
        state.policy = policy;
        Ok(())
    }

    /// Install `policy` until the returned guard is dropped.
    pub fn scoped_override(&self, policy: FeePolicy) -> Result<FeeOverride<'_>, OverrideBusy> {
        let mut state = self.lock();
        if state.overridden {
            return Err(OverrideBusy);
        }
        let previous = std::mem::replace(&mut state.policy, policy);
        state.overridden = true;
        tracing::debug!(rate_per_kb = %policy.rate_per_kb, "fee policy override installed");
        Ok(FeeOverride {
            handle: self,
            previous,
        })
    }

    fn lock(&self) -> MutexGuard<'_, PolicyState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Scoped fee policy override. Restores the prior policy on drop.
#[derive(Debug)]
pub struct FeeOverride<'a> {
    handle: &'a FeePolicyHandle,
    previous: FeePolicy,
}

impl FeeOverride<'_> {
    /// The policy that will be restored.
    pub fn previous(&self) -> FeePolicy {
        self.previous
    }
}

impl Drop for FeeOverride<'_> {
    fn drop(&mut self) {
        let mut state = self.handle.lock();
        state.policy = self.previous;
        state.overridden = false;
        tracing::debug!("fee policy override released");
    }
}
