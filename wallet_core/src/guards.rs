//! Precondition guards evaluated before any payload is built.
//!
//! Each guard is a pure predicate over the request and a read-only state
//! snapshot. A command lists its guards in a fixed order and the first failure
//! is the one reported.

use overlay_store::{ConsensusState, PropertyDescriptor};
use overlay_types::{Address, Amount, PropertyId};

use crate::pending::PendingLedger;
use crate::WalletError;

/// Safety thresholds applied by the guards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuardLimits {
    pub max_reference_amount: Amount,
    pub max_accept_fee: Amount,
    pub min_payment_window: u8,
}

/// What a guard may read.
pub struct GuardContext<'a, S: ?Sized> {
    pub state: &'a S,
    pub pending: &'a PendingLedger,
    pub limits: &'a GuardLimits,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Guard<'a> {
    /// Reference output stays below the dust ceiling.
    SaneReferenceAmount(Amount),
    /// Both the confirmed and the available balance cover `amount`.
    SufficientBalance {
        address: &'a Address,
        property: PropertyId,
        amount: Amount,
    },
    NonEmptyName(&'a str),
    /// Legacy exchange trades only the two primary tokens.
    OnlyPrimaryProperties(PropertyId),
    ActiveCrowdsale(PropertyId),
    /// Sender is the property's current issuer.
    TokenAdministrator {
        sender: &'a Address,
        property: PropertyId,
    },
    RangeOk {
        field: &'static str,
        amount: Amount,
    },
    NoDuplicateOffer {
        seller: &'a Address,
        property: PropertyId,
    },
    OfferExists {
        seller: &'a Address,
        property: PropertyId,
    },
    /// The offer's fee floor and payment window are within the safety limits.
    SafeAcceptTerms {
        seller: &'a Address,
        property: PropertyId,
    },
    SameEcosystem(PropertyId, PropertyId),
    DistinctProperties(PropertyId, PropertyId),
}

impl Guard<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SaneReferenceAmount(_) => "sane_reference_amount",
            Self::SufficientBalance { .. } => "sufficient_balance",
            Self::NonEmptyName(_) => "non_empty_name",
            Self::OnlyPrimaryProperties(_) => "only_primary_properties",
            Self::ActiveCrowdsale(_) => "active_crowdsale",
            Self::TokenAdministrator { .. } => "token_administrator",
            Self::RangeOk { .. } => "range_ok",
            Self::NoDuplicateOffer { .. } => "no_duplicate_offer",
            Self::OfferExists { .. } => "offer_exists",
            Self::SafeAcceptTerms { .. } => "safe_accept_terms",
            Self::SameEcosystem(..) => "same_ecosystem",
            Self::DistinctProperties(..) => "distinct_properties",
        }
    }

    pub fn check<S: ConsensusState + ?Sized>(
        &self,
        ctx: &GuardContext<'_, S>,
    ) -> Result<(), WalletError> {
        match *self {
            Self::SaneReferenceAmount(amount) => {
                if amount > ctx.limits.max_reference_amount {
                    return Err(WalletError::InvalidAmount(format!(
                        "reference amount {amount} exceeds {}",
                        ctx.limits.max_reference_amount
                    )));
                }
            }

            Self::SufficientBalance {
                address,
                property,
                amount,
            } => {
                let confirmed = ctx.state.confirmed_balance(address, property)?;
                if confirmed < amount {
                    return Err(WalletError::InsufficientBalance {
                        needed: amount,
                        available: confirmed,
                    });
                }
                let available = ctx.pending.available_balance(ctx.state, address, property)?;
                if available < amount {
                    tracing::debug!(
                        %address,
                        %property,
                        %confirmed,
                        %available,
                        "balance held by pending transactions"
                    );
                    return Err(WalletError::InsufficientBalance {
                        needed: amount,
                        available,
                    });
                }
            }

            Self::NonEmptyName(name) => {
                if name.is_empty() {
                    return Err(WalletError::InvalidParameter(
                        "name must not be empty".into(),
                    ));
                }
            }

            Self::OnlyPrimaryProperties(property) => {
                if !property.is_primary() {
                    return Err(WalletError::InvalidParameter(format!(
                        "property {property} cannot be traded here, only {} and {}",
                        PropertyId::PRIMARY,
                        PropertyId::TEST_PRIMARY
                    )));
                }
            }

            Self::ActiveCrowdsale(property) => {
                if !ctx.state.is_crowdsale_active(property)? {
                    return Err(WalletError::PreconditionFailed(format!(
                        "no active crowdsale for property {property}"
                    )));
                }
            }

            Self::TokenAdministrator { sender, property } => {
                if &descriptor(ctx.state, property)?.issuer != sender {
                    return Err(WalletError::Unauthorized(property));
                }
            }

            Self::RangeOk { field, amount } => {
                if !amount.is_range_ok() {
                    return Err(WalletError::InvalidAmount(format!("{field} not in range")));
                }
            }

            Self::NoDuplicateOffer { seller, property } => {
                if ctx.state.offer_exists(seller, property)? {
                    return Err(WalletError::PreconditionFailed(format!(
                        "a sell offer for property {property} already exists, use update instead"
                    )));
                }
            }

            Self::OfferExists { seller, property } => {
                if !ctx.state.offer_exists(seller, property)? {
                    return Err(WalletError::PreconditionFailed(format!(
                        "no matching sell offer for property {property}"
                    )));
                }
            }

            Self::SafeAcceptTerms { seller, property } => {
                let terms = ctx.state.get_offer(seller, property)?.ok_or_else(|| {
                    WalletError::PreconditionFailed(format!(
                        "no matching sell offer for property {property}"
                    ))
                })?;
                if terms.min_accept_fee > ctx.limits.max_accept_fee {
                    return Err(WalletError::PreconditionFailed(format!(
                        "unsafe fee: minimum accept fee {} is above {}",
                        terms.min_accept_fee, ctx.limits.max_accept_fee
                    )));
                }
                if terms.payment_window < ctx.limits.min_payment_window {
                    return Err(WalletError::PreconditionFailed(format!(
                        "unsafe payment window: {} blocks is less than {}",
                        terms.payment_window, ctx.limits.min_payment_window
                    )));
                }
            }

            Self::SameEcosystem(a, b) => {
                if descriptor(ctx.state, a)?.ecosystem != descriptor(ctx.state, b)?.ecosystem {
                    return Err(WalletError::PreconditionFailed(format!(
                        "properties {a} and {b} are in different ecosystems"
                    )));
                }
            }

            Self::DistinctProperties(a, b) => {
                if a == b {
                    return Err(WalletError::PreconditionFailed(format!(
                        "property for sale and property desired are both {a}"
                    )));
                }
            }
        }
        Ok(())
    }
}

fn descriptor<S: ConsensusState + ?Sized>(
    state: &S,
    property: PropertyId,
) -> Result<PropertyDescriptor, WalletError> {
    state.get_property(property)?.ok_or_else(|| {
        WalletError::InvalidParameter(format!("property {property} does not exist"))
    })
}

/// Evaluate `guards` in order, stopping at the first failure.
pub fn run_guards<S: ConsensusState + ?Sized>(
    guards: &[Guard<'_>],
    ctx: &GuardContext<'_, S>,
) -> Result<(), WalletError> {
    for guard in guards {
        if let Err(e) = guard.check(ctx) {
            tracing::debug!(guard = guard.name(), error = %e, "guard rejected request");
            return Err(e);
        }
    }
    Ok(())
}
