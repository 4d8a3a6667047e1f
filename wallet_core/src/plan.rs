//! Per-command submission plans.
//!
//! A plan tells the coordinator which guards to run and in what order, how
//! to route the transaction through the builder, and what pending effect to
//! record once it is committed. The coordinator itself is command-agnostic.

use overlay_transactions::{
    dex::{DexAction, ExchangeAccept, ExchangeOffer},
    issuance::{IssuanceCrowdsale, IssuanceFixed, IssuanceManaged},
    management::{ChangeIssuer, CloseCrowdsale, Grant, Revoke},
    send::{SendToOwners, SimpleSend},
    trade::{ExchangeTrade, TradeAction},
    CommandKind, TransactionRequest,
};
use overlay_types::{Address, Amount, PropertyId};

use crate::guards::Guard;
use crate::pending::PendingEffect;

/// Builder routing for one command. The redeem address falls back to the sender.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Route<'a> {
    pub recipient: Option<&'a Address>,
    pub redeem: Option<&'a Address>,
    pub reference_amount: Amount,
}

impl<'a> Route<'a> {
    fn to(recipient: &'a Address) -> Self {
        Self {
            recipient: Some(recipient),
            ..Self::default()
        }
    }
}

pub trait CommandPlan {
    /// Preconditions, in evaluation order.
    fn guards(&self) -> Vec<Guard<'_>>;

    fn route(&self) -> Route<'_> {
        Route::default()
    }

    /// Effect recorded in the pending ledger after a successful commit.
    fn pending_effect(&self) -> Option<PendingEffect> {
        None
    }

    /// Offer whose minimum fee sets the fee policy while the builder runs.
    fn fee_source(&self) -> Option<(&Address, PropertyId)> {
        None
    }
}

/// The plan for `request`.
pub fn plan_for(request: &TransactionRequest) -> &dyn CommandPlan {
    match request {
        TransactionRequest::SimpleSend(tx) => tx,
        TransactionRequest::ExchangeOffer(tx) => tx,
        TransactionRequest::ExchangeAccept(tx) => tx,
        TransactionRequest::IssuanceCrowdsale(tx) => tx,
        TransactionRequest::IssuanceFixed(tx) => tx,
        TransactionRequest::IssuanceManaged(tx) => tx,
        TransactionRequest::SendToOwners(tx) => tx,
        TransactionRequest::Grant(tx) => tx,
        TransactionRequest::Revoke(tx) => tx,
        TransactionRequest::CloseCrowdsale(tx) => tx,
        TransactionRequest::ExchangeTrade(tx) => tx,
        TransactionRequest::ChangeIssuer(tx) => tx,
    }
}

fn outflow(
    kind: CommandKind,
    sender: &Address,
    property: PropertyId,
    amount: Amount,
) -> PendingEffect {
    PendingEffect {
        sender: sender.clone(),
        counterparty: None,
        kind,
        property,
        amount,
        desired: None,
        action: None,
        outflow: amount,
    }
}

impl CommandPlan for SimpleSend {
    fn guards(&self) -> Vec<Guard<'_>> {
        vec![
            Guard::SaneReferenceAmount(self.reference_amount),
            Guard::SufficientBalance {
                address: &self.from,
                property: self.property,
                amount: self.amount,
            },
        ]
    }

    fn route(&self) -> Route<'_> {
        Route {
            recipient: Some(&self.to),
            redeem: self.redeem.as_ref(),
            reference_amount: self.reference_amount,
        }
    }

    fn pending_effect(&self) -> Option<PendingEffect> {
        Some(PendingEffect {
            counterparty: Some(self.to.clone()),
            ..outflow(CommandKind::SimpleSend, &self.from, self.property, self.amount)
        })
    }
}

impl CommandPlan for SendToOwners {
    fn guards(&self) -> Vec<Guard<'_>> {
        vec![Guard::SufficientBalance {
            address: &self.from,
            property: self.property,
            amount: self.amount,
        }]
    }

    fn route(&self) -> Route<'_> {
        Route {
            redeem: self.redeem.as_ref(),
            ..Route::default()
        }
    }

    fn pending_effect(&self) -> Option<PendingEffect> {
        Some(outflow(
            CommandKind::SendToOwners,
            &self.from,
            self.property,
            self.amount,
        ))
    }
}

impl CommandPlan for ExchangeOffer {
    fn guards(&self) -> Vec<Guard<'_>> {
        let mut guards = vec![Guard::OnlyPrimaryProperties(self.property)];
        if self.action != DexAction::Cancel {
            guards.push(Guard::RangeOk {
                field: "amount for sale",
                amount: self.amount_for_sale,
            });
            guards.push(Guard::RangeOk {
                field: "amount desired",
                amount: self.amount_desired,
            });
            guards.push(Guard::SufficientBalance {
                address: &self.from,
                property: self.property,
                amount: self.amount_for_sale,
            });
        }
        if self.action == DexAction::New {
            guards.push(Guard::NoDuplicateOffer {
                seller: &self.from,
                property: self.property,
            });
        }
        guards
    }

    fn pending_effect(&self) -> Option<PendingEffect> {
        let outflow = match self.action {
            DexAction::Cancel => Amount::ZERO,
            DexAction::New | DexAction::Update => self.amount_for_sale,
        };
        Some(PendingEffect {
            sender: self.from.clone(),
            counterparty: None,
            kind: CommandKind::ExchangeOffer,
            property: self.property,
            amount: self.amount_for_sale,
            // Base currency asked for in return.
            desired: Some((PropertyId::NONE, self.amount_desired)),
            action: Some(self.action.code()),
            outflow,
        })
    }
}

impl CommandPlan for ExchangeAccept {
    fn guards(&self) -> Vec<Guard<'_>> {
        let mut guards = vec![
            Guard::OnlyPrimaryProperties(self.property),
            Guard::OfferExists {
                seller: &self.to,
                property: self.property,
            },
        ];
        if !self.allow_unsafe {
            guards.push(Guard::SafeAcceptTerms {
                seller: &self.to,
                property: self.property,
            });
        }
        guards
    }

    fn route(&self) -> Route<'_> {
        Route::to(&self.to)
    }

    fn fee_source(&self) -> Option<(&Address, PropertyId)> {
        Some((&self.to, self.property))
    }
}

impl CommandPlan for IssuanceFixed {
    fn guards(&self) -> Vec<Guard<'_>> {
        vec![Guard::NonEmptyName(&self.info.name)]
    }
}

impl CommandPlan for IssuanceCrowdsale {
    fn guards(&self) -> Vec<Guard<'_>> {
        vec![Guard::NonEmptyName(&self.info.name)]
    }
}

impl CommandPlan for IssuanceManaged {
    fn guards(&self) -> Vec<Guard<'_>> {
        vec![Guard::NonEmptyName(&self.info.name)]
    }
}

impl CommandPlan for Grant {
    fn guards(&self) -> Vec<Guard<'_>> {
        vec![Guard::TokenAdministrator {
            sender: &self.from,
            property: self.property,
        }]
    }

    fn route(&self) -> Route<'_> {
        Route::to(&self.to)
    }
}

impl CommandPlan for Revoke {
    fn guards(&self) -> Vec<Guard<'_>> {
        vec![
            Guard::TokenAdministrator {
                sender: &self.from,
                property: self.property,
            },
            Guard::SufficientBalance {
                address: &self.from,
                property: self.property,
                amount: self.amount,
            },
        ]
    }

    fn pending_effect(&self) -> Option<PendingEffect> {
        Some(outflow(
            CommandKind::Revoke,
            &self.from,
            self.property,
            self.amount,
        ))
    }
}

impl CommandPlan for CloseCrowdsale {
    fn guards(&self) -> Vec<Guard<'_>> {
        vec![
            Guard::ActiveCrowdsale(self.property),
            Guard::TokenAdministrator {
                sender: &self.from,
                property: self.property,
            },
        ]
    }
}

impl CommandPlan for ExchangeTrade {
    fn guards(&self) -> Vec<Guard<'_>> {
        let mut guards = Vec::new();
        if self.action != TradeAction::CancelEverything {
            guards.push(Guard::SameEcosystem(
                self.property_for_sale,
                self.property_desired,
            ));
            guards.push(Guard::DistinctProperties(
                self.property_for_sale,
                self.property_desired,
            ));
        }
        if self.action.carries_amounts() {
            guards.push(Guard::RangeOk {
                field: "amount for sale",
                amount: self.amount_for_sale,
            });
            guards.push(Guard::RangeOk {
                field: "amount desired",
                amount: self.amount_desired,
            });
        }
        if self.action == TradeAction::Add {
            guards.push(Guard::SufficientBalance {
                address: &self.from,
                property: self.property_for_sale,
                amount: self.amount_for_sale,
            });
        }
        guards
    }

    fn pending_effect(&self) -> Option<PendingEffect> {
        let outflow = if self.action == TradeAction::Add {
            self.amount_for_sale
        } else {
            Amount::ZERO
        };
        Some(PendingEffect {
            sender: self.from.clone(),
            counterparty: None,
            kind: CommandKind::ExchangeTrade,
            property: self.property_for_sale,
            amount: self.amount_for_sale,
            desired: Some((self.property_desired, self.amount_desired)),
            action: Some(self.action.code()),
            outflow,
        })
    }
}

impl CommandPlan for ChangeIssuer {
    fn guards(&self) -> Vec<Guard<'_>> {
        vec![Guard::TokenAdministrator {
            sender: &self.from,
            property: self.property,
        }]
    }

    fn route(&self) -> Route<'_> {
        Route::to(&self.to)
    }
}
