//! Integration tests exercising the full issuance pipeline:
//! raw command → normalization → guards → payload → builder → pending ledger.
//!
//! Consensus state and the transaction builder are the nullable
//! implementations, so every test is deterministic and runs in-process.

use std::sync::Arc;
use std::thread;

use overlay_nullables::{test_address, NullBuilder, NullState};
use overlay_store::{OfferTerms, StoreError};
use overlay_transactions::{
    issuance::PropertyInfo, BuildFailure, BuildOutcome, CommandKind, FeePolicy, FeePolicyHandle,
    PayloadCodec, PayloadError, WireCodec,
};
use overlay_types::{Address, Amount, PropertyId, TxId, MAX_AMOUNT};
use overlay_wallet_core::{
    Coordinator, RawCommand, RawPropertyInfo, Submission, WalletConfig, WalletError,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const TOKEN: u32 = 3;

fn alice() -> Address {
    test_address(1)
}

fn bob() -> Address {
    test_address(2)
}

fn issuer() -> Address {
    test_address(9)
}

fn base_policy() -> FeePolicy {
    FeePolicy {
        rate_per_kb: Amount::new(10_000),
        enforce_minimum: false,
    }
}

fn setup() -> Coordinator<NullState, NullBuilder> {
    let fee_policy = FeePolicyHandle::new(base_policy());
    let state = NullState::new();
    state.define_property(PropertyId::PRIMARY, true, issuer());
    state.define_property(PropertyId::TEST_PRIMARY, true, issuer());
    state.define_property(PropertyId::new(TOKEN), false, issuer());
    state.define_property(PropertyId::new(4), true, issuer());
    state.define_property(PropertyId::FIRST_TEST_ISSUED, true, issuer());
    Coordinator::new(
        state,
        NullBuilder::with_fee_policy(fee_policy.clone()),
        WalletConfig::default(),
        fee_policy,
    )
}

fn fund<C>(
    coordinator: &Coordinator<NullState, NullBuilder, C>,
    address: &Address,
    property: u32,
    amount: i64,
) {
    coordinator
        .state()
        .set_balance(address, PropertyId::new(property), Amount::new(amount));
}

fn send(amount: &str) -> RawCommand {
    RawCommand::SimpleSend {
        from: alice().to_string(),
        to: bob().to_string(),
        property: TOKEN,
        amount: amount.into(),
        redeem: None,
        reference_amount: None,
    }
}

fn available(coordinator: &Coordinator<NullState, NullBuilder>, property: u32) -> Amount {
    coordinator
        .available_balance(&alice(), PropertyId::new(property))
        .unwrap()
}

fn info(name: &str) -> RawPropertyInfo {
    RawPropertyInfo {
        ecosystem: 1,
        property_type: 2,
        previous_id: 0,
        category: "Companies".into(),
        subcategory: "Bitcoin Mining".into(),
        name: name.into(),
        url: "builder.bitwatch.co".into(),
        data: String::new(),
    }
}

fn accept(allow_unsafe: bool) -> RawCommand {
    RawCommand::ExchangeAccept {
        from: alice().to_string(),
        to: bob().to_string(),
        property: 1,
        amount: "15.0".into(),
        allow_unsafe,
    }
}

fn offer_terms(min_accept_fee: i64, payment_window: u8) -> OfferTerms {
    OfferTerms {
        min_accept_fee: Amount::new(min_accept_fee),
        payment_window,
    }
}

// ---------------------------------------------------------------------------
// 1. Balance accounting against the pending ledger
// ---------------------------------------------------------------------------

#[test]
fn overdraw_is_rejected_without_side_effects() {
    let coordinator = setup();
    fund(&coordinator, &alice(), TOKEN, 100);

    let result = coordinator.submit(&send("150"));
    assert_eq!(
        result,
        Err(WalletError::InsufficientBalance {
            needed: Amount::new(150),
            available: Amount::new(100),
        })
    );
    assert_eq!(coordinator.builder().call_count(), 0);
    assert!(coordinator.pending_entries(&alice()).is_empty());
    assert_eq!(available(&coordinator, TOKEN), Amount::new(100));
}

#[test]
fn committed_send_reduces_available_balance() {
    let coordinator = setup();
    fund(&coordinator, &alice(), TOKEN, 100);

    let first = coordinator.submit(&send("60")).unwrap();
    let Submission::Committed(txid) = first else {
        panic!("expected a committed submission, got {first:?}");
    };
    assert_eq!(available(&coordinator, TOKEN), Amount::new(40));

    let entry = coordinator.pending_entry(&txid).unwrap();
    assert_eq!(entry.effect.kind, CommandKind::SimpleSend);
    assert_eq!(entry.effect.counterparty, Some(bob()));
    assert_eq!(entry.effect.outflow, Amount::new(60));

    assert_eq!(
        coordinator.submit(&send("60")),
        Err(WalletError::InsufficientBalance {
            needed: Amount::new(60),
            available: Amount::new(40),
        })
    );
    assert_eq!(coordinator.builder().call_count(), 1);

    // Once reconciled, the confirmed balance carries the spend.
    coordinator.retire(&txid);
    fund(&coordinator, &alice(), TOKEN, 40);
    assert_eq!(available(&coordinator, TOKEN), Amount::new(40));
}

#[test]
fn concurrent_sends_cannot_overdraw() {
    let coordinator = Arc::new(setup());
    coordinator
        .state()
        .set_balance(&alice(), PropertyId::new(TOKEN), Amount::new(100));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let coordinator = Arc::clone(&coordinator);
            thread::spawn(move || coordinator.submit(&send("60")))
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let committed = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(committed, 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| matches!(e, WalletError::InsufficientBalance { .. })));
    assert_eq!(available(&coordinator, TOKEN), Amount::new(40));
}

#[test]
fn duplicate_txid_records_one_entry() {
    let coordinator = setup();
    fund(&coordinator, &alice(), TOKEN, 100);
    let txid = TxId::new([7; 32]);
    coordinator.builder().push_outcome(BuildOutcome::committed(txid));
    coordinator.builder().push_outcome(BuildOutcome::committed(txid));

    assert_eq!(coordinator.submit(&send("10")), Ok(Submission::Committed(txid)));
    assert_eq!(coordinator.submit(&send("10")), Ok(Submission::Committed(txid)));

    assert_eq!(coordinator.pending_entries(&alice()).len(), 1);
    assert_eq!(available(&coordinator, TOKEN), Amount::new(90));
}

#[test]
fn builder_failure_records_nothing() {
    let coordinator = setup();
    fund(&coordinator, &alice(), TOKEN, 100);
    coordinator.builder().fail_next(-206);

    assert_eq!(
        coordinator.submit(&send("60")),
        Err(WalletError::SubmissionFailed(BuildFailure::NoSpendableInputs))
    );
    assert!(coordinator.pending_entries(&alice()).is_empty());
    assert_eq!(available(&coordinator, TOKEN), Amount::new(100));

    coordinator.builder().fail_next(-42);
    assert_eq!(
        coordinator.submit(&send("60")),
        Err(WalletError::SubmissionFailed(BuildFailure::Other(-42)))
    );
}

#[test]
fn cancels_and_issuances_leave_balances_alone() {
    let coordinator = setup();

    let cancel = RawCommand::ExchangeTrade {
        from: alice().to_string(),
        property_for_sale: TOKEN,
        amount_for_sale: String::new(),
        property_desired: 1,
        amount_desired: String::new(),
        action: 3,
    };
    let Submission::Committed(txid) = coordinator.submit(&cancel).unwrap() else {
        panic!("expected a committed submission");
    };
    assert_eq!(
        coordinator.pending_entry(&txid).unwrap().effect.outflow,
        Amount::ZERO
    );

    coordinator
        .submit(&RawCommand::IssuanceManaged {
            from: alice().to_string(),
            info: info("Quantum Miner"),
        })
        .unwrap();
    assert_eq!(coordinator.pending_entries(&alice()).len(), 1);
    assert_eq!(coordinator.builder().call_count(), 2);
}

// ---------------------------------------------------------------------------
// 2. Guard failures never reach the builder
// ---------------------------------------------------------------------------

#[test]
fn empty_issuance_name_is_rejected_before_assembly() {
    let coordinator = setup();
    let result = coordinator.submit(&RawCommand::IssuanceFixed {
        from: alice().to_string(),
        info: info(""),
        amount: "1000".into(),
    });
    assert!(matches!(
        result,
        Err(WalletError::InvalidParameter(ref m)) if m.starts_with("name")
    ));
    assert_eq!(coordinator.builder().call_count(), 0);
}

#[test]
fn management_requires_the_issuer() {
    let coordinator = setup();
    let token = PropertyId::new(4);

    let close = |from: &Address| RawCommand::CloseCrowdsale {
        from: from.to_string(),
        property: 4,
    };
    assert!(matches!(
        coordinator.submit(&close(&alice())),
        Err(WalletError::PreconditionFailed(_))
    ));
    coordinator.state().set_crowdsale_active(token, true);
    assert_eq!(
        coordinator.submit(&close(&alice())),
        Err(WalletError::Unauthorized(token))
    );
    assert!(coordinator.submit(&close(&issuer())).is_ok());

    let change = RawCommand::ChangeIssuer {
        from: alice().to_string(),
        to: bob().to_string(),
        property: 4,
    };
    assert_eq!(coordinator.submit(&change), Err(WalletError::Unauthorized(token)));
    assert_eq!(coordinator.builder().call_count(), 1);
}

#[test]
fn revoke_checks_administrator_then_balance() {
    let coordinator = setup();
    let revoke = |from: &Address| RawCommand::Revoke {
        from: from.to_string(),
        property: TOKEN,
        amount: "50".into(),
        memo: Some("burn".into()),
    };
    assert!(matches!(
        coordinator.submit(&revoke(&alice())),
        Err(WalletError::Unauthorized(_))
    ));
    assert!(matches!(
        coordinator.submit(&revoke(&issuer())),
        Err(WalletError::InsufficientBalance { .. })
    ));
    fund(&coordinator, &issuer(), TOKEN, 80);
    coordinator.submit(&revoke(&issuer())).unwrap();
    assert_eq!(
        coordinator
            .available_balance(&issuer(), PropertyId::new(TOKEN))
            .unwrap(),
        Amount::new(30)
    );
}

#[test]
fn trades_must_stay_within_one_ecosystem() {
    let coordinator = setup();
    fund(&coordinator, &alice(), TOKEN, 100);
    let trade = |desired: u32| RawCommand::ExchangeTrade {
        from: alice().to_string(),
        property_for_sale: TOKEN,
        amount_for_sale: "10".into(),
        property_desired: desired,
        amount_desired: "1".into(),
        action: 1,
    };
    assert!(matches!(
        coordinator.submit(&trade(PropertyId::FIRST_TEST_ISSUED.value())),
        Err(WalletError::PreconditionFailed(_))
    ));
    assert!(matches!(
        coordinator.submit(&trade(TOKEN)),
        Err(WalletError::PreconditionFailed(_))
    ));
    coordinator.submit(&trade(1)).unwrap();
    assert_eq!(available(&coordinator, TOKEN), Amount::new(90));
}

#[test]
fn offer_amount_at_maximum_is_accepted() {
    let coordinator = setup();
    fund(&coordinator, &alice(), 1, MAX_AMOUNT);
    let offer = |amount: &str| RawCommand::ExchangeOffer {
        from: alice().to_string(),
        property: 1,
        amount_for_sale: amount.into(),
        amount_desired: "1".into(),
        payment_window: 10,
        min_accept_fee: "0.0001".into(),
        action: 1,
    };

    assert!(matches!(
        coordinator.submit(&offer("92233720368.54775808")),
        Err(WalletError::InvalidAmount(_))
    ));
    assert!(coordinator.submit(&offer("92233720368.54775807")).is_ok());
    assert_eq!(available(&coordinator, 1), Amount::ZERO);
}

#[test]
fn offer_outside_primary_tokens_is_invalid_parameter() {
    let coordinator = setup();
    fund(&coordinator, &alice(), TOKEN, 100);
    let result = coordinator.submit(&RawCommand::ExchangeOffer {
        from: alice().to_string(),
        property: TOKEN,
        amount_for_sale: "1.5".into(),
        amount_desired: "1".into(),
        payment_window: 10,
        min_accept_fee: "0.0001".into(),
        action: 1,
    });
    assert!(matches!(result, Err(WalletError::InvalidParameter(_))));
    assert_eq!(coordinator.builder().call_count(), 0);
}

#[test]
fn zero_amount_new_offer_fails_the_range_guard() {
    let coordinator = setup();
    fund(&coordinator, &alice(), 1, 100);
    let result = coordinator.submit(&RawCommand::ExchangeOffer {
        from: alice().to_string(),
        property: 1,
        amount_for_sale: "0".into(),
        amount_desired: "1".into(),
        payment_window: 10,
        min_accept_fee: "0.0001".into(),
        action: 1,
    });
    assert!(matches!(result, Err(WalletError::InvalidAmount(_))));
    assert_eq!(coordinator.builder().call_count(), 0);
}

#[test]
fn same_property_trade_is_reported_before_its_amounts() {
    let coordinator = setup();
    let result = coordinator.submit(&RawCommand::ExchangeTrade {
        from: alice().to_string(),
        property_for_sale: TOKEN,
        amount_for_sale: "0".into(),
        property_desired: TOKEN,
        amount_desired: "0".into(),
        action: 1,
    });
    assert!(matches!(result, Err(WalletError::PreconditionFailed(_))));
}

#[test]
fn bad_sender_is_reported_before_unknown_property() {
    let coordinator = setup();
    let result = coordinator.submit(&RawCommand::SimpleSend {
        from: "not-an-address".into(),
        to: bob().to_string(),
        property: 77,
        amount: "1".into(),
        redeem: None,
        reference_amount: None,
    });
    assert!(matches!(result, Err(WalletError::InvalidAddress(_))));
}

#[test]
fn duplicate_offer_is_rejected() {
    let coordinator = setup();
    fund(&coordinator, &alice(), 1, 1_000_000_000);
    coordinator
        .state()
        .put_offer(&alice(), PropertyId::PRIMARY, offer_terms(1_000, 10));
    let result = coordinator.submit(&RawCommand::ExchangeOffer {
        from: alice().to_string(),
        property: 1,
        amount_for_sale: "1".into(),
        amount_desired: "1".into(),
        payment_window: 10,
        min_accept_fee: "0.0001".into(),
        action: 1,
    });
    assert!(matches!(result, Err(WalletError::PreconditionFailed(_))));
}

#[test]
fn state_read_failure_is_reported() {
    let coordinator = setup();
    coordinator
        .state()
        .fail_reads(Some(StoreError::Backend("snapshot unavailable".into())));
    assert!(matches!(
        coordinator.submit(&send("1")),
        Err(WalletError::State(StoreError::Backend(_)))
    ));
    assert_eq!(coordinator.builder().call_count(), 0);
}

// ---------------------------------------------------------------------------
// 3. Exchange accept and the scoped fee policy
// ---------------------------------------------------------------------------

#[test]
fn unsafe_fee_leaves_policy_untouched() {
    let coordinator = setup();
    coordinator
        .state()
        .put_offer(&bob(), PropertyId::PRIMARY, offer_terms(2_000_000, 10));

    let result = coordinator.submit(&accept(false));
    assert!(matches!(
        result,
        Err(WalletError::PreconditionFailed(ref m)) if m.starts_with("unsafe fee")
    ));
    assert_eq!(coordinator.fee_policy().current(), base_policy());
    assert!(!coordinator.fee_policy().is_overridden());
    assert_eq!(coordinator.builder().call_count(), 0);
}

#[test]
fn unsafe_payment_window_is_rejected() {
    let coordinator = setup();
    coordinator
        .state()
        .put_offer(&bob(), PropertyId::PRIMARY, offer_terms(1_000, 5));
    assert!(matches!(
        coordinator.submit(&accept(false)),
        Err(WalletError::PreconditionFailed(ref m)) if m.starts_with("unsafe payment window")
    ));
}

#[test]
fn accept_runs_under_the_offer_fee() {
    let coordinator = setup();
    coordinator
        .state()
        .put_offer(&bob(), PropertyId::PRIMARY, offer_terms(2_000_000, 5));

    let result = coordinator.submit(&accept(true)).unwrap();
    assert!(matches!(result, Submission::Committed(_)));

    let call = &coordinator.builder().calls()[0];
    assert_eq!(call.recipient, Some(bob()));
    assert_eq!(call.fee_policy, Some(FeePolicy::at_least(Amount::new(2_000_000))));
    assert_eq!(coordinator.fee_policy().current(), base_policy());
    assert!(coordinator.pending_entries(&alice()).is_empty());
}

#[test]
fn accept_restores_policy_after_builder_failure() {
    let coordinator = setup();
    coordinator
        .state()
        .put_offer(&bob(), PropertyId::PRIMARY, offer_terms(5_000, 10));
    coordinator.builder().fail_next(-207);

    assert_eq!(
        coordinator.submit(&accept(false)),
        Err(WalletError::SubmissionFailed(BuildFailure::InsufficientFeeFunds))
    );
    assert_eq!(
        coordinator.builder().calls()[0].fee_policy,
        Some(FeePolicy::at_least(Amount::new(5_000)))
    );
    assert_eq!(coordinator.fee_policy().current(), base_policy());
    assert!(!coordinator.fee_policy().is_overridden());
}

#[test]
fn accept_requires_a_matching_offer() {
    let coordinator = setup();
    assert!(matches!(
        coordinator.submit(&accept(true)),
        Err(WalletError::PreconditionFailed(_))
    ));
    let mut raw = accept(true);
    if let RawCommand::ExchangeAccept { property, .. } = &mut raw {
        *property = TOKEN;
    }
    assert!(matches!(
        coordinator.submit(&raw),
        Err(WalletError::InvalidParameter(_))
    ));
}

// ---------------------------------------------------------------------------
// 4. Payload and routing handed to the builder
// ---------------------------------------------------------------------------

#[test]
fn builder_receives_the_wire_payload() {
    let coordinator = setup();
    fund(&coordinator, &alice(), TOKEN, 100);
    coordinator
        .submit(&RawCommand::SimpleSend {
            from: alice().to_string(),
            to: bob().to_string(),
            property: TOKEN,
            amount: "25".into(),
            redeem: Some(test_address(5).to_string()),
            reference_amount: Some("0.00000546".into()),
        })
        .unwrap();

    let call = &coordinator.builder().calls()[0];
    assert_eq!(
        call.payload,
        WireCodec
            .simple_send(PropertyId::new(TOKEN), Amount::new(25))
            .unwrap()
    );
    assert_eq!(call.sender, alice());
    assert_eq!(call.redeem, test_address(5));
    assert_eq!(call.reference_amount, Amount::new(546));
}

#[test]
fn oversized_reference_amount_is_rejected() {
    let coordinator = setup();
    fund(&coordinator, &alice(), TOKEN, 100);
    let result = coordinator.submit(&RawCommand::SimpleSend {
        from: alice().to_string(),
        to: bob().to_string(),
        property: TOKEN,
        amount: "1".into(),
        redeem: None,
        reference_amount: Some("0.02".into()),
    });
    assert!(matches!(result, Err(WalletError::InvalidAmount(_))));
    assert_eq!(coordinator.builder().call_count(), 0);
}

#[test]
fn grant_to_self_routes_to_sender() {
    let coordinator = setup();
    coordinator
        .submit(&RawCommand::Grant {
            from: issuer().to_string(),
            to: None,
            property: TOKEN,
            amount: "500".into(),
            memo: None,
        })
        .unwrap();
    assert_eq!(coordinator.builder().calls()[0].recipient, Some(issuer()));
}

/// A codec that refuses every payload.
struct RefusingCodec;

impl PayloadCodec for RefusingCodec {
    fn simple_send(&self, _: PropertyId, _: Amount) -> Result<Vec<u8>, PayloadError> {
        Err(PayloadError::Other("refused".into()))
    }
    fn send_to_owners(&self, _: PropertyId, _: Amount) -> Result<Vec<u8>, PayloadError> {
        Err(PayloadError::Other("refused".into()))
    }
    fn exchange_offer(
        &self,
        _: PropertyId,
        _: Amount,
        _: Amount,
        _: u8,
        _: Amount,
        _: overlay_transactions::dex::DexAction,
    ) -> Result<Vec<u8>, PayloadError> {
        Err(PayloadError::Other("refused".into()))
    }
    fn exchange_accept(&self, _: PropertyId, _: Amount) -> Result<Vec<u8>, PayloadError> {
        Err(PayloadError::Other("refused".into()))
    }
    fn exchange_trade(
        &self,
        _: PropertyId,
        _: Amount,
        _: PropertyId,
        _: Amount,
        _: overlay_transactions::trade::TradeAction,
    ) -> Result<Vec<u8>, PayloadError> {
        Err(PayloadError::Other("refused".into()))
    }
    fn issuance_fixed(&self, _: &PropertyInfo, _: Amount) -> Result<Vec<u8>, PayloadError> {
        Err(PayloadError::Other("refused".into()))
    }
    fn issuance_crowdsale(
        &self,
        _: &PropertyInfo,
        _: PropertyId,
        _: Amount,
        _: i64,
        _: u8,
        _: u8,
    ) -> Result<Vec<u8>, PayloadError> {
        Err(PayloadError::Other("refused".into()))
    }
    fn issuance_managed(&self, _: &PropertyInfo) -> Result<Vec<u8>, PayloadError> {
        Err(PayloadError::Other("refused".into()))
    }
    fn grant(&self, _: PropertyId, _: Amount, _: &str) -> Result<Vec<u8>, PayloadError> {
        Err(PayloadError::Other("refused".into()))
    }
    fn revoke(&self, _: PropertyId, _: Amount, _: &str) -> Result<Vec<u8>, PayloadError> {
        Err(PayloadError::Other("refused".into()))
    }
    fn close_crowdsale(&self, _: PropertyId) -> Result<Vec<u8>, PayloadError> {
        Err(PayloadError::Other("refused".into()))
    }
    fn change_issuer(&self, _: PropertyId) -> Result<Vec<u8>, PayloadError> {
        Err(PayloadError::Other("refused".into()))
    }
}

#[test]
fn codec_failure_stops_before_the_builder() {
    let coordinator = setup().with_codec(RefusingCodec);
    fund(&coordinator, &alice(), TOKEN, 100);
    assert_eq!(
        coordinator.submit(&send("1")),
        Err(WalletError::PayloadEncodingFailed(PayloadError::Other(
            "refused".into()
        )))
    );
    assert_eq!(coordinator.builder().call_count(), 0);
    assert!(coordinator.pending_entries(&alice()).is_empty());
}
