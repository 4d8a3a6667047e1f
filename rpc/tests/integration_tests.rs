//! End-to-end tests for the RPC dispatch layer: positional JSON parameters
//! through the full pipeline into the nullable builder.

use overlay_nullables::{test_address, NullBuilder, NullState};
use overlay_rpc::handlers::dispatch;
use overlay_transactions::{CommitMode, FeePolicy, FeePolicyHandle};
use overlay_types::{Amount, PropertyId};
use overlay_wallet_core::{Coordinator, WalletConfig};
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn coordinator(config: WalletConfig) -> Coordinator<NullState, NullBuilder> {
    let fee_policy = FeePolicyHandle::new(FeePolicy {
        rate_per_kb: Amount::new(10_000),
        enforce_minimum: false,
    });
    let state = NullState::new();
    state.define_property(PropertyId::PRIMARY, true, test_address(9));
    state.define_property(PropertyId::new(3), false, test_address(9));
    Coordinator::new(
        state,
        NullBuilder::with_fee_policy(fee_policy.clone()),
        config,
        fee_policy,
    )
}

fn params(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        other => panic!("expected array, got {other}"),
    }
}

// ---------------------------------------------------------------------------
// Issuance
// ---------------------------------------------------------------------------

#[test]
fn fixed_issuance_round_trips_through_rpc() {
    let coordinator = coordinator(WalletConfig::default());
    let result = dispatch(
        &coordinator,
        "sendissuancefixed",
        &params(json!([
            test_address(1).to_string(),
            1,
            1,
            0,
            "Companies",
            "Bitcoin Mining",
            "Quantum Miner",
            "",
            "",
            "1000000"
        ])),
    )
    .unwrap();
    assert_eq!(result.len(), 64);

    let calls = coordinator.builder().calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].recipient, None);
    assert!(coordinator.pending_entries(&test_address(1)).is_empty());
}

#[test]
fn nonzero_previous_id_is_invalid_parameter() {
    let coordinator = coordinator(WalletConfig::default());
    let err = dispatch(
        &coordinator,
        "sendissuancemanaged",
        &params(json!([
            test_address(1).to_string(),
            1,
            1,
            5,
            "",
            "",
            "Managed",
            "",
            ""
        ])),
    )
    .unwrap_err();
    assert_eq!(err.code(), -8);
    assert_eq!(coordinator.builder().call_count(), 0);
}

// ---------------------------------------------------------------------------
// Unsigned mode
// ---------------------------------------------------------------------------

#[test]
fn unsigned_mode_returns_raw_hex_and_records_nothing() {
    let config = WalletConfig {
        auto_commit: false,
        ..WalletConfig::default()
    };
    let coordinator = coordinator(config);
    coordinator
        .state()
        .set_balance(&test_address(1), PropertyId::new(3), Amount::new(10));

    let result = dispatch(
        &coordinator,
        "send",
        &params(json!([
            test_address(1).to_string(),
            test_address(2).to_string(),
            3,
            "10"
        ])),
    )
    .unwrap();
    assert!(result.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(coordinator.builder().calls()[0].mode, CommitMode::ReturnUnsigned);
    assert!(coordinator.pending_entries(&test_address(1)).is_empty());
}

// ---------------------------------------------------------------------------
// Error codes
// ---------------------------------------------------------------------------

#[test]
fn bad_address_is_invalid_address_code() {
    let coordinator = coordinator(WalletConfig::default());
    let err = dispatch(
        &coordinator,
        "sendclosecrowdsale",
        &params(json!(["not-an-address", 3])),
    )
    .unwrap_err();
    assert_eq!(err.code(), -5);
}

#[test]
fn management_by_non_issuer_is_rejected() {
    let coordinator = coordinator(WalletConfig::default());
    let err = dispatch(
        &coordinator,
        "sendchangeissuer",
        &params(json!([
            test_address(1).to_string(),
            test_address(2).to_string(),
            3
        ])),
    )
    .unwrap_err();
    assert_eq!(err.code(), -3);
    assert_eq!(coordinator.builder().call_count(), 0);
}
