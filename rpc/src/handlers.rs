//! RPC method table and positional parameter conversion.

use overlay_store::ConsensusState;
use overlay_transactions::{PayloadCodec, TransactionBuilder};
use overlay_wallet_core::{Coordinator, RawCommand, RawPropertyInfo, WalletError};
use serde_json::Value;

use crate::error::RpcError;

/// Name, accepted parameter count and usage line of one RPC method.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MethodSpec {
    pub name: &'static str,
    pub min_params: usize,
    pub max_params: usize,
    pub usage: &'static str,
}

// ── Method table ─────────────────────────────────────────────────────────

pub const METHODS: &[MethodSpec] = &[
    MethodSpec {
        name: "send",
        min_params: 4,
        max_params: 6,
        usage: "send \"fromaddress\" \"toaddress\" propertyid \"amount\" ( \"redeemaddress\" \"referenceamount\" )",
    },
    MethodSpec {
        name: "senddexsell",
        min_params: 7,
        max_params: 7,
        usage: "senddexsell \"fromaddress\" propertyidforsale \"amountforsale\" \"amountdesired\" paymentwindow \"minacceptfee\" action",
    },
    MethodSpec {
        name: "senddexaccept",
        min_params: 4,
        max_params: 5,
        usage: "senddexaccept \"fromaddress\" \"toaddress\" propertyid \"amount\" ( override )",
    },
    MethodSpec {
        name: "sendissuancecrowdsale",
        min_params: 14,
        max_params: 14,
        usage: "sendissuancecrowdsale \"fromaddress\" ecosystem type previousid \"category\" \"subcategory\" \"name\" \"url\" \"data\" propertyiddesired \"tokensperunit\" deadline earlybonus issuerpercentage",
    },
    MethodSpec {
        name: "sendissuancefixed",
        min_params: 10,
        max_params: 10,
        usage: "sendissuancefixed \"fromaddress\" ecosystem type previousid \"category\" \"subcategory\" \"name\" \"url\" \"data\" \"amount\"",
    },
    MethodSpec {
        name: "sendissuancemanaged",
        min_params: 9,
        max_params: 9,
        usage: "sendissuancemanaged \"fromaddress\" ecosystem type previousid \"category\" \"subcategory\" \"name\" \"url\" \"data\"",
    },
    MethodSpec {
        name: "sendsto",
        min_params: 3,
        max_params: 4,
        usage: "sendsto \"fromaddress\" propertyid \"amount\" ( \"redeemaddress\" )",
    },
    MethodSpec {
        name: "sendgrant",
        min_params: 4,
        max_params: 5,
        usage: "sendgrant \"fromaddress\" \"toaddress\" propertyid \"amount\" ( \"memo\" )",
    },
    MethodSpec {
        name: "sendrevoke",
        min_params: 3,
        max_params: 4,
        usage: "sendrevoke \"fromaddress\" propertyid \"amount\" ( \"memo\" )",
    },
    MethodSpec {
        name: "sendclosecrowdsale",
        min_params: 2,
        max_params: 2,
        usage: "sendclosecrowdsale \"fromaddress\" propertyid",
    },
    MethodSpec {
        name: "sendtrade",
        min_params: 6,
        max_params: 6,
        usage: "sendtrade \"fromaddress\" propertyidforsale \"amountforsale\" propertiddesired \"amountdesired\" action",
    },
    MethodSpec {
        name: "sendchangeissuer",
        min_params: 3,
        max_params: 3,
        usage: "sendchangeissuer \"fromaddress\" \"toaddress\" propertyid",
    },
];

pub fn method(name: &str) -> Option<&'static MethodSpec> {
    METHODS.iter().find(|m| m.name == name)
}

// ── Dispatch ─────────────────────────────────────────────────────────────

/// Run `method` against `coordinator` and return the hex result.
pub fn dispatch<S, B, C>(
    coordinator: &Coordinator<S, B, C>,
    method: &str,
    params: &[Value],
) -> Result<String, RpcError>
where
    S: ConsensusState,
    B: TransactionBuilder,
    C: PayloadCodec,
{
    let command = parse_command(method, params)?;
    Ok(coordinator.submit(&command)?.to_hex())
}

/// Convert positional parameters into a [`RawCommand`]. The parameter count is
/// checked before anything else.
pub fn parse_command(name: &str, params: &[Value]) -> Result<RawCommand, RpcError> {
    let spec = method(name).ok_or_else(|| RpcError::MethodNotFound(name.to_owned()))?;
    if params.len() < spec.min_params || params.len() > spec.max_params {
        return Err(RpcError::Usage(spec.usage.to_owned()));
    }
    let p = Params(params);

    let command = match spec.name {
        "send" => RawCommand::SimpleSend {
            from: p.string(0, "fromaddress")?,
            to: p.string(1, "toaddress")?,
            property: p.property(2, "propertyid")?,
            amount: p.string(3, "amount")?,
            redeem: p.opt_string(4, "redeemaddress")?,
            reference_amount: p.opt_string(5, "referenceamount")?,
        },
        "senddexsell" => RawCommand::ExchangeOffer {
            from: p.string(0, "fromaddress")?,
            property: p.property(1, "propertyidforsale")?,
            amount_for_sale: p.string(2, "amountforsale")?,
            amount_desired: p.string(3, "amountdesired")?,
            payment_window: p.int(4, "paymentwindow")?,
            min_accept_fee: p.decimal(5, "minacceptfee")?,
            action: p.int(6, "action")?,
        },
        "senddexaccept" => RawCommand::ExchangeAccept {
            from: p.string(0, "fromaddress")?,
            to: p.string(1, "toaddress")?,
            property: p.property(2, "propertyid")?,
            amount: p.string(3, "amount")?,
            allow_unsafe: p.opt_bool(4, "override")?.unwrap_or(false),
        },
        "sendissuancecrowdsale" => RawCommand::IssuanceCrowdsale {
            from: p.string(0, "fromaddress")?,
            info: p.property_info()?,
            property_desired: p.property(9, "propertyiddesired")?,
            tokens_per_unit: p.string(10, "tokensperunit")?,
            deadline: p.int(11, "deadline")?,
            early_bonus: p.int(12, "earlybonus")?,
            issuer_percentage: p.int(13, "issuerpercentage")?,
        },
        "sendissuancefixed" => RawCommand::IssuanceFixed {
            from: p.string(0, "fromaddress")?,
            info: p.property_info()?,
            amount: p.string(9, "amount")?,
        },
        "sendissuancemanaged" => RawCommand::IssuanceManaged {
            from: p.string(0, "fromaddress")?,
            info: p.property_info()?,
        },
        "sendsto" => RawCommand::SendToOwners {
            from: p.string(0, "fromaddress")?,
            property: p.property(1, "propertyid")?,
            amount: p.string(2, "amount")?,
            redeem: p.opt_string(3, "redeemaddress")?,
        },
        "sendgrant" => RawCommand::Grant {
            from: p.string(0, "fromaddress")?,
            to: Some(p.string(1, "toaddress")?),
            property: p.property(2, "propertyid")?,
            amount: p.string(3, "amount")?,
            memo: p.opt_string(4, "memo")?,
        },
        "sendrevoke" => RawCommand::Revoke {
            from: p.string(0, "fromaddress")?,
            property: p.property(1, "propertyid")?,
            amount: p.string(2, "amount")?,
            memo: p.opt_string(3, "memo")?,
        },
        "sendclosecrowdsale" => RawCommand::CloseCrowdsale {
            from: p.string(0, "fromaddress")?,
            property: p.property(1, "propertyid")?,
        },
        "sendtrade" => RawCommand::ExchangeTrade {
            from: p.string(0, "fromaddress")?,
            property_for_sale: p.property(1, "propertyidforsale")?,
            amount_for_sale: p.string(2, "amountforsale")?,
            property_desired: p.property(3, "propertyiddesired")?,
            amount_desired: p.string(4, "amountdesired")?,
            action: p.int(5, "action")?,
        },
        "sendchangeissuer" => RawCommand::ChangeIssuer {
            from: p.string(0, "fromaddress")?,
            to: p.string(1, "toaddress")?,
            property: p.property(2, "propertyid")?,
        },
        other => return Err(RpcError::MethodNotFound(other.to_owned())),
    };
    Ok(command)
}

// ── Positional parameter access ──────────────────────────────────────────

struct Params<'a>(&'a [Value]);

fn type_error(name: &str, expected: &str) -> RpcError {
    RpcError::Wallet(WalletError::InvalidParameter(format!(
        "{name}: expected {expected}"
    )))
}

impl Params<'_> {
    fn string(&self, index: usize, name: &str) -> Result<String, RpcError> {
        match self.0.get(index) {
            Some(Value::String(s)) => Ok(s.clone()),
            _ => Err(type_error(name, "a string")),
        }
    }

    fn opt_string(&self, index: usize, name: &str) -> Result<Option<String>, RpcError> {
        match self.0.get(index) {
            None | Some(Value::Null) => Ok(None),
            Some(_) => self.string(index, name).map(Some),
        }
    }

    fn int(&self, index: usize, name: &str) -> Result<i64, RpcError> {
        self.0
            .get(index)
            .and_then(Value::as_i64)
            .ok_or_else(|| type_error(name, "an integer"))
    }

    fn property(&self, index: usize, name: &str) -> Result<u32, RpcError> {
        let id = self.int(index, name)?;
        u32::try_from(id).map_err(|_| {
            RpcError::Wallet(WalletError::InvalidParameter(format!(
                "{name}: property id out of range: {id}"
            )))
        })
    }

    fn opt_bool(&self, index: usize, name: &str) -> Result<Option<bool>, RpcError> {
        match self.0.get(index) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(_) => Err(type_error(name, "a boolean")),
        }
    }

    /// A decimal given either as a string or as a JSON number.
    fn decimal(&self, index: usize, name: &str) -> Result<String, RpcError> {
        match self.0.get(index) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            _ => Err(type_error(name, "a decimal")),
        }
    }

    /// Issuance descriptor fields at positions 1 through 8.
    fn property_info(&self) -> Result<RawPropertyInfo, RpcError> {
        Ok(RawPropertyInfo {
            ecosystem: self.int(1, "ecosystem")?,
            property_type: self.int(2, "type")?,
            previous_id: self.int(3, "previousid")?,
            category: self.string(4, "category")?,
            subcategory: self.string(5, "subcategory")?,
            name: self.string(6, "name")?,
            url: self.string(7, "url")?,
            data: self.string(8, "data")?,
        })
    }
}
