//! Parameter normalization: raw command fields into typed domain values.
//!
//! Every check here is syntactic or a metadata lookup. Business preconditions
//! that depend on balances, offers or administrators live in [`crate::guards`].

use overlay_store::{PropertyDescriptor, PropertyStore};
use overlay_transactions::{
    dex::{DexAction, ExchangeAccept, ExchangeOffer},
    issuance::{IssuanceCrowdsale, IssuanceFixed, IssuanceManaged, PropertyInfo},
    management::{ChangeIssuer, CloseCrowdsale, Grant, Revoke},
    send::{SendToOwners, SimpleSend},
    trade::{ExchangeTrade, TradeAction},
    TransactionRequest,
};
use overlay_types::{Address, Amount, Ecosystem, Network, PropertyId, PropertyType};

use crate::raw::{RawCommand, RawPropertyInfo};
use crate::WalletError;

/// Longest accepted free-text field, in bytes.
pub const MAX_TEXT_BYTES: usize = 255;

/// Turns a [`RawCommand`] into a [`TransactionRequest`].
pub struct Normalizer<'a, S: ?Sized> {
    properties: &'a S,
    network: Network,
}

impl<'a, S: PropertyStore + ?Sized> Normalizer<'a, S> {
    pub fn new(properties: &'a S, network: Network) -> Self {
        Self {
            properties,
            network,
        }
    }

    pub fn normalize(&self, raw: &RawCommand) -> Result<TransactionRequest, WalletError> {
        let request = match raw {
            RawCommand::SimpleSend {
                from,
                to,
                property,
                amount,
                redeem,
                reference_amount,
            } => {
                let from = self.address(from)?;
                let to = self.address(to)?;
                let descriptor = self.property(*property)?;
                let amount = positive_amount("amount", amount, descriptor.divisible)?;
                let redeem = self.optional_address(redeem.as_deref())?;
                let reference_amount = match reference_amount.as_deref() {
                    Some(raw) => positive_amount("reference amount", raw, true)?,
                    None => Amount::ZERO,
                };
                TransactionRequest::SimpleSend(SimpleSend {
                    from,
                    to,
                    property: descriptor.id,
                    amount,
                    redeem,
                    reference_amount,
                })
            }

            RawCommand::ExchangeOffer {
                from,
                property,
                amount_for_sale,
                amount_desired,
                payment_window,
                min_accept_fee,
                action,
            } => {
                let from = self.address(from)?;
                let descriptor = self.property(*property)?;
                let payment_window = payment_window_blocks(*payment_window)?;
                let min_accept_fee = commitment_fee(min_accept_fee)?;
                let action = DexAction::from_code(*action)?;
                // Both sides parse as divisible; positivity is left to the range guards.
                TransactionRequest::ExchangeOffer(ExchangeOffer {
                    from,
                    property: descriptor.id,
                    amount_for_sale: amount("amount for sale", amount_for_sale, true)?,
                    amount_desired: amount("amount desired", amount_desired, true)?,
                    payment_window,
                    min_accept_fee,
                    action,
                })
            }

            RawCommand::ExchangeAccept {
                from,
                to,
                property,
                amount,
                allow_unsafe,
            } => {
                let from = self.address(from)?;
                let to = self.address(to)?;
                let descriptor = self.property(*property)?;
                TransactionRequest::ExchangeAccept(ExchangeAccept {
                    from,
                    to,
                    property: descriptor.id,
                    amount: positive_amount("amount", amount, true)?,
                    allow_unsafe: *allow_unsafe,
                })
            }

            RawCommand::IssuanceCrowdsale {
                from,
                info,
                property_desired,
                tokens_per_unit,
                deadline,
                early_bonus,
                issuer_percentage,
            } => {
                let from = self.address(from)?;
                let info = property_info(info)?;
                let desired = self.property(*property_desired)?;
                let tokens_per_unit = positive_amount(
                    "tokens per unit",
                    tokens_per_unit,
                    info.property_type.is_divisible(),
                )?;
                if *deadline < 0 {
                    return Err(WalletError::InvalidParameter(format!(
                        "deadline must not be negative: {deadline}"
                    )));
                }
                TransactionRequest::IssuanceCrowdsale(IssuanceCrowdsale {
                    from,
                    property_desired: desired.id,
                    tokens_per_unit,
                    deadline: *deadline,
                    early_bonus: percentage("early bonus", *early_bonus)?,
                    issuer_percentage: percentage("issuer percentage", *issuer_percentage)?,
                    info,
                })
            }

            RawCommand::IssuanceFixed { from, info, amount } => {
                let from = self.address(from)?;
                let info = property_info(info)?;
                let amount = positive_amount("amount", amount, info.property_type.is_divisible())?;
                TransactionRequest::IssuanceFixed(IssuanceFixed { from, info, amount })
            }

            RawCommand::IssuanceManaged { from, info } => {
                TransactionRequest::IssuanceManaged(IssuanceManaged {
                    from: self.address(from)?,
                    info: property_info(info)?,
                })
            }

            RawCommand::SendToOwners {
                from,
                property,
                amount,
                redeem,
            } => {
                let from = self.address(from)?;
                let descriptor = self.property(*property)?;
                TransactionRequest::SendToOwners(SendToOwners {
                    from,
                    property: descriptor.id,
                    amount: positive_amount("amount", amount, descriptor.divisible)?,
                    redeem: self.optional_address(redeem.as_deref())?,
                })
            }

            RawCommand::Grant {
                from,
                to,
                property,
                amount,
                memo,
            } => {
                let from = self.address(from)?;
                let to = self.optional_address(to.as_deref())?.unwrap_or_else(|| from.clone());
                let descriptor = self.property(*property)?;
                TransactionRequest::Grant(Grant {
                    from,
                    to,
                    property: descriptor.id,
                    amount: positive_amount("amount", amount, descriptor.divisible)?,
                    memo: text("memo", memo.as_deref().unwrap_or_default())?,
                })
            }

            RawCommand::Revoke {
                from,
                property,
                amount,
                memo,
            } => {
                let from = self.address(from)?;
                let descriptor = self.property(*property)?;
                TransactionRequest::Revoke(Revoke {
                    from,
                    property: descriptor.id,
                    amount: positive_amount("amount", amount, descriptor.divisible)?,
                    memo: text("memo", memo.as_deref().unwrap_or_default())?,
                })
            }

            RawCommand::CloseCrowdsale { from, property } => {
                TransactionRequest::CloseCrowdsale(CloseCrowdsale {
                    from: self.address(from)?,
                    property: self.property(*property)?.id,
                })
            }

            RawCommand::ExchangeTrade {
                from,
                property_for_sale,
                amount_for_sale,
                property_desired,
                amount_desired,
                action,
            } => {
                let from = self.address(from)?;
                let action = TradeAction::from_code(*action)?;
                let mut trade = ExchangeTrade {
                    from,
                    property_for_sale: PropertyId::new(*property_for_sale),
                    amount_for_sale: Amount::ZERO,
                    property_desired: PropertyId::new(*property_desired),
                    amount_desired: Amount::ZERO,
                    action,
                };
                // Cancel-everything addresses an ecosystem, not a pair; its ids stay unresolved.
                if action != TradeAction::CancelEverything {
                    let for_sale = self.property(*property_for_sale)?;
                    let desired = self.property(*property_desired)?;
                    // Positivity is checked by the range guards, after the pair guards.
                    if action.carries_amounts() {
                        trade.amount_for_sale =
                            amount("amount for sale", amount_for_sale, for_sale.divisible)?;
                        trade.amount_desired =
                            amount("amount desired", amount_desired, desired.divisible)?;
                    }
                }
                TransactionRequest::ExchangeTrade(trade)
            }

            RawCommand::ChangeIssuer { from, to, property } => {
                TransactionRequest::ChangeIssuer(ChangeIssuer {
                    from: self.address(from)?,
                    to: self.address(to)?,
                    property: self.property(*property)?.id,
                })
            }
        };
        Ok(request)
    }

    /// Parse an address for the configured network.
    pub fn address(&self, raw: &str) -> Result<Address, WalletError> {
        Ok(Address::parse(raw, self.network)?)
    }

    fn optional_address(&self, raw: Option<&str>) -> Result<Option<Address>, WalletError> {
        match raw {
            Some(raw) if !raw.is_empty() => self.address(raw).map(Some),
            _ => Ok(None),
        }
    }

    /// Resolve a property identifier to its descriptor.
    pub fn property(&self, id: u32) -> Result<PropertyDescriptor, WalletError> {
        self.properties
            .get_property(PropertyId::new(id))?
            .ok_or_else(|| WalletError::InvalidParameter(format!("property {id} does not exist")))
    }
}

/// Parse `raw` according to divisibility. Zero is accepted.
pub fn amount(field: &str, raw: &str, divisible: bool) -> Result<Amount, WalletError> {
    Amount::parse(raw, divisible).map_err(|e| WalletError::InvalidAmount(format!("{field}: {e}")))
}

/// Parse `raw` according to divisibility and require it to be above zero.
pub fn positive_amount(field: &str, raw: &str, divisible: bool) -> Result<Amount, WalletError> {
    let value = amount(field, raw, divisible)?;
    if !value.is_positive() {
        return Err(WalletError::InvalidAmount(format!(
            "{field} must be positive"
        )));
    }
    Ok(value)
}

/// Minimum accept fee, a base-currency decimal that may be zero.
pub fn commitment_fee(raw: &str) -> Result<Amount, WalletError> {
    amount("minimum accept fee", raw, true)
}

pub fn payment_window_blocks(blocks: i64) -> Result<u8, WalletError> {
    match u8::try_from(blocks) {
        Ok(window) if window > 0 => Ok(window),
        _ => Err(WalletError::InvalidParameter(format!(
            "payment window must be within 1-255 blocks: {blocks}"
        ))),
    }
}

fn percentage(field: &str, value: i64) -> Result<u8, WalletError> {
    u8::try_from(value).map_err(|_| {
        WalletError::InvalidParameter(format!("{field} must be within 0-255: {value}"))
    })
}

/// Validate a free-text field. Over-long or NUL-bearing text is refused, never truncated.
pub fn text(field: &str, raw: &str) -> Result<String, WalletError> {
    if raw.len() > MAX_TEXT_BYTES {
        return Err(WalletError::InvalidParameter(format!(
            "{field} must not be longer than {MAX_TEXT_BYTES} bytes"
        )));
    }
    if raw.contains('\0') {
        return Err(WalletError::InvalidParameter(format!(
            "{field} must not contain NUL"
        )));
    }
    Ok(raw.to_owned())
}

fn property_info(raw: &RawPropertyInfo) -> Result<PropertyInfo, WalletError> {
    let ecosystem = Ecosystem::from_code(raw.ecosystem)?;
    let property_type = PropertyType::from_code(raw.property_type)?;
    if raw.previous_id != 0 {
        return Err(WalletError::InvalidParameter(format!(
            "previous property id must be 0: {}",
            raw.previous_id
        )));
    }
    Ok(PropertyInfo {
        ecosystem,
        property_type,
        previous_id: PropertyId::NONE,
        category: text("category", &raw.category)?,
        subcategory: text("subcategory", &raw.subcategory)?,
        name: text("name", &raw.name)?,
        url: text("url", &raw.url)?,
        data: text("data", &raw.data)?,
    })
}
