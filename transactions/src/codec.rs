//! Payload codec: typed command fields to the tagged binary payload.
//!
//! Every payload starts with a big-endian u16 version and a u16 type id, followed by
//! the type-specific fields in a fixed layout. Strings are NUL-terminated.

use crate::dex::DexAction;
use crate::error::PayloadError;
use crate::issuance::PropertyInfo;
use crate::trade::TradeAction;
use crate::CommandKind;
use overlay_types::{Amount, PropertyId};

/// Longest string any text field may carry, in bytes.
pub const MAX_TEXT_LEN: usize = 255;

/// One encode entry point per command kind.
pub trait PayloadCodec {
    fn simple_send(&self, property: PropertyId, amount: Amount) -> Result<Vec<u8>, PayloadError>;

    fn send_to_owners(
        &self,
        property: PropertyId,
        amount: Amount,
    ) -> Result<Vec<u8>, PayloadError>;

    fn exchange_offer(
        &self,
        property: PropertyId,
        amount_for_sale: Amount,
        amount_desired: Amount,
        payment_window: u8,
        min_accept_fee: Amount,
        action: DexAction,
    ) -> Result<Vec<u8>, PayloadError>;

    fn exchange_accept(
        &self,
        property: PropertyId,
        amount: Amount,
    ) -> Result<Vec<u8>, PayloadError>;

    fn exchange_trade(
        &self,
        property_for_sale: PropertyId,
        amount_for_sale: Amount,
        property_desired: PropertyId,
        amount_desired: Amount,
        action: TradeAction,
    ) -> Result<Vec<u8>, PayloadError>;

    fn issuance_fixed(
        &self,
        info: &PropertyInfo,
        amount: Amount,
    ) -> Result<Vec<u8>, PayloadError>;

    fn issuance_crowdsale(
        &self,
        info: &PropertyInfo,
        property_desired: PropertyId,
        tokens_per_unit: Amount,
        deadline: i64,
        early_bonus: u8,
        issuer_percentage: u8,
    ) -> Result<Vec<u8>, PayloadError>;

    fn issuance_managed(&self, info: &PropertyInfo) -> Result<Vec<u8>, PayloadError>;

    fn grant(
        &self,
        property: PropertyId,
        amount: Amount,
        memo: &str,
    ) -> Result<Vec<u8>, PayloadError>;

    fn revoke(
        &self,
        property: PropertyId,
        amount: Amount,
        memo: &str,
    ) -> Result<Vec<u8>, PayloadError>;

    fn close_crowdsale(&self, property: PropertyId) -> Result<Vec<u8>, PayloadError>;

    fn change_issuer(&self, property: PropertyId) -> Result<Vec<u8>, PayloadError>;
}

/// The protocol's standard big-endian payload layout.
#[derive(Clone, Copy, Debug, Default)]
pub struct WireCodec;

/// Append-only payload writer.
struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    fn new(version: u16, kind: CommandKind) -> Self {
        let mut buf = Vec::with_capacity(64);
        buf.extend_from_slice(&version.to_be_bytes());
        buf.extend_from_slice(&kind.type_id().to_be_bytes());
        Self { buf }
    }

    fn u8(mut self, value: u8) -> Self {
        self.buf.push(value);
        self
    }

    fn u16(mut self, value: u16) -> Self {
        self.buf.extend_from_slice(&value.to_be_bytes());
        self
    }

    fn property(mut self, id: PropertyId) -> Self {
        self.buf.extend_from_slice(&id.value().to_be_bytes());
        self
    }

    fn amount(self, field: &'static str, amount: Amount) -> Result<Self, PayloadError> {
        self.int64(field, amount.raw())
    }

    fn int64(mut self, field: &'static str, value: i64) -> Result<Self, PayloadError> {
        let value = u64::try_from(value).map_err(|_| PayloadError::NegativeAmount { field })?;
        self.buf.extend_from_slice(&value.to_be_bytes());
        Ok(self)
    }

    fn text(mut self, field: &'static str, text: &str) -> Result<Self, PayloadError> {
        if text.len() > MAX_TEXT_LEN {
            return Err(PayloadError::TextTooLong {
                field,
                len: text.len(),
                max: MAX_TEXT_LEN,
            });
        }
        if text.as_bytes().contains(&0) {
            return Err(PayloadError::EmbeddedNul { field });
        }
        self.buf.extend_from_slice(text.as_bytes());
        self.buf.push(0);
        Ok(self)
    }

    fn info(self, info: &PropertyInfo) -> Result<Self, PayloadError> {
        self.u8(info.ecosystem.code())
            .u16(info.property_type.code())
            .property(info.previous_id)
            .text("category", &info.category)?
            .text("subcategory", &info.subcategory)?
            .text("name", &info.name)?
            .text("url", &info.url)?
            .text("data", &info.data)
    }

    fn finish(self) -> Vec<u8> {
        self.buf
    }
}

impl PayloadCodec for WireCodec {
    fn simple_send(&self, property: PropertyId, amount: Amount) -> Result<Vec<u8>, PayloadError> {
        Ok(Writer::new(0, CommandKind::SimpleSend)
            .property(property)
            .amount("amount", amount)?
            .finish())
    }

    fn send_to_owners(
        &self,
        property: PropertyId,
        amount: Amount,
    ) -> Result<Vec<u8>, PayloadError> {
        Ok(Writer::new(0, CommandKind::SendToOwners)
            .property(property)
            .amount("amount", amount)?
            .finish())
    }

    fn exchange_offer(
        &self,
        property: PropertyId,
        amount_for_sale: Amount,
        amount_desired: Amount,
        payment_window: u8,
        min_accept_fee: Amount,
        action: DexAction,
    ) -> Result<Vec<u8>, PayloadError> {
        // Version 1 carries the sub-action byte.
        Ok(Writer::new(1, CommandKind::ExchangeOffer)
            .property(property)
            .amount("amount for sale", amount_for_sale)?
            .amount("amount desired", amount_desired)?
            .u8(payment_window)
            .amount("minimum accept fee", min_accept_fee)?
            .u8(action.code())
            .finish())
    }

    fn exchange_accept(
        &self,
        property: PropertyId,
        amount: Amount,
    ) -> Result<Vec<u8>, PayloadError> {
        Ok(Writer::new(0, CommandKind::ExchangeAccept)
            .property(property)
            .amount("amount", amount)?
            .finish())
    }

    fn exchange_trade(
        &self,
        property_for_sale: PropertyId,
        amount_for_sale: Amount,
        property_desired: PropertyId,
        amount_desired: Amount,
        action: TradeAction,
    ) -> Result<Vec<u8>, PayloadError> {
        Ok(Writer::new(0, CommandKind::ExchangeTrade)
            .property(property_for_sale)
            .amount("amount for sale", amount_for_sale)?
            .property(property_desired)
            .amount("amount desired", amount_desired)?
            .u8(action.code())
            .finish())
    }

    fn issuance_fixed(
        &self,
        info: &PropertyInfo,
        amount: Amount,
    ) -> Result<Vec<u8>, PayloadError> {
        Ok(Writer::new(0, CommandKind::IssuanceFixed)
            .info(info)?
            .amount("amount", amount)?
            .finish())
    }

    fn issuance_crowdsale(
        &self,
        info: &PropertyInfo,
        property_desired: PropertyId,
        tokens_per_unit: Amount,
        deadline: i64,
        early_bonus: u8,
        issuer_percentage: u8,
    ) -> Result<Vec<u8>, PayloadError> {
        Ok(Writer::new(0, CommandKind::IssuanceCrowdsale)
            .info(info)?
            .property(property_desired)
            .amount("tokens per unit", tokens_per_unit)?
            .int64("deadline", deadline)?
            .u8(early_bonus)
            .u8(issuer_percentage)
            .finish())
    }

    fn issuance_managed(&self, info: &PropertyInfo) -> Result<Vec<u8>, PayloadError> {
        Ok(Writer::new(0, CommandKind::IssuanceManaged).info(info)?.finish())
    }

    fn grant(
        &self,
        property: PropertyId,
        amount: Amount,
        memo: &str,
    ) -> Result<Vec<u8>, PayloadError> {
        Ok(Writer::new(0, CommandKind::Grant)
            .property(property)
            .amount("amount", amount)?
            .text("memo", memo)?
            .finish())
    }

    fn revoke(
        &self,
        property: PropertyId,
        amount: Amount,
        memo: &str,
    ) -> Result<Vec<u8>, PayloadError> {
        Ok(Writer::new(0, CommandKind::Revoke)
            .property(property)
            .amount("amount", amount)?
            .text("memo", memo)?
            .finish())
    }

    fn close_crowdsale(&self, property: PropertyId) -> Result<Vec<u8>, PayloadError> {
        Ok(Writer::new(0, CommandKind::CloseCrowdsale)
            .property(property)
            .finish())
    }

    fn change_issuer(&self, property: PropertyId) -> Result<Vec<u8>, PayloadError> {
        Ok(Writer::new(0, CommandKind::ChangeIssuer)
            .property(property)
            .finish())
    }
}
