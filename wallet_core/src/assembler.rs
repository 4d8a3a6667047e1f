//! Maps a validated request onto its codec entry point.

use overlay_transactions::{PayloadCodec, TransactionRequest};

use crate::WalletError;

/// Encode `request` with `codec`. Codec failures surface as
/// [`WalletError::PayloadEncodingFailed`].
pub fn assemble<C: PayloadCodec + ?Sized>(
    request: &TransactionRequest,
    codec: &C,
) -> Result<Vec<u8>, WalletError> {
    let payload = match request {
        TransactionRequest::SimpleSend(tx) => codec.simple_send(tx.property, tx.amount),
        TransactionRequest::SendToOwners(tx) => codec.send_to_owners(tx.property, tx.amount),
        TransactionRequest::ExchangeOffer(tx) => codec.exchange_offer(
            tx.property,
            tx.amount_for_sale,
            tx.amount_desired,
            tx.payment_window,
            tx.min_accept_fee,
            tx.action,
        ),
        TransactionRequest::ExchangeAccept(tx) => codec.exchange_accept(tx.property, tx.amount),
        TransactionRequest::ExchangeTrade(tx) => codec.exchange_trade(
            tx.property_for_sale,
            tx.amount_for_sale,
            tx.property_desired,
            tx.amount_desired,
            tx.action,
        ),
        TransactionRequest::IssuanceFixed(tx) => codec.issuance_fixed(&tx.info, tx.amount),
        TransactionRequest::IssuanceCrowdsale(tx) => codec.issuance_crowdsale(
            &tx.info,
            tx.property_desired,
            tx.tokens_per_unit,
            tx.deadline,
            tx.early_bonus,
            tx.issuer_percentage,
        ),
        TransactionRequest::IssuanceManaged(tx) => codec.issuance_managed(&tx.info),
        TransactionRequest::Grant(tx) => codec.grant(tx.property, tx.amount, &tx.memo),
        TransactionRequest::Revoke(tx) => codec.revoke(tx.property, tx.amount, &tx.memo),
        TransactionRequest::CloseCrowdsale(tx) => codec.close_crowdsale(tx.property),
        TransactionRequest::ChangeIssuer(tx) => codec.change_issuer(tx.property),
    }?;
    Ok(payload)
}
