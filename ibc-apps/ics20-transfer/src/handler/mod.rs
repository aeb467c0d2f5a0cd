//! Token transfer handlers: sending, receiving and refunding.
mod on_recv_packet;
mod send_transfer;

pub use on_recv_packet::*;
pub use send_transfer::*;

use ibc_app_transfer_types::error::TokenTransferError;
use ibc_app_transfer_types::packet::PacketData;
use ibc_app_transfer_types::{Memo, PrefixedDenom, TracePrefix};
use ibc_core::channel::types::packet::Packet;
use ibc_core::primitives::Signer;

use crate::context::{
    TokenMovement, TokenTransferExecutionContext, TokenTransferValidationContext,
};

pub(crate) fn parse_account<A: TryFrom<Signer>>(signer: &Signer) -> Result<A, TokenTransferError> {
    signer
        .clone()
        .try_into()
        .map_err(|_| TokenTransferError::ParseAccountFailure(signer.to_string()))
}

/// Whether `denom` is a voucher minted by the chain behind `hop`.
fn is_voucher_from(hop: &TracePrefix, denom: &PrefixedDenom) -> bool {
    denom.trace_path.outermost() == Some(hop)
}

/// A voucher that came in over `hop` is burned on the way back out. Any
/// other denomination leaves through the escrow of `hop`.
pub(crate) fn outgoing_movement<'a, A>(
    account: &'a A,
    hop: &'a TracePrefix,
    denom: &PrefixedDenom,
    memo: &'a Memo,
) -> TokenMovement<'a, A> {
    if is_voucher_from(hop, denom) {
        TokenMovement::Burn { account, memo }
    } else {
        TokenMovement::Escrow {
            account,
            channel: hop,
            memo,
        }
    }
}

/// Undoes [`outgoing_movement`] for the same sender, hop and denomination.
fn refund_movement<'a, A>(
    account: &'a A,
    hop: &'a TracePrefix,
    denom: &PrefixedDenom,
) -> TokenMovement<'a, A> {
    if is_voucher_from(hop, denom) {
        TokenMovement::Mint { account }
    } else {
        TokenMovement::Unescrow {
            account,
            channel: hop,
        }
    }
}

fn sending_hop(packet: &Packet) -> TracePrefix {
    TracePrefix::new(packet.port_id_on_a.clone(), packet.chan_id_on_a.clone())
}

/// Checks that the tokens of a failed or timed out packet can go back to its
/// sender.
pub fn refund_packet_token_validate<Ctx: TokenTransferValidationContext>(
    ctx_a: &Ctx,
    packet: &Packet,
    data: &PacketData,
) -> Result<(), TokenTransferError> {
    let sender: Ctx::AccountId = parse_account(&data.sender)?;
    let hop = sending_hop(packet);

    ctx_a.validate_movement(refund_movement(&sender, &hop, &data.token.denom), &data.token)
}

/// Gives the tokens of a failed or timed out packet back to its sender. The
/// escrow pays out what was escrowed; burned vouchers are minted again.
pub fn refund_packet_token_execute<Ctx: TokenTransferExecutionContext>(
    ctx_a: &mut Ctx,
    packet: &Packet,
    data: &PacketData,
) -> Result<(), TokenTransferError> {
    let sender: Ctx::AccountId = parse_account(&data.sender)?;
    let hop = sending_hop(packet);

    ctx_a.apply_movement(refund_movement(&sender, &hop, &data.token.denom), &data.token)
}
