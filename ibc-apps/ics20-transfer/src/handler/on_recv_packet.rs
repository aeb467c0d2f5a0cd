use ibc_app_transfer_types::error::TokenTransferError;
use ibc_app_transfer_types::events::TransferEvent;
use ibc_app_transfer_types::packet::PacketData;
use ibc_app_transfer_types::TracePrefix;
use ibc_core::channel::types::packet::Packet;
use ibc_core::router::types::module::ModuleExtras;
use tracing::debug;

use super::parse_account;
use crate::context::{TokenMovement, TokenTransferExecutionContext};

/// Credits the receiver of an incoming transfer.
///
/// A token whose outermost hop is the sending channel is coming home: the
/// hop is stripped and the escrow of the local channel pays it out. Any
/// other token gets the local hop added and is minted as a voucher.
///
/// Validation and execution both happen here because a failure becomes an
/// error acknowledgement, not a failed message. The extras are returned in
/// both cases.
pub fn process_recv_packet_execute<Ctx: TokenTransferExecutionContext>(
    ctx_b: &mut Ctx,
    packet: &Packet,
    data: PacketData,
) -> Result<ModuleExtras, (ModuleExtras, TokenTransferError)> {
    let no_extras = |err| (ModuleExtras::empty(), err);

    ctx_b.receiving_enabled().map_err(no_extras)?;
    let receiver: Ctx::AccountId = parse_account(&data.receiver).map_err(no_extras)?;

    let local = TracePrefix::new(packet.port_id_on_b.clone(), packet.chan_id_on_b.clone());
    let remote = TracePrefix::new(packet.port_id_on_a.clone(), packet.chan_id_on_a.clone());

    let mut coin = data.token;
    let (movement, extras) = if coin.denom.unwrap_hop(&remote) {
        let movement = TokenMovement::Unescrow {
            account: &receiver,
            channel: &local,
        };
        (movement, ModuleExtras::empty())
    } else {
        coin.denom.wrap_hop(local.clone());
        let trace = TransferEvent::VoucherMinted {
            trace_hash: ctx_b.denom_trace_hash(&coin.denom),
            denom: coin.denom.clone(),
        };
        let extras = ModuleExtras {
            events: vec![trace.into()],
            log: Vec::new(),
        };
        (TokenMovement::Mint { account: &receiver }, extras)
    };

    debug!(
        denom = %coin.denom,
        amount = %coin.amount,
        minted = movement.admits_denom(),
        "crediting incoming transfer"
    );

    let applied = ctx_b
        .validate_movement(movement, &coin)
        .and_then(|()| ctx_b.apply_movement(movement, &coin));

    match applied {
        Ok(()) => Ok(extras),
        Err(err) => Err((extras, err)),
    }
}
