use ibc_core_channel_types::channel::{Order, State};
use ibc_core_channel_types::error::PacketError;
use ibc_core_channel_types::events::{ChannelEvent, ChannelEventKind, PacketEvent, PacketEventKind};
use ibc_core_channel_types::msgs::MsgTimeout;
use ibc_core_client::context::ClientValidationContext;
use ibc_core_connection::delay::verify_conn_delay_passed;
use ibc_core_handler_types::error::ContextError;
use ibc_core_handler_types::events::IbcEvent;
use ibc_core_host::types::path::{
    ChannelEndPath, ClientConsensusStatePath, CommitmentPath, Path, ReceiptPath, SeqRecvPath,
};
use ibc_core_host::{ExecutionContext, ValidationContext};
use ibc_core_router::module::Module;
use tracing::debug;

use super::{
    emit_module_extras, emit_packet_event, verify_on_counterparty, verify_packet_in_flight,
    PacketEnd,
};

/// Packets left in flight on an end closed by an earlier timeout can still
/// be timed out.
const TIMEOUT_STATES: [State; 2] = [State::Open, State::Closed];

pub fn timeout_packet_validate<ValCtx>(
    ctx_a: &ValCtx,
    module: &dyn Module,
    msg: MsgTimeout,
) -> Result<(), ContextError>
where
    ValCtx: ValidationContext,
{
    ctx_a.validate_message_signer(&msg.signer)?;

    let packet = &msg.packet;
    let end = timed_out_end(ctx_a, &msg)?;

    verify_packet_in_flight(ctx_a, packet)?;

    // The counterparty, as of the proof height, must be past the timeout.
    let client_id = end.connection.client_id();
    let proof_height = msg.proof_height_on_b;
    let remote_timestamp = ctx_a
        .client_ctx()
        .consensus_state(&ClientConsensusStatePath::new(
            client_id.clone(),
            proof_height.revision_number(),
            proof_height.revision_height(),
        ))?
        .timestamp();

    if !packet.timed_out(&remote_timestamp, proof_height) {
        return Err(PacketError::PacketTimeoutNotReached {
            sequence: packet.seq_on_a,
            timeout_height: packet.timeout_height_on_b,
            chain_height: proof_height,
            timeout_timestamp: packet.timeout_timestamp_on_b,
            chain_timestamp: remote_timestamp,
        }
        .into());
    }

    verify_conn_delay_passed(ctx_a, proof_height, &end.connection)?;

    // ORDERED: the receiver's next sequence shows it never got this far.
    // UNORDERED: the receiver holds no receipt.
    let (path, value): (Path, Option<Vec<u8>>) = match end.channel.ordering() {
        Order::Ordered => {
            if packet.seq_on_a < msg.next_seq_recv_on_b {
                return Err(PacketError::PacketReplay {
                    sequence: packet.seq_on_a,
                }
                .into());
            }
            let path = SeqRecvPath::new(&packet.port_id_on_b, &packet.chan_id_on_b);
            (path.into(), Some(msg.next_seq_recv_on_b.to_vec()))
        }
        _ => {
            let path = ReceiptPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a);
            (path.into(), None)
        }
    };

    verify_on_counterparty(
        ctx_a,
        &end.connection,
        &proof_height,
        &msg.proof_unreceived_on_b,
        path,
        value,
    )
    .map_err(PacketError::VerificationFailed)?;

    module
        .on_timeout_packet_validate(packet, &msg.signer)
        .map_err(ContextError::PacketError)
}

pub fn timeout_packet_execute<ExecCtx>(
    ctx_a: &mut ExecCtx,
    module: &mut dyn Module,
    msg: MsgTimeout,
) -> Result<(), ContextError>
where
    ExecCtx: ExecutionContext,
{
    let end = timed_out_end(ctx_a, &msg)?;

    let (extras, outcome) = module.on_timeout_packet_execute(&msg.packet, &msg.signer);
    outcome?;

    let packet = msg.packet;
    let ordering = end.channel.ordering();
    let (port_id, chan_id, seq) = (&packet.port_id_on_a, &packet.chan_id_on_a, packet.seq_on_a);

    ctx_a.delete_packet_commitment(&CommitmentPath::new(port_id, chan_id, seq))?;

    // An ORDERED end can never fill the gap, so it closes with the first
    // packet that times out.
    let closes = ordering == Order::Ordered && end.channel.is_open();
    let closed_event = if closes {
        let closed = end.channel.clone().with_state(State::Closed);
        let event =
            ChannelEvent::new(ChannelEventKind::Closed, port_id.clone(), chan_id.clone(), &closed);
        ctx_a.store_channel(&ChannelEndPath::new(port_id, chan_id), closed)?;
        Some(event)
    } else {
        None
    };

    debug!(
        port_id = %port_id,
        channel_id = %chan_id,
        sequence = %seq,
        channel_closed = closes,
        "packet timed out"
    );

    ctx_a.log_message(format!("packet {seq} timed out"))?;

    let timed_out = PacketEvent::new(PacketEventKind::Timeout, packet, &end.channel);
    emit_packet_event(ctx_a, IbcEvent::Packet(timed_out))?;
    if let Some(event) = closed_event {
        emit_packet_event(ctx_a, IbcEvent::Channel(event))?;
    }

    emit_module_extras(ctx_a, extras)
}

fn timed_out_end<Ctx: ValidationContext>(ctx_a: &Ctx, msg: &MsgTimeout) -> Result<PacketEnd, ContextError> {
    let packet = &msg.packet;
    PacketEnd::load(
        ctx_a,
        (&packet.port_id_on_a, &packet.chan_id_on_a),
        (&packet.port_id_on_b, &packet.chan_id_on_b),
        &TIMEOUT_STATES,
    )
}
