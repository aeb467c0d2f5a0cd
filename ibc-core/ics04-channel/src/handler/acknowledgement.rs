use ibc_core_channel_types::channel::Order;
use ibc_core_channel_types::commitment::compute_ack_commitment;
use ibc_core_channel_types::error::PacketError;
use ibc_core_channel_types::events::{PacketEvent, PacketEventKind};
use ibc_core_channel_types::msgs::MsgAcknowledgement;
use ibc_core_connection::delay::verify_conn_delay_passed;
use ibc_core_handler_types::error::ContextError;
use ibc_core_handler_types::events::IbcEvent;
use ibc_core_host::types::path::{AckPath, CommitmentPath};
use ibc_core_host::{ExecutionContext, SequenceCounter, ValidationContext};
use ibc_core_router::module::Module;
use tracing::debug;

use super::{emit_channel_events, verify_on_counterparty, verify_packet_in_flight, PacketEnd};

pub fn acknowledgement_packet_validate<ValCtx>(
    ctx_a: &ValCtx,
    module: &dyn Module,
    msg: MsgAcknowledgement,
) -> Result<(), ContextError>
where
    ValCtx: ValidationContext,
{
    ctx_a.validate_message_signer(&msg.signer)?;

    let packet = &msg.packet;
    let end = PacketEnd::sending(ctx_a, packet)?;
    end.require_open_connection()?;

    verify_packet_in_flight(ctx_a, packet)?;

    // ORDERED ends take acknowledgements in sequence order.
    if end.channel.ordering() == Order::Ordered {
        let expected =
            ctx_a.packet_sequence(SequenceCounter::Ack, &packet.port_id_on_a, &packet.chan_id_on_a)?;
        if packet.seq_on_a != expected {
            return Err(PacketError::MismatchedPacketSequence {
                expected,
                actual: packet.seq_on_a,
            }
            .into());
        }
    }

    verify_conn_delay_passed(ctx_a, msg.proof_height_on_b, &end.connection)?;

    verify_on_counterparty(
        ctx_a,
        &end.connection,
        &msg.proof_height_on_b,
        &msg.proof_acked_on_b,
        AckPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a).into(),
        Some(compute_ack_commitment(&msg.acknowledgement).into_vec()),
    )
    .map_err(PacketError::VerificationFailed)?;

    module
        .on_acknowledgement_packet_validate(packet, &msg.acknowledgement, &msg.signer)
        .map_err(ContextError::PacketError)
}

pub fn acknowledgement_packet_execute<ExecCtx>(
    ctx_a: &mut ExecCtx,
    module: &mut dyn Module,
    msg: MsgAcknowledgement,
) -> Result<(), ContextError>
where
    ExecCtx: ExecutionContext,
{
    let end = PacketEnd::sending(ctx_a, &msg.packet)?;

    let (extras, outcome) =
        module.on_acknowledgement_packet_execute(&msg.packet, &msg.acknowledgement, &msg.signer);
    outcome?;

    let packet = msg.packet;
    let (port_id, chan_id, seq) = (&packet.port_id_on_a, &packet.chan_id_on_a, packet.seq_on_a);

    ctx_a.delete_packet_commitment(&CommitmentPath::new(port_id, chan_id, seq))?;
    if end.channel.ordering() == Order::Ordered {
        ctx_a.store_packet_sequence(SequenceCounter::Ack, port_id, chan_id, seq.increment())?;
    }

    debug!(port_id = %port_id, channel_id = %chan_id, sequence = %seq, "packet acknowledged");

    ctx_a.log_message(format!("packet {seq} acknowledged"))?;

    let event = PacketEvent::new(PacketEventKind::Acknowledge, packet, &end.channel);
    emit_channel_events(ctx_a, IbcEvent::Packet(event), extras)
}
