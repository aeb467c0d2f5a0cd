use ibc_core_channel_types::channel::{Order, State};
use ibc_core_channel_types::commitment::{compute_ack_commitment, compute_packet_commitment};
use ibc_core_channel_types::error::PacketError;
use ibc_core_channel_types::events::{PacketEvent, PacketEventKind};
use ibc_core_channel_types::msgs::MsgRecvPacket;
use ibc_core_channel_types::packet::Packet;
use ibc_core_connection::delay::verify_conn_delay_passed;
use ibc_core_handler_types::error::ContextError;
use ibc_core_handler_types::events::IbcEvent;
use ibc_core_host::types::path::{AckPath, CommitmentPath, ReceiptPath};
use ibc_core_host::{ExecutionContext, SequenceCounter, ValidationContext};
use ibc_core_router::module::Module;
use tracing::debug;

use super::{emit_module_extras, emit_packet_event, verify_on_counterparty, PacketEnd};

fn receiving_end<Ctx: ValidationContext>(ctx_b: &Ctx, packet: &Packet) -> Result<PacketEnd, ContextError> {
    PacketEnd::load(
        ctx_b,
        (&packet.port_id_on_b, &packet.chan_id_on_b),
        (&packet.port_id_on_a, &packet.chan_id_on_a),
        &[State::Open],
    )
}

/// Validates the receipt and the acknowledgement it writes. Modules have no
/// say here: one that rejects the packet answers with an error
/// acknowledgement instead.
pub fn recv_packet_validate<ValCtx>(ctx_b: &ValCtx, msg: MsgRecvPacket) -> Result<(), ContextError>
where
    ValCtx: ValidationContext,
{
    ctx_b.validate_message_signer(&msg.signer)?;

    let packet = &msg.packet;
    let end = receiving_end(ctx_b, packet)?;
    end.require_open_connection()?;

    // An elapsed packet can only be timed out on the sending chain.
    if packet.timed_out(&ctx_b.host_timestamp()?, ctx_b.host_height()?) {
        return Err(PacketError::PacketTimedOut {
            sequence: packet.seq_on_a,
            timeout_height: packet.timeout_height_on_b,
            timeout_timestamp: packet.timeout_timestamp_on_b,
        }
        .into());
    }

    verify_not_delivered(ctx_b, end.channel.ordering(), packet)?;

    verify_conn_delay_passed(ctx_b, msg.proof_height_on_a, &end.connection)?;

    let commitment = compute_packet_commitment(
        &packet.data,
        &packet.timeout_height_on_b,
        &packet.timeout_timestamp_on_b,
    );
    verify_on_counterparty(
        ctx_b,
        &end.connection,
        &msg.proof_height_on_a,
        &msg.proof_commitment_on_a,
        CommitmentPath::new(&packet.port_id_on_a, &packet.chan_id_on_a, packet.seq_on_a).into(),
        Some(commitment.into_vec()),
    )
    .map_err(PacketError::VerificationFailed)?;

    let ack_path = AckPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a);
    if ctx_b.packet_acknowledgement(&ack_path).is_ok() {
        return Err(PacketError::DuplicateAcknowledgment(packet.seq_on_a).into());
    }

    Ok(())
}

pub fn recv_packet_execute<ExecCtx>(
    ctx_b: &mut ExecCtx,
    module: &mut dyn Module,
    msg: MsgRecvPacket,
) -> Result<(), ContextError>
where
    ExecCtx: ExecutionContext,
{
    let packet = msg.packet;
    let end = receiving_end(ctx_b, &packet)?;
    let ordering = end.channel.ordering();
    let (port_id, chan_id, seq) = (&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a);

    let (extras, acknowledgement) = module.on_recv_packet_execute(&packet, &msg.signer);

    match ordering {
        Order::Ordered => {
            ctx_b.store_packet_sequence(SequenceCounter::Recv, port_id, chan_id, seq.increment())?
        }
        _ => ctx_b.store_packet_receipt(&ReceiptPath::new(port_id, chan_id, seq))?,
    }
    ctx_b.store_packet_acknowledgement(
        &AckPath::new(port_id, chan_id, seq),
        compute_ack_commitment(&acknowledgement),
    )?;

    debug!(
        port_id = %port_id,
        channel_id = %chan_id,
        sequence = %seq,
        "packet received"
    );

    ctx_b.log_message(format!("packet {seq} received and acknowledged"))?;

    let received = PacketEvent::new(PacketEventKind::Receive, packet.clone(), &end.channel);
    emit_packet_event(ctx_b, IbcEvent::Packet(received))?;
    let written = PacketEvent::written(packet, acknowledgement, &end.channel);
    emit_packet_event(ctx_b, IbcEvent::Packet(written))?;

    emit_module_extras(ctx_b, extras)
}

/// ORDERED ends accept exactly `nextSequenceRecv`; UNORDERED ends accept any
/// sequence they hold no receipt for.
fn verify_not_delivered<Ctx>(ctx_b: &Ctx, ordering: Order, packet: &Packet) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    let seq = packet.seq_on_a;
    let replay = PacketError::PacketReplay { sequence: seq };

    if ordering == Order::Ordered {
        let expected =
            ctx_b.packet_sequence(SequenceCounter::Recv, &packet.port_id_on_b, &packet.chan_id_on_b)?;
        return match seq.cmp(&expected) {
            core::cmp::Ordering::Less => Err(replay.into()),
            core::cmp::Ordering::Equal => Ok(()),
            core::cmp::Ordering::Greater => Err(PacketError::UnexpectedSequence {
                expected,
                actual: seq,
            }
            .into()),
        };
    }

    let receipt_path = ReceiptPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, seq);
    if ctx_b.packet_receipt(&receipt_path)?.is_ok() {
        return Err(replay.into());
    }

    Ok(())
}
