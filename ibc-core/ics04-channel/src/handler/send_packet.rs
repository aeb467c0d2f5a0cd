use ibc_core_channel_types::commitment::compute_packet_commitment;
use ibc_core_channel_types::error::PacketError;
use ibc_core_channel_types::events::{PacketEvent, PacketEventKind};
use ibc_core_channel_types::packet::Packet;
use ibc_core_client::context::ClientValidationContext;
use ibc_core_handler_types::error::ContextError;
use ibc_core_handler_types::events::IbcEvent;
use ibc_core_host::types::path::{ClientConsensusStatePath, CommitmentPath};
use ibc_core_host::{ExecutionContext, SequenceCounter, ValidationContext};
use tracing::debug;

use super::{emit_packet_event, PacketEnd};

/// Validates then commits `packet`. Applications call this directly; no
/// relayer message is involved.
pub fn send_packet(ctx_a: &mut impl ExecutionContext, packet: Packet) -> Result<(), ContextError> {
    send_packet_validate(ctx_a, &packet)?;
    send_packet_execute(ctx_a, packet)
}

/// Checks that `packet` can be committed now.
///
/// The packet must carry the channel's next send sequence and at least one
/// timeout that the counterparty, as last seen by the local client, has not
/// reached yet.
pub fn send_packet_validate(
    ctx_a: &impl ValidationContext,
    packet: &Packet,
) -> Result<(), ContextError> {
    if !packet.has_timeout() {
        return Err(PacketError::MissingTimeout.into());
    }

    let end = PacketEnd::sending(ctx_a, packet)?;
    let client_id = end.connection.client_id();

    let clients = ctx_a.client_ctx();
    clients.client_status(client_id)?.verify_is_active()?;

    let seen_height = clients.client_state(client_id)?.latest_height();
    if packet.timeout_height_on_b.has_expired(seen_height) {
        return Err(PacketError::InsufficientPacketHeight {
            chain_height: seen_height,
            timeout_height: packet.timeout_height_on_b,
        }
        .into());
    }

    let seen_timestamp = clients
        .consensus_state(&ClientConsensusStatePath::new(
            client_id.clone(),
            seen_height.revision_number(),
            seen_height.revision_height(),
        ))?
        .timestamp();
    if packet.timeout_timestamp_on_b.has_expired(&seen_timestamp) {
        return Err(PacketError::ExpiredPacketTimestamp {
            timeout_timestamp: packet.timeout_timestamp_on_b,
            chain_timestamp: seen_timestamp,
        }
        .into());
    }

    let next_seq_send =
        ctx_a.packet_sequence(SequenceCounter::Send, &packet.port_id_on_a, &packet.chan_id_on_a)?;
    if packet.seq_on_a != next_seq_send {
        return Err(PacketError::UnexpectedSequence {
            expected: next_seq_send,
            actual: packet.seq_on_a,
        }
        .into());
    }

    Ok(())
}

/// Commits `packet` and advances the send sequence. [`send_packet_validate`]
/// must have accepted the packet first.
pub fn send_packet_execute(
    ctx_a: &mut impl ExecutionContext,
    packet: Packet,
) -> Result<(), ContextError> {
    let (port_id, chan_id, seq) = (&packet.port_id_on_a, &packet.chan_id_on_a, packet.seq_on_a);

    ctx_a.store_packet_sequence(SequenceCounter::Send, port_id, chan_id, seq.increment())?;
    ctx_a.store_packet_commitment(
        &CommitmentPath::new(port_id, chan_id, seq),
        compute_packet_commitment(
            &packet.data,
            &packet.timeout_height_on_b,
            &packet.timeout_timestamp_on_b,
        ),
    )?;

    debug!(port_id = %port_id, channel_id = %chan_id, sequence = %seq, "packet sent");

    let end = PacketEnd::sending(ctx_a, &packet)?;
    ctx_a.log_message(format!("packet {seq} committed"))?;

    let event = PacketEvent::new(PacketEventKind::Send, packet, &end.channel);
    emit_packet_event(ctx_a, IbcEvent::Packet(event))
}
