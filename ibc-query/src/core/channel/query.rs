//! Channel and packet queries. Single-value queries come with a membership
//! proof; the list queries read the host's current state.

use ibc::core::host::types::identifiers::Sequence;
use ibc::core::host::types::path::{
    AckPath, ChannelEndPath, CommitmentPath, ReceiptPath, SeqRecvPath, SeqSendPath,
};
use ibc::core::host::{SequenceCounter, ValidationContext};

use super::types::*;
use crate::core::context::{ProvableContext, QueryContext};
use crate::core::prove;
use crate::error::QueryError;

/// The channel end under the requested port and channel.
pub fn query_channel<I>(
    ibc_ctx: &I,
    request: &QueryChannelRequest,
) -> Result<QueryChannelResponse, QueryError>
where
    I: ValidationContext + ProvableContext,
{
    let path = request.channel_end_path();
    let channel = ibc_ctx.channel_end(&path)?;
    let (proof, proof_height) = prove(ibc_ctx, request.query_height, path)?;

    Ok(QueryChannelResponse {
        channel,
        proof,
        proof_height,
    })
}

/// The commitment of a packet that was sent and not yet acknowledged or
/// timed out.
pub fn query_packet_commitment<I>(
    ibc_ctx: &I,
    request: &QueryPacketRequest,
) -> Result<QueryPacketCommitmentResponse, QueryError>
where
    I: ValidationContext + ProvableContext,
{
    let path = CommitmentPath::new(&request.port_id, &request.channel_id, request.sequence);
    let packet_commitment = ibc_ctx.packet_commitment(&path)?;
    let (proof, proof_height) = prove(ibc_ctx, request.query_height, path)?;

    Ok(QueryPacketCommitmentResponse {
        packet_commitment,
        proof,
        proof_height,
    })
}

/// Every commitment held for the channel end, with the height they were
/// read at.
pub fn query_packet_commitments<I>(
    ibc_ctx: &I,
    channel_end_path: &ChannelEndPath,
) -> Result<QueryPacketCommitmentsResponse, QueryError>
where
    I: QueryContext,
{
    let commitments = ibc_ctx.packet_commitments(channel_end_path)?;
    let height = ibc_ctx.host_height()?;
    Ok(QueryPacketCommitmentsResponse {
        commitments,
        height,
    })
}

/// Sequences of the packets in flight on the channel end, ascending.
pub fn query_packet_commitment_sequences<I>(
    ibc_ctx: &I,
    channel_end_path: &ChannelEndPath,
) -> Result<Vec<Sequence>, QueryError>
where
    I: QueryContext,
{
    query_packet_commitments(ibc_ctx, channel_end_path).map(|response| response.sequences())
}

/// Whether the packet was received. Absence is proven too, so `false` comes
/// with a proof as well.
pub fn query_packet_receipt<I>(
    ibc_ctx: &I,
    request: &QueryPacketRequest,
) -> Result<QueryPacketReceiptResponse, QueryError>
where
    I: ValidationContext + ProvableContext,
{
    let path = ReceiptPath::new(&request.port_id, &request.channel_id, request.sequence);
    let received = ibc_ctx.packet_receipt(&path)?.is_ok();
    let (proof, proof_height) = prove(ibc_ctx, request.query_height, path)?;

    Ok(QueryPacketReceiptResponse {
        received,
        proof,
        proof_height,
    })
}

/// The acknowledgement commitment the host wrote on receiving the packet.
pub fn query_packet_acknowledgement<I>(
    ibc_ctx: &I,
    request: &QueryPacketRequest,
) -> Result<QueryPacketAcknowledgementResponse, QueryError>
where
    I: ValidationContext + ProvableContext,
{
    let path = AckPath::new(&request.port_id, &request.channel_id, request.sequence);
    let acknowledgement = ibc_ctx.packet_acknowledgement(&path)?;
    let (proof, proof_height) = prove(ibc_ctx, request.query_height, path)?;

    Ok(QueryPacketAcknowledgementResponse {
        acknowledgement,
        proof,
        proof_height,
    })
}

/// The requested sequences this host, as receiver, has no receipt for.
pub fn query_unreceived_packets<I>(
    ibc_ctx: &I,
    request: &QueryPacketSequencesRequest,
) -> Result<Vec<Sequence>, QueryError>
where
    I: QueryContext,
{
    let sequences = request.sequences.iter().copied();
    Ok(ibc_ctx.unreceived_packets(&request.channel_end_path(), sequences)?)
}

/// The requested sequences this host, as sender, still holds a commitment
/// for.
pub fn query_unreceived_acks<I>(
    ibc_ctx: &I,
    request: &QueryPacketSequencesRequest,
) -> Result<Vec<Sequence>, QueryError>
where
    I: QueryContext,
{
    let sequences = request.sequences.iter().copied();
    Ok(ibc_ctx.unreceived_acks(&request.channel_end_path(), sequences)?)
}

pub fn query_next_sequence_send<I>(
    ibc_ctx: &I,
    request: &QueryChannelRequest,
) -> Result<QueryNextSequenceResponse, QueryError>
where
    I: ValidationContext + ProvableContext,
{
    let (port_id, channel_id) = (&request.port_id, &request.channel_id);
    let next_sequence = ibc_ctx.packet_sequence(SequenceCounter::Send, port_id, channel_id)?;
    let path = SeqSendPath::new(port_id, channel_id);
    let (proof, proof_height) = prove(ibc_ctx, request.query_height, path)?;

    Ok(QueryNextSequenceResponse {
        next_sequence,
        proof,
        proof_height,
    })
}

pub fn query_next_sequence_receive<I>(
    ibc_ctx: &I,
    request: &QueryChannelRequest,
) -> Result<QueryNextSequenceResponse, QueryError>
where
    I: ValidationContext + ProvableContext,
{
    let (port_id, channel_id) = (&request.port_id, &request.channel_id);
    let next_sequence = ibc_ctx.packet_sequence(SequenceCounter::Recv, port_id, channel_id)?;
    let path = SeqRecvPath::new(port_id, channel_id);
    let (proof, proof_height) = prove(ibc_ctx, request.query_height, path)?;

    Ok(QueryNextSequenceResponse {
        next_sequence,
        proof,
        proof_height,
    })
}
