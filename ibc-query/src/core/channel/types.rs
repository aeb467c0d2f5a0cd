//! Request and response types of the channel and packet queries, and the
//! conversions of the responses to their proto counterparts.

use ibc::core::channel::types::channel::ChannelEnd;
use ibc::core::channel::types::commitment::{AcknowledgementCommitment, PacketCommitment};
use ibc::core::channel::types::packet::PacketState;
use ibc::core::client::types::Height;
use ibc::core::host::types::identifiers::{ChannelId, PortId, Sequence};
use ibc::core::host::types::path::ChannelEndPath;
use ibc_proto::ibc::core::channel::v1::{
    QueryChannelResponse as RawQueryChannelResponse,
    QueryNextSequenceReceiveResponse as RawQueryNextSequenceReceiveResponse,
    QueryNextSequenceSendResponse as RawQueryNextSequenceSendResponse,
    QueryPacketAcknowledgementResponse as RawQueryPacketAcknowledgementResponse,
    QueryPacketCommitmentResponse as RawQueryPacketCommitmentResponse,
    QueryPacketCommitmentsResponse as RawQueryPacketCommitmentsResponse,
    QueryPacketReceiptResponse as RawQueryPacketReceiptResponse,
};

use crate::types::Proof;

/// Defines the request type for any query about one channel end: the end
/// itself, its client state or its sequences
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryChannelRequest {
    pub port_id: PortId,
    pub channel_id: ChannelId,
    pub query_height: Option<Height>,
}

impl QueryChannelRequest {
    pub fn channel_end_path(&self) -> ChannelEndPath {
        ChannelEndPath::new(&self.port_id, &self.channel_id)
    }
}

/// Defines the response type for querying a channel end
#[derive(Clone, Debug)]
pub struct QueryChannelResponse {
    pub channel: ChannelEnd,
    pub proof: Proof,
    pub proof_height: Height,
}

impl From<QueryChannelResponse> for RawQueryChannelResponse {
    fn from(response: QueryChannelResponse) -> Self {
        Self {
            channel: Some(response.channel.into()),
            proof: response.proof,
            proof_height: Some(response.proof_height.into()),
        }
    }
}

/// Defines the request type for querying the state kept for one packet
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryPacketRequest {
    pub port_id: PortId,
    pub channel_id: ChannelId,
    pub sequence: Sequence,
    pub query_height: Option<Height>,
}

/// Defines the request type for the packet queries that filter a list of
/// sequences. An empty list selects every sequence where the query allows it.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryPacketSequencesRequest {
    pub port_id: PortId,
    pub channel_id: ChannelId,
    pub sequences: Vec<Sequence>,
}

impl QueryPacketSequencesRequest {
    pub fn channel_end_path(&self) -> ChannelEndPath {
        ChannelEndPath::new(&self.port_id, &self.channel_id)
    }
}

/// Defines the response type for querying a packet commitment
#[derive(Clone, Debug)]
pub struct QueryPacketCommitmentResponse {
    pub packet_commitment: PacketCommitment,
    pub proof: Proof,
    pub proof_height: Height,
}

impl From<QueryPacketCommitmentResponse> for RawQueryPacketCommitmentResponse {
    fn from(response: QueryPacketCommitmentResponse) -> Self {
        Self {
            commitment: response.packet_commitment.into_vec(),
            proof: response.proof,
            proof_height: Some(response.proof_height.into()),
        }
    }
}

/// Defines the response type for querying the packet commitments of a
/// channel end
#[derive(Clone, Debug)]
pub struct QueryPacketCommitmentsResponse {
    pub commitments: Vec<PacketState>,
    pub height: Height,
}

impl QueryPacketCommitmentsResponse {
    /// Sequences of the packets still in flight, in ascending order.
    pub fn sequences(&self) -> Vec<Sequence> {
        let mut sequences: Vec<Sequence> = self.commitments.iter().map(|c| c.seq).collect();
        sequences.sort();
        sequences
    }
}

impl From<QueryPacketCommitmentsResponse> for RawQueryPacketCommitmentsResponse {
    fn from(response: QueryPacketCommitmentsResponse) -> Self {
        Self {
            commitments: response.commitments.into_iter().map(Into::into).collect(),
            height: Some(response.height.into()),
            pagination: None,
        }
    }
}

/// Defines the response type for querying a packet receipt. The proof
/// covers the receipt path whether or not the packet was received.
#[derive(Clone, Debug)]
pub struct QueryPacketReceiptResponse {
    pub received: bool,
    pub proof: Proof,
    pub proof_height: Height,
}

impl From<QueryPacketReceiptResponse> for RawQueryPacketReceiptResponse {
    fn from(response: QueryPacketReceiptResponse) -> Self {
        Self {
            received: response.received,
            proof: response.proof,
            proof_height: Some(response.proof_height.into()),
        }
    }
}

/// Defines the response type for querying a packet acknowledgement
#[derive(Clone, Debug)]
pub struct QueryPacketAcknowledgementResponse {
    pub acknowledgement: AcknowledgementCommitment,
    pub proof: Proof,
    pub proof_height: Height,
}

impl From<QueryPacketAcknowledgementResponse> for RawQueryPacketAcknowledgementResponse {
    fn from(response: QueryPacketAcknowledgementResponse) -> Self {
        Self {
            acknowledgement: response.acknowledgement.into_vec(),
            proof: response.proof,
            proof_height: Some(response.proof_height.into()),
        }
    }
}

/// Defines the response type for querying the next sequence to send or to
/// receive on a channel end
#[derive(Clone, Debug)]
pub struct QueryNextSequenceResponse {
    pub next_sequence: Sequence,
    pub proof: Proof,
    pub proof_height: Height,
}

impl From<QueryNextSequenceResponse> for RawQueryNextSequenceSendResponse {
    fn from(response: QueryNextSequenceResponse) -> Self {
        Self {
            next_sequence_send: response.next_sequence.value(),
            proof: response.proof,
            proof_height: Some(response.proof_height.into()),
        }
    }
}

impl From<QueryNextSequenceResponse> for RawQueryNextSequenceReceiveResponse {
    fn from(response: QueryNextSequenceResponse) -> Self {
        Self {
            next_sequence_receive: response.next_sequence.value(),
            proof: response.proof,
            proof_height: Some(response.proof_height.into()),
        }
    }
}
