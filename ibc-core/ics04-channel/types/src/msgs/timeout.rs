use ibc_core_client_types::Height;
use ibc_core_commitment_types::commitment::CommitmentProofBytes;
use ibc_core_host_types::identifiers::Sequence;
use ibc_primitives::Signer;
use ibc_proto::ibc::core::channel::v1::MsgTimeout as RawMsgTimeout;
use ibc_proto::Protobuf;

use super::{packet, proof_at};
use crate::error::PacketError;
use crate::packet::Packet;

pub const TIMEOUT_TYPE_URL: &str = "/ibc.core.channel.v1.MsgTimeout";

/// Tells chain A that a packet it sent can no longer be received on B.
///
/// The proof shows what B had not done by the time the packet expired:
/// on an ordered channel, B's next expected sequence
/// `next_seq_recv_on_b`; on an unordered one, the absence of a receipt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgTimeout {
    pub packet: Packet,
    pub next_seq_recv_on_b: Sequence,
    pub proof_unreceived_on_b: CommitmentProofBytes,
    pub proof_height_on_b: Height,
    pub signer: Signer,
}

impl Protobuf<RawMsgTimeout> for MsgTimeout {}

impl TryFrom<RawMsgTimeout> for MsgTimeout {
    type Error = PacketError;

    fn try_from(raw: RawMsgTimeout) -> Result<Self, Self::Error> {
        let next_seq_recv_on_b = match raw.next_sequence_recv {
            0 => return Err(PacketError::ZeroPacketSequence),
            seq => Sequence::from(seq),
        };
        let (proof_unreceived_on_b, proof_height_on_b) =
            proof_at::<Self::Error>(raw.proof_unreceived, raw.proof_height)?;

        Ok(Self {
            packet: packet(raw.packet)?,
            next_seq_recv_on_b,
            proof_unreceived_on_b,
            proof_height_on_b,
            signer: raw.signer.into(),
        })
    }
}

impl From<MsgTimeout> for RawMsgTimeout {
    fn from(msg: MsgTimeout) -> Self {
        Self {
            packet: Some(msg.packet.into()),
            next_sequence_recv: msg.next_seq_recv_on_b.into(),
            proof_unreceived: msg.proof_unreceived_on_b.into(),
            proof_height: Some(msg.proof_height_on_b.into()),
            signer: msg.signer.to_string(),
        }
    }
}
