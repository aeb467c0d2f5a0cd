use ibc_core_client_types::Height;
use ibc_core_commitment_types::commitment::CommitmentProofBytes;
use ibc_primitives::Signer;
use ibc_proto::ibc::core::channel::v1::MsgRecvPacket as RawMsgRecvPacket;
use ibc_proto::Protobuf;

use super::{packet, proof_at};
use crate::error::PacketError;
use crate::packet::Packet;

pub const RECV_PACKET_TYPE_URL: &str = "/ibc.core.channel.v1.MsgRecvPacket";

/// Delivers a packet to its destination chain B.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgRecvPacket {
    pub packet: Packet,
    /// Shows that A committed to exactly this packet.
    pub proof_commitment_on_a: CommitmentProofBytes,
    pub proof_height_on_a: Height,
    pub signer: Signer,
}

impl Protobuf<RawMsgRecvPacket> for MsgRecvPacket {}

impl TryFrom<RawMsgRecvPacket> for MsgRecvPacket {
    type Error = PacketError;

    fn try_from(raw: RawMsgRecvPacket) -> Result<Self, Self::Error> {
        let (proof_commitment_on_a, proof_height_on_a) =
            proof_at::<Self::Error>(raw.proof_commitment, raw.proof_height)?;

        Ok(Self {
            packet: packet(raw.packet)?,
            proof_commitment_on_a,
            proof_height_on_a,
            signer: raw.signer.into(),
        })
    }
}

impl From<MsgRecvPacket> for RawMsgRecvPacket {
    fn from(msg: MsgRecvPacket) -> Self {
        Self {
            packet: Some(msg.packet.into()),
            proof_commitment: msg.proof_commitment_on_a.into(),
            proof_height: Some(msg.proof_height_on_a.into()),
            signer: msg.signer.to_string(),
        }
    }
}
