use ibc_core_client_types::Height;
use ibc_core_commitment_types::commitment::CommitmentProofBytes;
use ibc_primitives::Signer;
use ibc_proto::ibc::core::channel::v1::MsgAcknowledgement as RawMsgAcknowledgement;
use ibc_proto::Protobuf;

use super::{packet, proof_at};
use crate::acknowledgement::Acknowledgement;
use crate::error::PacketError;
use crate::packet::Packet;

pub const ACKNOWLEDGEMENT_TYPE_URL: &str = "/ibc.core.channel.v1.MsgAcknowledgement";

/// Hands B's acknowledgement of a packet back to its source chain A.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgAcknowledgement {
    pub packet: Packet,
    pub acknowledgement: Acknowledgement,
    /// Shows that B wrote `acknowledgement` for the packet.
    pub proof_acked_on_b: CommitmentProofBytes,
    pub proof_height_on_b: Height,
    pub signer: Signer,
}

impl Protobuf<RawMsgAcknowledgement> for MsgAcknowledgement {}

impl TryFrom<RawMsgAcknowledgement> for MsgAcknowledgement {
    type Error = PacketError;

    fn try_from(raw: RawMsgAcknowledgement) -> Result<Self, Self::Error> {
        let (proof_acked_on_b, proof_height_on_b) = proof_at::<Self::Error>(raw.proof_acked, raw.proof_height)?;

        Ok(Self {
            packet: packet(raw.packet)?,
            acknowledgement: raw.acknowledgement.try_into()?,
            proof_acked_on_b,
            proof_height_on_b,
            signer: raw.signer.into(),
        })
    }
}

impl From<MsgAcknowledgement> for RawMsgAcknowledgement {
    fn from(msg: MsgAcknowledgement) -> Self {
        Self {
            packet: Some(msg.packet.into()),
            acknowledgement: msg.acknowledgement.into(),
            proof_acked: msg.proof_acked_on_b.into(),
            proof_height: Some(msg.proof_height_on_b.into()),
            signer: msg.signer.to_string(),
        }
    }
}
