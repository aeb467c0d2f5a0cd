use ibc_core_client_types::Height;
use ibc_core_commitment_types::commitment::CommitmentProofBytes;
use ibc_core_host_types::identifiers::{ChannelId, PortId};
use ibc_primitives::Signer;
use ibc_proto::ibc::core::channel::v1::MsgChannelOpenConfirm as RawMsgChannelOpenConfirm;
use ibc_proto::Protobuf;

use super::proof_at;
use crate::error::ChannelError;

pub const CHAN_OPEN_CONFIRM_TYPE_URL: &str = "/ibc.core.channel.v1.MsgChannelOpenConfirm";

/// Opens the TRYOPEN end on chain B once A's end is proven open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgChannelOpenConfirm {
    pub port_id_on_b: PortId,
    pub chan_id_on_b: ChannelId,
    pub proof_chan_end_on_a: CommitmentProofBytes,
    pub proof_height_on_a: Height,
    pub signer: Signer,
}

impl Protobuf<RawMsgChannelOpenConfirm> for MsgChannelOpenConfirm {}

impl TryFrom<RawMsgChannelOpenConfirm> for MsgChannelOpenConfirm {
    type Error = ChannelError;

    fn try_from(raw: RawMsgChannelOpenConfirm) -> Result<Self, Self::Error> {
        let (proof_chan_end_on_a, proof_height_on_a) = proof_at::<Self::Error>(raw.proof_ack, raw.proof_height)?;

        Ok(Self {
            port_id_on_b: raw.port_id.parse()?,
            chan_id_on_b: raw.channel_id.parse()?,
            proof_chan_end_on_a,
            proof_height_on_a,
            signer: raw.signer.into(),
        })
    }
}

impl From<MsgChannelOpenConfirm> for RawMsgChannelOpenConfirm {
    fn from(msg: MsgChannelOpenConfirm) -> Self {
        Self {
            port_id: msg.port_id_on_b.to_string(),
            channel_id: msg.chan_id_on_b.to_string(),
            proof_ack: msg.proof_chan_end_on_a.into(),
            proof_height: Some(msg.proof_height_on_a.into()),
            signer: msg.signer.to_string(),
        }
    }
}
