use ibc_core_client_types::Height;
use ibc_core_commitment_types::commitment::CommitmentProofBytes;
use ibc_core_host_types::identifiers::{ChannelId, PortId};
use ibc_primitives::Signer;
use ibc_proto::ibc::core::channel::v1::MsgChannelOpenAck as RawMsgChannelOpenAck;
use ibc_proto::Protobuf;

use super::proof_at;
use crate::error::ChannelError;
use crate::Version;

pub const CHAN_OPEN_ACK_TYPE_URL: &str = "/ibc.core.channel.v1.MsgChannelOpenAck";

/// Opens the INIT end on chain A once B's TRYOPEN end is proven.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgChannelOpenAck {
    pub port_id_on_a: PortId,
    pub chan_id_on_a: ChannelId,
    /// The TRYOPEN end on B.
    pub chan_id_on_b: ChannelId,
    /// The version B settled on; A adopts it.
    pub version_on_b: Version,
    pub proof_chan_end_on_b: CommitmentProofBytes,
    pub proof_height_on_b: Height,
    pub signer: Signer,
}

impl Protobuf<RawMsgChannelOpenAck> for MsgChannelOpenAck {}

impl TryFrom<RawMsgChannelOpenAck> for MsgChannelOpenAck {
    type Error = ChannelError;

    fn try_from(raw: RawMsgChannelOpenAck) -> Result<Self, Self::Error> {
        let (proof_chan_end_on_b, proof_height_on_b) = proof_at::<Self::Error>(raw.proof_try, raw.proof_height)?;

        Ok(Self {
            port_id_on_a: raw.port_id.parse()?,
            chan_id_on_a: raw.channel_id.parse()?,
            chan_id_on_b: raw.counterparty_channel_id.parse()?,
            version_on_b: raw.counterparty_version.into(),
            proof_chan_end_on_b,
            proof_height_on_b,
            signer: raw.signer.into(),
        })
    }
}

impl From<MsgChannelOpenAck> for RawMsgChannelOpenAck {
    fn from(msg: MsgChannelOpenAck) -> Self {
        Self {
            port_id: msg.port_id_on_a.to_string(),
            channel_id: msg.chan_id_on_a.to_string(),
            counterparty_channel_id: msg.chan_id_on_b.to_string(),
            counterparty_version: msg.version_on_b.to_string(),
            proof_try: msg.proof_chan_end_on_b.into(),
            proof_height: Some(msg.proof_height_on_b.into()),
            signer: msg.signer.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use ibc_proto::ibc::core::client::v1::Height as RawHeight;

    use super::*;

    fn raw_msg(proof: Vec<u8>, height: u64) -> RawMsgChannelOpenAck {
        RawMsgChannelOpenAck {
            port_id: "transfer".to_string(),
            channel_id: "channel-0".to_string(),
            counterparty_channel_id: "channel-5".to_string(),
            counterparty_version: "ics20-1".to_string(),
            proof_try: proof,
            proof_height: Some(RawHeight {
                revision_number: 0,
                revision_height: height,
            }),
            signer: "relayer".to_string(),
        }
    }

    #[test]
    fn ack_needs_a_proof_and_its_height() {
        let msg = MsgChannelOpenAck::try_from(raw_msg(vec![1], 7)).unwrap();
        assert_eq!(msg.chan_id_on_b.as_str(), "channel-5");
        assert_eq!(msg.proof_height_on_b.revision_height(), 7);

        assert!(matches!(
            MsgChannelOpenAck::try_from(raw_msg(vec![], 7)),
            Err(ChannelError::MissingProof)
        ));
        assert!(matches!(
            MsgChannelOpenAck::try_from(raw_msg(vec![1], 0)),
            Err(ChannelError::MissingProofHeight)
        ));
    }
}
