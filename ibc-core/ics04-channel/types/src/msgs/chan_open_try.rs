use ibc_core_client_types::Height;
use ibc_core_commitment_types::commitment::CommitmentProofBytes;
use ibc_core_host_types::identifiers::{ChannelId, ConnectionId, PortId};
use ibc_primitives::Signer;
use ibc_proto::ibc::core::channel::v1::{
    Channel as RawChannel, MsgChannelOpenTry as RawMsgChannelOpenTry,
};
use ibc_proto::Protobuf;

use super::proof_at;
use crate::channel::{ChannelEnd, Counterparty, Order, State};
use crate::error::ChannelError;
use crate::Version;

pub const CHAN_OPEN_TRY_TYPE_URL: &str = "/ibc.core.channel.v1.MsgChannelOpenTry";

/// Opens a channel end in TRYOPEN on chain B, answering the INIT end
/// `chan_id_on_a` whose existence `proof_chan_end_on_a` shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgChannelOpenTry {
    pub port_id_on_b: PortId,
    pub conn_id_on_b: ConnectionId,
    pub port_id_on_a: PortId,
    pub chan_id_on_a: ChannelId,
    pub version_supported_on_a: Version,
    pub proof_chan_end_on_a: CommitmentProofBytes,
    pub proof_height_on_a: Height,
    pub ordering: Order,
    pub signer: Signer,
}

impl Protobuf<RawMsgChannelOpenTry> for MsgChannelOpenTry {}

impl TryFrom<RawMsgChannelOpenTry> for MsgChannelOpenTry {
    type Error = ChannelError;

    fn try_from(raw_msg: RawMsgChannelOpenTry) -> Result<Self, Self::Error> {
        let proposed: ChannelEnd = raw_msg
            .channel
            .ok_or(ChannelError::MissingRawChannelEnd)?
            .try_into()?;
        proposed.ensure_state(State::TryOpen)?;

        let remote = proposed.counterparty();
        let chan_id_on_a = remote
            .channel_id()
            .cloned()
            .ok_or(ChannelError::MissingCounterparty)?;

        let (proof_chan_end_on_a, proof_height_on_a) =
            proof_at::<Self::Error>(raw_msg.proof_init, raw_msg.proof_height)?;

        Ok(MsgChannelOpenTry {
            port_id_on_b: raw_msg.port_id.parse()?,
            conn_id_on_b: proposed.connection_id().clone(),
            port_id_on_a: remote.port_id().clone(),
            chan_id_on_a,
            version_supported_on_a: raw_msg.counterparty_version.into(),
            proof_chan_end_on_a,
            proof_height_on_a,
            ordering: proposed.ordering(),
            signer: raw_msg.signer.into(),
        })
    }
}

impl From<MsgChannelOpenTry> for RawMsgChannelOpenTry {
    #[allow(deprecated)]
    fn from(msg: MsgChannelOpenTry) -> Self {
        let remote = Counterparty::new(msg.port_id_on_a, Some(msg.chan_id_on_a));
        let channel = RawChannel {
            state: State::TryOpen as i32,
            ordering: msg.ordering as i32,
            counterparty: Some(remote.into()),
            connection_hops: vec![msg.conn_id_on_b.to_string()],
            version: String::new(),
            upgrade_sequence: 0,
        };

        RawMsgChannelOpenTry {
            port_id: msg.port_id_on_b.to_string(),
            previous_channel_id: String::new(),
            channel: Some(channel),
            counterparty_version: msg.version_supported_on_a.to_string(),
            proof_init: msg.proof_chan_end_on_a.into(),
            proof_height: Some(msg.proof_height_on_a.into()),
            signer: msg.signer.to_string(),
        }
    }
}
