use ibc_core_host_types::identifiers::{ConnectionId, PortId};
use ibc_primitives::Signer;
use ibc_proto::ibc::core::channel::v1::{
    Channel as RawChannel, MsgChannelOpenInit as RawMsgChannelOpenInit,
};
use ibc_proto::Protobuf;

use crate::channel::{ChannelEnd, Counterparty, Order, State};
use crate::error::ChannelError;
use crate::Version;

pub const CHAN_OPEN_INIT_TYPE_URL: &str = "/ibc.core.channel.v1.MsgChannelOpenInit";

/// Opens a channel end in INIT on chain A, bound to `port_id_on_a` and
/// facing `port_id_on_b` on the other side of `conn_id_on_a`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgChannelOpenInit {
    pub port_id_on_a: PortId,
    pub conn_id_on_a: ConnectionId,
    pub port_id_on_b: PortId,
    pub ordering: Order,
    pub signer: Signer,
    /// Empty to let the application pick its default
    pub version_proposal: Version,
}

impl Protobuf<RawMsgChannelOpenInit> for MsgChannelOpenInit {}

impl TryFrom<RawMsgChannelOpenInit> for MsgChannelOpenInit {
    type Error = ChannelError;

    fn try_from(raw_msg: RawMsgChannelOpenInit) -> Result<Self, Self::Error> {
        let proposed: ChannelEnd = raw_msg
            .channel
            .ok_or(ChannelError::MissingRawChannelEnd)?
            .try_into()?;
        proposed.ensure_state(State::Init)?;

        if let Some(remote_id) = proposed.counterparty().channel_id() {
            return Err(ChannelError::InvalidChannelId {
                expected: String::new(),
                actual: remote_id.to_string(),
            });
        }

        Ok(MsgChannelOpenInit {
            port_id_on_a: raw_msg.port_id.parse()?,
            conn_id_on_a: proposed.connection_id().clone(),
            port_id_on_b: proposed.counterparty().port_id().clone(),
            ordering: proposed.ordering(),
            signer: raw_msg.signer.into(),
            version_proposal: proposed.version().clone(),
        })
    }
}

impl From<MsgChannelOpenInit> for RawMsgChannelOpenInit {
    fn from(msg: MsgChannelOpenInit) -> Self {
        let channel = RawChannel {
            state: State::Init as i32,
            ordering: msg.ordering as i32,
            counterparty: Some(Counterparty::new(msg.port_id_on_b, None).into()),
            connection_hops: vec![msg.conn_id_on_a.to_string()],
            version: msg.version_proposal.to_string(),
            upgrade_sequence: 0,
        };

        RawMsgChannelOpenInit {
            port_id: msg.port_id_on_a.to_string(),
            channel: Some(channel),
            signer: msg.signer.to_string(),
        }
    }
}
