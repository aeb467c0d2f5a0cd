//! Message definitions for the channel open handshake datagrams and the
//! packet datagrams.

mod acknowledgement;
mod chan_open_ack;
mod chan_open_confirm;
mod chan_open_init;
mod chan_open_try;
mod recv_packet;
mod timeout;

pub use acknowledgement::*;
pub use chan_open_ack::*;
pub use chan_open_confirm::*;
pub use chan_open_init::*;
pub use chan_open_try::*;
pub use recv_packet::*;
pub use timeout::*;

use ibc_core_client_types::Height;
use ibc_core_commitment_types::commitment::CommitmentProofBytes;
use ibc_core_host_types::identifiers::PortId;
use ibc_primitives::DecodingError;
use ibc_proto::ibc::core::channel::v1::Packet as RawPacket;
use ibc_proto::ibc::core::client::v1::Height as RawHeight;

use crate::error::{ChannelError, PacketError};
use crate::packet::Packet;

/// All channel messages
#[derive(Clone, Debug, PartialEq, Eq, derive_more::From)]
pub enum ChannelMsg {
    OpenInit(MsgChannelOpenInit),
    OpenTry(MsgChannelOpenTry),
    OpenAck(MsgChannelOpenAck),
    OpenConfirm(MsgChannelOpenConfirm),
}

/// All packet messages
#[derive(Clone, Debug, PartialEq, Eq, derive_more::From)]
pub enum PacketMsg {
    Recv(MsgRecvPacket),
    Ack(MsgAcknowledgement),
    Timeout(MsgTimeout),
}

/// The local port a channel message is addressed to.
pub fn channel_msg_to_port_id(msg: &ChannelMsg) -> &PortId {
    match msg {
        ChannelMsg::OpenInit(msg) => &msg.port_id_on_a,
        ChannelMsg::OpenTry(msg) => &msg.port_id_on_b,
        ChannelMsg::OpenAck(msg) => &msg.port_id_on_a,
        ChannelMsg::OpenConfirm(msg) => &msg.port_id_on_b,
    }
}

/// The local port a packet message is addressed to: the destination port
/// for a receive, the source port otherwise.
pub fn packet_msg_to_port_id(msg: &PacketMsg) -> &PortId {
    match msg {
        PacketMsg::Recv(msg) => &msg.packet.port_id_on_b,
        PacketMsg::Ack(msg) => &msg.packet.port_id_on_a,
        PacketMsg::Timeout(msg) => &msg.packet.port_id_on_a,
    }
}

/// How a message family reports a proof it should carry but does not.
trait ProofErrors {
    const MISSING_PROOF: Self;
    const MISSING_HEIGHT: Self;
}

impl ProofErrors for ChannelError {
    const MISSING_PROOF: Self = ChannelError::MissingProof;
    const MISSING_HEIGHT: Self = ChannelError::MissingProofHeight;
}

impl ProofErrors for PacketError {
    const MISSING_PROOF: Self = PacketError::MissingProof;
    const MISSING_HEIGHT: Self = PacketError::MissingProofHeight;
}

/// A counterparty proof and the height of the counterparty it was taken
/// at. Height zero counts as missing.
fn proof_at<E: ProofErrors>(
    bytes: Vec<u8>,
    height: Option<RawHeight>,
) -> Result<(CommitmentProofBytes, Height), E> {
    let proof = CommitmentProofBytes::try_from(bytes).map_err(|_| E::MISSING_PROOF)?;
    let height = height
        .and_then(|height| Height::try_from(height).ok())
        .ok_or(E::MISSING_HEIGHT)?;
    Ok((proof, height))
}

fn packet(raw: Option<RawPacket>) -> Result<Packet, PacketError> {
    raw.ok_or(DecodingError::missing_field("packet"))?
        .try_into()
}
