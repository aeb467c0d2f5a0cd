use ibc_core_channel_types::msgs::{
    ChannelMsg, MsgAcknowledgement, MsgChannelOpenAck, MsgChannelOpenConfirm, MsgChannelOpenInit,
    MsgChannelOpenTry, MsgRecvPacket, MsgTimeout, PacketMsg, ACKNOWLEDGEMENT_TYPE_URL,
    CHAN_OPEN_ACK_TYPE_URL, CHAN_OPEN_CONFIRM_TYPE_URL, CHAN_OPEN_INIT_TYPE_URL,
    CHAN_OPEN_TRY_TYPE_URL, RECV_PACKET_TYPE_URL, TIMEOUT_TYPE_URL,
};
use ibc_core_client_types::msgs::{
    ClientMsg, MsgCreateClient, MsgSubmitMisbehaviour, MsgUpdateClient, CREATE_CLIENT_TYPE_URL,
    SUBMIT_MISBEHAVIOUR_TYPE_URL, UPDATE_CLIENT_TYPE_URL,
};
use ibc_core_connection_types::msgs::{
    ConnectionMsg, MsgConnectionOpenAck, MsgConnectionOpenConfirm, MsgConnectionOpenInit,
    MsgConnectionOpenTry, CONN_OPEN_ACK_TYPE_URL, CONN_OPEN_CONFIRM_TYPE_URL,
    CONN_OPEN_INIT_TYPE_URL, CONN_OPEN_TRY_TYPE_URL,
};
use ibc_primitives::DecodingError;
use ibc_proto::google::protobuf::Any;
use ibc_proto::Protobuf;

/// Any message the core handlers accept, grouped by the module that
/// handles it.
#[derive(Clone, Debug, PartialEq, Eq, derive_more::From)]
pub enum MsgEnvelope {
    Client(ClientMsg),
    Connection(ConnectionMsg),
    Channel(ChannelMsg),
    Packet(PacketMsg),
}

/// Ties each message to its protobuf type URL, both ways.
macro_rules! type_urls {
    ($($group:ident($family:ident::$kind:ident($msg:ty)) => $url:ident,)*) => {
        impl MsgEnvelope {
            pub fn type_url(&self) -> &'static str {
                match self {
                    $(Self::$group($family::$kind(_)) => $url,)*
                }
            }
        }

        impl From<MsgEnvelope> for Any {
            fn from(envelope: MsgEnvelope) -> Self {
                let type_url = envelope.type_url().to_string();
                let value = match envelope {
                    $(MsgEnvelope::$group($family::$kind(msg)) => msg.encode_vec(),)*
                };
                Any { type_url, value }
            }
        }

        impl TryFrom<Any> for MsgEnvelope {
            type Error = DecodingError;

            fn try_from(any: Any) -> Result<Self, Self::Error> {
                let value = any.value.as_slice();
                match any.type_url.as_str() {
                    $($url => {
                        let msg = <$msg>::decode_vec(value).map_err(DecodingError::proto)?;
                        Ok($family::$kind(msg).into())
                    })*
                    _ => Err(DecodingError::UnknownTypeUrl(any.type_url)),
                }
            }
        }
    };
}

type_urls! {
    Client(ClientMsg::CreateClient(MsgCreateClient)) => CREATE_CLIENT_TYPE_URL,
    Client(ClientMsg::UpdateClient(MsgUpdateClient)) => UPDATE_CLIENT_TYPE_URL,
    Client(ClientMsg::Misbehaviour(MsgSubmitMisbehaviour)) => SUBMIT_MISBEHAVIOUR_TYPE_URL,
    Connection(ConnectionMsg::OpenInit(MsgConnectionOpenInit)) => CONN_OPEN_INIT_TYPE_URL,
    Connection(ConnectionMsg::OpenTry(MsgConnectionOpenTry)) => CONN_OPEN_TRY_TYPE_URL,
    Connection(ConnectionMsg::OpenAck(MsgConnectionOpenAck)) => CONN_OPEN_ACK_TYPE_URL,
    Connection(ConnectionMsg::OpenConfirm(MsgConnectionOpenConfirm)) => CONN_OPEN_CONFIRM_TYPE_URL,
    Channel(ChannelMsg::OpenInit(MsgChannelOpenInit)) => CHAN_OPEN_INIT_TYPE_URL,
    Channel(ChannelMsg::OpenTry(MsgChannelOpenTry)) => CHAN_OPEN_TRY_TYPE_URL,
    Channel(ChannelMsg::OpenAck(MsgChannelOpenAck)) => CHAN_OPEN_ACK_TYPE_URL,
    Channel(ChannelMsg::OpenConfirm(MsgChannelOpenConfirm)) => CHAN_OPEN_CONFIRM_TYPE_URL,
    Packet(PacketMsg::Recv(MsgRecvPacket)) => RECV_PACKET_TYPE_URL,
    Packet(PacketMsg::Ack(MsgAcknowledgement)) => ACKNOWLEDGEMENT_TYPE_URL,
    Packet(PacketMsg::Timeout(MsgTimeout)) => TIMEOUT_TYPE_URL,
}
