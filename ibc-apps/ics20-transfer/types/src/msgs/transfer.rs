//! The message a user submits to start a transfer.

use ibc_core_channel_types::error::PacketError;
use ibc_core_channel_types::timeout::{TimeoutHeight, TimeoutTimestamp};
use ibc_core_handler_types::error::ContextError;
use ibc_core_host_types::identifiers::{ChannelId, PortId};
use ibc_primitives::proto::{Any, Protobuf};
use ibc_proto::ibc::applications::transfer::v1::MsgTransfer as RawMsgTransfer;

use crate::error::TokenTransferError;
use crate::packet::PacketData;

pub const MSG_TRANSFER_TYPE_URL: &str = "/ibc.applications.transfer.v1.MsgTransfer";

/// Asks the transfer module to send `packet_data` out over
/// `port_id_on_a`/`chan_id_on_a`.
///
/// The packet's sequence and destination come from the channel end when
/// it is sent. At least one of the two timeouts must be set.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MsgTransfer {
    pub port_id_on_a: PortId,
    pub chan_id_on_a: ChannelId,
    pub packet_data: PacketData,
    pub timeout_height_on_b: TimeoutHeight,
    pub timeout_timestamp_on_b: TimeoutTimestamp,
}

impl MsgTransfer {
    fn ensure_expires(&self) -> Result<(), TokenTransferError> {
        if self.timeout_height_on_b.is_set() || self.timeout_timestamp_on_b.is_set() {
            return Ok(());
        }
        Err(ContextError::from(PacketError::MissingTimeout).into())
    }
}

impl TryFrom<RawMsgTransfer> for MsgTransfer {
    type Error = TokenTransferError;

    fn try_from(raw: RawMsgTransfer) -> Result<Self, Self::Error> {
        let token = raw.token.ok_or(TokenTransferError::InvalidToken)?;

        let msg = Self {
            port_id_on_a: raw.source_port.parse()?,
            chan_id_on_a: raw.source_channel.parse()?,
            packet_data: PacketData {
                token: token
                    .try_into()
                    .map_err(|_| TokenTransferError::InvalidToken)?,
                sender: raw.sender.into(),
                receiver: raw.receiver.into(),
                memo: raw.memo.into(),
            },
            timeout_height_on_b: TimeoutHeight::try_from(raw.timeout_height)
                .map_err(ContextError::from)?,
            timeout_timestamp_on_b: TimeoutTimestamp::from_nanoseconds(raw.timeout_timestamp)
                .map_err(ContextError::from)?,
        };
        msg.ensure_expires()?;

        Ok(msg)
    }
}

impl From<MsgTransfer> for RawMsgTransfer {
    fn from(msg: MsgTransfer) -> Self {
        let PacketData {
            token,
            sender,
            receiver,
            memo,
        } = msg.packet_data;

        Self {
            source_port: msg.port_id_on_a.to_string(),
            source_channel: msg.chan_id_on_a.to_string(),
            token: Some(token.into()),
            sender: sender.to_string(),
            receiver: receiver.to_string(),
            timeout_height: msg.timeout_height_on_b.into(),
            timeout_timestamp: msg.timeout_timestamp_on_b.nanoseconds(),
            memo: memo.to_string(),
        }
    }
}

impl Protobuf<RawMsgTransfer> for MsgTransfer {}

impl TryFrom<Any> for MsgTransfer {
    type Error = TokenTransferError;

    fn try_from(any: Any) -> Result<Self, Self::Error> {
        if any.type_url != MSG_TRANSFER_TYPE_URL {
            return Err(TokenTransferError::UnknownMsgType {
                type_url: any.type_url,
            });
        }
        Self::decode_vec(&any.value).map_err(|e| TokenTransferError::DecodeRawMsg {
            reason: e.to_string(),
        })
    }
}

impl From<MsgTransfer> for Any {
    fn from(msg: MsgTransfer) -> Self {
        Any {
            type_url: MSG_TRANSFER_TYPE_URL.to_string(),
            value: msg.encode_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use ibc_proto::cosmos::base::v1beta1::Coin as ProtoCoin;
    use ibc_proto::ibc::core::client::v1::Height as RawHeight;

    use super::*;

    fn raw_msg(timeout_height: Option<RawHeight>, timeout_timestamp: u64) -> RawMsgTransfer {
        RawMsgTransfer {
            source_port: "transfer".to_string(),
            source_channel: "channel-0".to_string(),
            token: Some(ProtoCoin {
                denom: "uatom".to_string(),
                amount: "100".to_string(),
            }),
            sender: "alice".to_string(),
            receiver: "bob".to_string(),
            timeout_height,
            timeout_timestamp,
            memo: String::new(),
        }
    }

    #[test]
    fn decodes_through_any() {
        let raw = raw_msg(
            Some(RawHeight {
                revision_number: 0,
                revision_height: 10,
            }),
            0,
        );
        let msg = MsgTransfer::try_from(raw).unwrap();
        let any = Any::from(msg.clone());

        assert_eq!(any.type_url, MSG_TRANSFER_TYPE_URL);
        assert_eq!(MsgTransfer::try_from(any).unwrap(), msg);
        assert!(!msg.timeout_timestamp_on_b.is_set());
    }

    #[test]
    fn rejects_missing_timeouts() {
        let no_height = raw_msg(None, 0);
        let zero_height = raw_msg(
            Some(RawHeight {
                revision_number: 0,
                revision_height: 0,
            }),
            0,
        );

        assert!(MsgTransfer::try_from(no_height).is_err());
        assert!(MsgTransfer::try_from(zero_height).is_err());
        assert!(MsgTransfer::try_from(raw_msg(None, 1_000)).is_ok());
    }

    #[test]
    fn rejects_foreign_type_urls() {
        let any = Any {
            type_url: "/ibc.core.channel.v1.MsgRecvPacket".to_string(),
            value: vec![],
        };

        assert!(matches!(
            MsgTransfer::try_from(any),
            Err(TokenTransferError::UnknownMsgType { .. })
        ));
    }
}
