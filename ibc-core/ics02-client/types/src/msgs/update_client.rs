//! Definition of domain type message `MsgUpdateClient`.

use ibc_core_host_types::identifiers::ClientId;
use ibc_primitives::proto::{Any, Protobuf};
use ibc_primitives::Signer;
use ibc_proto::ibc::core::client::v1::MsgUpdateClient as RawMsgUpdateClient;

use crate::error::ClientError;

pub const UPDATE_CLIENT_TYPE_URL: &str = "/ibc.core.client.v1.MsgUpdateClient";

/// Represents the message that triggers the update of an on-chain (IBC)
/// client with a new header. The header's `value` bytes are handed to the
/// client's verifier unparsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgUpdateClient {
    pub client_id: ClientId,
    pub client_message: Any,
    pub signer: Signer,
}

impl MsgUpdateClient {
    /// The opaque header bytes.
    pub fn header(&self) -> &[u8] {
        &self.client_message.value
    }
}

impl Protobuf<RawMsgUpdateClient> for MsgUpdateClient {}

impl TryFrom<RawMsgUpdateClient> for MsgUpdateClient {
    type Error = ClientError;

    fn try_from(raw: RawMsgUpdateClient) -> Result<Self, Self::Error> {
        Ok(MsgUpdateClient {
            client_id: raw.client_id.parse()?,
            client_message: raw.client_message.ok_or(ClientError::MissingClientMessage)?,
            signer: raw.signer.into(),
        })
    }
}

impl From<MsgUpdateClient> for RawMsgUpdateClient {
    fn from(msg: MsgUpdateClient) -> Self {
        RawMsgUpdateClient {
            client_id: msg.client_id.to_string(),
            client_message: Some(msg.client_message),
            signer: msg.signer.to_string(),
        }
    }
}
