//! Definition of domain type message `MsgSubmitMisbehaviour`.

use ibc_core_host_types::identifiers::ClientId;
use ibc_primitives::proto::{Any, Protobuf};
use ibc_primitives::Signer;
use ibc_proto::ibc::core::client::v1::MsgSubmitMisbehaviour as RawMsgSubmitMisbehaviour;

use crate::error::ClientError;

pub const SUBMIT_MISBEHAVIOUR_TYPE_URL: &str = "/ibc.core.client.v1.MsgSubmitMisbehaviour";

/// A type of message that submits evidence of counterparty misbehaviour.
/// A verifier that accepts the evidence freezes the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgSubmitMisbehaviour {
    /// client unique identifier
    pub client_id: ClientId,
    /// misbehaviour used for freezing the light client
    pub misbehaviour: Any,
    /// signer address
    pub signer: Signer,
}

impl MsgSubmitMisbehaviour {
    /// The opaque evidence bytes.
    pub fn evidence(&self) -> &[u8] {
        &self.misbehaviour.value
    }
}

#[allow(deprecated)]
impl Protobuf<RawMsgSubmitMisbehaviour> for MsgSubmitMisbehaviour {}

#[allow(deprecated)]
impl TryFrom<RawMsgSubmitMisbehaviour> for MsgSubmitMisbehaviour {
    type Error = ClientError;

    fn try_from(raw: RawMsgSubmitMisbehaviour) -> Result<Self, Self::Error> {
        Ok(MsgSubmitMisbehaviour {
            client_id: raw.client_id.parse()?,
            misbehaviour: raw.misbehaviour.ok_or(ClientError::MissingClientMessage)?,
            signer: raw.signer.into(),
        })
    }
}

#[allow(deprecated)]
impl From<MsgSubmitMisbehaviour> for RawMsgSubmitMisbehaviour {
    fn from(msg: MsgSubmitMisbehaviour) -> Self {
        RawMsgSubmitMisbehaviour {
            client_id: msg.client_id.to_string(),
            misbehaviour: Some(msg.misbehaviour),
            signer: msg.signer.to_string(),
        }
    }
}
