//! Definition of domain type message `MsgCreateClient`.

use ibc_primitives::proto::Protobuf;
use ibc_primitives::Signer;
use ibc_proto::ibc::core::client::v1::MsgCreateClient as RawMsgCreateClient;

use crate::error::ClientError;
use crate::{ClientState, ConsensusState};

pub const CREATE_CLIENT_TYPE_URL: &str = "/ibc.core.client.v1.MsgCreateClient";

/// A type of message that triggers the creation of a new on-chain (IBC)
/// client. The client type carried by `client_state` selects the verifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgCreateClient {
    pub client_state: ClientState,
    pub consensus_state: ConsensusState,
    pub signer: Signer,
}

impl MsgCreateClient {
    pub fn new(client_state: ClientState, consensus_state: ConsensusState, signer: Signer) -> Self {
        MsgCreateClient {
            client_state,
            consensus_state,
            signer,
        }
    }
}

impl Protobuf<RawMsgCreateClient> for MsgCreateClient {}

impl TryFrom<RawMsgCreateClient> for MsgCreateClient {
    type Error = ClientError;

    fn try_from(raw: RawMsgCreateClient) -> Result<Self, Self::Error> {
        let client_state = raw
            .client_state
            .ok_or(ClientError::MissingRawClientState)?
            .try_into()?;

        let consensus_state = raw
            .consensus_state
            .ok_or(ClientError::MissingRawConsensusState)?
            .try_into()?;

        Ok(MsgCreateClient::new(
            client_state,
            consensus_state,
            raw.signer.into(),
        ))
    }
}

impl From<MsgCreateClient> for RawMsgCreateClient {
    fn from(msg: MsgCreateClient) -> Self {
        RawMsgCreateClient {
            client_state: Some(msg.client_state.into()),
            consensus_state: Some(msg.consensus_state.into()),
            signer: msg.signer.to_string(),
        }
    }
}
