//! Defines the client state envelope kept for every client.

use ibc_core_host_types::identifiers::ClientType;
use ibc_primitives::proto::{Any, Protobuf};
use ibc_primitives::DecodingError;
use ibc_proto::ibc::core::client::v1::Height as RawHeight;
use prost::Message;

use crate::error::ClientError;
use crate::height::Height;

pub const OPAQUE_CLIENT_STATE_TYPE_URL: &str = "/ibc.core.client.v1.OpaqueClientState";

/// Wire form of [`ClientState`].
#[derive(Clone, PartialEq, Message)]
pub struct RawClientState {
    #[prost(string, tag = "1")]
    pub client_type: String,
    #[prost(message, optional, tag = "2")]
    pub latest_height: Option<RawHeight>,
    #[prost(message, optional, tag = "3")]
    pub frozen_height: Option<RawHeight>,
    #[prost(bytes = "vec", tag = "4")]
    pub data: Vec<u8>,
}

/// The state a host keeps about a counterparty chain.
///
/// The handlers only look at the client type, the latest height and the
/// frozen height. `data` is the chain-specific payload owned by the verifier
/// registered for `client_type`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientState {
    client_type: ClientType,
    latest_height: Height,
    frozen_height: Option<Height>,
    data: Vec<u8>,
}

impl ClientState {
    pub fn new(client_type: ClientType, latest_height: Height, data: Vec<u8>) -> Self {
        Self {
            client_type,
            latest_height,
            frozen_height: None,
            data,
        }
    }

    pub fn client_type(&self) -> &ClientType {
        &self.client_type
    }

    pub fn latest_height(&self) -> Height {
        self.latest_height
    }

    pub fn frozen_height(&self) -> Option<Height> {
        self.frozen_height
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen_height.is_some()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the state advanced to `height` with the verifier's new
    /// payload. The latest height never moves backwards.
    pub fn with_update(self, height: Height, data: Vec<u8>) -> Self {
        Self {
            latest_height: self.latest_height.max(height),
            data,
            ..self
        }
    }

    pub fn with_frozen_height(self, height: Height) -> Self {
        Self {
            frozen_height: Some(height),
            ..self
        }
    }
}

impl Protobuf<RawClientState> for ClientState {}

impl TryFrom<RawClientState> for ClientState {
    type Error = ClientError;

    fn try_from(raw: RawClientState) -> Result<Self, Self::Error> {
        let latest_height = raw
            .latest_height
            .ok_or(ClientError::InvalidClientState {
                description: "missing latest height".to_string(),
            })?
            .try_into()?;

        // A zero frozen height is how the wire format says "not frozen".
        let frozen_height = match raw.frozen_height {
            Some(h) if h.revision_height != 0 => Some(h.try_into()?),
            _ => None,
        };

        Ok(Self {
            client_type: ClientType::new(&raw.client_type)?,
            latest_height,
            frozen_height,
            data: raw.data,
        })
    }
}

impl From<ClientState> for RawClientState {
    fn from(value: ClientState) -> Self {
        Self {
            client_type: value.client_type.to_string(),
            latest_height: Some(value.latest_height.into()),
            frozen_height: value.frozen_height.map(Into::into),
            data: value.data,
        }
    }
}

impl Protobuf<Any> for ClientState {}

impl TryFrom<Any> for ClientState {
    type Error = ClientError;

    fn try_from(raw: Any) -> Result<Self, Self::Error> {
        if raw.type_url != OPAQUE_CLIENT_STATE_TYPE_URL {
            return Err(ClientError::Decoding(DecodingError::MismatchedTypeUrls {
                expected: OPAQUE_CLIENT_STATE_TYPE_URL.to_string(),
                actual: raw.type_url,
            }));
        }

        let raw_state = RawClientState::decode(raw.value.as_slice()).map_err(DecodingError::from)?;

        raw_state.try_into()
    }
}

impl From<ClientState> for Any {
    fn from(value: ClientState) -> Self {
        Any {
            type_url: OPAQUE_CLIENT_STATE_TYPE_URL.to_string(),
            value: RawClientState::from(value).encode_to_vec(),
        }
    }
}
