//! Defines the consensus state envelope stored per client and height.

use ibc_core_commitment_types::commitment::CommitmentRoot;
use ibc_primitives::proto::{Any, Protobuf};
use ibc_primitives::{DecodingError, Timestamp};
use prost::Message;

use crate::error::ClientError;

pub const OPAQUE_CONSENSUS_STATE_TYPE_URL: &str = "/ibc.core.client.v1.OpaqueConsensusState";

/// Wire form of [`ConsensusState`].
#[derive(Clone, PartialEq, Message)]
pub struct RawConsensusState {
    /// Nanoseconds since the unix epoch.
    #[prost(uint64, tag = "1")]
    pub timestamp: u64,
    #[prost(bytes = "vec", tag = "2")]
    pub root: Vec<u8>,
    #[prost(bytes = "vec", tag = "3")]
    pub data: Vec<u8>,
}

/// A snapshot of a counterparty chain at some height: its block time, the
/// root its store committed to, and a verifier-specific payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsensusState {
    timestamp: Timestamp,
    root: CommitmentRoot,
    data: Vec<u8>,
}

impl ConsensusState {
    pub fn new(timestamp: Timestamp, root: CommitmentRoot, data: Vec<u8>) -> Self {
        Self {
            timestamp,
            root,
            data,
        }
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn root(&self) -> &CommitmentRoot {
        &self.root
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl Protobuf<RawConsensusState> for ConsensusState {}

impl TryFrom<RawConsensusState> for ConsensusState {
    type Error = ClientError;

    fn try_from(raw: RawConsensusState) -> Result<Self, Self::Error> {
        if raw.root.is_empty() {
            return Err(ClientError::InvalidConsensusState {
                description: "empty commitment root".to_string(),
            });
        }

        Ok(Self {
            timestamp: Timestamp::from_nanoseconds(raw.timestamp)?,
            root: raw.root.into(),
            data: raw.data,
        })
    }
}

impl From<ConsensusState> for RawConsensusState {
    fn from(value: ConsensusState) -> Self {
        Self {
            timestamp: value.timestamp.nanoseconds(),
            root: value.root.into_vec(),
            data: value.data,
        }
    }
}

impl Protobuf<Any> for ConsensusState {}

impl TryFrom<Any> for ConsensusState {
    type Error = ClientError;

    fn try_from(raw: Any) -> Result<Self, Self::Error> {
        if raw.type_url != OPAQUE_CONSENSUS_STATE_TYPE_URL {
            return Err(ClientError::Decoding(DecodingError::MismatchedTypeUrls {
                expected: OPAQUE_CONSENSUS_STATE_TYPE_URL.to_string(),
                actual: raw.type_url,
            }));
        }

        RawConsensusState::decode(raw.value.as_slice())
            .map_err(DecodingError::from)?
            .try_into()
    }
}

impl From<ConsensusState> for Any {
    fn from(value: ConsensusState) -> Self {
        Any {
            type_url: OPAQUE_CONSENSUS_STATE_TYPE_URL.to_string(),
            value: RawConsensusState::from(value).encode_to_vec(),
        }
    }
}
