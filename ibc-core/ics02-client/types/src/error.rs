//! Defines the client error type

use displaydoc::Display;
use ibc_core_commitment_types::error::CommitmentError;
use ibc_core_host_types::error::{ErrorKind, IdentifierError};
use ibc_core_host_types::identifiers::{ClientId, ClientType};
use ibc_primitives::{DecodingError, Timestamp, TimestampError};

use crate::height::Height;
use crate::Status;

/// Encodes all the possible client errors
#[derive(Debug, Display)]
pub enum ClientError {
    /// client type `{client_type}` already has a registered verifier
    DuplicateType { client_type: ClientType },
    /// no verifier registered for client type `{client_type}`
    UnknownType { client_type: ClientType },
    /// client `{client_id}` not found
    ClientNotFound { client_id: ClientId },
    /// client `{client_id}` is frozen
    ClientFrozen { client_id: ClientId },
    /// client is not active; status is `{status}`
    ClientNotActive { status: Status },
    /// client state already exists: `{0}`
    DuplicateClientState(ClientId),
    /// invalid header: `{description}`
    InvalidHeader { description: String },
    /// invalid misbehaviour evidence: `{description}`
    InvalidMisbehaviour { description: String },
    /// invalid client state: `{description}`
    InvalidClientState { description: String },
    /// invalid consensus state: `{description}`
    InvalidConsensusState { description: String },
    /// consensus state not found for client `{client_id}` at height `{height}`
    ConsensusStateNotFound { client_id: ClientId, height: Height },
    /// update metadata not found for client `{client_id}` at height `{height}`
    UpdateMetaNotFound { client_id: ClientId, height: Height },
    /// header height `{header_height}` is not above the trusted height `{trusted_height}`
    InvalidHeaderHeight {
        header_height: Height,
        trusted_height: Height,
    },
    /// invalid height; cannot be zero or negative
    InvalidHeight,
    /// invalid proof height; expected `{actual}` >= `{expected}`
    InvalidProofHeight { actual: Height, expected: Height },
    /// invalid consensus state timestamp: `{0}`
    InvalidConsensusStateTimestamp(Timestamp),
    /// failed membership verification: `{description}`
    FailedMembershipVerification { description: String },
    /// failed non-membership verification: `{description}`
    FailedNonMembershipVerification { description: String },
    /// missing client message
    MissingClientMessage,
    /// missing raw client state
    MissingRawClientState,
    /// missing raw consensus state
    MissingRawConsensusState,
    /// invalid identifier: `{0}`
    Identifier(IdentifierError),
    /// decoding error: `{0}`
    Decoding(DecodingError),
    /// commitment error: `{0}`
    Commitment(CommitmentError),
    /// timestamp error: `{0}`
    Timestamp(TimestampError),
    /// client-specific error: `{description}`
    ClientSpecific { description: String },
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ClientNotFound { .. }
            | Self::UnknownType { .. }
            | Self::ConsensusStateNotFound { .. }
            | Self::UpdateMetaNotFound { .. } => ErrorKind::NotFound,
            Self::ClientFrozen { .. } | Self::ClientNotActive { .. } => ErrorKind::Expired,
            Self::DuplicateType { .. } | Self::DuplicateClientState(_) => ErrorKind::Conflict,
            Self::InvalidHeader { .. }
            | Self::InvalidMisbehaviour { .. }
            | Self::InvalidHeaderHeight { .. }
            | Self::FailedMembershipVerification { .. }
            | Self::FailedNonMembershipVerification { .. }
            | Self::ClientSpecific { .. } => ErrorKind::VerificationFailed,
            Self::InvalidProofHeight { .. } => ErrorKind::InvalidState,
            Self::InvalidClientState { .. }
            | Self::InvalidConsensusState { .. }
            | Self::InvalidHeight
            | Self::InvalidConsensusStateTimestamp(_)
            | Self::MissingClientMessage
            | Self::MissingRawClientState
            | Self::MissingRawConsensusState
            | Self::Identifier(_)
            | Self::Decoding(_)
            | Self::Commitment(_)
            | Self::Timestamp(_) => ErrorKind::Malformed,
        }
    }
}

impl From<IdentifierError> for ClientError {
    fn from(e: IdentifierError) -> Self {
        Self::Identifier(e)
    }
}

impl From<DecodingError> for ClientError {
    fn from(e: DecodingError) -> Self {
        Self::Decoding(e)
    }
}

impl From<CommitmentError> for ClientError {
    fn from(e: CommitmentError) -> Self {
        Self::Commitment(e)
    }
}

impl From<TimestampError> for ClientError {
    fn from(e: TimestampError) -> Self {
        Self::Timestamp(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::Identifier(e) => Some(e),
            Self::Decoding(e) => Some(e),
            Self::Commitment(e) => Some(e),
            Self::Timestamp(e) => Some(e),
            _ => None,
        }
    }
}
