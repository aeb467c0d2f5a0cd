//! Failures of the connection handshake.

use displaydoc::Display;
use ibc_core_client_types::error::ClientError;
use ibc_core_client_types::Height;
use ibc_core_host_types::error::{ErrorKind, IdentifierError};
use ibc_core_host_types::identifiers::{ClientId, ConnectionId};
use ibc_primitives::{DecodingError, Timestamp, TimestampError};

use crate::version::Version;

#[derive(Debug, Display, derive_more::From)]
pub enum ConnectionError {
    /// malformed identifier: `{0}`
    InvalidIdentifier(IdentifierError),
    /// `{0}`
    Decoding(DecodingError),
    /// malformed timestamp: `{0}`
    Timestamp(TimestampError),
    /// no connection end `{connection_id}`
    ConnectionNotFound { connection_id: ConnectionId },
    /// connection is `{actual}`, expected `{expected}`
    InvalidState { expected: String, actual: String },

    /// connection end proof failed: `{0}`
    VerificationFailed(ClientError),
    /// proof of the counterparty's client of this chain failed for `{client_id}`: `{client_error}`
    ClientStateVerificationFailure {
        client_id: ClientId,
        client_error: ClientError,
    },
    /// proof of the consensus state at `{height}` failed: `{client_error}`
    ConsensusStateVerificationFailure {
        height: Height,
        client_error: ClientError,
    },
    /// counterparty's client of this chain is unacceptable: `{reason}`
    #[from(ignore)]
    InvalidClientState { reason: String },
    /// counterparty claims this chain reached `{target_height}`, but it is at `{current_height}`
    #[from(ignore)]
    InvalidConsensusHeight {
        target_height: Height,
        current_height: Height,
    },

    /// host is at `{current_host_height}`, the connection delay ends at `{earliest_valid_height}`
    #[from(ignore)]
    NotEnoughBlocksElapsed {
        current_host_height: Height,
        earliest_valid_height: Height,
    },
    /// host time is `{current_host_time}`, the connection delay ends at `{earliest_valid_time}`
    NotEnoughTimeElapsed {
        current_host_time: Timestamp,
        earliest_valid_time: Timestamp,
    },

    /// no versions offered
    EmptyVersions,
    /// a version without features
    EmptyFeatures,
    /// connection must settle on exactly one version
    InvalidVersionLength,
    /// version `{version}` is not supported
    VersionNotSupported { version: Version },
    /// no version in common with the counterparty
    NoCommonVersion,
    /// feature `{feature}` is not supported
    #[from(ignore)]
    FeatureNotSupported { feature: String },

    /// connection end has no client
    EmptyProtoConnectionEnd,
    /// message carries no proof
    InvalidProof,
    /// message carries no proof height
    MissingProofHeight,
    /// message carries no consensus height
    MissingConsensusHeight,
    /// counterparty is malformed or names a connection it should not
    InvalidCounterparty,
    /// message carries no counterparty
    MissingCounterparty,
    /// message carries no client state
    MissingClientState,
}

impl ConnectionError {
    pub fn kind(&self) -> ErrorKind {
        use ConnectionError::*;

        match self {
            VerificationFailed(client_error)
            | ClientStateVerificationFailure { client_error, .. }
            | ConsensusStateVerificationFailure { client_error, .. } => match client_error.kind() {
                kind @ (ErrorKind::Expired | ErrorKind::NotFound) => kind,
                _ => ErrorKind::VerificationFailed,
            },
            InvalidClientState { .. } => ErrorKind::VerificationFailed,
            ConnectionNotFound { .. } => ErrorKind::NotFound,
            InvalidState { .. }
            | InvalidConsensusHeight { .. }
            | InvalidVersionLength
            | NotEnoughBlocksElapsed { .. }
            | NotEnoughTimeElapsed { .. } => ErrorKind::InvalidState,
            VersionNotSupported { .. } | NoCommonVersion | FeatureNotSupported { .. } => {
                ErrorKind::Conflict
            }
            InvalidIdentifier(_)
            | Decoding(_)
            | Timestamp(_)
            | EmptyProtoConnectionEnd
            | EmptyVersions
            | EmptyFeatures
            | InvalidProof
            | MissingProofHeight
            | MissingConsensusHeight
            | InvalidCounterparty
            | MissingCounterparty
            | MissingClientState => ErrorKind::Malformed,
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConnectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::VerificationFailed(e)
            | Self::ClientStateVerificationFailure { client_error: e, .. }
            | Self::ConsensusStateVerificationFailure { client_error: e, .. } => Some(e),
            Self::InvalidIdentifier(e) => Some(e),
            Self::Decoding(e) => Some(e),
            Self::Timestamp(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handshake_delays_are_state_errors() {
        let at = |h| Height::new(0, h).unwrap();
        let err = ConnectionError::NotEnoughBlocksElapsed {
            current_host_height: at(3),
            earliest_valid_height: at(5),
        };

        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert_eq!(ConnectionError::NoCommonVersion.kind(), ErrorKind::Conflict);
    }
}
