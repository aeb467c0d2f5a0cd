//! Failures of the channel handshake and of packet handling.

use displaydoc::Display;
use ibc_core_client_types::error::ClientError;
use ibc_core_client_types::Height;
use ibc_core_connection_types::error::ConnectionError;
use ibc_core_host_types::error::{ErrorKind, IdentifierError};
use ibc_core_host_types::identifiers::{ChannelId, ConnectionId, PortId, Sequence};
use ibc_primitives::{DecodingError, Timestamp, TimestampError};

use crate::channel::Order;
use crate::timeout::{TimeoutHeight, TimeoutTimestamp};
use crate::Version;

#[derive(Debug, Display, derive_more::From)]
pub enum ChannelError {
    /// `{0}`
    Connection(ConnectionError),
    /// channel end proof failed: `{0}`
    VerificationFailed(ClientError),
    /// malformed identifier: `{0}`
    InvalidIdentifier(IdentifierError),
    /// `{0}`
    Decoding(DecodingError),
    /// the port's module refused the handshake: `{description}`
    AppModule { description: String },
    /// no channel end `{channel_id}` on port `{port_id}`
    ChannelNotFound {
        port_id: PortId,
        channel_id: ChannelId,
    },
    /// channel is `{actual}`, expected `{expected}`
    #[from(ignore)]
    InvalidState { expected: String, actual: String },
    /// connection `{connection_id}` does not allow `{ordering}` channels
    UnsupportedOrdering {
        connection_id: ConnectionId,
        ordering: Order,
    },
    /// counterparty runs an `{actual}` channel, this end is `{expected}`
    OrderingMismatch { expected: Order, actual: Order },
    /// counterparty settled on version `{actual}`, this end proposed `{expected}`
    UnsupportedVersion { expected: Version, actual: Version },
    /// counterparty channel id `{actual}` differs from `{expected}`
    #[from(ignore)]
    InvalidChannelId { expected: String, actual: String },
    /// `{actual}` is not a channel ordering, expected `{expected}`
    #[from(ignore)]
    InvalidOrderType { expected: String, actual: String },
    /// channels run over exactly `{expected}` connection, got `{actual}`
    InvalidConnectionHopsLength { expected: u64, actual: u64 },
    /// message carries no proof
    MissingProof,
    /// message carries no proof height
    MissingProofHeight,
    /// channel end names no counterparty
    MissingCounterparty,
    /// message carries no channel end
    MissingRawChannelEnd,
}

impl ChannelError {
    pub fn kind(&self) -> ErrorKind {
        use ChannelError::*;

        match self {
            Connection(e) => e.kind(),
            VerificationFailed(e) => verification_kind(e),
            AppModule { .. } => ErrorKind::ApplicationRejected,
            ChannelNotFound { .. } => ErrorKind::NotFound,
            InvalidState { .. } | UnsupportedOrdering { .. } => ErrorKind::InvalidState,
            OrderingMismatch { .. } | UnsupportedVersion { .. } => ErrorKind::Conflict,
            InvalidIdentifier(_)
            | Decoding(_)
            | InvalidChannelId { .. }
            | InvalidOrderType { .. }
            | InvalidConnectionHopsLength { .. }
            | MissingProof
            | MissingProofHeight
            | MissingCounterparty
            | MissingRawChannelEnd => ErrorKind::Malformed,
        }
    }
}

#[derive(Debug, Display, derive_more::From)]
pub enum PacketError {
    /// `{0}`
    Channel(ChannelError),
    /// `{0}`
    Connection(ConnectionError),
    /// packet proof failed: `{0}`
    #[from(ignore)]
    VerificationFailed(ClientError),
    /// malformed identifier: `{0}`
    InvalidIdentifier(IdentifierError),
    /// `{0}`
    Decoding(DecodingError),
    /// the port's module rejected the packet: `{description}`
    AppModule { description: String },
    /// counterparty is already at `{chain_height}`, past timeout height `{timeout_height}`
    InsufficientPacketHeight {
        chain_height: Height,
        timeout_height: TimeoutHeight,
    },
    /// counterparty clock reads `{chain_timestamp}`, past timeout `{timeout_timestamp}`
    ExpiredPacketTimestamp {
        timeout_timestamp: TimeoutTimestamp,
        chain_timestamp: Timestamp,
    },
    /// packet `{sequence}` arrived after its timeout (`{timeout_height}`, `{timeout_timestamp}`)
    PacketTimedOut {
        sequence: Sequence,
        timeout_height: TimeoutHeight,
        timeout_timestamp: TimeoutTimestamp,
    },
    /// packet `{sequence}` is still live: receiver at `{chain_height}` and `{chain_timestamp}`, timeout at `{timeout_height}` and `{timeout_timestamp}`
    PacketTimeoutNotReached {
        sequence: Sequence,
        timeout_height: TimeoutHeight,
        chain_height: Height,
        timeout_timestamp: TimeoutTimestamp,
        chain_timestamp: Timestamp,
    },
    /// ordered channel expects packet `{expected}`, got `{actual}`
    #[from(ignore)]
    UnexpectedSequence {
        expected: Sequence,
        actual: Sequence,
    },
    /// packet `{sequence}` was already received
    #[from(ignore)]
    PacketReplay { sequence: Sequence },
    /// ordered channel acknowledges packet `{expected}` next, got `{actual}`
    #[from(ignore)]
    MismatchedPacketSequence {
        expected: Sequence,
        actual: Sequence,
    },
    /// nothing was sent as packet `{sequence}`, or it is already settled
    #[from(ignore)]
    PacketCommitmentNotFound { sequence: Sequence },
    /// packet `{sequence}` is not the packet that was sent
    #[from(ignore)]
    MismatchedPacketCommitment { sequence: Sequence },
    /// packet `{0}` is already acknowledged
    #[from(ignore)]
    DuplicateAcknowledgment(Sequence),
    /// packet is addressed to `{port_id}`/`{channel_id}`, which is not the counterparty
    InvalidPacketCounterparty {
        port_id: PortId,
        channel_id: ChannelId,
    },
    /// packet sets neither a timeout height nor a timeout timestamp
    MissingTimeout,
    /// bad timeout height: `{0}`
    #[from(ignore)]
    InvalidTimeoutHeight(ClientError),
    /// bad timeout timestamp: `{0}`
    InvalidTimeoutTimestamp(TimestampError),
    /// message carries no proof
    MissingProof,
    /// message carries no proof height
    MissingProofHeight,
    /// acknowledgement is empty
    EmptyAcknowledgement,
    /// acknowledgement status is empty
    EmptyAcknowledgementStatus,
    /// packet sequences start at 1
    ZeroPacketSequence,
}

impl PacketError {
    pub fn kind(&self) -> ErrorKind {
        use PacketError::*;

        match self {
            Channel(e) => e.kind(),
            Connection(e) => e.kind(),
            VerificationFailed(e) => verification_kind(e),
            AppModule { .. } => ErrorKind::ApplicationRejected,
            InsufficientPacketHeight { .. }
            | ExpiredPacketTimestamp { .. }
            | PacketTimedOut { .. } => ErrorKind::Expired,
            UnexpectedSequence { .. }
            | PacketReplay { .. }
            | MismatchedPacketSequence { .. }
            | DuplicateAcknowledgment(_) => ErrorKind::Conflict,
            PacketCommitmentNotFound { .. } => ErrorKind::NotFound,
            MismatchedPacketCommitment { .. } => ErrorKind::VerificationFailed,
            PacketTimeoutNotReached { .. } | InvalidPacketCounterparty { .. } => {
                ErrorKind::InvalidState
            }
            MissingTimeout
            | InvalidTimeoutHeight(_)
            | InvalidTimeoutTimestamp(_)
            | InvalidIdentifier(_)
            | Decoding(_)
            | MissingProof
            | MissingProofHeight
            | EmptyAcknowledgement
            | EmptyAcknowledgementStatus
            | ZeroPacketSequence => ErrorKind::Malformed,
        }
    }
}

/// Proofs against a frozen or unknown client keep that client's kind.
fn verification_kind(e: &ClientError) -> ErrorKind {
    match e.kind() {
        kind @ (ErrorKind::Expired | ErrorKind::NotFound) => kind,
        _ => ErrorKind::VerificationFailed,
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ChannelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Connection(e) => Some(e),
            Self::VerificationFailed(e) => Some(e),
            Self::InvalidIdentifier(e) => Some(e),
            Self::Decoding(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PacketError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Channel(e) => Some(e),
            Self::Connection(e) => Some(e),
            Self::VerificationFailed(e) | Self::InvalidTimeoutHeight(e) => Some(e),
            Self::InvalidIdentifier(e) => Some(e),
            Self::Decoding(e) => Some(e),
            Self::InvalidTimeoutTimestamp(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proofs_against_frozen_clients_report_expiry() {
        let frozen = ClientError::ClientFrozen {
            client_id: "07-axon-0".parse().unwrap(),
        };
        assert_eq!(
            PacketError::VerificationFailed(frozen).kind(),
            ErrorKind::Expired
        );
    }

    #[test]
    fn channel_failures_keep_their_kind_inside_packet_errors() {
        let err = PacketError::from(ChannelError::OrderingMismatch {
            expected: Order::Ordered,
            actual: Order::Unordered,
        });
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }
}
