//! Defines the context error type

use derive_more::From;
use displaydoc::Display;
use ibc_core_channel_types::error::{ChannelError, PacketError};
use ibc_core_client_types::error::ClientError;
use ibc_core_connection_types::error::ConnectionError;
use ibc_core_host_types::error::{ErrorKind, HostError};
use ibc_core_router_types::error::RouterError;
use ibc_primitives::DecodingError;

/// Top-level error returned by every handler.
#[derive(Debug, Display, From)]
pub enum ContextError {
    /// ICS02 Client error: `{0}`
    ClientError(ClientError),
    /// ICS03 Connection error: `{0}`
    ConnectionError(ConnectionError),
    /// ICS04 Channel error: `{0}`
    ChannelError(ChannelError),
    /// ICS04 Packet error: `{0}`
    PacketError(PacketError),
    /// ICS26 Routing error: `{0}`
    RouterError(RouterError),
    /// host error: `{0}`
    HostError(HostError),
    /// decoding error: `{0}`
    DecodingError(DecodingError),
}

impl ContextError {
    /// Coarse class of the failure, independent of the module that raised
    /// it.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ClientError(e) => e.kind(),
            Self::ConnectionError(e) => e.kind(),
            Self::ChannelError(e) => e.kind(),
            Self::PacketError(e) => e.kind(),
            Self::RouterError(e) => e.kind(),
            Self::HostError(e) => e.kind(),
            Self::DecodingError(_) => ErrorKind::Malformed,
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ClientError(e) => Some(e),
            Self::ConnectionError(e) => Some(e),
            Self::ChannelError(e) => Some(e),
            Self::PacketError(e) => Some(e),
            Self::RouterError(e) => Some(e),
            Self::HostError(e) => Some(e),
            Self::DecodingError(e) => Some(e),
        }
    }
}
