//! Events emitted by the connection handshake.

use ibc_core_host_types::identifiers::{ClientId, ConnectionId};

use crate::connection::ConnectionEnd;

/// The handshake step a [`ConnectionEvent`] reports.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionEventKind {
    OpenInit,
    OpenTry,
    OpenAck,
    OpenConfirm,
}

impl ConnectionEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenInit => "connection_open_init",
            Self::OpenTry => "connection_open_try",
            Self::OpenAck => "connection_open_ack",
            Self::OpenConfirm => "connection_open_confirm",
        }
    }
}

/// Identifies both ends of a connection as the emitting host sees them.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectionEvent {
    pub kind: ConnectionEventKind,
    pub connection_id: ConnectionId,
    pub client_id: ClientId,
    /// Unknown until the counterparty has answered the INIT.
    pub counterparty_connection_id: Option<ConnectionId>,
    pub counterparty_client_id: ClientId,
}

impl ConnectionEvent {
    /// Describes `end` right after the handshake step `kind` stored it.
    pub fn new(kind: ConnectionEventKind, connection_id: ConnectionId, end: &ConnectionEnd) -> Self {
        Self {
            kind,
            connection_id,
            client_id: end.client_id().clone(),
            counterparty_connection_id: end.counterparty().connection_id().cloned(),
            counterparty_client_id: end.counterparty().client_id().clone(),
        }
    }

    pub fn event_type(&self) -> &'static str {
        self.kind.as_str()
    }
}
