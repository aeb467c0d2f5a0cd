//! Events emitted by the client handlers.

use ibc_core_host_types::identifiers::{ClientId, ClientType};
use subtle_encoding::hex;

use crate::height::Height;

/// What happened to a client.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClientEventKind {
    Created,
    Updated,
    /// Misbehaviour was proven and the client is frozen for good.
    Frozen,
}

impl ClientEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "create_client",
            Self::Updated => "update_client",
            Self::Frozen => "client_misbehaviour",
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientEvent {
    pub kind: ClientEventKind,
    pub client_id: ClientId,
    pub client_type: ClientType,
    /// Height of the consensus state the handler stored. Relayers build
    /// proofs against it.
    pub consensus_height: Option<Height>,
    pub header: Vec<u8>,
}

impl ClientEvent {
    pub fn created(client_id: ClientId, client_type: ClientType, height: Height) -> Self {
        Self {
            kind: ClientEventKind::Created,
            client_id,
            client_type,
            consensus_height: Some(height),
            header: Vec::new(),
        }
    }

    pub fn updated(
        client_id: ClientId,
        client_type: ClientType,
        height: Height,
        header: Vec<u8>,
    ) -> Self {
        Self {
            kind: ClientEventKind::Updated,
            client_id,
            client_type,
            consensus_height: Some(height),
            header,
        }
    }

    pub fn frozen(client_id: ClientId, client_type: ClientType) -> Self {
        Self {
            kind: ClientEventKind::Frozen,
            client_id,
            client_type,
            consensus_height: None,
            header: Vec::new(),
        }
    }

    pub fn event_type(&self) -> &'static str {
        self.kind.as_str()
    }

    /// Lower-case hex of the header, the way event attributes carry it.
    pub fn header_hex(&self) -> String {
        String::from_utf8(hex::encode(&self.header)).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_event_renders_header_as_hex() {
        let event = ClientEvent::updated(
            "07-axon-0".parse().unwrap(),
            ClientType::new("07-axon").unwrap(),
            Height::new(0, 2).unwrap(),
            vec![0xde, 0xad],
        );
        assert_eq!(event.header_hex(), "dead");
        assert_eq!(event.event_type(), "update_client");
    }

    #[test]
    fn frozen_event_carries_no_height() {
        let event = ClientEvent::frozen(
            "07-axon-0".parse().unwrap(),
            ClientType::new("07-axon").unwrap(),
        );
        assert_eq!(event.consensus_height, None);
        assert_eq!(event.event_type(), "client_misbehaviour");
    }
}
