//! Defines events emitted during handling of IBC messages

use ibc_core_channel_types::events::{ChannelEvent, PacketEvent};
use ibc_core_client_types::events::ClientEvent;
use ibc_core_connection_types::events::ConnectionEvent;
use ibc_core_router_types::event::ModuleEvent;

/// Events created by the IBC component of a chain, destined for a relayer.
///
/// Each core layer reports through one event type whose `kind` names the
/// step. Applications add their own events through `Module`.
#[derive(Clone, Debug, PartialEq, Eq, derive_more::From)]
pub enum IbcEvent {
    Client(ClientEvent),
    Connection(ConnectionEvent),
    Channel(ChannelEvent),
    Packet(PacketEvent),
    Module(ModuleEvent),
    Message(MessageEvent),
}

impl IbcEvent {
    pub fn event_type(&self) -> &str {
        match self {
            Self::Client(event) => event.event_type(),
            Self::Connection(event) => event.event_type(),
            Self::Channel(event) => event.event_type(),
            Self::Packet(event) => event.event_type(),
            Self::Module(event) => event.kind.as_str(),
            Self::Message(_) => "message",
        }
    }
}

/// Marks which handler processed a message. Emitted ahead of the event
/// describing the state transition itself.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageEvent {
    Client,
    Connection,
    Channel,
    // stores the module name
    Module(String),
}
