//! Events emitted by the channel handshake and the packet lifecycle.
//!
//! Every event carries the identifiers a relayer needs to build the next
//! datagram: handshake events describe the end as stored after the step,
//! packet events carry the packet itself.

use ibc_core_host_types::identifiers::{ChannelId, ConnectionId, PortId};

use crate::acknowledgement::Acknowledgement;
use crate::channel::{ChannelEnd, Order};
use crate::packet::Packet;
use crate::Version;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelEventKind {
    OpenInit,
    OpenTry,
    OpenAck,
    OpenConfirm,
    /// An ORDERED end closed after one of its packets timed out.
    Closed,
}

impl ChannelEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenInit => "channel_open_init",
            Self::OpenTry => "channel_open_try",
            Self::OpenAck => "channel_open_ack",
            Self::OpenConfirm => "channel_open_confirm",
            Self::Closed => "channel_close",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelEvent {
    pub kind: ChannelEventKind,
    pub port_id: PortId,
    pub channel_id: ChannelId,
    pub counterparty_port_id: PortId,
    /// Unknown on an end still in INIT.
    pub counterparty_channel_id: Option<ChannelId>,
    pub connection_id: ConnectionId,
    pub version: Version,
    pub ordering: Order,
}

impl ChannelEvent {
    /// Describes `end`, stored at `port_id`/`channel_id`, right after the
    /// step `kind`.
    pub fn new(
        kind: ChannelEventKind,
        port_id: PortId,
        channel_id: ChannelId,
        end: &ChannelEnd,
    ) -> Self {
        Self {
            kind,
            port_id,
            channel_id,
            counterparty_port_id: end.counterparty().port_id().clone(),
            counterparty_channel_id: end.counterparty().channel_id().cloned(),
            connection_id: end.connection_id().clone(),
            version: end.version().clone(),
            ordering: end.ordering(),
        }
    }

    pub fn event_type(&self) -> &'static str {
        self.kind.as_str()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PacketEventKind {
    Send,
    Receive,
    WriteAcknowledgement,
    Acknowledge,
    Timeout,
}

impl PacketEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Send => "send_packet",
            Self::Receive => "recv_packet",
            Self::WriteAcknowledgement => "write_acknowledgement",
            Self::Acknowledge => "acknowledge_packet",
            Self::Timeout => "timeout_packet",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PacketEvent {
    pub kind: PacketEventKind,
    pub packet: Packet,
    pub ordering: Order,
    /// Connection under the end that emitted the event.
    pub connection_id: ConnectionId,
    /// Set on `WriteAcknowledgement` only.
    pub acknowledgement: Option<Acknowledgement>,
}

impl PacketEvent {
    pub fn new(kind: PacketEventKind, packet: Packet, end: &ChannelEnd) -> Self {
        Self {
            kind,
            packet,
            ordering: end.ordering(),
            connection_id: end.connection_id().clone(),
            acknowledgement: None,
        }
    }

    pub fn written(packet: Packet, acknowledgement: Acknowledgement, end: &ChannelEnd) -> Self {
        Self {
            acknowledgement: Some(acknowledgement),
            ..Self::new(PacketEventKind::WriteAcknowledgement, packet, end)
        }
    }

    pub fn event_type(&self) -> &'static str {
        self.kind.as_str()
    }
}

#[cfg(test)]
mod tests {
    use ibc_core_host_types::identifiers::Sequence;

    use super::*;
    use crate::channel::{Counterparty, State};
    use crate::timeout::{TimeoutHeight, TimeoutTimestamp};

    fn end(remote_channel: Option<ChannelId>) -> ChannelEnd {
        ChannelEnd::new(
            State::Init,
            Order::Ordered,
            Counterparty::new("port-1".parse().unwrap(), remote_channel),
            ConnectionId::new(3),
            Version::new("mock-1".to_string()),
        )
        .unwrap()
    }

    #[test]
    fn handshake_event_describes_the_stored_end() {
        let event = ChannelEvent::new(
            ChannelEventKind::OpenInit,
            "port-1".parse().unwrap(),
            ChannelId::new(0),
            &end(None),
        );

        assert_eq!(event.event_type(), "channel_open_init");
        assert_eq!(event.counterparty_channel_id, None);
        assert_eq!(event.connection_id, ConnectionId::new(3));
        assert_eq!(event.ordering, Order::Ordered);
    }

    #[test]
    fn only_written_acknowledgements_carry_the_ack() {
        let packet = Packet {
            seq_on_a: Sequence::from(1u64),
            port_id_on_a: "port-1".parse().unwrap(),
            chan_id_on_a: ChannelId::new(0),
            port_id_on_b: "port-1".parse().unwrap(),
            chan_id_on_b: ChannelId::new(1),
            data: b"1234".to_vec(),
            timeout_height_on_b: TimeoutHeight::Never,
            timeout_timestamp_on_b: TimeoutTimestamp::Never,
        };
        let end = end(Some(ChannelId::new(1)));
        let ack = Acknowledgement::try_from(b"ok".to_vec()).unwrap();

        let sent = PacketEvent::new(PacketEventKind::Send, packet.clone(), &end);
        let written = PacketEvent::written(packet, ack.clone(), &end);

        assert_eq!(sent.event_type(), "send_packet");
        assert_eq!(sent.acknowledgement, None);
        assert_eq!(written.event_type(), "write_acknowledgement");
        assert_eq!(written.acknowledgement, Some(ack));
        assert_eq!(written.packet.data, b"1234");
    }
}
