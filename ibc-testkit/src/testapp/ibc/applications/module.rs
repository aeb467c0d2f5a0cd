//! An application that accepts every channel and packet and records the
//! callbacks it receives, so tests can observe what the router delivered.

use std::sync::Arc;

use ibc::core::channel::types::acknowledgement::Acknowledgement;
use ibc::core::channel::types::channel::Order;
use ibc::core::channel::types::error::{ChannelError, PacketError};
use ibc::core::channel::types::packet::Packet;
use ibc::core::channel::types::Version;
use ibc::core::host::types::identifiers::{ChannelId, PortId};
use ibc::core::router::module::{ChannelOpening, Module};
use ibc::core::router::types::module::ModuleExtras;
use ibc::primitives::Signer;
use parking_lot::Mutex;
use tracing::debug;

pub const MOCK_MODULE_ID: &str = "mock";

pub const MOCK_VERSION: &str = "mock-1";

/// Acknowledgement written for every received packet.
pub const MOCK_ACK: &[u8] = b"mock-ack";

/// A callback as seen by [`MockModule`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModuleCall {
    ChanOpenInit {
        port_id: PortId,
        channel_id: ChannelId,
        order: Order,
    },
    ChanOpenTry {
        port_id: PortId,
        channel_id: ChannelId,
        order: Order,
    },
    ChanOpenAck {
        port_id: PortId,
        channel_id: ChannelId,
    },
    ChanOpenConfirm {
        port_id: PortId,
        channel_id: ChannelId,
    },
    RecvPacket(Packet),
    AcknowledgePacket {
        packet: Packet,
        acknowledgement: Acknowledgement,
    },
    TimeoutPacket(Packet),
}

/// Recording application. Clones share the same call log.
#[derive(Clone, Debug, Default)]
pub struct MockModule {
    calls: Arc<Mutex<Vec<ModuleCall>>>,
    rejected_order: Option<Order>,
}

impl MockModule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuses to open channels with the given ordering.
    pub fn rejecting(order: Order) -> Self {
        Self {
            rejected_order: Some(order),
            ..Self::default()
        }
    }

    /// Callbacks executed so far, in order.
    pub fn calls(&self) -> Vec<ModuleCall> {
        self.calls.lock().clone()
    }

    pub fn received_packets(&self) -> Vec<Packet> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                ModuleCall::RecvPacket(packet) => Some(packet.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: ModuleCall) {
        debug!(?call, "mock module callback");
        self.calls.lock().push(call);
    }

    fn check_order(&self, order: Order) -> Result<(), ChannelError> {
        match self.rejected_order {
            Some(rejected) if rejected == order => Err(ChannelError::AppModule {
                description: format!("mock module does not accept {order} channels"),
            }),
            _ => Ok(()),
        }
    }

    fn negotiate(version: &Version) -> Version {
        if version.is_empty() {
            Version::new(MOCK_VERSION.to_string())
        } else {
            version.clone()
        }
    }
}

impl Module for MockModule {
    fn on_chan_open_init_validate(
        &self,
        opening: ChannelOpening<'_>,
        proposed_version: &Version,
    ) -> Result<Version, ChannelError> {
        self.check_order(opening.ordering)?;
        Ok(Self::negotiate(proposed_version))
    }

    fn on_chan_open_init_execute(
        &mut self,
        opening: ChannelOpening<'_>,
        proposed_version: &Version,
    ) -> Result<(ModuleExtras, Version), ChannelError> {
        self.record(ModuleCall::ChanOpenInit {
            port_id: opening.port_id.clone(),
            channel_id: opening.channel_id.clone(),
            order: opening.ordering,
        });
        Ok((ModuleExtras::empty(), Self::negotiate(proposed_version)))
    }

    fn on_chan_open_try_validate(
        &self,
        opening: ChannelOpening<'_>,
        counterparty_version: &Version,
    ) -> Result<Version, ChannelError> {
        self.check_order(opening.ordering)?;
        Ok(Self::negotiate(counterparty_version))
    }

    fn on_chan_open_try_execute(
        &mut self,
        opening: ChannelOpening<'_>,
        counterparty_version: &Version,
    ) -> Result<(ModuleExtras, Version), ChannelError> {
        self.record(ModuleCall::ChanOpenTry {
            port_id: opening.port_id.clone(),
            channel_id: opening.channel_id.clone(),
            order: opening.ordering,
        });
        Ok((ModuleExtras::empty(), Self::negotiate(counterparty_version)))
    }

    fn on_chan_open_ack_execute(
        &mut self,
        port_id: &PortId,
        channel_id: &ChannelId,
        _counterparty_version: &Version,
    ) -> Result<ModuleExtras, ChannelError> {
        self.record(ModuleCall::ChanOpenAck {
            port_id: port_id.clone(),
            channel_id: channel_id.clone(),
        });
        Ok(ModuleExtras::empty())
    }

    fn on_chan_open_confirm_execute(
        &mut self,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<ModuleExtras, ChannelError> {
        self.record(ModuleCall::ChanOpenConfirm {
            port_id: port_id.clone(),
            channel_id: channel_id.clone(),
        });
        Ok(ModuleExtras::empty())
    }

    fn on_recv_packet_execute(
        &mut self,
        packet: &Packet,
        _relayer: &Signer,
    ) -> (ModuleExtras, Acknowledgement) {
        self.record(ModuleCall::RecvPacket(packet.clone()));

        let extras = ModuleExtras {
            events: Vec::new(),
            log: vec![format!("mock module received packet {}", packet.seq_on_a)],
        };
        let ack = Acknowledgement::try_from(MOCK_ACK.to_vec()).expect("Never fails");

        (extras, ack)
    }

    fn on_acknowledgement_packet_validate(
        &self,
        _packet: &Packet,
        _acknowledgement: &Acknowledgement,
        _relayer: &Signer,
    ) -> Result<(), PacketError> {
        Ok(())
    }

    fn on_acknowledgement_packet_execute(
        &mut self,
        packet: &Packet,
        acknowledgement: &Acknowledgement,
        _relayer: &Signer,
    ) -> (ModuleExtras, Result<(), PacketError>) {
        self.record(ModuleCall::AcknowledgePacket {
            packet: packet.clone(),
            acknowledgement: acknowledgement.clone(),
        });
        (ModuleExtras::empty(), Ok(()))
    }

    fn on_timeout_packet_validate(
        &self,
        _packet: &Packet,
        _relayer: &Signer,
    ) -> Result<(), PacketError> {
        Ok(())
    }

    fn on_timeout_packet_execute(
        &mut self,
        packet: &Packet,
        _relayer: &Signer,
    ) -> (ModuleExtras, Result<(), PacketError>) {
        self.record(ModuleCall::TimeoutPacket(packet.clone()));
        (ModuleExtras::empty(), Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use ibc::core::channel::types::channel::Counterparty;
    use ibc::core::host::types::error::ErrorKind;
    use ibc::core::host::types::identifiers::ConnectionId;

    use super::*;

    #[test]
    fn rejecting_module_refuses_the_ordering() {
        let module = MockModule::rejecting(Order::Ordered);
        let counterparty = Counterparty::new(PortId::transfer(), None);
        let (conn_id, port_id, channel_id) =
            (ConnectionId::new(0), PortId::transfer(), ChannelId::new(0));
        let opening = |ordering| ChannelOpening {
            ordering,
            conn_id: &conn_id,
            port_id: &port_id,
            channel_id: &channel_id,
            counterparty: &counterparty,
        };

        let err = module
            .on_chan_open_init_validate(opening(Order::Ordered), &Version::empty())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ApplicationRejected);

        let version = module
            .on_chan_open_init_validate(opening(Order::Unordered), &Version::empty())
            .unwrap();
        assert_eq!(version.as_str(), MOCK_VERSION);
    }

    #[test]
    fn clones_share_the_call_log() {
        let module = MockModule::new();
        let mut routed = module.clone();

        routed
            .on_chan_open_confirm_execute(&PortId::transfer(), &ChannelId::new(3))
            .unwrap();

        assert_eq!(
            module.calls(),
            vec![ModuleCall::ChanOpenConfirm {
                port_id: PortId::transfer(),
                channel_id: ChannelId::new(3),
            }]
        );
    }
}
