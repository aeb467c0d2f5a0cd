//! The callback interface every IBC application implements.

use std::fmt::Debug;

use ibc_core_channel_types::acknowledgement::Acknowledgement;
use ibc_core_channel_types::channel::{Counterparty, Order};
use ibc_core_channel_types::error::{ChannelError, PacketError};
use ibc_core_channel_types::packet::Packet;
use ibc_core_channel_types::Version;
use ibc_core_host_types::identifiers::{ChannelId, ConnectionId, PortId};
use ibc_core_router_types::module::ModuleExtras;
use ibc_primitives::Signer;

/// The local channel end a handshake step is about to create, as shown to
/// the module owning its port.
#[derive(Clone, Copy, Debug)]
pub struct ChannelOpening<'a> {
    pub ordering: Order,
    pub conn_id: &'a ConnectionId,
    pub port_id: &'a PortId,
    pub channel_id: &'a ChannelId,
    pub counterparty: &'a Counterparty,
}

/// Callbacks the channel and packet handlers invoke on the module bound to
/// a port.
///
/// Every step comes in two halves. `*_validate` runs during validation and
/// must not mutate anything; returning an error vetoes the step. `*_execute`
/// runs once the step is committed to and returns the events and logs the
/// module wants emitted.
pub trait Module: Debug {
    /// Returns the version the new INIT end will carry, given the one the
    /// relayer proposed (possibly empty).
    fn on_chan_open_init_validate(
        &self,
        opening: ChannelOpening<'_>,
        proposed_version: &Version,
    ) -> Result<Version, ChannelError>;

    fn on_chan_open_init_execute(
        &mut self,
        opening: ChannelOpening<'_>,
        proposed_version: &Version,
    ) -> Result<(ModuleExtras, Version), ChannelError>;

    /// Returns the version the new TRYOPEN end will carry, given the one
    /// the counterparty's INIT end proposed.
    fn on_chan_open_try_validate(
        &self,
        opening: ChannelOpening<'_>,
        counterparty_version: &Version,
    ) -> Result<Version, ChannelError>;

    fn on_chan_open_try_execute(
        &mut self,
        opening: ChannelOpening<'_>,
        counterparty_version: &Version,
    ) -> Result<(ModuleExtras, Version), ChannelError>;

    fn on_chan_open_ack_validate(
        &self,
        _port_id: &PortId,
        _channel_id: &ChannelId,
        _counterparty_version: &Version,
    ) -> Result<(), ChannelError> {
        Ok(())
    }

    fn on_chan_open_ack_execute(
        &mut self,
        _port_id: &PortId,
        _channel_id: &ChannelId,
        _counterparty_version: &Version,
    ) -> Result<ModuleExtras, ChannelError> {
        Ok(ModuleExtras::empty())
    }

    fn on_chan_open_confirm_validate(
        &self,
        _port_id: &PortId,
        _channel_id: &ChannelId,
    ) -> Result<(), ChannelError> {
        Ok(())
    }

    fn on_chan_open_confirm_execute(
        &mut self,
        _port_id: &PortId,
        _channel_id: &ChannelId,
    ) -> Result<ModuleExtras, ChannelError> {
        Ok(ModuleExtras::empty())
    }

    // There is no `on_recv_packet_validate`: receiving always succeeds at
    // the core level, a module that rejects the packet writes an error
    // acknowledgement instead.

    fn on_recv_packet_execute(
        &mut self,
        packet: &Packet,
        relayer: &Signer,
    ) -> (ModuleExtras, Acknowledgement);

    fn on_acknowledgement_packet_validate(
        &self,
        packet: &Packet,
        acknowledgement: &Acknowledgement,
        relayer: &Signer,
    ) -> Result<(), PacketError>;

    fn on_acknowledgement_packet_execute(
        &mut self,
        packet: &Packet,
        acknowledgement: &Acknowledgement,
        relayer: &Signer,
    ) -> (ModuleExtras, Result<(), PacketError>);

    fn on_timeout_packet_validate(
        &self,
        packet: &Packet,
        relayer: &Signer,
    ) -> Result<(), PacketError>;

    fn on_timeout_packet_execute(
        &mut self,
        packet: &Packet,
        relayer: &Signer,
    ) -> (ModuleExtras, Result<(), PacketError>);
}
