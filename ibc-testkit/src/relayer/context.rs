use core::time::Duration;

use ibc::core::channel::types::acknowledgement::Acknowledgement;
use ibc::core::channel::types::channel::Order;
use ibc::core::channel::types::packet::Packet;
use ibc::core::host::types::identifiers::{ChannelId, ClientId, ConnectionId, PortId};
use ibc::core::host::types::path::ChannelEndPath;
use ibc::core::host::ValidationContext;
use ibc::primitives::Signer;

use crate::context::MockContext;
use crate::relayer::error::RelayerError;
use crate::relayer::utils::RelayerOps;

/// Two hosts and a relayer between them.
#[derive(Debug)]
pub struct RelayerContext {
    ctx_a: MockContext,
    ctx_b: MockContext,
}

impl RelayerContext {
    pub fn new(ctx_a: MockContext, ctx_b: MockContext) -> Self {
        Self { ctx_a, ctx_b }
    }

    pub fn get_ctx_a(&self) -> &MockContext {
        &self.ctx_a
    }

    pub fn get_ctx_b(&self) -> &MockContext {
        &self.ctx_b
    }

    pub fn get_ctx_a_mut(&mut self) -> &mut MockContext {
        &mut self.ctx_a
    }

    pub fn get_ctx_b_mut(&mut self) -> &mut MockContext {
        &mut self.ctx_b
    }

    /// Both hosts, for driving [`RelayerOps`] steps one at a time.
    pub fn hosts_mut(&mut self) -> (&mut MockContext, &mut MockContext) {
        (&mut self.ctx_a, &mut self.ctx_b)
    }

    pub fn create_client_on_a(&mut self, signer: Signer) -> Result<ClientId, RelayerError> {
        RelayerOps::create_client_on_a(&mut self.ctx_a, &self.ctx_b, signer)
    }

    pub fn create_client_on_b(&mut self, signer: Signer) -> Result<ClientId, RelayerError> {
        RelayerOps::create_client_on_a(&mut self.ctx_b, &self.ctx_a, signer)
    }

    pub fn update_client_on_a(
        &mut self,
        client_id_on_a: ClientId,
        signer: Signer,
    ) -> Result<(), RelayerError> {
        RelayerOps::update_client_on_a(&mut self.ctx_a, &self.ctx_b, client_id_on_a, signer)
    }

    pub fn update_client_on_b(
        &mut self,
        client_id_on_b: ClientId,
        signer: Signer,
    ) -> Result<(), RelayerError> {
        RelayerOps::update_client_on_a(&mut self.ctx_b, &self.ctx_a, client_id_on_b, signer)
    }

    /// Runs the connection handshake from `A`, with packets on the new
    /// connection waiting `delay_period` after the client update carrying
    /// their proof.
    pub fn create_connection_on_a(
        &mut self,
        client_id_on_a: ClientId,
        client_id_on_b: ClientId,
        delay_period: Duration,
        signer: Signer,
    ) -> Result<(ConnectionId, ConnectionId), RelayerError> {
        RelayerOps::create_connection_on_a(
            &mut self.ctx_a,
            &mut self.ctx_b,
            client_id_on_a,
            client_id_on_b,
            delay_period,
            signer,
        )
    }

    /// Opens a channel from `port_id_on_a` to `port_id_on_b` over an open
    /// connection. Returns the channel identifiers of `A` and `B`.
    pub fn create_channel_on_a(
        &mut self,
        conn_id_on_a: ConnectionId,
        port_id_on_a: PortId,
        conn_id_on_b: ConnectionId,
        port_id_on_b: PortId,
        ordering: Order,
        signer: Signer,
    ) -> Result<(ChannelId, ChannelId), RelayerError> {
        let client_id_on_a = Self::client_of_connection(&self.ctx_a, &conn_id_on_a)?;
        let client_id_on_b = Self::client_of_connection(&self.ctx_b, &conn_id_on_b)?;

        RelayerOps::create_channel_on_a(
            &mut self.ctx_a,
            &mut self.ctx_b,
            client_id_on_a,
            conn_id_on_a,
            port_id_on_a,
            client_id_on_b,
            conn_id_on_b,
            port_id_on_b,
            ordering,
            signer,
        )
    }

    /// Commits `packet` on `A` and relays it to `B`, then relays the
    /// acknowledgement back. Returns the acknowledgement.
    pub fn send_packet_on_a(
        &mut self,
        packet: Packet,
        signer: Signer,
    ) -> Result<Acknowledgement, RelayerError> {
        self.ctx_a
            .send_packet(packet.clone())
            .map_err(RelayerError::TransactionFailed)?;

        self.relay_packet_on_a(packet, signer)
    }

    /// Relays a packet already committed on `A` to `B`, then relays the
    /// acknowledgement back. Returns the acknowledgement.
    pub fn relay_packet_on_a(
        &mut self,
        packet: Packet,
        signer: Signer,
    ) -> Result<Acknowledgement, RelayerError> {
        Self::relay_packet(&mut self.ctx_a, &mut self.ctx_b, packet, signer)
    }

    /// Relays a packet already committed on `B` to `A`, then relays the
    /// acknowledgement back. Returns the acknowledgement.
    pub fn relay_packet_on_b(
        &mut self,
        packet: Packet,
        signer: Signer,
    ) -> Result<Acknowledgement, RelayerError> {
        Self::relay_packet(&mut self.ctx_b, &mut self.ctx_a, packet, signer)
    }

    /// Lets `B` run past the timeout of a packet committed on `A`, then
    /// proves to `A` that it was never received.
    pub fn timeout_packet_on_a(
        &mut self,
        packet: Packet,
        signer: Signer,
    ) -> Result<(), RelayerError> {
        Self::timeout_packet(&mut self.ctx_a, &mut self.ctx_b, packet, signer)
    }

    /// Lets `A` run past the timeout of a packet committed on `B`, then
    /// proves to `B` that it was never received.
    pub fn timeout_packet_on_b(
        &mut self,
        packet: Packet,
        signer: Signer,
    ) -> Result<(), RelayerError> {
        Self::timeout_packet(&mut self.ctx_b, &mut self.ctx_a, packet, signer)
    }

    fn client_of_connection(
        ctx: &MockContext,
        conn_id: &ConnectionId,
    ) -> Result<ClientId, RelayerError> {
        Ok(ctx
            .ibc_store()
            .connection_end(conn_id)
            .map_err(RelayerError::TransactionFailed)?
            .client_id()
            .clone())
    }

    fn client_of_channel(
        ctx: &MockContext,
        port_id: &PortId,
        chan_id: &ChannelId,
    ) -> Result<ClientId, RelayerError> {
        let chan_end = ctx
            .ibc_store()
            .channel_end(&ChannelEndPath::new(port_id, chan_id))
            .map_err(RelayerError::TransactionFailed)?;

        Self::client_of_connection(ctx, chan_end.connection_id())
    }

    fn clients_of_packet(
        ctx_a: &MockContext,
        ctx_b: &MockContext,
        packet: &Packet,
    ) -> Result<(ClientId, ClientId), RelayerError> {
        let client_id_on_a =
            Self::client_of_channel(ctx_a, &packet.port_id_on_a, &packet.chan_id_on_a)?;
        let client_id_on_b =
            Self::client_of_channel(ctx_b, &packet.port_id_on_b, &packet.chan_id_on_b)?;

        Ok((client_id_on_a, client_id_on_b))
    }

    fn timeout_packet(
        ctx_a: &mut MockContext,
        ctx_b: &mut MockContext,
        packet: Packet,
        signer: Signer,
    ) -> Result<(), RelayerError> {
        let (client_id_on_a, _) = Self::clients_of_packet(ctx_a, ctx_b, &packet)?;

        while !packet.timed_out(&ctx_b.latest_timestamp(), ctx_b.latest_height()) {
            ctx_b.advance_block();
        }

        RelayerOps::sync_client_on_a(ctx_a, ctx_b, client_id_on_a, signer.clone())?;

        RelayerOps::packet_timeout_on_a(ctx_a, ctx_b, packet, signer)
    }

    fn relay_packet(
        ctx_a: &mut MockContext,
        ctx_b: &mut MockContext,
        packet: Packet,
        signer: Signer,
    ) -> Result<Acknowledgement, RelayerError> {
        let (client_id_on_a, client_id_on_b) = Self::clients_of_packet(ctx_a, ctx_b, &packet)?;

        RelayerOps::sync_client_on_a(ctx_b, ctx_a, client_id_on_b, signer.clone())?;

        let acknowledgement =
            RelayerOps::packet_recv_on_b(ctx_b, ctx_a, packet.clone(), signer.clone())?;

        RelayerOps::sync_client_on_a(ctx_a, ctx_b, client_id_on_a, signer.clone())?;

        RelayerOps::packet_ack_on_a(ctx_a, ctx_b, packet, acknowledgement.clone(), signer)?;

        Ok(acknowledgement)
    }
}
