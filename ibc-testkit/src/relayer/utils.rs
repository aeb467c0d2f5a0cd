use core::time::Duration;

use ibc::core::channel::types::acknowledgement::Acknowledgement;
use ibc::core::channel::types::channel::{ChannelEnd, Order};
use ibc::core::channel::types::events::{ChannelEventKind, PacketEvent, PacketEventKind};
use ibc::core::channel::types::msgs::{
    ChannelMsg, MsgAcknowledgement, MsgChannelOpenAck, MsgChannelOpenConfirm, MsgChannelOpenInit,
    MsgChannelOpenTry, MsgRecvPacket, MsgTimeout, PacketMsg,
};
use ibc::core::channel::types::packet::Packet;
use ibc::core::channel::types::Version as ChannelVersion;
use ibc::core::client::context::ClientValidationContext;
use ibc::core::client::types::events::ClientEventKind;
use ibc::core::client::types::msgs::{ClientMsg, MsgCreateClient, MsgUpdateClient};
use ibc::core::client::types::{ClientState, Height};
use ibc::core::commitment_types::commitment::CommitmentProofBytes;
use ibc::core::connection::types::events::ConnectionEventKind;
use ibc::core::connection::types::msgs::{
    ConnectionMsg, MsgConnectionOpenAck, MsgConnectionOpenConfirm, MsgConnectionOpenInit,
    MsgConnectionOpenTry,
};
use ibc::core::connection::types::Counterparty as ConnectionCounterparty;
use ibc::core::handler::types::events::IbcEvent;
use ibc::core::handler::types::msgs::MsgEnvelope;
use ibc::core::host::types::identifiers::{ChannelId, ClientId, ConnectionId, PortId};
use ibc::core::host::types::path::{
    AckPath, ChannelEndPath, ClientConsensusStatePath, ClientStatePath, CommitmentPath,
    ConnectionPath, Path, ReceiptPath,
};
use ibc::core::host::{SequenceCounter, ValidationContext};
use ibc::primitives::Signer;
use ibc_query::core::context::ProvableContext;
use tracing::debug;

use super::error::RelayerError;
use crate::context::MockContext;
use crate::testapp::ibc::clients::mock::client_state::MockClientConfig;

/// Proof of a value in a host's latest committed state.
struct Proven {
    proof: CommitmentProofBytes,
    height: Height,
}

impl Proven {
    fn at_latest(ctx: &MockContext, path: impl Into<Path>) -> Result<Self, RelayerError> {
        let height = ctx.latest_height();
        let proof = ctx
            .ibc_store()
            .get_proof(height, &path.into())
            .and_then(|bytes| CommitmentProofBytes::try_from(bytes).ok())
            .ok_or(RelayerError::MissingProof { height })?;

        Ok(Self { proof, height })
    }
}

/// A host's client of its counterparty, with proofs of its state and of
/// its latest consensus state. Carried by connection Try and Ack.
struct TrackedClient {
    client_state: ClientState,
    consensus_height: Height,
    proof_client_state: CommitmentProofBytes,
    proof_consensus_state: CommitmentProofBytes,
}

impl TrackedClient {
    fn load(ctx: &MockContext, client_id: &ClientId) -> Result<Self, RelayerError> {
        let client_state = client_state(ctx, client_id)?;
        let consensus_height = client_state.latest_height();

        let proof_client_state = Proven::at_latest(ctx, ClientStatePath::new(client_id.clone()))?;
        let proof_consensus_state = Proven::at_latest(
            ctx,
            ClientConsensusStatePath::new(
                client_id.clone(),
                consensus_height.revision_number(),
                consensus_height.revision_height(),
            ),
        )?;

        Ok(Self {
            client_state,
            consensus_height,
            proof_client_state: proof_client_state.proof,
            proof_consensus_state: proof_consensus_state.proof,
        })
    }
}

fn client_state(ctx: &MockContext, client_id: &ClientId) -> Result<ClientState, RelayerError> {
    ctx.ibc_store()
        .client_state(client_id)
        .map_err(|_| RelayerError::ClientStateNotFound {
            client_id: client_id.clone(),
        })
}

fn channel_end(
    ctx: &MockContext,
    port_id: &PortId,
    chan_id: &ChannelId,
) -> Result<ChannelEnd, RelayerError> {
    ctx.ibc_store()
        .channel_end(&ChannelEndPath::new(port_id, chan_id))
        .map_err(RelayerError::TransactionFailed)
}

fn missing(kind: &str) -> RelayerError {
    RelayerError::MissingEvent {
        expected: kind.to_string(),
    }
}

fn client_event(events: Vec<IbcEvent>, kind: ClientEventKind) -> Result<ClientId, RelayerError> {
    events
        .into_iter()
        .find_map(|event| match event {
            IbcEvent::Client(e) if e.kind == kind => Some(e.client_id),
            _ => None,
        })
        .ok_or_else(|| missing(kind.as_str()))
}

fn connection_event(
    events: Vec<IbcEvent>,
    kind: ConnectionEventKind,
) -> Result<ConnectionId, RelayerError> {
    events
        .into_iter()
        .find_map(|event| match event {
            IbcEvent::Connection(e) if e.kind == kind => Some(e.connection_id),
            _ => None,
        })
        .ok_or_else(|| missing(kind.as_str()))
}

fn channel_event(events: Vec<IbcEvent>, kind: ChannelEventKind) -> Result<ChannelId, RelayerError> {
    events
        .into_iter()
        .find_map(|event| match event {
            IbcEvent::Channel(e) if e.kind == kind => Some(e.channel_id),
            _ => None,
        })
        .ok_or_else(|| missing(kind.as_str()))
}

fn packet_event(events: Vec<IbcEvent>, kind: PacketEventKind) -> Result<PacketEvent, RelayerError> {
    events
        .into_iter()
        .find_map(|event| match event {
            IbcEvent::Packet(e) if e.kind == kind => Some(e),
            _ => None,
        })
        .ok_or_else(|| missing(kind.as_str()))
}

/// Builds and delivers the datagrams a relayer submits between two
/// [`MockContext`]s.
///
/// Every step is written in one direction, from `A` to `B`, so that
/// argument names match the message fields; swap the contexts for the
/// other direction. Steps carrying a proof take it at the source's latest
/// height and expect the destination's client to track that height
/// already. The `create_*` steps sync clients in between themselves.
#[derive(Debug, Default)]
pub struct RelayerOps;

impl RelayerOps {
    /// Creates a client of `B` on `A` and returns its identifier.
    pub fn create_client_on_a(
        ctx_a: &mut MockContext,
        ctx_b: &MockContext,
        signer: Signer,
    ) -> Result<ClientId, RelayerError> {
        let (client_state, consensus_state) = MockClientConfig::builder()
            .latest_header(ctx_b.latest_header())
            .build()
            .into_states();

        let events = ctx_a.deliver(MsgEnvelope::Client(ClientMsg::CreateClient(
            MsgCreateClient::new(client_state, consensus_state, signer),
        )))?;

        client_event(events, ClientEventKind::Created)
    }

    /// Feeds `B`'s latest header to the client on `A`.
    pub fn update_client_on_a(
        ctx_a: &mut MockContext,
        ctx_b: &MockContext,
        client_id_on_a: ClientId,
        signer: Signer,
    ) -> Result<(), RelayerError> {
        let destination_height = client_state(ctx_a, &client_id_on_a)?.latest_height();
        let source_height = ctx_b.latest_height();

        if destination_height == source_height {
            return Err(RelayerError::ClientAlreadyUpToDate {
                client_id: client_id_on_a,
                source_height,
                destination_height,
            });
        }
        if destination_height > source_height {
            return Err(RelayerError::ClientAtHigherHeight {
                client_id: client_id_on_a,
                source_height,
                destination_height,
            });
        }

        let events = ctx_a.deliver(MsgEnvelope::Client(ClientMsg::UpdateClient(
            MsgUpdateClient {
                client_id: client_id_on_a,
                client_message: ctx_b.latest_header().into(),
                signer,
            },
        )))?;

        client_event(events, ClientEventKind::Updated).map(drop)
    }

    /// Same as [`Self::update_client_on_a`], but a client already at `B`'s
    /// latest height is left alone.
    pub fn sync_client_on_a(
        ctx_a: &mut MockContext,
        ctx_b: &MockContext,
        client_id_on_a: ClientId,
        signer: Signer,
    ) -> Result<(), RelayerError> {
        match Self::update_client_on_a(ctx_a, ctx_b, client_id_on_a, signer) {
            Err(RelayerError::ClientAlreadyUpToDate { client_id, .. }) => {
                debug!(%client_id, "client already up to date");
                Ok(())
            }
            result => result,
        }
    }

    /// Opens a connection end on `A` in INIT. Packets on it will wait
    /// `delay_period` after the client update carrying their proof.
    pub fn connection_open_init_on_a(
        ctx_a: &mut MockContext,
        ctx_b: &MockContext,
        client_id_on_a: ClientId,
        client_id_on_b: ClientId,
        delay_period: Duration,
        signer: Signer,
    ) -> Result<ConnectionId, RelayerError> {
        let msg = MsgConnectionOpenInit {
            client_id_on_a,
            counterparty: ConnectionCounterparty::new(
                client_id_on_b,
                None,
                ctx_b.ibc_store().commitment_prefix(),
            ),
            version: None,
            delay_period,
            signer,
        };
        let events = ctx_a.deliver(MsgEnvelope::Connection(ConnectionMsg::OpenInit(msg)))?;

        connection_event(events, ConnectionEventKind::OpenInit)
    }

    /// Answers `A`'s INIT end on `B`, offering the versions and delay period
    /// `A` stored.
    pub fn connection_open_try_on_b(
        ctx_b: &mut MockContext,
        ctx_a: &MockContext,
        conn_id_on_a: ConnectionId,
        client_id_on_a: ClientId,
        client_id_on_b: ClientId,
        signer: Signer,
    ) -> Result<ConnectionId, RelayerError> {
        let init_end_on_a = ctx_a
            .ibc_store()
            .connection_end(&conn_id_on_a)
            .map_err(RelayerError::TransactionFailed)?;
        let tracked = TrackedClient::load(ctx_a, &client_id_on_a)?;
        let proven = Proven::at_latest(ctx_a, ConnectionPath::new(&conn_id_on_a))?;

        let msg = MsgConnectionOpenTry {
            client_id_on_b,
            client_state_of_b_on_a: tracked.client_state.into(),
            counterparty: ConnectionCounterparty::new(
                client_id_on_a,
                Some(conn_id_on_a),
                ctx_a.ibc_store().commitment_prefix(),
            ),
            versions_on_a: init_end_on_a.versions().to_vec(),
            proof_conn_end_on_a: proven.proof,
            proof_client_state_of_b_on_a: tracked.proof_client_state,
            proof_consensus_state_of_b_on_a: tracked.proof_consensus_state,
            proofs_height_on_a: proven.height,
            consensus_height_of_b_on_a: tracked.consensus_height,
            delay_period: init_end_on_a.delay_period(),
            signer,
        };
        let events = ctx_b.deliver(MsgEnvelope::Connection(ConnectionMsg::OpenTry(msg)))?;

        connection_event(events, ConnectionEventKind::OpenTry)
    }

    /// Opens `A`'s end once `B` holds a TRYOPEN answer, accepting the
    /// version `B` settled on.
    pub fn connection_open_ack_on_a(
        ctx_a: &mut MockContext,
        ctx_b: &MockContext,
        conn_id_on_a: ConnectionId,
        conn_id_on_b: ConnectionId,
        client_id_on_b: ClientId,
        signer: Signer,
    ) -> Result<(), RelayerError> {
        let version = ctx_b
            .ibc_store()
            .connection_end(&conn_id_on_b)
            .map_err(RelayerError::TransactionFailed)?
            .version()
            .map_err(RelayerError::Connection)?
            .clone();
        let tracked = TrackedClient::load(ctx_b, &client_id_on_b)?;
        let proven = Proven::at_latest(ctx_b, ConnectionPath::new(&conn_id_on_b))?;

        let msg = MsgConnectionOpenAck {
            conn_id_on_a,
            conn_id_on_b,
            client_state_of_a_on_b: tracked.client_state.into(),
            proof_conn_end_on_b: proven.proof,
            proof_client_state_of_a_on_b: tracked.proof_client_state,
            proof_consensus_state_of_a_on_b: tracked.proof_consensus_state,
            proofs_height_on_b: proven.height,
            consensus_height_of_a_on_b: tracked.consensus_height,
            version,
            signer,
        };
        let events = ctx_a.deliver(MsgEnvelope::Connection(ConnectionMsg::OpenAck(msg)))?;

        connection_event(events, ConnectionEventKind::OpenAck).map(drop)
    }

    /// Opens `B`'s TRYOPEN end once `A`'s end is OPEN.
    pub fn connection_open_confirm_on_b(
        ctx_b: &mut MockContext,
        ctx_a: &MockContext,
        conn_id_on_a: ConnectionId,
        conn_id_on_b: ConnectionId,
        signer: Signer,
    ) -> Result<(), RelayerError> {
        let proven = Proven::at_latest(ctx_a, ConnectionPath::new(&conn_id_on_a))?;

        let msg = MsgConnectionOpenConfirm {
            conn_id_on_b,
            proof_conn_end_on_a: proven.proof,
            proof_height_on_a: proven.height,
            signer,
        };
        let events = ctx_b.deliver(MsgEnvelope::Connection(ConnectionMsg::OpenConfirm(msg)))?;

        connection_event(events, ConnectionEventKind::OpenConfirm).map(drop)
    }

    /// Runs the four connection handshake steps from `A`, syncing the
    /// destination's client before each proof is checked.
    /// Returns the connection identifiers on `A` and `B`.
    pub fn create_connection_on_a(
        ctx_a: &mut MockContext,
        ctx_b: &mut MockContext,
        client_id_on_a: ClientId,
        client_id_on_b: ClientId,
        delay_period: Duration,
        signer: Signer,
    ) -> Result<(ConnectionId, ConnectionId), RelayerError> {
        let conn_id_on_a = Self::connection_open_init_on_a(
            ctx_a,
            ctx_b,
            client_id_on_a.clone(),
            client_id_on_b.clone(),
            delay_period,
            signer.clone(),
        )?;

        Self::sync_client_on_a(ctx_b, ctx_a, client_id_on_b.clone(), signer.clone())?;
        let conn_id_on_b = Self::connection_open_try_on_b(
            ctx_b,
            ctx_a,
            conn_id_on_a.clone(),
            client_id_on_a.clone(),
            client_id_on_b.clone(),
            signer.clone(),
        )?;

        Self::sync_client_on_a(ctx_a, ctx_b, client_id_on_a.clone(), signer.clone())?;
        Self::connection_open_ack_on_a(
            ctx_a,
            ctx_b,
            conn_id_on_a.clone(),
            conn_id_on_b.clone(),
            client_id_on_b.clone(),
            signer.clone(),
        )?;

        Self::sync_client_on_a(ctx_b, ctx_a, client_id_on_b, signer.clone())?;
        Self::connection_open_confirm_on_b(
            ctx_b,
            ctx_a,
            conn_id_on_a.clone(),
            conn_id_on_b.clone(),
            signer.clone(),
        )?;

        Self::sync_client_on_a(ctx_a, ctx_b, client_id_on_a, signer)?;

        Ok((conn_id_on_a, conn_id_on_b))
    }

    /// Opens a channel end on `A` in INIT, leaving the version to the
    /// module bound to `port_id_on_a`.
    pub fn channel_open_init_on_a(
        ctx_a: &mut MockContext,
        conn_id_on_a: ConnectionId,
        port_id_on_a: PortId,
        port_id_on_b: PortId,
        ordering: Order,
        signer: Signer,
    ) -> Result<ChannelId, RelayerError> {
        let msg = MsgChannelOpenInit {
            port_id_on_a,
            conn_id_on_a,
            port_id_on_b,
            ordering,
            signer,
            version_proposal: ChannelVersion::empty(),
        };
        let events = ctx_a.deliver(MsgEnvelope::Channel(ChannelMsg::OpenInit(msg)))?;

        channel_event(events, ChannelEventKind::OpenInit)
    }

    /// Answers `A`'s INIT end on `B` with the ordering and version `A`
    /// stored.
    pub fn channel_open_try_on_b(
        ctx_b: &mut MockContext,
        ctx_a: &MockContext,
        conn_id_on_b: ConnectionId,
        chan_id_on_a: ChannelId,
        port_id_on_a: PortId,
        port_id_on_b: PortId,
        signer: Signer,
    ) -> Result<ChannelId, RelayerError> {
        let init_end_on_a = channel_end(ctx_a, &port_id_on_a, &chan_id_on_a)?;
        let proven = Proven::at_latest(ctx_a, ChannelEndPath::new(&port_id_on_a, &chan_id_on_a))?;

        let msg = MsgChannelOpenTry {
            port_id_on_b,
            conn_id_on_b,
            port_id_on_a,
            chan_id_on_a,
            version_supported_on_a: init_end_on_a.version().clone(),
            proof_chan_end_on_a: proven.proof,
            proof_height_on_a: proven.height,
            ordering: init_end_on_a.ordering(),
            signer,
        };
        let events = ctx_b.deliver(MsgEnvelope::Channel(ChannelMsg::OpenTry(msg)))?;

        channel_event(events, ChannelEventKind::OpenTry)
    }

    /// Opens `A`'s end once `B` holds a TRYOPEN answer.
    pub fn channel_open_ack_on_a(
        ctx_a: &mut MockContext,
        ctx_b: &MockContext,
        chan_id_on_a: ChannelId,
        port_id_on_a: PortId,
        chan_id_on_b: ChannelId,
        port_id_on_b: PortId,
        signer: Signer,
    ) -> Result<(), RelayerError> {
        let version_on_b = channel_end(ctx_b, &port_id_on_b, &chan_id_on_b)?
            .version()
            .clone();
        let proven = Proven::at_latest(ctx_b, ChannelEndPath::new(&port_id_on_b, &chan_id_on_b))?;

        let msg = MsgChannelOpenAck {
            port_id_on_a,
            chan_id_on_a,
            chan_id_on_b,
            version_on_b,
            proof_chan_end_on_b: proven.proof,
            proof_height_on_b: proven.height,
            signer,
        };
        let events = ctx_a.deliver(MsgEnvelope::Channel(ChannelMsg::OpenAck(msg)))?;

        channel_event(events, ChannelEventKind::OpenAck).map(drop)
    }

    /// Opens `B`'s TRYOPEN end once `A`'s end is OPEN.
    pub fn channel_open_confirm_on_b(
        ctx_b: &mut MockContext,
        ctx_a: &MockContext,
        chan_id_on_a: ChannelId,
        chan_id_on_b: ChannelId,
        port_id_on_a: PortId,
        port_id_on_b: PortId,
        signer: Signer,
    ) -> Result<(), RelayerError> {
        let proven = Proven::at_latest(ctx_a, ChannelEndPath::new(&port_id_on_a, &chan_id_on_a))?;

        let msg = MsgChannelOpenConfirm {
            port_id_on_b,
            chan_id_on_b,
            proof_chan_end_on_a: proven.proof,
            proof_height_on_a: proven.height,
            signer,
        };
        let events = ctx_b.deliver(MsgEnvelope::Channel(ChannelMsg::OpenConfirm(msg)))?;

        channel_event(events, ChannelEventKind::OpenConfirm).map(drop)
    }

    /// Runs the four channel handshake steps from `A` over an open
    /// connection. Returns the channel identifiers on `A` and `B`.
    #[allow(clippy::too_many_arguments)]
    pub fn create_channel_on_a(
        ctx_a: &mut MockContext,
        ctx_b: &mut MockContext,
        client_id_on_a: ClientId,
        conn_id_on_a: ConnectionId,
        port_id_on_a: PortId,
        client_id_on_b: ClientId,
        conn_id_on_b: ConnectionId,
        port_id_on_b: PortId,
        ordering: Order,
        signer: Signer,
    ) -> Result<(ChannelId, ChannelId), RelayerError> {
        let chan_id_on_a = Self::channel_open_init_on_a(
            ctx_a,
            conn_id_on_a,
            port_id_on_a.clone(),
            port_id_on_b.clone(),
            ordering,
            signer.clone(),
        )?;

        Self::sync_client_on_a(ctx_b, ctx_a, client_id_on_b.clone(), signer.clone())?;
        let chan_id_on_b = Self::channel_open_try_on_b(
            ctx_b,
            ctx_a,
            conn_id_on_b,
            chan_id_on_a.clone(),
            port_id_on_a.clone(),
            port_id_on_b.clone(),
            signer.clone(),
        )?;

        Self::sync_client_on_a(ctx_a, ctx_b, client_id_on_a.clone(), signer.clone())?;
        Self::channel_open_ack_on_a(
            ctx_a,
            ctx_b,
            chan_id_on_a.clone(),
            port_id_on_a.clone(),
            chan_id_on_b.clone(),
            port_id_on_b.clone(),
            signer.clone(),
        )?;

        Self::sync_client_on_a(ctx_b, ctx_a, client_id_on_b, signer.clone())?;
        Self::channel_open_confirm_on_b(
            ctx_b,
            ctx_a,
            chan_id_on_a.clone(),
            chan_id_on_b.clone(),
            port_id_on_a,
            port_id_on_b,
            signer.clone(),
        )?;

        Self::sync_client_on_a(ctx_a, ctx_b, client_id_on_a, signer)?;

        Ok((chan_id_on_a, chan_id_on_b))
    }

    /// Delivers a packet committed on `A` to `B` and returns the
    /// acknowledgement `B` wrote.
    pub fn packet_recv_on_b(
        ctx_b: &mut MockContext,
        ctx_a: &MockContext,
        packet: Packet,
        signer: Signer,
    ) -> Result<Acknowledgement, RelayerError> {
        let proven = Proven::at_latest(
            ctx_a,
            CommitmentPath::new(&packet.port_id_on_a, &packet.chan_id_on_a, packet.seq_on_a),
        )?;

        let msg = MsgRecvPacket {
            packet,
            proof_commitment_on_a: proven.proof,
            proof_height_on_a: proven.height,
            signer,
        };
        let events = ctx_b.deliver(MsgEnvelope::Packet(PacketMsg::Recv(msg)))?;

        packet_event(events, PacketEventKind::WriteAcknowledgement)?
            .acknowledgement
            .ok_or_else(|| missing(PacketEventKind::WriteAcknowledgement.as_str()))
    }

    /// Hands `B`'s `acknowledgement` of `packet` back to `A`.
    pub fn packet_ack_on_a(
        ctx_a: &mut MockContext,
        ctx_b: &MockContext,
        packet: Packet,
        acknowledgement: Acknowledgement,
        signer: Signer,
    ) -> Result<(), RelayerError> {
        let proven = Proven::at_latest(
            ctx_b,
            AckPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a),
        )?;

        let msg = MsgAcknowledgement {
            packet,
            acknowledgement,
            proof_acked_on_b: proven.proof,
            proof_height_on_b: proven.height,
            signer,
        };
        let events = ctx_a.deliver(MsgEnvelope::Packet(PacketMsg::Ack(msg)))?;

        packet_event(events, PacketEventKind::Acknowledge).map(drop)
    }

    /// Proves to `A` that `B` never received `packet`. The client on `A`
    /// must already track a height of `B` past the packet's timeout.
    pub fn packet_timeout_on_a(
        ctx_a: &mut MockContext,
        ctx_b: &MockContext,
        packet: Packet,
        signer: Signer,
    ) -> Result<(), RelayerError> {
        let next_seq_recv_on_b = ctx_b
            .ibc_store()
            .packet_sequence(SequenceCounter::Recv, &packet.port_id_on_b, &packet.chan_id_on_b)
            .map_err(RelayerError::TransactionFailed)?;
        let proven = Proven::at_latest(
            ctx_b,
            ReceiptPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a),
        )?;

        let msg = MsgTimeout {
            packet,
            next_seq_recv_on_b,
            proof_unreceived_on_b: proven.proof,
            proof_height_on_b: proven.height,
            signer,
        };
        let events = ctx_a.deliver(MsgEnvelope::Packet(PacketMsg::Timeout(msg)))?;

        packet_event(events, PacketEventKind::Timeout).map(drop)
    }
}
