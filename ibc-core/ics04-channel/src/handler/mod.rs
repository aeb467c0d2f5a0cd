use ibc_core_channel_types::channel::{ChannelEnd, Counterparty, Order, State};
use ibc_core_channel_types::commitment::{compute_packet_commitment, PacketCommitment};
use ibc_core_channel_types::error::{ChannelError, PacketError};
use ibc_core_channel_types::packet::Packet;
use ibc_core_channel_types::Version;
use ibc_core_client::context::ClientValidationContext;
use ibc_core_client::types::error::ClientError;
use ibc_core_client::types::Height;
use ibc_core_commitment_types::commitment::CommitmentProofBytes;
use ibc_core_connection::types::error::ConnectionError;
use ibc_core_connection::types::{ConnectionEnd, State as ConnectionState};
use ibc_core_handler_types::error::ContextError;
use ibc_core_handler_types::events::{IbcEvent, MessageEvent};
use ibc_core_host::types::error::ErrorKind;
use ibc_core_host::types::identifiers::{ChannelId, ConnectionId, PortId, Sequence};
use ibc_core_host::types::path::{ChannelEndPath, CommitmentPath, Path};
use ibc_core_host::{ExecutionContext, IdentifierCounter, SequenceCounter, ValidationContext};
use ibc_core_router::types::module::ModuleExtras;
use ibc_primitives::proto::Protobuf;

mod acknowledgement;
mod chan_open_ack;
mod chan_open_confirm;
mod chan_open_init;
mod chan_open_try;
mod recv_packet;
mod send_packet;
mod timeout;

pub use acknowledgement::*;
pub use chan_open_ack::*;
pub use chan_open_confirm::*;
pub use chan_open_init::*;
pub use chan_open_try::*;
pub use recv_packet::*;
pub use send_packet::*;
pub use timeout::*;

/// The channel end a proof is expected to show on the counterparty. Its
/// connection is always the counterparty of the local one.
pub(crate) struct ExpectedChannelEnd<'a> {
    pub port_id: &'a PortId,
    pub channel_id: &'a ChannelId,
    pub state: State,
    pub ordering: Order,
    pub counterparty: Counterparty,
    pub version: Version,
}

/// Checks `proof` for `path` on the chain at the other end of `conn_end`:
/// `value` must be committed there, or nothing at all when `value` is
/// `None`.
pub(crate) fn verify_on_counterparty<Ctx>(
    ctx: &Ctx,
    conn_end: &ConnectionEnd,
    proof_height: &Height,
    proof: &CommitmentProofBytes,
    path: Path,
    value: Option<Vec<u8>>,
) -> Result<(), ClientError>
where
    Ctx: ValidationContext,
{
    let clients = ctx.client_ctx();
    let client_id = conn_end.client_id();
    let prefix = conn_end.counterparty().prefix();

    match value {
        Some(value) => {
            clients.verify_client_membership(client_id, proof_height, prefix, proof, path, value)
        }
        None => clients.verify_client_non_membership(client_id, proof_height, prefix, proof, path),
    }
}

/// Proves the counterparty channel end described by `expected`.
///
/// When the proof fails but would hold under the opposite ordering, the
/// failure is reported as `OrderingMismatch`.
pub(crate) fn verify_counterparty_channel<Ctx>(
    ctx: &Ctx,
    conn_end: &ConnectionEnd,
    proof: &CommitmentProofBytes,
    proof_height: &Height,
    expected: ExpectedChannelEnd<'_>,
) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    let remote_conn_id = remote_connection_id(conn_end)?;
    let path = ChannelEndPath::new(expected.port_id, expected.channel_id);

    let prove = |ordering: Order| -> Result<(), ContextError> {
        let chan_end = ChannelEnd::new(
            expected.state,
            ordering,
            expected.counterparty.clone(),
            remote_conn_id.clone(),
            expected.version.clone(),
        )?;
        let value = Some(chan_end.encode_vec());

        verify_on_counterparty(ctx, conn_end, proof_height, proof, path.clone().into(), value)
            .map_err(|e| ChannelError::VerificationFailed(e).into())
    };

    let Err(err) = prove(expected.ordering) else {
        return Ok(());
    };

    match expected.ordering.opposite() {
        Some(actual) if prove(actual).is_ok() => Err(ChannelError::OrderingMismatch {
            expected: expected.ordering,
            actual,
        }
        .into()),
        _ => Err(err),
    }
}

fn remote_connection_id(conn_end: &ConnectionEnd) -> Result<ConnectionId, ChannelError> {
    conn_end
        .counterparty()
        .connection_id()
        .cloned()
        .ok_or(ChannelError::Connection(ConnectionError::MissingCounterparty))
}

/// Loads `conn_id` for a channel of the given `ordering`: the connection
/// must be OPEN, its client active and its negotiated version must list the
/// ordering among its features.
pub(crate) fn usable_connection<Ctx>(
    ctx: &Ctx,
    conn_id: &ConnectionId,
    ordering: Order,
) -> Result<ConnectionEnd, ContextError>
where
    Ctx: ValidationContext,
{
    let conn_end = ctx.connection_end(conn_id)?;
    conn_end
        .ensure_state(ConnectionState::Open)
        .map_err(ChannelError::Connection)?;

    ctx.client_ctx()
        .client_status(conn_end.client_id())?
        .verify_is_active()?;

    let feature = ordering.as_str().to_string();
    let supported = conn_end
        .versions()
        .first()
        .is_some_and(|v| v.verify_feature_supported(feature).is_ok());

    if !supported {
        return Err(ChannelError::UnsupportedOrdering {
            connection_id: conn_id.clone(),
            ordering,
        }
        .into());
    }

    Ok(conn_end)
}

/// Loads the end a later handshake step advances, which must still be in
/// `state`, together with its connection.
pub(crate) fn handshake_end<Ctx>(
    ctx: &Ctx,
    path: &ChannelEndPath,
    state: State,
) -> Result<(ChannelEnd, ConnectionEnd), ContextError>
where
    Ctx: ValidationContext,
{
    let chan_end = ctx.channel_end(path)?;
    chan_end.ensure_state(state)?;
    let conn_end = usable_connection(ctx, chan_end.connection_id(), chan_end.ordering())?;

    Ok((chan_end, conn_end))
}

/// Identifier the next INIT or TRYOPEN end is stored under.
pub(crate) fn next_channel_id<Ctx>(ctx: &Ctx) -> Result<ChannelId, ContextError>
where
    Ctx: ValidationContext,
{
    Ok(ChannelId::new(
        ctx.identifier_counter(IdentifierCounter::Channel)?,
    ))
}

/// Stores a freshly opened end and starts its three sequences at 1.
pub(crate) fn store_new_channel<Ctx>(
    ctx: &mut Ctx,
    port_id: &PortId,
    channel_id: &ChannelId,
    chan_end: ChannelEnd,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    ctx.store_channel(&ChannelEndPath::new(port_id, channel_id), chan_end)?;
    ctx.increment_identifier_counter(IdentifierCounter::Channel)?;

    for counter in [SequenceCounter::Send, SequenceCounter::Recv, SequenceCounter::Ack] {
        ctx.store_packet_sequence(counter, port_id, channel_id, Sequence::from(1))?;
    }

    Ok(())
}

/// The local end a packet passes through, with the connection below it.
pub(crate) struct PacketEnd {
    pub channel: ChannelEnd,
    pub connection: ConnectionEnd,
}

impl PacketEnd {
    /// Loads the end at `local`, which must be in one of `allowed` and face
    /// exactly `remote`.
    pub fn load<Ctx>(
        ctx: &Ctx,
        local: (&PortId, &ChannelId),
        remote: (&PortId, &ChannelId),
        allowed: &[State],
    ) -> Result<Self, ContextError>
    where
        Ctx: ValidationContext,
    {
        let channel = ctx.channel_end(&ChannelEndPath::new(local.0, local.1))?;
        channel.ensure_state_in(allowed)?;

        if !channel.connects_to(remote.0, remote.1) {
            return Err(PacketError::InvalidPacketCounterparty {
                port_id: remote.0.clone(),
                channel_id: remote.1.clone(),
            }
            .into());
        }

        let connection = ctx.connection_end(channel.connection_id())?;

        Ok(Self {
            channel,
            connection,
        })
    }

    /// The sending end of `packet`, which must be OPEN.
    pub fn sending<Ctx: ValidationContext>(ctx: &Ctx, packet: &Packet) -> Result<Self, ContextError> {
        Self::load(
            ctx,
            (&packet.port_id_on_a, &packet.chan_id_on_a),
            (&packet.port_id_on_b, &packet.chan_id_on_b),
            &[State::Open],
        )
    }

    pub fn require_open_connection(&self) -> Result<(), PacketError> {
        self.connection
            .ensure_state(ConnectionState::Open)
            .map_err(PacketError::Connection)
    }
}

/// Checks that the sender still holds the commitment of `packet`, i.e. the
/// packet is in flight and was committed with this content.
pub(crate) fn verify_packet_in_flight<Ctx>(ctx_a: &Ctx, packet: &Packet) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    let stored = stored_commitment(ctx_a, packet)?;
    let expected = compute_packet_commitment(
        &packet.data,
        &packet.timeout_height_on_b,
        &packet.timeout_timestamp_on_b,
    );

    if stored != expected {
        return Err(PacketError::MismatchedPacketCommitment {
            sequence: packet.seq_on_a,
        }
        .into());
    }

    Ok(())
}

fn stored_commitment<Ctx>(ctx_a: &Ctx, packet: &Packet) -> Result<PacketCommitment, ContextError>
where
    Ctx: ValidationContext,
{
    let path = CommitmentPath::new(&packet.port_id_on_a, &packet.chan_id_on_a, packet.seq_on_a);

    ctx_a.packet_commitment(&path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => PacketError::PacketCommitmentNotFound {
            sequence: packet.seq_on_a,
        }
        .into(),
        _ => e,
    })
}

/// Emits a packet event behind its message event.
pub(crate) fn emit_packet_event<Ctx>(ctx: &mut Ctx, event: IbcEvent) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    ctx.emit_ibc_event(IbcEvent::Message(MessageEvent::Channel))?;
    ctx.emit_ibc_event(event)
}

/// Emits `core_event`, then whatever the application produced.
pub(crate) fn emit_channel_events<Ctx>(
    ctx: &mut Ctx,
    core_event: IbcEvent,
    extras: ModuleExtras,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    emit_packet_event(ctx, core_event)?;
    emit_module_extras(ctx, extras)
}

pub(crate) fn emit_module_extras<Ctx>(
    ctx: &mut Ctx,
    extras: ModuleExtras,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    for module_event in extras.events {
        ctx.emit_ibc_event(IbcEvent::Module(module_event))?;
    }

    for log_message in extras.log {
        ctx.log_message(log_message)?;
    }

    Ok(())
}
