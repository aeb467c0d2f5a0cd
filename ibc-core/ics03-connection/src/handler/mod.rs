use ibc_core_client::context::ClientValidationContext;
use ibc_core_client::types::error::ClientError;
use ibc_core_client::types::{ClientState, Height};
use ibc_core_commitment_types::commitment::{CommitmentPrefix, CommitmentProofBytes};
use ibc_core_connection_types::error::ConnectionError;
use ibc_core_connection_types::events::{ConnectionEvent, ConnectionEventKind};
use ibc_core_connection_types::{ConnectionEnd, Counterparty};
use ibc_core_handler_types::error::ContextError;
use ibc_core_handler_types::events::{IbcEvent, MessageEvent};
use ibc_core_host::types::identifiers::{ClientId, ConnectionId};
use ibc_core_host::types::path::{ClientConsensusStatePath, ClientStatePath, ConnectionPath, Path};
use ibc_core_host::{ExecutionContext, IdentifierCounter, ValidationContext};
use ibc_primitives::proto::{Any, Protobuf};
use prost::Message;

pub mod conn_open_ack;
pub mod conn_open_confirm;
pub mod conn_open_init;
pub mod conn_open_try;

/// The counterparty as seen from a handshake step: the local client that
/// tracks it, the prefix its store lives under and the height the step's
/// proofs were taken at.
pub(crate) struct Remote<'a> {
    pub client_id: &'a ClientId,
    pub prefix: &'a CommitmentPrefix,
    pub proofs_height: Height,
}

impl<'a> Remote<'a> {
    /// The counterparty of an existing local end.
    pub fn of(conn_end: &'a ConnectionEnd, proofs_height: Height) -> Self {
        Self {
            client_id: conn_end.client_id(),
            prefix: conn_end.counterparty().prefix(),
            proofs_height,
        }
    }

    fn prove<Ctx: ValidationContext>(
        &self,
        ctx: &Ctx,
        proof: &CommitmentProofBytes,
        path: Path,
        value: Vec<u8>,
    ) -> Result<(), ClientError> {
        ctx.client_ctx().verify_client_membership(
            self.client_id,
            &self.proofs_height,
            self.prefix,
            proof,
            path,
            value,
        )
    }

    /// Proves the counterparty stored exactly `expected` under `conn_id`.
    pub fn verify_connection<Ctx: ValidationContext>(
        &self,
        ctx: &Ctx,
        proof: &CommitmentProofBytes,
        conn_id: &ConnectionId,
        expected: ConnectionEnd,
    ) -> Result<(), ContextError> {
        self.prove(
            ctx,
            proof,
            ConnectionPath::new(conn_id).into(),
            expected.encode_vec(),
        )
        .map_err(|e| ConnectionError::VerificationFailed(e).into())
    }

    /// Checks the client the counterparty runs for this chain, stored there
    /// as `client_id_on_remote`: its state must pass the host's own checks,
    /// its consensus height must not be ahead of the host, and both must be
    /// committed on the counterparty.
    pub fn verify_host_client<Ctx: ValidationContext>(
        &self,
        ctx: &Ctx,
        client_id_on_remote: &ClientId,
        proofs: HostClientProofs<'_>,
    ) -> Result<(), ContextError> {
        let client_state = ClientState::try_from(proofs.client_state.clone()).map_err(
            |e: ClientError| ConnectionError::InvalidClientState {
                reason: e.to_string(),
            },
        )?;
        ctx.validate_self_client(client_state)?;

        let host_height = ctx.host_height()?;
        if proofs.consensus_height > host_height {
            return Err(ConnectionError::InvalidConsensusHeight {
                target_height: proofs.consensus_height,
                current_height: host_height,
            }
            .into());
        }

        self.prove(
            ctx,
            proofs.proof_client_state,
            ClientStatePath::new(client_id_on_remote.clone()).into(),
            proofs.client_state.encode_to_vec(),
        )
        .map_err(|client_error| ConnectionError::ClientStateVerificationFailure {
            client_id: self.client_id.clone(),
            client_error,
        })?;

        let consensus_state = ctx.host_consensus_state(&proofs.consensus_height)?;
        self.prove(
            ctx,
            proofs.proof_consensus_state,
            ClientConsensusStatePath::new(
                client_id_on_remote.clone(),
                proofs.consensus_height.revision_number(),
                proofs.consensus_height.revision_height(),
            )
            .into(),
            Any::from(consensus_state).encode_to_vec(),
        )
        .map_err(|client_error| {
            ConnectionError::ConsensusStateVerificationFailure {
                height: self.proofs_height,
                client_error,
            }
            .into()
        })
    }
}

/// The counterparty's client of this chain, as carried by Try and Ack.
pub(crate) struct HostClientProofs<'a> {
    pub client_state: &'a Any,
    pub proof_client_state: &'a CommitmentProofBytes,
    pub consensus_height: Height,
    pub proof_consensus_state: &'a CommitmentProofBytes,
}

pub(crate) fn remote_connection_id(counterparty: &Counterparty) -> Result<&ConnectionId, ConnectionError> {
    counterparty
        .connection_id()
        .ok_or(ConnectionError::MissingCounterparty)
}

pub(crate) fn next_connection_id<Ctx: ValidationContext>(ctx: &Ctx) -> Result<ConnectionId, ContextError> {
    Ok(ConnectionId::new(
        ctx.identifier_counter(IdentifierCounter::Connection)?,
    ))
}

/// Stores `conn_end` as the outcome of handshake step `kind` and emits the
/// matching event. INIT and TRYOPEN also consume the identifier.
pub(crate) fn record_connection<Ctx: ExecutionContext>(
    ctx: &mut Ctx,
    kind: ConnectionEventKind,
    conn_id: ConnectionId,
    conn_end: ConnectionEnd,
) -> Result<(), ContextError> {
    let event = ConnectionEvent::new(kind, conn_id.clone(), &conn_end);
    ctx.store_connection(&ConnectionPath::new(&conn_id), conn_end)?;
    if matches!(kind, ConnectionEventKind::OpenInit | ConnectionEventKind::OpenTry) {
        ctx.increment_identifier_counter(IdentifierCounter::Connection)?;
    }

    ctx.emit_ibc_event(IbcEvent::Message(MessageEvent::Connection))?;
    ctx.emit_ibc_event(IbcEvent::Connection(event))
}
