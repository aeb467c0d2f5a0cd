use ibc_core_client_types::error::ClientError;
use ibc_core_client_types::{ClientState, ConsensusState, Height, Status};
use ibc_core_commitment_types::commitment::{CommitmentPrefix, CommitmentProofBytes};
use ibc_core_handler_types::error::ContextError;
use ibc_core_host_types::identifiers::ClientId;
use ibc_core_host_types::path::{ClientConsensusStatePath, ClientStatePath, Path};
use ibc_primitives::Timestamp;

use crate::registry::ClientRegistry;
use crate::verifier::ClientVerifier;

/// Defines the methods available to the client handlers, and to every
/// handler checking a proof, for reading client state.
pub trait ClientValidationContext {
    /// The verifiers known to the host.
    fn client_registry(&self) -> &ClientRegistry;

    /// Returns the ClientState for the given identifier `client_id`.
    fn client_state(&self, client_id: &ClientId) -> Result<ClientState, ContextError>;

    /// Retrieve the consensus state for the given client ID at the specified
    /// height.
    ///
    /// Returns an error if no such state exists.
    fn consensus_state(
        &self,
        client_cons_state_path: &ClientConsensusStatePath,
    ) -> Result<ConsensusState, ContextError>;

    /// Returns the timestamp and height of the host when it processed a client
    /// update request at the specified height.
    fn client_update_meta(
        &self,
        client_id: &ClientId,
        height: &Height,
    ) -> Result<(Timestamp, Height), ContextError>;

    /// Returns the current timestamp of the local chain.
    fn client_host_timestamp(&self) -> Result<Timestamp, ContextError>;

    /// Looks up the verifier bound to the type of `client_state`.
    fn client_verifier(
        &self,
        client_state: &ClientState,
    ) -> Result<&dyn ClientVerifier, ContextError> {
        Ok(self
            .client_registry()
            .verifier(client_state.client_type())?)
    }

    /// A frozen client is always `Frozen`; otherwise its verifier decides,
    /// given the latest consensus state and the host time.
    fn client_status(&self, client_id: &ClientId) -> Result<Status, ContextError> {
        let client_state = self.client_state(client_id)?;

        if client_state.is_frozen() {
            return Ok(Status::Frozen);
        }

        let latest_height = client_state.latest_height();
        let latest_consensus_state = self.consensus_state(&ClientConsensusStatePath::new(
            client_id.clone(),
            latest_height.revision_number(),
            latest_height.revision_height(),
        ))?;

        Ok(self.client_verifier(&client_state)?.status(
            &client_state,
            &latest_consensus_state,
            self.client_host_timestamp()?,
        ))
    }

    /// Checks that `value` is committed at `path` on the chain tracked by
    /// `client_id`, as of `proof_height`.
    ///
    /// The client must be active and already updated to at least
    /// `proof_height`.
    fn verify_client_membership(
        &self,
        client_id: &ClientId,
        proof_height: &Height,
        prefix: &CommitmentPrefix,
        proof: &CommitmentProofBytes,
        path: Path,
        value: Vec<u8>,
    ) -> Result<(), ClientError> {
        let (client_state, consensus_state) =
            proof_target(self, client_id, proof_height).map_err(into_client_error)?;

        self.client_verifier(&client_state)
            .map_err(into_client_error)?
            .verify_membership(&client_state, &consensus_state, prefix, proof, path, value)
    }

    /// Checks that nothing is committed at `path` on the chain tracked by
    /// `client_id`, as of `proof_height`.
    fn verify_client_non_membership(
        &self,
        client_id: &ClientId,
        proof_height: &Height,
        prefix: &CommitmentPrefix,
        proof: &CommitmentProofBytes,
        path: Path,
    ) -> Result<(), ClientError> {
        let (client_state, consensus_state) =
            proof_target(self, client_id, proof_height).map_err(into_client_error)?;

        self.client_verifier(&client_state)
            .map_err(into_client_error)?
            .verify_non_membership(&client_state, &consensus_state, prefix, proof, path)
    }
}

/// Defines the methods through which the client handlers store client
/// state.
///
/// Client and consensus states are never deleted: a client is updated in
/// place and its consensus states only accumulate.
pub trait ClientExecutionContext: ClientValidationContext {
    /// Called upon successful client creation and update
    fn store_client_state(
        &mut self,
        client_state_path: ClientStatePath,
        client_state: ClientState,
    ) -> Result<(), ContextError>;

    /// Called upon successful client creation and update
    fn store_consensus_state(
        &mut self,
        consensus_state_path: ClientConsensusStatePath,
        consensus_state: ConsensusState,
    ) -> Result<(), ContextError>;

    /// Called upon successful client creation and update.
    ///
    /// Implementations are expected to use this to record the specified time
    /// and height as the time at which this update (or header) was processed.
    fn store_update_meta(
        &mut self,
        client_id: ClientId,
        height: Height,
        host_timestamp: Timestamp,
        host_height: Height,
    ) -> Result<(), ContextError>;
}

/// Loads the client and the consensus state a proof at `proof_height` is
/// checked against.
fn proof_target<V>(
    ctx: &V,
    client_id: &ClientId,
    proof_height: &Height,
) -> Result<(ClientState, ConsensusState), ContextError>
where
    V: ClientValidationContext + ?Sized,
{
    ctx.client_status(client_id)?.verify_is_active()?;

    let client_state = ctx.client_state(client_id)?;

    if client_state.latest_height() < *proof_height {
        return Err(ClientError::InvalidProofHeight {
            actual: client_state.latest_height(),
            expected: *proof_height,
        }
        .into());
    }

    let consensus_state = ctx.consensus_state(&ClientConsensusStatePath::new(
        client_id.clone(),
        proof_height.revision_number(),
        proof_height.revision_height(),
    ))?;

    Ok((client_state, consensus_state))
}

fn into_client_error(e: ContextError) -> ClientError {
    match e {
        ContextError::ClientError(e) => e,
        other => ClientError::ClientSpecific {
            description: other.to_string(),
        },
    }
}
