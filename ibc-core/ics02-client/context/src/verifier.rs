//! Defines the `ClientVerifier` trait implemented by every light-client
//! backend.

use ibc_core_client_types::error::ClientError;
use ibc_core_client_types::{ClientState, ConsensusState, Height, Status};
use ibc_core_commitment_types::commitment::{CommitmentPrefix, CommitmentProofBytes};
use ibc_core_host_types::path::Path;
use ibc_primitives::Timestamp;

/// Result of a successful header verification: the client state advanced by
/// the header and the consensus state to store at `consensus_height`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifiedHeader {
    pub consensus_height: Height,
    pub client_state: ClientState,
    pub consensus_state: ConsensusState,
}

/// Verification backend for one kind of counterparty chain.
///
/// The handlers never look inside headers, evidence or proofs. They pass the
/// bytes through to the verifier registered for the client's type, together
/// with the stored [`ClientState`] and, for proofs, the [`ConsensusState`]
/// the proof is checked against.
pub trait ClientVerifier: Send + Sync {
    /// Checks the states a client is created with. The default accepts any
    /// pair whose client is not already frozen.
    fn verify_initial_state(
        &self,
        client_state: &ClientState,
        _consensus_state: &ConsensusState,
    ) -> Result<(), ClientError> {
        if client_state.is_frozen() {
            return Err(ClientError::InvalidClientState {
                description: "cannot create a frozen client".to_string(),
            });
        }
        Ok(())
    }

    /// Validates `header` against the stored state and extracts the new
    /// client and consensus states. Fails with
    /// [`ClientError::InvalidHeader`] when, e.g., a signature or quorum
    /// check does not pass.
    fn verify_header(
        &self,
        client_state: &ClientState,
        header: &[u8],
    ) -> Result<VerifiedHeader, ClientError>;

    /// Checks misbehaviour evidence and returns the height at which the
    /// client must be frozen.
    fn verify_misbehaviour(
        &self,
        client_state: &ClientState,
        evidence: &[u8],
    ) -> Result<Height, ClientError>;

    /// Status of a client that is not frozen. Verifiers with a trusting
    /// period report `Expired` here once the latest consensus state is too
    /// old.
    fn status(
        &self,
        _client_state: &ClientState,
        _latest_consensus_state: &ConsensusState,
        _host_timestamp: Timestamp,
    ) -> Status {
        Status::Active
    }

    /// Verifies that `value` is committed under `prefix/path` in the root of
    /// `consensus_state`.
    fn verify_membership(
        &self,
        client_state: &ClientState,
        consensus_state: &ConsensusState,
        prefix: &CommitmentPrefix,
        proof: &CommitmentProofBytes,
        path: Path,
        value: Vec<u8>,
    ) -> Result<(), ClientError>;

    /// Verifies that nothing is committed under `prefix/path` in the root of
    /// `consensus_state`.
    fn verify_non_membership(
        &self,
        client_state: &ClientState,
        consensus_state: &ConsensusState,
        prefix: &CommitmentPrefix,
        proof: &CommitmentProofBytes,
        path: Path,
    ) -> Result<(), ClientError>;
}
