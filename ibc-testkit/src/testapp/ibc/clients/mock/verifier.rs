//! Verifier for mock hosts: headers are [`MockHeader`]s taken verbatim from
//! the counterparty's block log and proofs are store [`StateProof`]s checked
//! against the root the header committed to.

use ibc::core::client::context::{ClientVerifier, VerifiedHeader};
use ibc::core::client::types::error::ClientError;
use ibc::core::client::types::{ClientState, ConsensusState, Height, Status};
use ibc::core::commitment_types::commitment::{CommitmentPrefix, CommitmentProofBytes};
use ibc::core::host::store::StateProof;
use ibc::core::host::types::path::Path;
use ibc::primitives::proto::Protobuf;
use ibc::primitives::Timestamp;
use prost::Message;
use tracing::debug;

use super::client_state::decode_trusting_period;
use super::header::{MockHeader, RawMockHeader};
use super::misbehaviour::{Misbehaviour, RawMockMisbehaviour};

#[derive(Clone, Copy, Debug, Default)]
pub struct MockVerifier;

impl MockVerifier {
    fn decode_proof(proof: &CommitmentProofBytes) -> Result<StateProof, ClientError> {
        StateProof::decode(proof.as_bytes()).map_err(|e| ClientError::ClientSpecific {
            description: format!("malformed state proof: {e}"),
        })
    }

    fn check_prefix(prefix: &CommitmentPrefix) -> Result<(), ClientError> {
        if prefix.as_bytes().is_empty() {
            return Err(ClientError::ClientSpecific {
                description: "empty commitment prefix".to_string(),
            });
        }
        Ok(())
    }
}

impl ClientVerifier for MockVerifier {
    fn verify_header(
        &self,
        client_state: &ClientState,
        header: &[u8],
    ) -> Result<VerifiedHeader, ClientError> {
        let header: MockHeader = Protobuf::<RawMockHeader>::decode_vec(header).map_err(|e| {
            ClientError::InvalidHeader {
                description: e.to_string(),
            }
        })?;

        if header.height.revision_number() != client_state.latest_height().revision_number() {
            return Err(ClientError::InvalidHeader {
                description: format!(
                    "header revision {} differs from client revision {}",
                    header.height.revision_number(),
                    client_state.latest_height().revision_number()
                ),
            });
        }

        if header.root.is_empty() {
            return Err(ClientError::InvalidHeader {
                description: "header commits to an empty root".to_string(),
            });
        }

        debug!(height = %header.height, "mock header verified");

        let latest_height = client_state.latest_height().max(header.height);

        Ok(VerifiedHeader {
            consensus_height: header.height,
            client_state: client_state
                .clone()
                .with_update(latest_height, client_state.data().to_vec()),
            consensus_state: header.into_consensus_state(),
        })
    }

    fn verify_misbehaviour(
        &self,
        _client_state: &ClientState,
        evidence: &[u8],
    ) -> Result<Height, ClientError> {
        let misbehaviour: Misbehaviour = Protobuf::<RawMockMisbehaviour>::decode_vec(evidence)
            .map_err(|e| ClientError::InvalidMisbehaviour {
                description: e.to_string(),
            })?;

        misbehaviour
            .conflicting_height()
            .ok_or_else(|| ClientError::InvalidMisbehaviour {
                description: "headers do not conflict".to_string(),
            })
    }

    fn status(
        &self,
        client_state: &ClientState,
        latest_consensus_state: &ConsensusState,
        host_timestamp: Timestamp,
    ) -> Status {
        let Some(trusting_period) = decode_trusting_period(client_state.data()) else {
            return Status::Active;
        };

        match host_timestamp.duration_since(&latest_consensus_state.timestamp()) {
            Some(elapsed) if elapsed > trusting_period => Status::Expired,
            _ => Status::Active,
        }
    }

    fn verify_membership(
        &self,
        _client_state: &ClientState,
        consensus_state: &ConsensusState,
        prefix: &CommitmentPrefix,
        proof: &CommitmentProofBytes,
        path: Path,
        value: Vec<u8>,
    ) -> Result<(), ClientError> {
        Self::check_prefix(prefix)?;
        let proof = Self::decode_proof(proof)?;

        let key = path.to_string();
        if !proof.verify_membership(consensus_state.root().as_bytes(), key.as_bytes(), &value) {
            return Err(ClientError::FailedMembershipVerification {
                description: format!("value at `{key}` is not committed"),
            });
        }
        Ok(())
    }

    fn verify_non_membership(
        &self,
        _client_state: &ClientState,
        consensus_state: &ConsensusState,
        prefix: &CommitmentPrefix,
        proof: &CommitmentProofBytes,
        path: Path,
    ) -> Result<(), ClientError> {
        Self::check_prefix(prefix)?;
        let proof = Self::decode_proof(proof)?;

        let key = path.to_string();
        if !proof.verify_non_membership(consensus_state.root().as_bytes(), key.as_bytes()) {
            return Err(ClientError::FailedNonMembershipVerification {
                description: format!("`{key}` is committed"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use ibc::core::commitment_types::commitment::CommitmentRoot;
    use ibc::core::host::store::proof::leaf_hash;
    use ibc::core::host::types::identifiers::{ChannelId, PortId};
    use ibc::core::host::types::path::SeqSendPath;
    use rstest::*;

    use super::*;
    use crate::testapp::ibc::clients::mock::client_state::{
        axon_client_type, encode_trusting_period,
    };
    use crate::utils::year_2023;

    fn height(h: u64) -> Height {
        Height::new(0, h).expect("Never fails")
    }

    #[fixture]
    fn client_state() -> ClientState {
        ClientState::new(
            axon_client_type(),
            height(5),
            encode_trusting_period(Some(Duration::from_secs(100))),
        )
    }

    fn header(h: u64, root: u8) -> MockHeader {
        MockHeader::new(height(h)).with_root(CommitmentRoot::from_bytes(&[root; 32]))
    }

    #[rstest]
    fn header_advances_latest_height(client_state: ClientState) {
        let bytes = Protobuf::<RawMockHeader>::encode_vec(header(9, 1));
        let verified = MockVerifier.verify_header(&client_state, &bytes).unwrap();

        assert_eq!(verified.consensus_height, height(9));
        assert_eq!(verified.client_state.latest_height(), height(9));

        // an older header fills a gap without moving the client back
        let bytes = Protobuf::<RawMockHeader>::encode_vec(header(3, 1));
        let verified = MockVerifier.verify_header(&client_state, &bytes).unwrap();
        assert_eq!(verified.client_state.latest_height(), height(5));
    }

    #[rstest]
    fn garbage_header_is_rejected(client_state: ClientState) {
        assert!(matches!(
            MockVerifier.verify_header(&client_state, &[0xff, 0x01]),
            Err(ClientError::InvalidHeader { .. })
        ));
    }

    #[rstest]
    #[case(header(7, 1), header(7, 2), Some(height(7)))]
    #[case(header(7, 1), header(7, 1), None)]
    #[case(header(7, 1), header(8, 2), None)]
    fn misbehaviour_needs_diverging_roots_at_one_height(
        client_state: ClientState,
        #[case] header1: MockHeader,
        #[case] header2: MockHeader,
        #[case] expected: Option<Height>,
    ) {
        let evidence = Protobuf::<RawMockMisbehaviour>::encode_vec(Misbehaviour {
            client_id: axon_client_type().build_client_id(0),
            header1,
            header2,
        });

        let result = MockVerifier.verify_misbehaviour(&client_state, &evidence);
        assert_eq!(result.ok(), expected);
    }

    #[rstest]
    fn client_expires_after_trusting_period(client_state: ClientState) {
        let consensus_state = header(5, 1).into_consensus_state();
        let within = (year_2023() + Duration::from_secs(50)).unwrap();
        let beyond = (year_2023() + Duration::from_secs(101)).unwrap();

        assert_eq!(
            MockVerifier.status(&client_state, &consensus_state, within),
            Status::Active
        );
        assert_eq!(
            MockVerifier.status(&client_state, &consensus_state, beyond),
            Status::Expired
        );
    }

    #[rstest]
    fn proofs_are_checked_against_the_consensus_root(client_state: ClientState) {
        let path = Path::SeqSend(SeqSendPath::new(&PortId::transfer(), &ChannelId::new(0)));
        let proof = StateProof {
            leaves: vec![leaf_hash(path.to_string().as_bytes(), b"value")],
        };
        let consensus_state = ConsensusState::new(
            year_2023(),
            CommitmentRoot::from(proof.root()),
            Vec::new(),
        );
        let prefix = CommitmentPrefix::try_from(b"ibc".to_vec()).unwrap();
        let proof_bytes = CommitmentProofBytes::try_from(proof.encode_to_vec()).unwrap();

        assert!(MockVerifier
            .verify_membership(
                &client_state,
                &consensus_state,
                &prefix,
                &proof_bytes,
                path.clone(),
                b"value".to_vec(),
            )
            .is_ok());

        assert!(matches!(
            MockVerifier.verify_non_membership(
                &client_state,
                &consensus_state,
                &prefix,
                &proof_bytes,
                path,
            ),
            Err(ClientError::FailedNonMembershipVerification { .. })
        ));
    }
}
