use ibc_core_client_types::Height;
use ibc_core_commitment_types::commitment::CommitmentProofBytes;
use ibc_core_host_types::identifiers::ConnectionId;
use ibc_primitives::Signer;
use ibc_proto::google::protobuf::Any;
use ibc_proto::ibc::core::connection::v1::MsgConnectionOpenAck as RawMsgConnectionOpenAck;
use ibc_proto::Protobuf;

use super::{height, proof};
use crate::error::ConnectionError;
use crate::version::Version;

pub const CONN_OPEN_ACK_TYPE_URL: &str = "/ibc.core.connection.v1.MsgConnectionOpenAck";

/// Opens A's INIT end once B holds the TRYOPEN answer. Mirrors
/// [`MsgConnectionOpenTry`](super::MsgConnectionOpenTry) with the roles
/// swapped: proofs are taken on B at `proofs_height_on_b`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgConnectionOpenAck {
    pub conn_id_on_a: ConnectionId,
    pub conn_id_on_b: ConnectionId,
    /// B's client of A, as stored on B.
    pub client_state_of_a_on_b: Any,
    pub proof_conn_end_on_b: CommitmentProofBytes,
    pub proof_client_state_of_a_on_b: CommitmentProofBytes,
    pub proof_consensus_state_of_a_on_b: CommitmentProofBytes,
    pub proofs_height_on_b: Height,
    pub consensus_height_of_a_on_b: Height,
    /// The version B picked out of A's offer.
    pub version: Version,
    pub signer: Signer,
}

impl Protobuf<RawMsgConnectionOpenAck> for MsgConnectionOpenAck {}

impl TryFrom<RawMsgConnectionOpenAck> for MsgConnectionOpenAck {
    type Error = ConnectionError;

    fn try_from(raw: RawMsgConnectionOpenAck) -> Result<Self, Self::Error> {
        let version = raw.version.ok_or(ConnectionError::EmptyVersions)?;

        Ok(Self {
            conn_id_on_a: raw.connection_id.parse()?,
            conn_id_on_b: raw.counterparty_connection_id.parse()?,
            client_state_of_a_on_b: raw
                .client_state
                .ok_or(ConnectionError::MissingClientState)?,
            version: Version::try_from(version)?,
            proof_conn_end_on_b: proof(raw.proof_try)?,
            proof_client_state_of_a_on_b: proof(raw.proof_client)?,
            proof_consensus_state_of_a_on_b: proof(raw.proof_consensus)?,
            proofs_height_on_b: height(raw.proof_height, ConnectionError::MissingProofHeight)?,
            consensus_height_of_a_on_b: height(
                raw.consensus_height,
                ConnectionError::MissingConsensusHeight,
            )?,
            signer: raw.signer.into(),
        })
    }
}

impl From<MsgConnectionOpenAck> for RawMsgConnectionOpenAck {
    fn from(msg: MsgConnectionOpenAck) -> Self {
        Self {
            connection_id: msg.conn_id_on_a.to_string(),
            counterparty_connection_id: msg.conn_id_on_b.to_string(),
            client_state: Some(msg.client_state_of_a_on_b),
            proof_height: Some(msg.proofs_height_on_b.into()),
            proof_try: msg.proof_conn_end_on_b.into(),
            proof_client: msg.proof_client_state_of_a_on_b.into(),
            proof_consensus: msg.proof_consensus_state_of_a_on_b.into(),
            consensus_height: Some(msg.consensus_height_of_a_on_b.into()),
            version: Some(msg.version.into()),
            signer: msg.signer.to_string(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use ibc_proto::ibc::core::client::v1::Height as RawHeight;

    use super::*;

    fn raw_msg() -> RawMsgConnectionOpenAck {
        RawMsgConnectionOpenAck {
            connection_id: "connection-0".to_string(),
            counterparty_connection_id: "connection-1".to_string(),
            client_state: Some(Any {
                type_url: "/test".to_string(),
                value: vec![1],
            }),
            proof_height: Some(RawHeight {
                revision_number: 0,
                revision_height: 10,
            }),
            proof_try: vec![1],
            proof_client: vec![1],
            proof_consensus: vec![1],
            consensus_height: Some(RawHeight {
                revision_number: 0,
                revision_height: 10,
            }),
            version: Some(Version::compatibles()[0].clone().into()),
            signer: "relayer".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn ack_requires_proof_height_and_version() {
        assert!(MsgConnectionOpenAck::try_from(raw_msg()).is_ok());

        let mut raw = raw_msg();
        raw.proof_height = None;
        assert!(matches!(
            MsgConnectionOpenAck::try_from(raw),
            Err(ConnectionError::MissingProofHeight)
        ));

        let mut raw = raw_msg();
        raw.version = None;
        assert!(matches!(
            MsgConnectionOpenAck::try_from(raw),
            Err(ConnectionError::EmptyVersions)
        ));
    }

    #[test]
    fn ack_rejects_empty_proof() {
        let mut raw = raw_msg();
        raw.proof_try = vec![];
        assert!(matches!(
            MsgConnectionOpenAck::try_from(raw),
            Err(ConnectionError::InvalidProof)
        ));
    }
}
