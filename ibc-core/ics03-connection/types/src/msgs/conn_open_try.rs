use core::time::Duration;

use ibc_core_client_types::Height;
use ibc_core_commitment_types::commitment::CommitmentProofBytes;
use ibc_core_host_types::identifiers::ClientId;
use ibc_primitives::Signer;
use ibc_proto::google::protobuf::Any;
use ibc_proto::ibc::core::connection::v1::MsgConnectionOpenTry as RawMsgConnectionOpenTry;
use ibc_proto::Protobuf;

use super::{height, proof};
use crate::connection::{delay_nanos, Counterparty};
use crate::error::ConnectionError;
use crate::version::Version;

pub const CONN_OPEN_TRY_TYPE_URL: &str = "/ibc.core.connection.v1.MsgConnectionOpenTry";

/// Answers an INIT end on chain A by creating the TRYOPEN end on chain B.
///
/// Besides A's end, B checks that A's client of B holds a state B agrees
/// with, so every proof here is taken on A at `proofs_height_on_a`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgConnectionOpenTry {
    pub client_id_on_b: ClientId,
    /// A's client of B, as stored on A.
    pub client_state_of_b_on_a: Any,
    /// A's end, whose identifier is already known.
    pub counterparty: Counterparty,
    pub versions_on_a: Vec<Version>,
    pub proof_conn_end_on_a: CommitmentProofBytes,
    pub proof_client_state_of_b_on_a: CommitmentProofBytes,
    pub proof_consensus_state_of_b_on_a: CommitmentProofBytes,
    pub proofs_height_on_a: Height,
    /// Height of B that A's client last recorded. B must have reached it.
    pub consensus_height_of_b_on_a: Height,
    pub delay_period: Duration,
    pub signer: Signer,
}

impl Protobuf<RawMsgConnectionOpenTry> for MsgConnectionOpenTry {}

impl TryFrom<RawMsgConnectionOpenTry> for MsgConnectionOpenTry {
    type Error = ConnectionError;

    fn try_from(raw: RawMsgConnectionOpenTry) -> Result<Self, Self::Error> {
        let counterparty = Counterparty::try_from(
            raw.counterparty
                .ok_or(ConnectionError::MissingCounterparty)?,
        )?;
        if counterparty.connection_id.is_none() {
            return Err(ConnectionError::InvalidCounterparty);
        }

        Ok(Self {
            client_id_on_b: raw.client_id.parse()?,
            client_state_of_b_on_a: raw
                .client_state
                .ok_or(ConnectionError::MissingClientState)?,
            counterparty,
            versions_on_a: Version::decode_list(raw.counterparty_versions)?,
            proof_conn_end_on_a: proof(raw.proof_init)?,
            proof_client_state_of_b_on_a: proof(raw.proof_client)?,
            proof_consensus_state_of_b_on_a: proof(raw.proof_consensus)?,
            proofs_height_on_a: height(raw.proof_height, ConnectionError::MissingProofHeight)?,
            consensus_height_of_b_on_a: height(
                raw.consensus_height,
                ConnectionError::MissingConsensusHeight,
            )?,
            delay_period: Duration::from_nanos(raw.delay_period),
            signer: raw.signer.into(),
        })
    }
}

impl From<MsgConnectionOpenTry> for RawMsgConnectionOpenTry {
    #[allow(deprecated)]
    fn from(msg: MsgConnectionOpenTry) -> Self {
        Self {
            client_id: msg.client_id_on_b.to_string(),
            client_state: Some(msg.client_state_of_b_on_a),
            counterparty: Some(msg.counterparty.into()),
            delay_period: delay_nanos(msg.delay_period),
            counterparty_versions: msg.versions_on_a.into_iter().map(Into::into).collect(),
            proof_height: Some(msg.proofs_height_on_a.into()),
            proof_init: msg.proof_conn_end_on_a.into(),
            proof_client: msg.proof_client_state_of_b_on_a.into(),
            proof_consensus: msg.proof_consensus_state_of_b_on_a.into(),
            consensus_height: Some(msg.consensus_height_of_b_on_a.into()),
            signer: msg.signer.to_string(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use ibc_proto::ibc::core::client::v1::Height as RawHeight;
    use ibc_proto::ibc::core::commitment::v1::MerklePrefix;
    use ibc_proto::ibc::core::connection::v1::Counterparty as RawCounterparty;

    use super::*;

    #[allow(deprecated)]
    fn raw_msg(counterparty_connection_id: &str) -> RawMsgConnectionOpenTry {
        RawMsgConnectionOpenTry {
            client_id: "07-axon-1".to_string(),
            client_state: Some(Any {
                type_url: "/test".to_string(),
                value: vec![1],
            }),
            counterparty: Some(RawCounterparty {
                client_id: "07-axon-0".to_string(),
                connection_id: counterparty_connection_id.to_string(),
                prefix: Some(MerklePrefix {
                    key_prefix: b"ibc".to_vec(),
                }),
            }),
            delay_period: 5,
            counterparty_versions: Version::compatibles().into_iter().map(Into::into).collect(),
            proof_height: Some(RawHeight {
                revision_number: 0,
                revision_height: 10,
            }),
            proof_init: vec![1],
            proof_client: vec![1],
            proof_consensus: vec![1],
            consensus_height: Some(RawHeight {
                revision_number: 0,
                revision_height: 4,
            }),
            signer: "relayer".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn try_names_the_counterparty_connection() {
        let msg = MsgConnectionOpenTry::try_from(raw_msg("connection-0")).unwrap();
        assert_eq!(msg.delay_period, Duration::from_nanos(5));

        assert!(matches!(
            MsgConnectionOpenTry::try_from(raw_msg("")),
            Err(ConnectionError::InvalidCounterparty)
        ));
    }

    #[test]
    fn try_without_versions_is_rejected() {
        let mut raw = raw_msg("connection-0");
        raw.counterparty_versions.clear();

        assert!(matches!(
            MsgConnectionOpenTry::try_from(raw),
            Err(ConnectionError::EmptyVersions)
        ));
    }
}
