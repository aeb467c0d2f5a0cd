//! Request and response types of the connection queries, and the
//! conversions of the responses to their proto counterparts.

use ibc::core::client::types::Height;
use ibc::core::connection::types::ConnectionEnd;
use ibc::core::host::types::identifiers::ConnectionId;
use ibc_proto::ibc::core::connection::v1::QueryConnectionResponse as RawQueryConnectionResponse;

use crate::types::Proof;

/// Defines the request type for querying a connection end
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryConnectionRequest {
    pub connection_id: ConnectionId,
    pub query_height: Option<Height>,
}

/// Defines the response type for querying a connection end
#[derive(Clone, Debug)]
pub struct QueryConnectionResponse {
    pub connection: ConnectionEnd,
    pub proof: Proof,
    pub proof_height: Height,
}

impl From<QueryConnectionResponse> for RawQueryConnectionResponse {
    fn from(response: QueryConnectionResponse) -> Self {
        Self {
            connection: Some(response.connection.into()),
            proof: response.proof,
            proof_height: Some(response.proof_height.into()),
        }
    }
}

