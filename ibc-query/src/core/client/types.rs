//! Request and response types of the client queries, and the conversions of
//! the responses to their proto counterparts.

use ibc::core::client::types::{ClientState, Height, Status};
use ibc::core::host::types::identifiers::ClientId;
use ibc_proto::ibc::core::client::v1::{
    QueryClientStateResponse as RawQueryClientStateResponse,
    QueryClientStatusResponse as RawQueryClientStatusResponse,
};

use crate::types::Proof;

/// Defines the request type for querying the state of a client
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryClientStateRequest {
    pub client_id: ClientId,
    pub query_height: Option<Height>,
}

/// Defines the response type for querying the state of a client
#[derive(Clone, Debug)]
pub struct QueryClientStateResponse {
    pub client_state: ClientState,
    pub proof: Proof,
    pub proof_height: Height,
}

impl From<QueryClientStateResponse> for RawQueryClientStateResponse {
    fn from(response: QueryClientStateResponse) -> Self {
        Self {
            client_state: Some(response.client_state.into()),
            proof: response.proof,
            proof_height: Some(response.proof_height.into()),
        }
    }
}

/// Defines the response type for querying the status of a client
#[derive(Clone, Debug)]
pub struct QueryClientStatusResponse {
    pub status: Status,
}

impl From<QueryClientStatusResponse> for RawQueryClientStatusResponse {
    fn from(response: QueryClientStatusResponse) -> Self {
        Self {
            status: response.status.to_string(),
        }
    }
}
