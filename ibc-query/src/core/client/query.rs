//! Client queries.

use ibc::core::client::context::ClientValidationContext;
use ibc::core::host::types::identifiers::ClientId;
use ibc::core::host::types::path::ClientStatePath;
use ibc::core::host::ValidationContext;

use super::types::*;
use crate::core::context::ProvableContext;
use crate::core::prove;
use crate::error::QueryError;

/// The client state stored under the requested identifier, with its proof.
pub fn query_client_state<I>(
    ibc_ctx: &I,
    request: &QueryClientStateRequest,
) -> Result<QueryClientStateResponse, QueryError>
where
    I: ValidationContext + ProvableContext,
{
    let client_state = ibc_ctx.client_ctx().client_state(&request.client_id)?;
    let path = ClientStatePath::new(request.client_id.clone());
    let (proof, proof_height) = prove(ibc_ctx, request.query_height, path)?;

    Ok(QueryClientStateResponse {
        client_state,
        proof,
        proof_height,
    })
}

/// Whether the client is active, frozen or expired.
pub fn query_client_status<I>(
    ibc_ctx: &I,
    client_id: &ClientId,
) -> Result<QueryClientStatusResponse, QueryError>
where
    I: ValidationContext,
{
    let status = ibc_ctx.client_ctx().client_status(client_id)?;
    Ok(QueryClientStatusResponse { status })
}
