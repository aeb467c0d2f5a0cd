//! Connection queries.

use ibc::core::host::types::path::ConnectionPath;
use ibc::core::host::ValidationContext;

use super::types::*;
use crate::core::context::ProvableContext;
use crate::core::prove;
use crate::error::QueryError;

/// The connection end stored under the requested identifier, with its proof.
pub fn query_connection<I>(
    ibc_ctx: &I,
    request: &QueryConnectionRequest,
) -> Result<QueryConnectionResponse, QueryError>
where
    I: ValidationContext + ProvableContext,
{
    let connection = ibc_ctx.connection_end(&request.connection_id)?;
    let path = ConnectionPath::new(&request.connection_id);
    let (proof, proof_height) = prove(ibc_ctx, request.query_height, path)?;

    Ok(QueryConnectionResponse {
        connection,
        proof,
        proof_height,
    })
}
