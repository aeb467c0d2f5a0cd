//! Query functions for the client, connection and channel modules.

pub mod channel;
pub mod client;
pub mod connection;
pub mod context;

use ibc::core::client::types::Height;
use ibc::core::host::types::path::Path;
use ibc::core::host::ValidationContext;
use tracing::trace;

use crate::core::context::ProvableContext;
use crate::error::QueryError;
use crate::types::Proof;

/// Proves `path` at `query_height`, or at the host's latest height when
/// none is given, and returns the proof along with the height it holds at.
pub(crate) fn prove<I>(
    ibc_ctx: &I,
    query_height: Option<Height>,
    path: impl Into<Path>,
) -> Result<(Proof, Height), QueryError>
where
    I: ValidationContext + ProvableContext,
{
    let height = match query_height {
        Some(height) => height,
        None => ibc_ctx.host_height()?,
    };
    let path = path.into();
    trace!(%path, %height, "proving path");

    let proof = ibc_ctx.get_proof(height, &path).ok_or_else(|| {
        QueryError::missing_proof(format!("no proof of {path} at height {height}"))
    })?;
    Ok((proof, height))
}
