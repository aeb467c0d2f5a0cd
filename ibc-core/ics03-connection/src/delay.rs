use ibc_core_client::context::ClientValidationContext;
use ibc_core_client::types::Height;
use ibc_core_connection_types::error::ConnectionError;
use ibc_core_connection_types::ConnectionEnd;
use ibc_core_handler_types::error::ContextError;
use ibc_core_host::ValidationContext;

/// Checks that the connection's delay period, in time and in blocks, has
/// elapsed since the client was updated to `proof_height`.
pub fn verify_conn_delay_passed<Ctx>(
    ctx: &Ctx,
    proof_height: Height,
    conn_end: &ConnectionEnd,
) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    let (updated_at_time, updated_at_height) = ctx
        .client_ctx()
        .client_update_meta(conn_end.client_id(), &proof_height)?;
    let delay = conn_end.delay_period();

    let current_host_time = ctx.host_timestamp()?;
    let earliest_valid_time = (updated_at_time + delay).map_err(ConnectionError::Timestamp)?;
    if current_host_time < earliest_valid_time {
        return Err(ConnectionError::NotEnoughTimeElapsed {
            current_host_time,
            earliest_valid_time,
        }
        .into());
    }

    let current_host_height = ctx.host_height()?;
    let earliest_valid_height = updated_at_height.add(ctx.block_delay(&delay));
    if current_host_height < earliest_valid_height {
        return Err(ConnectionError::NotEnoughBlocksElapsed {
            current_host_height,
            earliest_valid_height,
        }
        .into());
    }

    Ok(())
}
