//! Opens the local end of a new connection in INIT.

use ibc_core_client::context::ClientValidationContext;
use ibc_core_connection_types::events::ConnectionEventKind;
use ibc_core_connection_types::msgs::MsgConnectionOpenInit;
use ibc_core_connection_types::version::Version;
use ibc_core_connection_types::{ConnectionEnd, Counterparty, State};
use ibc_core_handler_types::error::ContextError;
use ibc_core_host::{ExecutionContext, ValidationContext};
use tracing::debug;

use super::{next_connection_id, record_connection};

/// A proposed version must be one the host speaks; without one, every
/// supported version is offered.
fn offered_versions<Ctx: ValidationContext>(
    ctx_a: &Ctx,
    proposed: Option<&Version>,
) -> Result<Vec<Version>, ContextError> {
    let supported = ctx_a.supported_connection_versions();
    match proposed {
        Some(version) => {
            version.verify_is_supported(&supported)?;
            Ok(vec![version.clone()])
        }
        None => Ok(supported),
    }
}

pub fn validate<Ctx>(ctx_a: &Ctx, msg: MsgConnectionOpenInit) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    ctx_a.validate_message_signer(&msg.signer)?;

    ctx_a
        .client_ctx()
        .client_status(&msg.client_id_on_a)?
        .verify_is_active()?;

    offered_versions(ctx_a, msg.version.as_ref()).map(drop)
}

pub fn execute<Ctx>(ctx_a: &mut Ctx, msg: MsgConnectionOpenInit) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let conn_end_on_a = ConnectionEnd::new(
        State::Init,
        msg.client_id_on_a.clone(),
        Counterparty::new(
            msg.counterparty.client_id().clone(),
            None,
            msg.counterparty.prefix().clone(),
        ),
        offered_versions(ctx_a, msg.version.as_ref())?,
        msg.delay_period,
    )?;

    let conn_id_on_a = next_connection_id(ctx_a)?;

    debug!(connection_id = %conn_id_on_a, client_id = %msg.client_id_on_a, "connection INIT");
    ctx_a.log_message(format!("connection {conn_id_on_a} opened in INIT"))?;

    record_connection(ctx_a, ConnectionEventKind::OpenInit, conn_id_on_a, conn_end_on_a)
}
