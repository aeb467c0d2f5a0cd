//! Registers a new light client under the next free identifier.

use ibc_core_client_context::{ClientExecutionContext, ClientValidationContext};
use ibc_core_client_types::error::ClientError;
use ibc_core_client_types::events::ClientEvent;
use ibc_core_client_types::msgs::MsgCreateClient;
use ibc_core_client_types::ClientState;
use ibc_core_handler_types::error::ContextError;
use ibc_core_handler_types::events::{IbcEvent, MessageEvent};
use ibc_core_host::types::identifiers::ClientId;
use ibc_core_host::types::path::{ClientConsensusStatePath, ClientStatePath};
use ibc_core_host::{ExecutionContext, IdentifierCounter, ValidationContext};
use tracing::debug;

/// `{client_type}-{n}` where `n` is the host's client counter.
fn next_client_id<Ctx: ValidationContext>(
    ctx: &Ctx,
    client_state: &ClientState,
) -> Result<ClientId, ContextError> {
    let counter = ctx.identifier_counter(IdentifierCounter::Client)?;
    Ok(client_state.client_type().build_client_id(counter))
}

pub fn validate<Ctx>(ctx: &Ctx, msg: MsgCreateClient) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    ctx.validate_message_signer(&msg.signer)?;

    let clients = ctx.client_ctx();
    clients
        .client_registry()
        .verifier(msg.client_state.client_type())?
        .verify_initial_state(&msg.client_state, &msg.consensus_state)?;

    let client_id = next_client_id(ctx, &msg.client_state)?;
    if clients.client_state(&client_id).is_ok() {
        return Err(ClientError::DuplicateClientState(client_id).into());
    }

    Ok(())
}

pub fn execute<Ctx>(ctx: &mut Ctx, msg: MsgCreateClient) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let MsgCreateClient {
        client_state,
        consensus_state,
        ..
    } = msg;

    let client_id = next_client_id(ctx, &client_state)?;
    let (host_timestamp, host_height) = (ctx.host_timestamp()?, ctx.host_height()?);
    let client_type = client_state.client_type().clone();
    let height = client_state.latest_height();

    let clients = ctx.client_ctx_mut();
    clients.store_consensus_state(
        ClientConsensusStatePath::new(
            client_id.clone(),
            height.revision_number(),
            height.revision_height(),
        ),
        consensus_state,
    )?;
    clients.store_client_state(ClientStatePath::new(client_id.clone()), client_state)?;
    clients.store_update_meta(client_id.clone(), height, host_timestamp, host_height)?;

    ctx.increment_identifier_counter(IdentifierCounter::Client)?;

    debug!(%client_id, %height, "client created");
    ctx.log_message(format!("client {client_id} created at {height}"))?;

    ctx.emit_ibc_event(IbcEvent::Message(MessageEvent::Client))?;
    ctx.emit_ibc_event(IbcEvent::Client(ClientEvent::created(
        client_id,
        client_type,
        height,
    )))
}
