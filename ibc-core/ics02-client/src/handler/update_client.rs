//! Protocol logic specific to processing ICS2 messages of type `MsgUpdateClient`
//! and `MsgSubmitMisbehaviour`.

use ibc_core_client_context::{ClientExecutionContext, ClientValidationContext, VerifiedHeader};
use ibc_core_client_types::error::ClientError;
use ibc_core_client_types::events::ClientEvent;
use ibc_core_client_types::msgs::MsgUpdateOrMisbehaviour;
use ibc_core_client_types::{ClientState, Height};
use ibc_core_handler_types::error::ContextError;
use ibc_core_handler_types::events::{IbcEvent, MessageEvent};
use ibc_core_host::types::identifiers::{ClientId, ClientType};
use ibc_core_host::types::path::{ClientConsensusStatePath, ClientStatePath};
use ibc_core_host::{ExecutionContext, ValidationContext};
use tracing::debug;

pub fn validate<Ctx>(ctx: &Ctx, msg: MsgUpdateOrMisbehaviour) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    ctx.validate_message_signer(msg.signer())?;

    let client_id = msg.client_id().clone();

    let client_val_ctx = ctx.client_ctx();

    let client_state = load_active_client(client_val_ctx, &client_id)?;

    let verifier = client_val_ctx.client_verifier(&client_state)?;

    match msg {
        MsgUpdateOrMisbehaviour::UpdateClient(msg) => {
            verifier.verify_header(&client_state, msg.header())?;
        }
        MsgUpdateOrMisbehaviour::Misbehaviour(msg) => {
            verifier.verify_misbehaviour(&client_state, msg.evidence())?;
        }
    }

    Ok(())
}

pub fn execute<Ctx>(ctx: &mut Ctx, msg: MsgUpdateOrMisbehaviour) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let client_id = msg.client_id().clone();
    let host_timestamp = ctx.host_timestamp()?;
    let host_height = ctx.host_height()?;

    let client_exec_ctx = ctx.client_ctx_mut();

    let client_state = load_active_client(client_exec_ctx, &client_id)?;
    let client_type = client_state.client_type().clone();

    let header = match msg {
        MsgUpdateOrMisbehaviour::UpdateClient(msg) => msg.client_message.value,
        MsgUpdateOrMisbehaviour::Misbehaviour(msg) => {
            let frozen_height = client_exec_ctx
                .client_verifier(&client_state)?
                .verify_misbehaviour(&client_state, msg.evidence())?;

            freeze(client_exec_ctx, &client_id, client_state, frozen_height)?;

            return emit_misbehaviour(ctx, client_id, client_type);
        }
    };

    let VerifiedHeader {
        consensus_height,
        client_state: new_client_state,
        consensus_state,
    } = client_exec_ctx
        .client_verifier(&client_state)?
        .verify_header(&client_state, &header)?;

    let consensus_path = ClientConsensusStatePath::new(
        client_id.clone(),
        consensus_height.revision_number(),
        consensus_height.revision_height(),
    );

    // A valid header that contradicts an already trusted consensus state at
    // the same height is evidence of misbehaviour on its own.
    if let Ok(existing) = client_exec_ctx.consensus_state(&consensus_path) {
        if existing != consensus_state {
            freeze(client_exec_ctx, &client_id, client_state, consensus_height)?;

            return emit_misbehaviour(ctx, client_id, client_type);
        }

        debug!(%client_id, %consensus_height, "header already processed");
        ctx.log_message(format!(
            "client {client_id} already holds a consensus state at {consensus_height}"
        ))?;

        return Ok(());
    }

    client_exec_ctx.store_consensus_state(consensus_path, consensus_state)?;
    client_exec_ctx.store_client_state(ClientStatePath::new(client_id.clone()), new_client_state)?;
    client_exec_ctx.store_update_meta(
        client_id.clone(),
        consensus_height,
        host_timestamp,
        host_height,
    )?;

    debug!(%client_id, %consensus_height, "updated client");

    let event = IbcEvent::Client(ClientEvent::updated(
        client_id.clone(),
        client_type,
        consensus_height,
        header,
    ));
    ctx.emit_ibc_event(IbcEvent::Message(MessageEvent::Client))?;
    ctx.emit_ibc_event(event)?;

    ctx.log_message(format!("client {client_id} updated to {consensus_height}"))?;

    Ok(())
}

/// Loads a client that may still be updated. Frozen is terminal.
fn load_active_client<V>(ctx: &V, client_id: &ClientId) -> Result<ClientState, ContextError>
where
    V: ClientValidationContext,
{
    let client_state = ctx.client_state(client_id)?;

    if client_state.is_frozen() {
        return Err(ClientError::ClientFrozen {
            client_id: client_id.clone(),
        }
        .into());
    }

    ctx.client_status(client_id)?.verify_is_active()?;

    Ok(client_state)
}

fn freeze<E>(
    ctx: &mut E,
    client_id: &ClientId,
    client_state: ClientState,
    frozen_height: Height,
) -> Result<(), ContextError>
where
    E: ClientExecutionContext,
{
    debug!(%client_id, %frozen_height, "freezing client on misbehaviour");

    ctx.store_client_state(
        ClientStatePath::new(client_id.clone()),
        client_state.with_frozen_height(frozen_height),
    )
}

fn emit_misbehaviour<Ctx>(
    ctx: &mut Ctx,
    client_id: ClientId,
    client_type: ClientType,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    ctx.emit_ibc_event(IbcEvent::Message(MessageEvent::Client))?;
    ctx.emit_ibc_event(IbcEvent::Client(ClientEvent::frozen(
        client_id.clone(),
        client_type,
    )))?;

    ctx.log_message(format!("client {client_id} frozen on misbehaviour"))?;

    Ok(())
}
