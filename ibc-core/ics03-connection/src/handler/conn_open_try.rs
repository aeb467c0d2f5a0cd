//! Answers a counterparty's INIT with a local end in TRYOPEN.

use ibc_core_connection_types::events::ConnectionEventKind;
use ibc_core_connection_types::msgs::MsgConnectionOpenTry;
use ibc_core_connection_types::version::pick_version;
use ibc_core_connection_types::{ConnectionEnd, Counterparty, State};
use ibc_core_handler_types::error::ContextError;
use ibc_core_host::{ExecutionContext, ValidationContext};
use tracing::debug;

use super::{next_connection_id, record_connection, remote_connection_id, HostClientProofs, Remote};

/// The TRYOPEN end `msg` creates, settled on a single version.
fn tryopen_end<Ctx: ValidationContext>(
    ctx_b: &Ctx,
    msg: &MsgConnectionOpenTry,
) -> Result<ConnectionEnd, ContextError> {
    let version = pick_version(&ctx_b.supported_connection_versions(), &msg.versions_on_a)?;

    Ok(ConnectionEnd::new(
        State::TryOpen,
        msg.client_id_on_b.clone(),
        msg.counterparty.clone(),
        vec![version],
        msg.delay_period,
    )?)
}

pub fn validate<Ctx>(ctx_b: &Ctx, msg: MsgConnectionOpenTry) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    ctx_b.validate_message_signer(&msg.signer)?;
    tryopen_end(ctx_b, &msg)?;

    let conn_id_on_a = remote_connection_id(&msg.counterparty)?;
    let client_id_on_a = msg.counterparty.client_id();
    let remote = Remote {
        client_id: &msg.client_id_on_b,
        prefix: msg.counterparty.prefix(),
        proofs_height: msg.proofs_height_on_a,
    };

    remote.verify_host_client(
        ctx_b,
        client_id_on_a,
        HostClientProofs {
            client_state: &msg.client_state_of_b_on_a,
            proof_client_state: &msg.proof_client_state_of_b_on_a,
            consensus_height: msg.consensus_height_of_b_on_a,
            proof_consensus_state: &msg.proof_consensus_state_of_b_on_a,
        },
    )?;

    let init_end_on_a = ConnectionEnd::new(
        State::Init,
        client_id_on_a.clone(),
        Counterparty::new(msg.client_id_on_b.clone(), None, ctx_b.commitment_prefix()),
        msg.versions_on_a.clone(),
        msg.delay_period,
    )?;
    remote.verify_connection(ctx_b, &msg.proof_conn_end_on_a, conn_id_on_a, init_end_on_a)
}

pub fn execute<Ctx>(ctx_b: &mut Ctx, msg: MsgConnectionOpenTry) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let conn_end_on_b = tryopen_end(ctx_b, &msg)?;
    let conn_id_on_b = next_connection_id(ctx_b)?;

    debug!(
        connection_id = %conn_id_on_b,
        counterparty_connection_id = %remote_connection_id(&msg.counterparty)?,
        "connection TRYOPEN"
    );
    ctx_b.log_message(format!("connection {conn_id_on_b} opened in TRYOPEN"))?;

    record_connection(ctx_b, ConnectionEventKind::OpenTry, conn_id_on_b, conn_end_on_b)
}
