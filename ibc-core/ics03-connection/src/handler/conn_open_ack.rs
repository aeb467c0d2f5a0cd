//! Opens an INIT end once the counterparty proves its TRYOPEN answer.

use ibc_core_connection_types::events::ConnectionEventKind;
use ibc_core_connection_types::msgs::MsgConnectionOpenAck;
use ibc_core_connection_types::{ConnectionEnd, Counterparty, State};
use ibc_core_handler_types::error::ContextError;
use ibc_core_host::{ExecutionContext, ValidationContext};
use tracing::debug;

use super::{record_connection, HostClientProofs, Remote};

pub fn validate<Ctx>(ctx_a: &Ctx, msg: MsgConnectionOpenAck) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    ctx_a.validate_message_signer(&msg.signer)?;

    // A second ack finds the end OPEN already.
    let conn_end_on_a = ctx_a.connection_end(&msg.conn_id_on_a)?;
    conn_end_on_a.ensure_state(State::Init)?;
    msg.version.verify_is_supported(conn_end_on_a.versions())?;

    let client_id_on_b = conn_end_on_a.counterparty().client_id();
    let remote = Remote::of(&conn_end_on_a, msg.proofs_height_on_b);

    remote.verify_host_client(
        ctx_a,
        client_id_on_b,
        HostClientProofs {
            client_state: &msg.client_state_of_a_on_b,
            proof_client_state: &msg.proof_client_state_of_a_on_b,
            consensus_height: msg.consensus_height_of_a_on_b,
            proof_consensus_state: &msg.proof_consensus_state_of_a_on_b,
        },
    )?;

    let tryopen_end_on_b = ConnectionEnd::new(
        State::TryOpen,
        client_id_on_b.clone(),
        Counterparty::new(
            conn_end_on_a.client_id().clone(),
            Some(msg.conn_id_on_a.clone()),
            ctx_a.commitment_prefix(),
        ),
        vec![msg.version.clone()],
        conn_end_on_a.delay_period(),
    )?;
    remote.verify_connection(ctx_a, &msg.proof_conn_end_on_b, &msg.conn_id_on_b, tryopen_end_on_b)
}

pub fn execute<Ctx>(ctx_a: &mut Ctx, msg: MsgConnectionOpenAck) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let conn_end_on_a = ctx_a
        .connection_end(&msg.conn_id_on_a)?
        .acknowledged(msg.conn_id_on_b.clone(), msg.version);

    debug!(
        connection_id = %msg.conn_id_on_a,
        counterparty_connection_id = %msg.conn_id_on_b,
        "connection INIT -> OPEN"
    );
    ctx_a.log_message(format!("connection {} open", msg.conn_id_on_a))?;

    record_connection(ctx_a, ConnectionEventKind::OpenAck, msg.conn_id_on_a, conn_end_on_a)
}
