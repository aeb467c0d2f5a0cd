//! Opens a TRYOPEN end once the counterparty proves its end OPEN.

use ibc_core_connection_types::events::ConnectionEventKind;
use ibc_core_connection_types::msgs::MsgConnectionOpenConfirm;
use ibc_core_connection_types::{ConnectionEnd, Counterparty, State};
use ibc_core_handler_types::error::ContextError;
use ibc_core_host::{ExecutionContext, ValidationContext};
use tracing::debug;

use super::{record_connection, remote_connection_id, Remote};

pub fn validate<Ctx>(ctx_b: &Ctx, msg: &MsgConnectionOpenConfirm) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    ctx_b.validate_message_signer(&msg.signer)?;

    let conn_end_on_b = ctx_b.connection_end(&msg.conn_id_on_b)?;
    conn_end_on_b.ensure_state(State::TryOpen)?;
    let conn_id_on_a = remote_connection_id(conn_end_on_b.counterparty())?;

    let open_end_on_a = ConnectionEnd::new(
        State::Open,
        conn_end_on_b.counterparty().client_id().clone(),
        Counterparty::new(
            conn_end_on_b.client_id().clone(),
            Some(msg.conn_id_on_b.clone()),
            ctx_b.commitment_prefix(),
        ),
        vec![conn_end_on_b.version()?.clone()],
        conn_end_on_b.delay_period(),
    )?;

    Remote::of(&conn_end_on_b, msg.proof_height_on_a).verify_connection(
        ctx_b,
        &msg.proof_conn_end_on_a,
        conn_id_on_a,
        open_end_on_a,
    )
}

pub fn execute<Ctx>(ctx_b: &mut Ctx, msg: &MsgConnectionOpenConfirm) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let conn_end_on_b = ctx_b.connection_end(&msg.conn_id_on_b)?.with_state(State::Open);

    debug!(connection_id = %msg.conn_id_on_b, "connection TRYOPEN -> OPEN");
    ctx_b.log_message(format!("connection {} open", msg.conn_id_on_b))?;

    record_connection(
        ctx_b,
        ConnectionEventKind::OpenConfirm,
        msg.conn_id_on_b.clone(),
        conn_end_on_b,
    )
}
