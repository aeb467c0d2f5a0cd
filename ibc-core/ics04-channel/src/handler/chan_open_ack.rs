use ibc_core_channel_types::channel::{Counterparty, State};
use ibc_core_channel_types::events::{ChannelEvent, ChannelEventKind};
use ibc_core_channel_types::msgs::MsgChannelOpenAck;
use ibc_core_handler_types::error::ContextError;
use ibc_core_handler_types::events::IbcEvent;
use ibc_core_host::types::path::ChannelEndPath;
use ibc_core_host::{ExecutionContext, ValidationContext};
use ibc_core_router::module::Module;
use tracing::debug;

use super::{emit_channel_events, handshake_end, verify_counterparty_channel, ExpectedChannelEnd};

pub fn chan_open_ack_validate<ValCtx>(
    ctx_a: &ValCtx,
    module: &dyn Module,
    msg: MsgChannelOpenAck,
) -> Result<(), ContextError>
where
    ValCtx: ValidationContext,
{
    ctx_a.validate_message_signer(&msg.signer)?;

    let path = ChannelEndPath::new(&msg.port_id_on_a, &msg.chan_id_on_a);
    let (chan_end_on_a, conn_end_on_a) = handshake_end(ctx_a, &path, State::Init)?;

    // The TRYOPEN end must carry the ordering this end was opened with.
    verify_counterparty_channel(
        ctx_a,
        &conn_end_on_a,
        &msg.proof_chan_end_on_b,
        &msg.proof_height_on_b,
        ExpectedChannelEnd {
            port_id: chan_end_on_a.counterparty().port_id(),
            channel_id: &msg.chan_id_on_b,
            state: State::TryOpen,
            ordering: chan_end_on_a.ordering(),
            counterparty: Counterparty::new(path.0.clone(), Some(path.1.clone())),
            version: msg.version_on_b.clone(),
        },
    )?;

    module.on_chan_open_ack_validate(&msg.port_id_on_a, &msg.chan_id_on_a, &msg.version_on_b)?;

    Ok(())
}

pub fn chan_open_ack_execute<ExecCtx>(
    ctx_a: &mut ExecCtx,
    module: &mut dyn Module,
    msg: MsgChannelOpenAck,
) -> Result<(), ContextError>
where
    ExecCtx: ExecutionContext,
{
    let extras =
        module.on_chan_open_ack_execute(&msg.port_id_on_a, &msg.chan_id_on_a, &msg.version_on_b)?;

    let path = ChannelEndPath::new(&msg.port_id_on_a, &msg.chan_id_on_a);
    let chan_end_on_a = ctx_a
        .channel_end(&path)?
        .acknowledged(msg.chan_id_on_b.clone(), msg.version_on_b);
    let event = ChannelEvent::new(
        ChannelEventKind::OpenAck,
        msg.port_id_on_a,
        msg.chan_id_on_a,
        &chan_end_on_a,
    );
    ctx_a.store_channel(&path, chan_end_on_a)?;

    debug!(
        port_id = %path.0,
        channel_id = %path.1,
        counterparty_channel_id = %msg.chan_id_on_b,
        "channel INIT -> OPEN"
    );

    ctx_a.log_message(format!("channel {} is OPEN", path.1))?;
    emit_channel_events(ctx_a, IbcEvent::Channel(event), extras)
}
