use ibc_core_channel_types::channel::{Counterparty, State};
use ibc_core_channel_types::error::ChannelError;
use ibc_core_channel_types::events::{ChannelEvent, ChannelEventKind};
use ibc_core_channel_types::msgs::MsgChannelOpenConfirm;
use ibc_core_handler_types::error::ContextError;
use ibc_core_handler_types::events::IbcEvent;
use ibc_core_host::types::path::ChannelEndPath;
use ibc_core_host::{ExecutionContext, ValidationContext};
use ibc_core_router::module::Module;
use tracing::debug;

use super::{emit_channel_events, handshake_end, verify_counterparty_channel, ExpectedChannelEnd};

pub fn chan_open_confirm_validate<ValCtx>(
    ctx_b: &ValCtx,
    module: &dyn Module,
    msg: MsgChannelOpenConfirm,
) -> Result<(), ContextError>
where
    ValCtx: ValidationContext,
{
    ctx_b.validate_message_signer(&msg.signer)?;

    let path = ChannelEndPath::new(&msg.port_id_on_b, &msg.chan_id_on_b);
    let (chan_end_on_b, conn_end_on_b) = handshake_end(ctx_b, &path, State::TryOpen)?;

    let remote = chan_end_on_b.counterparty();
    let chan_id_on_a = remote
        .channel_id()
        .ok_or(ChannelError::MissingCounterparty)?;

    verify_counterparty_channel(
        ctx_b,
        &conn_end_on_b,
        &msg.proof_chan_end_on_a,
        &msg.proof_height_on_a,
        ExpectedChannelEnd {
            port_id: remote.port_id(),
            channel_id: chan_id_on_a,
            state: State::Open,
            ordering: chan_end_on_b.ordering(),
            counterparty: Counterparty::new(path.0.clone(), Some(path.1.clone())),
            version: chan_end_on_b.version().clone(),
        },
    )?;

    module.on_chan_open_confirm_validate(&msg.port_id_on_b, &msg.chan_id_on_b)?;

    Ok(())
}

pub fn chan_open_confirm_execute<ExecCtx>(
    ctx_b: &mut ExecCtx,
    module: &mut dyn Module,
    msg: MsgChannelOpenConfirm,
) -> Result<(), ContextError>
where
    ExecCtx: ExecutionContext,
{
    let extras = module.on_chan_open_confirm_execute(&msg.port_id_on_b, &msg.chan_id_on_b)?;

    let path = ChannelEndPath::new(&msg.port_id_on_b, &msg.chan_id_on_b);
    let chan_end_on_b = ctx_b.channel_end(&path)?.with_state(State::Open);
    let event = ChannelEvent::new(
        ChannelEventKind::OpenConfirm,
        msg.port_id_on_b,
        msg.chan_id_on_b,
        &chan_end_on_b,
    );
    ctx_b.store_channel(&path, chan_end_on_b)?;

    debug!(port_id = %path.0, channel_id = %path.1, "channel TRYOPEN -> OPEN");

    ctx_b.log_message(format!("channel {} is OPEN", path.1))?;
    emit_channel_events(ctx_b, IbcEvent::Channel(event), extras)
}
