use ibc_core_channel_types::channel::{ChannelEnd, Counterparty, State};
use ibc_core_channel_types::events::{ChannelEvent, ChannelEventKind};
use ibc_core_channel_types::msgs::MsgChannelOpenInit;
use ibc_core_handler_types::error::ContextError;
use ibc_core_handler_types::events::IbcEvent;
use ibc_core_host::types::identifiers::ChannelId;
use ibc_core_host::{ExecutionContext, ValidationContext};
use ibc_core_router::module::{ChannelOpening, Module};
use tracing::debug;

use super::{emit_channel_events, next_channel_id, store_new_channel, usable_connection};

fn opening<'a>(
    msg: &'a MsgChannelOpenInit,
    chan_id_on_a: &'a ChannelId,
    counterparty: &'a Counterparty,
) -> ChannelOpening<'a> {
    ChannelOpening {
        ordering: msg.ordering,
        conn_id: &msg.conn_id_on_a,
        port_id: &msg.port_id_on_a,
        channel_id: chan_id_on_a,
        counterparty,
    }
}

pub fn chan_open_init_validate<ValCtx>(
    ctx_a: &ValCtx,
    module: &dyn Module,
    msg: MsgChannelOpenInit,
) -> Result<(), ContextError>
where
    ValCtx: ValidationContext,
{
    ctx_a.validate_message_signer(&msg.signer)?;
    usable_connection(ctx_a, &msg.conn_id_on_a, msg.ordering)?;

    let chan_id_on_a = next_channel_id(ctx_a)?;
    let remote = Counterparty::new(msg.port_id_on_b.clone(), None);
    module.on_chan_open_init_validate(
        opening(&msg, &chan_id_on_a, &remote),
        &msg.version_proposal,
    )?;

    Ok(())
}

pub fn chan_open_init_execute<ExecCtx>(
    ctx_a: &mut ExecCtx,
    module: &mut dyn Module,
    msg: MsgChannelOpenInit,
) -> Result<(), ContextError>
where
    ExecCtx: ExecutionContext,
{
    let chan_id_on_a = next_channel_id(ctx_a)?;
    let remote = Counterparty::new(msg.port_id_on_b.clone(), None);
    let (extras, version) = module.on_chan_open_init_execute(
        opening(&msg, &chan_id_on_a, &remote),
        &msg.version_proposal,
    )?;

    let chan_end_on_a = ChannelEnd::new(
        State::Init,
        msg.ordering,
        remote,
        msg.conn_id_on_a.clone(),
        version,
    )?;
    let event = ChannelEvent::new(
        ChannelEventKind::OpenInit,
        msg.port_id_on_a.clone(),
        chan_id_on_a.clone(),
        &chan_end_on_a,
    );
    store_new_channel(ctx_a, &msg.port_id_on_a, &chan_id_on_a, chan_end_on_a)?;

    debug!(
        port_id = %msg.port_id_on_a,
        channel_id = %chan_id_on_a,
        ordering = %msg.ordering,
        "channel -> INIT"
    );

    ctx_a.log_message(format!("channel {chan_id_on_a} opened in INIT"))?;
    emit_channel_events(ctx_a, IbcEvent::Channel(event), extras)
}
