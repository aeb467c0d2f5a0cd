use ibc_core_channel_types::channel::{ChannelEnd, Counterparty, State};
use ibc_core_channel_types::error::ChannelError;
use ibc_core_channel_types::events::{ChannelEvent, ChannelEventKind};
use ibc_core_channel_types::msgs::MsgChannelOpenTry;
use ibc_core_handler_types::error::ContextError;
use ibc_core_handler_types::events::IbcEvent;
use ibc_core_host::types::identifiers::ChannelId;
use ibc_core_host::{ExecutionContext, ValidationContext};
use ibc_core_router::module::{ChannelOpening, Module};
use tracing::debug;

use super::{
    emit_channel_events, next_channel_id, store_new_channel, usable_connection,
    verify_counterparty_channel, ExpectedChannelEnd,
};

pub fn chan_open_try_validate<ValCtx>(
    ctx_b: &ValCtx,
    module: &dyn Module,
    msg: MsgChannelOpenTry,
) -> Result<(), ContextError>
where
    ValCtx: ValidationContext,
{
    let chan_id_on_b = next_channel_id(ctx_b)?;
    validate(ctx_b, &msg, &chan_id_on_b)?;

    let remote = remote_end(&msg);
    module.on_chan_open_try_validate(
        opening(&msg, &chan_id_on_b, &remote),
        &msg.version_supported_on_a,
    )?;

    Ok(())
}

pub fn chan_open_try_execute<ExecCtx>(
    ctx_b: &mut ExecCtx,
    module: &mut dyn Module,
    msg: MsgChannelOpenTry,
) -> Result<(), ContextError>
where
    ExecCtx: ExecutionContext,
{
    let chan_id_on_b = next_channel_id(ctx_b)?;
    let remote = remote_end(&msg);
    let (extras, version) = module.on_chan_open_try_execute(
        opening(&msg, &chan_id_on_b, &remote),
        &msg.version_supported_on_a,
    )?;

    let chan_end_on_b = ChannelEnd::new(
        State::TryOpen,
        msg.ordering,
        remote,
        msg.conn_id_on_b.clone(),
        version,
    )?;
    let event = ChannelEvent::new(
        ChannelEventKind::OpenTry,
        msg.port_id_on_b.clone(),
        chan_id_on_b.clone(),
        &chan_end_on_b,
    );
    store_new_channel(ctx_b, &msg.port_id_on_b, &chan_id_on_b, chan_end_on_b)?;

    debug!(
        port_id = %msg.port_id_on_b,
        channel_id = %chan_id_on_b,
        counterparty_channel_id = %msg.chan_id_on_a,
        "channel -> TRYOPEN"
    );

    ctx_b.log_message(format!("channel {chan_id_on_b} opened in TRYOPEN"))?;
    emit_channel_events(ctx_b, IbcEvent::Channel(event), extras)
}

fn remote_end(msg: &MsgChannelOpenTry) -> Counterparty {
    Counterparty::new(msg.port_id_on_a.clone(), Some(msg.chan_id_on_a.clone()))
}

fn opening<'a>(
    msg: &'a MsgChannelOpenTry,
    chan_id_on_b: &'a ChannelId,
    remote: &'a Counterparty,
) -> ChannelOpening<'a> {
    ChannelOpening {
        ordering: msg.ordering,
        conn_id: &msg.conn_id_on_b,
        port_id: &msg.port_id_on_b,
        channel_id: chan_id_on_b,
        counterparty: remote,
    }
}

fn validate<Ctx>(
    ctx_b: &Ctx,
    msg: &MsgChannelOpenTry,
    chan_id_on_b: &ChannelId,
) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    ctx_b.validate_message_signer(&msg.signer)?;

    let conn_end_on_b = usable_connection(ctx_b, &msg.conn_id_on_b, msg.ordering)?;

    let expect = |state: State, remote_channel: Option<ChannelId>| ExpectedChannelEnd {
        port_id: &msg.port_id_on_a,
        channel_id: &msg.chan_id_on_a,
        state,
        ordering: msg.ordering,
        counterparty: Counterparty::new(msg.port_id_on_b.clone(), remote_channel),
        version: msg.version_supported_on_a.clone(),
    };
    let prove = |expected: ExpectedChannelEnd<'_>| {
        verify_counterparty_channel(
            ctx_b,
            &conn_end_on_b,
            &msg.proof_chan_end_on_a,
            &msg.proof_height_on_a,
            expected,
        )
    };

    // The counterparty is in INIT, or already in TRYOPEN facing the end
    // this step allocates when both sides opened at once.
    match prove(expect(State::Init, None)) {
        Ok(()) => Ok(()),
        Err(err @ ContextError::ChannelError(ChannelError::OrderingMismatch { .. })) => Err(err),
        Err(err) => prove(expect(State::TryOpen, Some(chan_id_on_b.clone()))).map_err(|_| err),
    }
}
