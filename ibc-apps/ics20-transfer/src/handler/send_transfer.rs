use ibc_app_transfer_types::error::TokenTransferError;
use ibc_app_transfer_types::events::TransferEvent;
use ibc_app_transfer_types::msgs::MsgTransfer;
use ibc_app_transfer_types::{TracePrefix, MODULE_ID_STR};
use ibc_core::channel::handler::{send_packet_execute, send_packet_validate};
use ibc_core::channel::types::packet::Packet;
use ibc_core::handler::types::events::MessageEvent;
use ibc_core::host::types::path::ChannelEndPath;
use ibc_core::host::{ExecutionContext, SequenceCounter, ValidationContext};
use ibc_core::router::types::event::ModuleEvent;
use tracing::debug;

use super::{outgoing_movement, parse_account};
use crate::context::{TokenTransferExecutionContext, TokenTransferValidationContext};

/// Moves the sender's tokens out and commits the transfer packet, all or
/// nothing.
pub fn send_transfer<Ctx, TokenCtx>(
    ctx_a: &mut Ctx,
    token_ctx_a: &mut TokenCtx,
    msg: MsgTransfer,
) -> Result<(), TokenTransferError>
where
    Ctx: ExecutionContext,
    TokenCtx: TokenTransferExecutionContext,
{
    send_transfer_validate(ctx_a, token_ctx_a, &msg)?;
    send_transfer_execute(ctx_a, token_ctx_a, msg)
}

pub fn send_transfer_validate<Ctx, TokenCtx>(
    ctx_a: &Ctx,
    token_ctx_a: &TokenCtx,
    msg: &MsgTransfer,
) -> Result<(), TokenTransferError>
where
    Ctx: ValidationContext,
    TokenCtx: TokenTransferValidationContext,
{
    token_ctx_a.sending_enabled()?;

    let packet = build_packet(ctx_a, msg)?;
    let data = &msg.packet_data;
    let sender: TokenCtx::AccountId = parse_account(&data.sender)?;
    let hop = TracePrefix::new(msg.port_id_on_a.clone(), msg.chan_id_on_a.clone());

    token_ctx_a.validate_movement(
        outgoing_movement(&sender, &hop, &data.token.denom, &data.memo),
        &data.token,
    )?;

    send_packet_validate(ctx_a, &packet)?;

    Ok(())
}

/// Must follow a successful [`send_transfer_validate`] of the same message.
pub fn send_transfer_execute<Ctx, TokenCtx>(
    ctx_a: &mut Ctx,
    token_ctx_a: &mut TokenCtx,
    msg: MsgTransfer,
) -> Result<(), TokenTransferError>
where
    Ctx: ExecutionContext,
    TokenCtx: TokenTransferExecutionContext,
{
    let packet = build_packet(ctx_a, &msg)?;
    let data = msg.packet_data;
    let sender: TokenCtx::AccountId = parse_account(&data.sender)?;
    let hop = TracePrefix::new(msg.port_id_on_a, msg.chan_id_on_a);

    let movement = outgoing_movement(&sender, &hop, &data.token.denom, &data.memo);
    token_ctx_a.apply_movement(movement, &data.token)?;

    debug!(
        channel = %hop,
        sequence = %packet.seq_on_a,
        token = %data.token,
        burned = !movement.admits_denom(),
        "sending transfer"
    );

    send_packet_execute(ctx_a, packet)?;

    ctx_a.log_message(format!(
        "transfer of {} from {} to {}",
        data.token, data.sender, data.receiver
    ))?;

    ctx_a.emit_ibc_event(ModuleEvent::from(TransferEvent::Sent(data)).into())?;
    ctx_a.emit_ibc_event(MessageEvent::Module(MODULE_ID_STR.to_string()).into())?;

    Ok(())
}

/// The packet `msg` turns into. The destination is the channel's
/// counterparty and the sequence is the next one to send.
fn build_packet(ctx_a: &impl ValidationContext, msg: &MsgTransfer) -> Result<Packet, TokenTransferError> {
    let (port_id, chan_id) = (&msg.port_id_on_a, &msg.chan_id_on_a);
    let chan_end_on_a = ctx_a.channel_end(&ChannelEndPath::new(port_id, chan_id))?;

    let remote = chan_end_on_a.counterparty();
    let chan_id_on_b = remote.channel_id().cloned().ok_or_else(|| {
        TokenTransferError::DestinationChannelNotFound {
            port_id: port_id.clone(),
            channel_id: chan_id.clone(),
        }
    })?;

    Ok(Packet {
        seq_on_a: ctx_a.packet_sequence(SequenceCounter::Send, port_id, chan_id)?,
        port_id_on_a: port_id.clone(),
        chan_id_on_a: chan_id.clone(),
        port_id_on_b: remote.port_id().clone(),
        chan_id_on_b,
        data: msg.packet_data.to_json_bytes()?,
        timeout_height_on_b: msg.timeout_height_on_b,
        timeout_timestamp_on_b: msg.timeout_timestamp_on_b,
    })
}
