use ibc_core_channel::handler::{
    acknowledgement_packet_execute, acknowledgement_packet_validate, chan_open_ack_execute,
    chan_open_ack_validate, chan_open_confirm_execute, chan_open_confirm_validate,
    chan_open_init_execute, chan_open_init_validate, chan_open_try_execute, chan_open_try_validate,
    recv_packet_execute, recv_packet_validate, timeout_packet_execute, timeout_packet_validate,
};
use ibc_core_channel::types::msgs::{
    channel_msg_to_port_id, packet_msg_to_port_id, ChannelMsg, PacketMsg,
};
use ibc_core_client::handler::{create_client, update_client};
use ibc_core_client::types::msgs::{ClientMsg, MsgCreateClient, MsgUpdateOrMisbehaviour};
use ibc_core_connection::handler::{
    conn_open_ack, conn_open_confirm, conn_open_init, conn_open_try,
};
use ibc_core_connection::types::msgs::ConnectionMsg;
use ibc_core_handler_types::error::ContextError;
use ibc_core_handler_types::msgs::MsgEnvelope;
use ibc_core_host::types::identifiers::PortId;
use ibc_core_host::{ExecutionContext, ValidationContext};
use ibc_core_router::module::Module;
use ibc_core_router::router::Router;
use ibc_core_router::types::error::RouterError;
use ibc_core_router::types::module::ModuleId;
use tracing::debug;

/// Validates `msg` and, if it passes, applies it.
///
/// Messages of one transaction go through here one at a time: each one is
/// validated against the state its predecessors left.
pub fn dispatch<Ctx>(
    ctx: &mut Ctx,
    router: &mut impl Router,
    msg: MsgEnvelope,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    validate(ctx, router, msg.clone())?;
    execute(ctx, router, msg)
}

/// Client messages go to one of two handlers.
enum ClientStep {
    Create(MsgCreateClient),
    Update(MsgUpdateOrMisbehaviour),
}

impl From<ClientMsg> for ClientStep {
    fn from(msg: ClientMsg) -> Self {
        match msg {
            ClientMsg::CreateClient(msg) => Self::Create(msg),
            ClientMsg::UpdateClient(msg) => Self::Update(MsgUpdateOrMisbehaviour::UpdateClient(msg)),
            ClientMsg::Misbehaviour(msg) => Self::Update(MsgUpdateOrMisbehaviour::Misbehaviour(msg)),
        }
    }
}

/// Checks `msg` against the current state without writing anything.
pub fn validate<Ctx>(ctx: &Ctx, router: &impl Router, msg: MsgEnvelope) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    debug!(type_url = msg.type_url(), "validating message");

    match msg {
        MsgEnvelope::Client(msg) => match ClientStep::from(msg) {
            ClientStep::Create(msg) => create_client::validate(ctx, msg),
            ClientStep::Update(msg) => update_client::validate(ctx, msg),
        },
        MsgEnvelope::Connection(ConnectionMsg::OpenInit(msg)) => conn_open_init::validate(ctx, msg),
        MsgEnvelope::Connection(ConnectionMsg::OpenTry(msg)) => conn_open_try::validate(ctx, msg),
        MsgEnvelope::Connection(ConnectionMsg::OpenAck(msg)) => conn_open_ack::validate(ctx, msg),
        MsgEnvelope::Connection(ConnectionMsg::OpenConfirm(msg)) => {
            conn_open_confirm::validate(ctx, &msg)
        }
        MsgEnvelope::Channel(msg) => {
            let module = bound_module(router, channel_msg_to_port_id(&msg))?;
            match msg {
                ChannelMsg::OpenInit(msg) => chan_open_init_validate(ctx, module, msg),
                ChannelMsg::OpenTry(msg) => chan_open_try_validate(ctx, module, msg),
                ChannelMsg::OpenAck(msg) => chan_open_ack_validate(ctx, module, msg),
                ChannelMsg::OpenConfirm(msg) => chan_open_confirm_validate(ctx, module, msg),
            }
        }
        MsgEnvelope::Packet(msg) => {
            let module = bound_module(router, packet_msg_to_port_id(&msg))?;
            match msg {
                PacketMsg::Recv(msg) => recv_packet_validate(ctx, msg),
                PacketMsg::Ack(msg) => acknowledgement_packet_validate(ctx, module, msg),
                PacketMsg::Timeout(msg) => timeout_packet_validate(ctx, module, msg),
            }
        }
    }
}

/// Applies a message [`validate`] accepted.
pub fn execute<Ctx>(
    ctx: &mut Ctx,
    router: &mut impl Router,
    msg: MsgEnvelope,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    debug!(type_url = msg.type_url(), "executing message");

    match msg {
        MsgEnvelope::Client(msg) => match ClientStep::from(msg) {
            ClientStep::Create(msg) => create_client::execute(ctx, msg),
            ClientStep::Update(msg) => update_client::execute(ctx, msg),
        },
        MsgEnvelope::Connection(ConnectionMsg::OpenInit(msg)) => conn_open_init::execute(ctx, msg),
        MsgEnvelope::Connection(ConnectionMsg::OpenTry(msg)) => conn_open_try::execute(ctx, msg),
        MsgEnvelope::Connection(ConnectionMsg::OpenAck(msg)) => conn_open_ack::execute(ctx, msg),
        MsgEnvelope::Connection(ConnectionMsg::OpenConfirm(msg)) => {
            conn_open_confirm::execute(ctx, &msg)
        }
        MsgEnvelope::Channel(msg) => {
            let module = bound_module_mut(router, channel_msg_to_port_id(&msg))?;
            match msg {
                ChannelMsg::OpenInit(msg) => chan_open_init_execute(ctx, module, msg),
                ChannelMsg::OpenTry(msg) => chan_open_try_execute(ctx, module, msg),
                ChannelMsg::OpenAck(msg) => chan_open_ack_execute(ctx, module, msg),
                ChannelMsg::OpenConfirm(msg) => chan_open_confirm_execute(ctx, module, msg),
            }
        }
        MsgEnvelope::Packet(msg) => {
            let module = bound_module_mut(router, packet_msg_to_port_id(&msg))?;
            match msg {
                PacketMsg::Recv(msg) => recv_packet_execute(ctx, module, msg),
                PacketMsg::Ack(msg) => acknowledgement_packet_execute(ctx, module, msg),
                PacketMsg::Timeout(msg) => timeout_packet_execute(ctx, module, msg),
            }
        }
    }
}

fn module_id(router: &impl Router, port_id: &PortId) -> Result<ModuleId, RouterError> {
    router
        .lookup_module(port_id)
        .ok_or_else(|| RouterError::UnknownPort {
            port_id: port_id.clone(),
        })
}

fn bound_module<'r>(router: &'r impl Router, port_id: &PortId) -> Result<&'r dyn Module, RouterError> {
    let id = module_id(router, port_id)?;
    router.get_route(&id).ok_or(RouterError::MissingModule)
}

fn bound_module_mut<'r>(
    router: &'r mut impl Router,
    port_id: &PortId,
) -> Result<&'r mut dyn Module, RouterError> {
    let id = module_id(router, port_id)?;
    router.get_route_mut(&id).ok_or(RouterError::MissingModule)
}
