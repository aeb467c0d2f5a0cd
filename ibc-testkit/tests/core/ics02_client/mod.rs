pub mod create_client;
pub mod update_client;

use ibc::core::client::types::events::ClientEventKind;
use ibc::core::client::types::msgs::{ClientMsg, MsgCreateClient};
use ibc::core::handler::types::events::IbcEvent;
use ibc::core::handler::types::msgs::MsgEnvelope;
use ibc::core::host::types::identifiers::ClientId;
use ibc_testkit::context::MockContext;
use ibc_testkit::relayer::error::RelayerError;
use ibc_testkit::testapp::ibc::clients::mock::client_state::MockClientConfig;

use crate::setup::signer;

pub fn msg_create_client(config: MockClientConfig) -> MsgEnvelope {
    let (client_state, consensus_state) = config.into_states();

    MsgEnvelope::Client(ClientMsg::CreateClient(MsgCreateClient::new(
        client_state,
        consensus_state,
        signer(),
    )))
}

/// Creates a client on `ctx` and returns its identifier.
pub fn create_client(
    ctx: &mut MockContext,
    config: MockClientConfig,
) -> Result<ClientId, RelayerError> {
    let events = ctx.deliver(msg_create_client(config))?;

    events
        .into_iter()
        .find_map(|event| match event {
            IbcEvent::Client(e) if e.kind == ClientEventKind::Created => Some(e.client_id),
            _ => None,
        })
        .ok_or(RelayerError::MissingEvent {
            expected: "create_client".to_string(),
        })
}
