//! Two connected mock hosts shared by the integration tests.

use std::time::Duration;

use ibc::core::channel::types::channel::Order;
use ibc::core::channel::types::timeout::TimeoutTimestamp;
use ibc::core::host::types::error::ErrorKind;
use ibc::core::host::types::identifiers::{ChannelId, ClientId, ConnectionId, PortId};
use ibc::core::router::types::module::ModuleId;
use ibc::primitives::Signer;
use ibc_testkit::context::MockContext;
use ibc_testkit::relayer::context::RelayerContext;
use ibc_testkit::relayer::error::RelayerError;
use ibc_testkit::testapp::ibc::applications::module::{MockModule, MOCK_MODULE_ID};
use ibc_testkit::testapp::ibc::core::configs::MockContextConfig;
use ibc_testkit::utils::dummy_account_id;
use rstest::fixture;

pub fn signer() -> Signer {
    dummy_account_id()
}

pub fn mock_port() -> PortId {
    PortId::new(MOCK_MODULE_ID.to_string()).expect("Never fails")
}

pub fn host(host_id: &str) -> MockContext {
    MockContextConfig::builder().host_id(host_id).build()
}

/// Kind of the host error a failed relay step ran into.
pub fn error_kind(err: &RelayerError) -> Option<ErrorKind> {
    err.context_error().map(|e| e.kind())
}

/// A timestamp timeout `secs` seconds past the latest block of `ctx`.
pub fn timeout_after(ctx: &MockContext, secs: u64) -> TimeoutTimestamp {
    let timestamp = (ctx.latest_timestamp() + Duration::from_secs(secs)).expect("Never fails");
    TimeoutTimestamp::At(timestamp)
}

/// Hosts `A` and `B`, each tracking the other with a client, joined by an
/// open connection.
#[derive(Debug)]
pub struct Connected {
    pub relayer: RelayerContext,
    pub client_id_on_a: ClientId,
    pub client_id_on_b: ClientId,
    pub conn_id_on_a: ConnectionId,
    pub conn_id_on_b: ConnectionId,
}

impl Connected {
    pub fn new(ctx_a: MockContext, ctx_b: MockContext) -> Result<Self, RelayerError> {
        Self::with_delay(ctx_a, ctx_b, Duration::ZERO)
    }

    /// Same as [`Connected::new`], with packets waiting `delay_period` after
    /// the client update carrying their proof.
    pub fn with_delay(
        ctx_a: MockContext,
        ctx_b: MockContext,
        delay_period: Duration,
    ) -> Result<Self, RelayerError> {
        let mut relayer = RelayerContext::new(ctx_a, ctx_b);

        let client_id_on_a = relayer.create_client_on_a(signer())?;
        let client_id_on_b = relayer.create_client_on_b(signer())?;

        let (conn_id_on_a, conn_id_on_b) = relayer.create_connection_on_a(
            client_id_on_a.clone(),
            client_id_on_b.clone(),
            delay_period,
            signer(),
        )?;

        Ok(Self {
            relayer,
            client_id_on_a,
            client_id_on_b,
            conn_id_on_a,
            conn_id_on_b,
        })
    }

    /// Binds a [`MockModule`] to `port_id` on both hosts. Returns the
    /// handles of `A`'s and `B`'s module.
    pub fn bind_mock_modules(&mut self, port_id: &PortId) -> (MockModule, MockModule) {
        let module_a = MockModule::new();
        let module_b = MockModule::new();

        self.relayer
            .get_ctx_a_mut()
            .add_module(
                ModuleId::new(MOCK_MODULE_ID.to_string()),
                port_id.clone(),
                module_a.clone(),
            )
            .expect("port is free");
        self.relayer
            .get_ctx_b_mut()
            .add_module(
                ModuleId::new(MOCK_MODULE_ID.to_string()),
                port_id.clone(),
                module_b.clone(),
            )
            .expect("port is free");

        (module_a, module_b)
    }

    /// Opens a channel between `port_id` on both hosts.
    pub fn open_channel(
        &mut self,
        port_id: &PortId,
        ordering: Order,
    ) -> Result<(ChannelId, ChannelId), RelayerError> {
        self.relayer.create_channel_on_a(
            self.conn_id_on_a.clone(),
            port_id.clone(),
            self.conn_id_on_b.clone(),
            port_id.clone(),
            ordering,
            signer(),
        )
    }
}

#[fixture]
pub fn connected() -> Connected {
    Connected::new(host("mock-a"), host("mock-b")).expect("handshake succeeds")
}
