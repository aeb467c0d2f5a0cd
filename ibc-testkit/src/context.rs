use core::fmt::Debug;

use ibc::apps::transfer::context::TokenTransferExecutionContext;
use ibc::apps::transfer::handler::send_transfer;
use ibc::apps::transfer::module::TransferModule;
use ibc::apps::transfer::types::error::TokenTransferError;
use ibc::apps::transfer::types::msgs::MsgTransfer;
use ibc::apps::transfer::types::MODULE_ID_STR;
use ibc::core::channel::handler::send_packet;
use ibc::core::channel::types::packet::Packet;
use ibc::core::client::types::Height;
use ibc::core::entrypoint::dispatch;
use ibc::core::handler::types::error::ContextError;
use ibc::core::handler::types::events::IbcEvent;
use ibc::core::handler::types::msgs::MsgEnvelope;
use ibc::core::host::types::identifiers::PortId;
use ibc::core::router::module::Module;
use ibc::core::router::router::PortRouter;
use ibc::core::router::types::error::RouterError;
use ibc::core::router::types::module::ModuleId;
use ibc::primitives::Timestamp;
use tracing::{debug, warn};

use crate::hosts::{MockHost, MockHostBlock};
use crate::relayer::error::RelayerError;
use crate::testapp::ibc::clients::mock::header::MockHeader;
use crate::testapp::ibc::core::configs::MockContextConfig;
use crate::testapp::ibc::core::types::MockIbcStore;

/// A host chain in memory: the IBC store, the applications bound to its
/// ports and the log of blocks committed so far.
///
/// Every transaction runs against the pending state. A successful one is
/// committed as a new block, a failed one leaves neither state nor events
/// behind.
#[derive(Debug)]
pub struct MockContext {
    /// An object that stores all IBC related data.
    pub ibc_store: MockIbcStore,

    /// A router that can route messages to the appropriate IBC application.
    pub ibc_router: PortRouter,
}

/// Returns a MockContext with bare minimum initialization: no clients, no
/// connections and no channels are present, and the chain has Height(5).
impl Default for MockContext {
    fn default() -> Self {
        MockContextConfig::builder().build()
    }
}

impl MockContext {
    pub fn new(ibc_store: MockIbcStore) -> Self {
        Self {
            ibc_store,
            ibc_router: PortRouter::new(),
        }
    }

    pub fn ibc_store(&self) -> &MockIbcStore {
        &self.ibc_store
    }

    pub fn ibc_store_mut(&mut self) -> &mut MockIbcStore {
        &mut self.ibc_store
    }

    pub fn host(&self) -> &MockHost {
        self.ibc_store.host()
    }

    pub fn host_block(&self, target_height: &Height) -> Option<&MockHostBlock> {
        self.host().block(target_height)
    }

    pub fn latest_block(&self) -> &MockHostBlock {
        self.ibc_store.latest_block().expect("Never fails")
    }

    pub fn latest_height(&self) -> Height {
        self.latest_block().height()
    }

    pub fn latest_timestamp(&self) -> Timestamp {
        self.latest_block().timestamp()
    }

    /// Header a counterparty client needs to learn the latest block.
    pub fn latest_header(&self) -> MockHeader {
        self.latest_block().clone().into_header()
    }

    /// Commits the pending state as a new block.
    pub fn advance_block(&mut self) {
        let block = self.ibc_store.commit_block().expect("Never fails");
        debug!(height = %block.height, "block committed");
    }

    pub fn advance_block_up_to(mut self, target_height: Height) -> Self {
        let latest_height = self.latest_height();
        if target_height.revision_number() != latest_height.revision_number() {
            panic!("Cannot advance history of the chain to a different revision number!")
        } else if target_height.revision_height() < latest_height.revision_height() {
            panic!("Cannot rewind history of the chain to a smaller revision height!")
        }

        while self.latest_height().revision_height() < target_height.revision_height() {
            self.advance_block()
        }
        self
    }

    /// Registers `module` under `module_id` and binds `port_id` to it.
    pub fn add_module(
        &mut self,
        module_id: ModuleId,
        port_id: PortId,
        module: impl Module + 'static,
    ) -> Result<(), RouterError> {
        self.ibc_router.add_route(module_id.clone(), module)?;
        self.ibc_router.bind_port(port_id, module_id)
    }

    /// Binds the `transfer` port to a transfer application over `token_ctx`.
    pub fn add_transfer_module<C>(&mut self, token_ctx: C) -> Result<(), RouterError>
    where
        C: TokenTransferExecutionContext + Debug + 'static,
    {
        self.add_module(
            ModuleId::new(MODULE_ID_STR.to_string()),
            PortId::transfer(),
            TransferModule::new(token_ctx),
        )
    }

    /// Runs `tx` as one atomic transaction.
    ///
    /// On success the writes are committed as a new block and the events the
    /// transaction emitted are returned. On failure the pending writes are
    /// dropped, along with any event or log line emitted before the error.
    pub fn transact<E>(
        &mut self,
        tx: impl FnOnce(&mut MockIbcStore, &mut PortRouter) -> Result<(), E>,
    ) -> Result<Vec<IbcEvent>, E>
    where
        E: From<ContextError>,
    {
        let events_before = self.ibc_store.events.len();
        let logs_before = self.ibc_store.logs.len();

        match tx(&mut self.ibc_store, &mut self.ibc_router) {
            Ok(()) => {
                self.ibc_store
                    .apply()
                    .map_err(|e| E::from(ContextError::from(e)))?;
                self.ibc_store
                    .commit_block()
                    .map_err(|e| E::from(ContextError::from(e)))?;
                Ok(self.ibc_store.events[events_before..].to_vec())
            }
            Err(e) => {
                warn!("transaction failed, rolling back");
                self.ibc_store.reset();
                self.ibc_store.events.truncate(events_before);
                self.ibc_store.logs.truncate(logs_before);
                Err(e)
            }
        }
    }

    /// A datagram passes from the relayer to the IBC module (on host chain).
    /// Returns the events it emitted.
    pub fn deliver(&mut self, msg: MsgEnvelope) -> Result<Vec<IbcEvent>, RelayerError> {
        self.transact(|store, router| dispatch(store, router, msg))
            .map_err(RelayerError::TransactionFailed)
    }

    /// Commits `packet` on this chain on behalf of an application.
    pub fn send_packet(&mut self, packet: Packet) -> Result<Vec<IbcEvent>, ContextError> {
        self.transact(|store, _| send_packet(store, packet))
    }

    /// Runs a user's `MsgTransfer` against `token_ctx`.
    ///
    /// The token context is not rolled back with the IBC store, so it must
    /// only be written once the transfer has been validated. `send_transfer`
    /// validates the whole transfer before touching either.
    pub fn send_transfer<C>(
        &mut self,
        token_ctx: &mut C,
        msg: MsgTransfer,
    ) -> Result<Vec<IbcEvent>, TokenTransferError>
    where
        C: TokenTransferExecutionContext,
    {
        self.transact(|store, _| send_transfer(store, token_ctx, msg))
    }

    pub fn get_events(&self) -> Vec<IbcEvent> {
        self.ibc_store.events.clone()
    }

    pub fn get_logs(&self) -> Vec<String> {
        self.ibc_store.logs.clone()
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use ibc::core::client::types::msgs::{ClientMsg, MsgCreateClient};
    use ibc::core::host::ValidationContext;
    use test_log::test;

    use super::*;
    use crate::testapp::ibc::clients::mock::client_state::MockClientConfig;
    use crate::utils::dummy_account_id;

    fn height(h: u64) -> Height {
        Height::new(0, h).expect("Never fails")
    }

    #[test]
    fn default_context_has_five_blocks() {
        let ctx = MockContext::default();

        assert_eq!(ctx.latest_height(), height(5));
        assert_eq!(ctx.host().history().len(), 5);
        assert_eq!(
            ctx.ibc_store().host_height().expect("Never fails"),
            ctx.latest_height()
        );
    }

    #[test]
    fn blocks_are_spaced_by_the_configured_block_time() {
        let ctx: MockContext = MockContextConfig::builder()
            .latest_height(height(3))
            .block_time(Duration::from_secs(10))
            .build();

        let first = ctx.host_block(&height(1)).expect("Never fails").timestamp;
        assert_eq!(
            ctx.latest_timestamp().duration_since(&first),
            Some(Duration::from_secs(20))
        );
    }

    #[test]
    fn advancing_produces_consecutive_blocks() {
        let ctx = MockContext::default().advance_block_up_to(height(9));

        assert_eq!(ctx.latest_height(), height(9));
        assert_eq!(ctx.latest_header().height(), height(9));
    }

    #[test]
    fn failed_transaction_leaves_no_trace() {
        let mut ctx = MockContext::default();
        let start = ctx.latest_height();

        let result: Result<_, ContextError> = ctx.transact(|store, _| {
            store.logs.push("about to fail".to_string());
            Err(ContextError::HostError(
                ibc::core::host::types::error::HostError::Other {
                    description: "boom".to_string(),
                },
            ))
        });

        assert!(result.is_err());
        assert_eq!(ctx.latest_height(), start);
        assert!(ctx.get_logs().is_empty());
    }

    #[test]
    fn delivered_message_commits_a_block() {
        let mut ctx = MockContext::default();
        let start = ctx.latest_height();

        let (client_state, consensus_state) = MockClientConfig::builder()
            .latest_header(ctx.latest_header())
            .build()
            .into_states();
        let msg = MsgEnvelope::Client(ClientMsg::CreateClient(MsgCreateClient::new(
            client_state,
            consensus_state,
            dummy_account_id(),
        )));

        let events = ctx.deliver(msg).expect("Never fails");

        assert_eq!(ctx.latest_height(), start.increment());
        assert!(events
            .iter()
            .any(|event| event.event_type() == "create_client"));
    }
}
