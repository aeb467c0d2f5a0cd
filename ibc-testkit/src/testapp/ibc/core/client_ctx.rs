use ibc::core::client::context::{ClientExecutionContext, ClientRegistry, ClientValidationContext};
use ibc::core::client::types::error::ClientError;
use ibc::core::client::types::{ClientState, ConsensusState, Height};
use ibc::core::handler::types::error::ContextError;
use ibc::core::host::store::types::Height as StoreHeight;
use ibc::core::host::types::identifiers::ClientId;
use ibc::core::host::types::path::{
    ClientConsensusStatePath, ClientStatePath, ClientUpdateHeightPath, ClientUpdateTimePath,
};
use ibc::primitives::Timestamp;

use super::types::{store_error, MockIbcStore};

impl ClientValidationContext for MockIbcStore {
    fn client_registry(&self) -> &ClientRegistry {
        &self.client_registry
    }

    fn client_state(&self, client_id: &ClientId) -> Result<ClientState, ContextError> {
        Ok(self
            .client_state_store
            .get(StoreHeight::Pending, &ClientStatePath::new(client_id.clone()))
            .ok_or(ClientError::ClientNotFound {
                client_id: client_id.clone(),
            })?)
    }

    fn consensus_state(
        &self,
        client_cons_state_path: &ClientConsensusStatePath,
    ) -> Result<ConsensusState, ContextError> {
        let height = Height::new(
            client_cons_state_path.revision_number,
            client_cons_state_path.revision_height,
        )?;

        Ok(self
            .consensus_state_store
            .get(StoreHeight::Pending, client_cons_state_path)
            .ok_or(ClientError::ConsensusStateNotFound {
                client_id: client_cons_state_path.client_id.clone(),
                height,
            })?)
    }

    fn client_update_meta(
        &self,
        client_id: &ClientId,
        height: &Height,
    ) -> Result<(Timestamp, Height), ContextError> {
        let not_found = || ClientError::UpdateMetaNotFound {
            client_id: client_id.clone(),
            height: *height,
        };

        let processed_time = self
            .client_processed_times
            .get(
                StoreHeight::Pending,
                &ClientUpdateTimePath::new(
                    client_id.clone(),
                    height.revision_number(),
                    height.revision_height(),
                ),
            )
            .ok_or_else(not_found)?;

        let processed_height = self
            .client_processed_heights
            .get(
                StoreHeight::Pending,
                &ClientUpdateHeightPath::new(
                    client_id.clone(),
                    height.revision_number(),
                    height.revision_height(),
                ),
            )
            .ok_or_else(not_found)?;

        let processed_time =
            Timestamp::from_nanoseconds(processed_time).map_err(ClientError::Timestamp)?;

        Ok((processed_time, processed_height))
    }

    fn client_host_timestamp(&self) -> Result<Timestamp, ContextError> {
        Ok(self.latest_block()?.timestamp)
    }
}

impl ClientExecutionContext for MockIbcStore {
    fn store_client_state(
        &mut self,
        client_state_path: ClientStatePath,
        client_state: ClientState,
    ) -> Result<(), ContextError> {
        self.client_state_store
            .set(client_state_path, client_state)
            .map_err(store_error)?;

        Ok(())
    }

    fn store_consensus_state(
        &mut self,
        consensus_state_path: ClientConsensusStatePath,
        consensus_state: ConsensusState,
    ) -> Result<(), ContextError> {
        self.consensus_state_store
            .set(consensus_state_path, consensus_state)
            .map_err(store_error)?;

        Ok(())
    }

    fn store_update_meta(
        &mut self,
        client_id: ClientId,
        height: Height,
        host_timestamp: Timestamp,
        host_height: Height,
    ) -> Result<(), ContextError> {
        self.client_processed_times
            .set(
                ClientUpdateTimePath::new(
                    client_id.clone(),
                    height.revision_number(),
                    height.revision_height(),
                ),
                host_timestamp.nanoseconds(),
            )
            .map_err(store_error)?;

        self.client_processed_heights
            .set(
                ClientUpdateHeightPath::new(
                    client_id,
                    height.revision_number(),
                    height.revision_height(),
                ),
                host_height,
            )
            .map_err(store_error)?;

        Ok(())
    }
}
