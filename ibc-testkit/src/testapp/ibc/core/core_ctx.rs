//! Host contexts of the mock store, through which the handlers read and
//! write every IBC entry.

use core::time::Duration;

use ibc::core::channel::types::channel::ChannelEnd;
use ibc::core::channel::types::commitment::{AcknowledgementCommitment, PacketCommitment};
use ibc::core::channel::types::error::ChannelError;
use ibc::core::channel::types::packet::Receipt;
use ibc::core::client::types::{ClientState, ConsensusState, Height};
use ibc::core::commitment_types::commitment::CommitmentPrefix;
use ibc::core::connection::types::error::ConnectionError;
use ibc::core::connection::types::ConnectionEnd;
use ibc::core::handler::types::error::ContextError;
use ibc::core::handler::types::events::IbcEvent;
use ibc::core::host::store::types::Height as StoreHeight;
use ibc::core::host::types::error::HostError;
use ibc::core::host::types::identifiers::{ChannelId, ConnectionId, PortId, Sequence};
use ibc::core::host::types::path::{
    AckPath, ChannelEndPath, CommitmentPath, ConnectionPath, NextChannelSequencePath,
    NextClientSequencePath, NextConnectionSequencePath, ReceiptPath, SeqAckPath, SeqRecvPath,
    SeqSendPath,
};
use ibc::core::host::{ExecutionContext, IdentifierCounter, SequenceCounter, ValidationContext};
use ibc::primitives::{Signer, Timestamp};
use tracing::debug;

use super::types::{store_error, MockIbcStore};

fn missing(what: impl core::fmt::Display) -> ContextError {
    HostError::missing_data(format!("missing {what}")).into()
}

impl ValidationContext for MockIbcStore {
    type V = Self;

    fn client_ctx(&self) -> &Self::V {
        self
    }

    fn host_height(&self) -> Result<Height, ContextError> {
        Ok(self.latest_block()?.height)
    }

    fn host_timestamp(&self) -> Result<Timestamp, ContextError> {
        Ok(self.latest_block()?.timestamp)
    }

    fn host_consensus_state(&self, height: &Height) -> Result<ConsensusState, ContextError> {
        let block = self.host.block(height).ok_or_else(|| {
            HostError::missing_data(format!("no host block at height {height}"))
        })?;

        Ok(block.clone().into_consensus_state())
    }

    fn identifier_counter(&self, counter: IdentifierCounter) -> Result<u64, ContextError> {
        let value = match counter {
            IdentifierCounter::Client => self
                .client_counter
                .get(StoreHeight::Pending, &NextClientSequencePath),
            IdentifierCounter::Connection => self
                .conn_counter
                .get(StoreHeight::Pending, &NextConnectionSequencePath),
            IdentifierCounter::Channel => self
                .channel_counter
                .get(StoreHeight::Pending, &NextChannelSequencePath),
        };
        Ok(value.unwrap_or_default())
    }

    fn connection_end(&self, conn_id: &ConnectionId) -> Result<ConnectionEnd, ContextError> {
        Ok(self
            .connection_end_store
            .get(StoreHeight::Pending, &ConnectionPath::new(conn_id))
            .ok_or(ConnectionError::ConnectionNotFound {
                connection_id: conn_id.clone(),
            })?)
    }

    fn validate_self_client(&self, client_state: ClientState) -> Result<(), ContextError> {
        let invalid = |reason: String| -> ContextError {
            ConnectionError::InvalidClientState { reason }.into()
        };

        if client_state.is_frozen() {
            return Err(invalid("client is frozen".to_string()));
        }

        let client_type = client_state.client_type();
        if !self.client_registry.contains(client_type) {
            return Err(invalid(format!("client type {client_type} cannot track this host")));
        }

        let tracked = client_state.latest_height();
        let revision = self.host.revision_number();
        if tracked.revision_number() != revision {
            return Err(invalid(format!(
                "client tracks revision {}, host is at revision {revision}",
                tracked.revision_number()
            )));
        }

        let host_height = self.host_height()?;
        if tracked > host_height {
            return Err(invalid(format!(
                "client tracks height {tracked}, host is only at {host_height}"
            )));
        }

        Ok(())
    }

    fn commitment_prefix(&self) -> CommitmentPrefix {
        self.commitment_prefix.clone()
    }

    fn channel_end(&self, path: &ChannelEndPath) -> Result<ChannelEnd, ContextError> {
        Ok(self
            .channel_end_store
            .get(StoreHeight::Pending, path)
            .ok_or(ChannelError::ChannelNotFound {
                port_id: path.0.clone(),
                channel_id: path.1.clone(),
            })?)
    }

    fn packet_sequence(
        &self,
        counter: SequenceCounter,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<Sequence, ContextError> {
        match counter {
            SequenceCounter::Send => {
                let path = SeqSendPath::new(port_id, channel_id);
                self.send_sequence_store.get(StoreHeight::Pending, &path).ok_or_else(|| missing(path))
            }
            SequenceCounter::Recv => {
                let path = SeqRecvPath::new(port_id, channel_id);
                self.recv_sequence_store.get(StoreHeight::Pending, &path).ok_or_else(|| missing(path))
            }
            SequenceCounter::Ack => {
                let path = SeqAckPath::new(port_id, channel_id);
                self.ack_sequence_store.get(StoreHeight::Pending, &path).ok_or_else(|| missing(path))
            }
        }
    }

    fn packet_commitment(&self, path: &CommitmentPath) -> Result<PacketCommitment, ContextError> {
        self.packet_commitment_store
            .get(StoreHeight::Pending, path)
            .ok_or_else(|| missing(path))
    }

    fn packet_receipt(&self, path: &ReceiptPath) -> Result<Receipt, ContextError> {
        let received = self
            .packet_receipt_store
            .is_path_set(StoreHeight::Pending, path);
        Ok(if received { Receipt::Ok } else { Receipt::None })
    }

    fn packet_acknowledgement(
        &self,
        path: &AckPath,
    ) -> Result<AcknowledgementCommitment, ContextError> {
        self.packet_ack_store
            .get(StoreHeight::Pending, path)
            .ok_or_else(|| missing(path))
    }

    fn max_expected_time_per_block(&self) -> Duration {
        self.max_expected_time_per_block
    }

    fn validate_message_signer(&self, signer: &Signer) -> Result<(), ContextError> {
        if signer.is_empty() {
            return Err(HostError::InvalidData {
                description: "empty message signer".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl ExecutionContext for MockIbcStore {
    type E = Self;

    fn client_ctx_mut(&mut self) -> &mut Self::E {
        self
    }

    fn increment_identifier_counter(
        &mut self,
        counter: IdentifierCounter,
    ) -> Result<(), ContextError> {
        let next = self.identifier_counter(counter)? + 1;
        match counter {
            IdentifierCounter::Client => self.client_counter.set(NextClientSequencePath, next),
            IdentifierCounter::Connection => self.conn_counter.set(NextConnectionSequencePath, next),
            IdentifierCounter::Channel => self.channel_counter.set(NextChannelSequencePath, next),
        }
        .map_err(store_error)?;
        Ok(())
    }

    fn store_connection(
        &mut self,
        path: &ConnectionPath,
        connection_end: ConnectionEnd,
    ) -> Result<(), ContextError> {
        self.connection_end_store
            .set(path.clone(), connection_end)
            .map_err(store_error)?;
        Ok(())
    }

    fn store_channel(&mut self, path: &ChannelEndPath, end: ChannelEnd) -> Result<(), ContextError> {
        self.channel_end_store
            .set(path.clone(), end)
            .map_err(store_error)?;
        Ok(())
    }

    fn store_packet_sequence(
        &mut self,
        counter: SequenceCounter,
        port_id: &PortId,
        channel_id: &ChannelId,
        seq: Sequence,
    ) -> Result<(), ContextError> {
        match counter {
            SequenceCounter::Send => self
                .send_sequence_store
                .set(SeqSendPath::new(port_id, channel_id), seq),
            SequenceCounter::Recv => self
                .recv_sequence_store
                .set(SeqRecvPath::new(port_id, channel_id), seq),
            SequenceCounter::Ack => self
                .ack_sequence_store
                .set(SeqAckPath::new(port_id, channel_id), seq),
        }
        .map_err(store_error)?;
        Ok(())
    }

    fn store_packet_commitment(
        &mut self,
        path: &CommitmentPath,
        commitment: PacketCommitment,
    ) -> Result<(), ContextError> {
        self.packet_commitment_store
            .set(path.clone(), commitment)
            .map_err(store_error)?;
        Ok(())
    }

    fn delete_packet_commitment(&mut self, path: &CommitmentPath) -> Result<(), ContextError> {
        self.packet_commitment_store
            .delete(path.clone())
            .map_err(store_error)?;
        Ok(())
    }

    fn store_packet_receipt(&mut self, path: &ReceiptPath) -> Result<(), ContextError> {
        self.packet_receipt_store
            .set_path(path.clone())
            .map_err(store_error)?;
        Ok(())
    }

    fn store_packet_acknowledgement(
        &mut self,
        path: &AckPath,
        commitment: AcknowledgementCommitment,
    ) -> Result<(), ContextError> {
        self.packet_ack_store
            .set(path.clone(), commitment)
            .map_err(store_error)?;
        Ok(())
    }

    fn emit_ibc_event(&mut self, event: IbcEvent) -> Result<(), ContextError> {
        self.events.push(event);
        Ok(())
    }

    fn log_message(&mut self, message: String) -> Result<(), ContextError> {
        debug!(%message, "ibc handler log");
        self.logs.push(message);
        Ok(())
    }
}
