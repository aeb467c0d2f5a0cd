use std::time::Duration;

use ibc_core_channel_types::channel::ChannelEnd;
use ibc_core_channel_types::commitment::{AcknowledgementCommitment, PacketCommitment};
use ibc_core_channel_types::packet::Receipt;
use ibc_core_client_context::{ClientExecutionContext, ClientValidationContext};
use ibc_core_client_types::{ClientState, ConsensusState, Height};
use ibc_core_commitment_types::commitment::CommitmentPrefix;
use ibc_core_connection_types::version::Version as ConnectionVersion;
use ibc_core_connection_types::ConnectionEnd;
use ibc_core_handler_types::error::ContextError;
use ibc_core_handler_types::events::IbcEvent;
use ibc_core_host_types::identifiers::{ChannelId, ConnectionId, PortId, Sequence};
use ibc_core_host_types::path::{AckPath, ChannelEndPath, CommitmentPath, ConnectionPath, ReceiptPath};
use ibc_primitives::{Signer, Timestamp};

use crate::utils::calculate_block_delay;

/// The counters from which fresh client, connection and channel
/// identifiers are allocated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdentifierCounter {
    Client,
    Connection,
    Channel,
}

/// The three packet sequence counters every channel end owns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequenceCounter {
    /// Sequence the next outgoing packet is assigned.
    Send,
    /// Next sequence an ORDERED end accepts.
    Recv,
    /// Next sequence an ORDERED end expects an acknowledgement for.
    Ack,
}

/// Read access to the host state.
///
/// Every handler validates a message against this view alone, so a failed
/// validation leaves the host untouched.
pub trait ValidationContext {
    type V: ClientValidationContext;

    /// The client store and the verifier registry.
    fn client_ctx(&self) -> &Self::V;

    fn host_height(&self) -> Result<Height, ContextError>;

    fn host_timestamp(&self) -> Result<Timestamp, ContextError>;

    /// What a client of this host should have stored for `height`.
    fn host_consensus_state(&self, height: &Height) -> Result<ConsensusState, ContextError>;

    /// Current value of `counter`; the next identifier of that kind uses it
    /// as its suffix.
    fn identifier_counter(&self, counter: IdentifierCounter) -> Result<u64, ContextError>;

    fn connection_end(&self, conn_id: &ConnectionId) -> Result<ConnectionEnd, ContextError>;

    /// Checks the client a counterparty keeps of this host: it must be
    /// active, of a type able to track the host and not ahead of it.
    fn validate_self_client(&self, client_state: ClientState) -> Result<(), ContextError>;

    /// Prefix of every key this host commits to.
    fn commitment_prefix(&self) -> CommitmentPrefix;

    /// Connection versions this host is able to negotiate, in order of
    /// preference.
    fn supported_connection_versions(&self) -> Vec<ConnectionVersion> {
        ConnectionVersion::compatibles()
    }

    fn channel_end(&self, path: &ChannelEndPath) -> Result<ChannelEnd, ContextError>;

    fn packet_sequence(
        &self,
        counter: SequenceCounter,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<Sequence, ContextError>;

    /// Fails with a not-found error once the packet is no longer in flight.
    fn packet_commitment(&self, path: &CommitmentPath) -> Result<PacketCommitment, ContextError>;

    /// `Receipt::None` when the packet was never received.
    fn packet_receipt(&self, path: &ReceiptPath) -> Result<Receipt, ContextError>;

    fn packet_acknowledgement(
        &self,
        path: &AckPath,
    ) -> Result<AcknowledgementCommitment, ContextError>;

    fn max_expected_time_per_block(&self) -> Duration;

    /// Blocks the host must produce before `delay` counts as elapsed.
    fn block_delay(&self, delay: &Duration) -> u64 {
        calculate_block_delay(delay, &self.max_expected_time_per_block())
    }

    /// Rejects messages whose signer the host cannot attribute.
    fn validate_message_signer(&self, signer: &Signer) -> Result<(), ContextError>;
}

/// Write access to the host state, used once validation has passed.
pub trait ExecutionContext: ValidationContext {
    type E: ClientExecutionContext;

    fn client_ctx_mut(&mut self) -> &mut Self::E;

    /// Advances `counter` past the identifier just allocated from it.
    fn increment_identifier_counter(
        &mut self,
        counter: IdentifierCounter,
    ) -> Result<(), ContextError>;

    fn store_connection(
        &mut self,
        path: &ConnectionPath,
        connection_end: ConnectionEnd,
    ) -> Result<(), ContextError>;

    fn store_channel(&mut self, path: &ChannelEndPath, end: ChannelEnd)
        -> Result<(), ContextError>;

    fn store_packet_sequence(
        &mut self,
        counter: SequenceCounter,
        port_id: &PortId,
        channel_id: &ChannelId,
        seq: Sequence,
    ) -> Result<(), ContextError>;

    fn store_packet_commitment(
        &mut self,
        path: &CommitmentPath,
        commitment: PacketCommitment,
    ) -> Result<(), ContextError>;

    fn delete_packet_commitment(&mut self, path: &CommitmentPath) -> Result<(), ContextError>;

    /// Marks the packet at `path` as received.
    fn store_packet_receipt(&mut self, path: &ReceiptPath) -> Result<(), ContextError>;

    fn store_packet_acknowledgement(
        &mut self,
        path: &AckPath,
        commitment: AcknowledgementCommitment,
    ) -> Result<(), ContextError>;

    fn emit_ibc_event(&mut self, event: IbcEvent) -> Result<(), ContextError>;

    fn log_message(&mut self, message: String) -> Result<(), ContextError>;
}
