//! State of a mock host. Every IBC entry lives in one commitment store, so
//! each committed block has a root and any entry can be proven against it.

use core::time::Duration;

use ibc::core::channel::types::channel::ChannelEnd;
use ibc::core::channel::types::commitment::{AcknowledgementCommitment, PacketCommitment};
use ibc::core::client::context::ClientRegistry;
use ibc::core::client::types::{ClientState, ConsensusState, Height};
use ibc::core::commitment_types::commitment::CommitmentPrefix;
use ibc::core::connection::types::ConnectionEnd;
use ibc::core::handler::types::events::IbcEvent;
use ibc::core::host::store::types::{
    BinStore, JsonStore, MainStore, ProtobufStore, TypedSet, TypedStore,
};
use ibc::core::host::store::utils::Codec;
use ibc::core::host::store::{InMemoryStore, ProvableStore, StateProof, Store, StoreError};
use ibc::core::host::types::error::HostError;
use ibc::core::host::types::identifiers::Sequence;
use ibc::core::host::types::path::{
    AckPath, ChannelEndPath, ClientConsensusStatePath, ClientStatePath, ClientUpdateHeightPath,
    ClientUpdateTimePath, CommitmentPath, ConnectionPath, NextChannelSequencePath,
    NextClientSequencePath, NextConnectionSequencePath, ReceiptPath, SeqAckPath, SeqRecvPath,
    SeqSendPath,
};
use ibc::primitives::proto::Any;
use ibc_proto::ibc::core::channel::v1::Channel as RawChannelEnd;
use ibc_proto::ibc::core::client::v1::Height as RawHeight;
use ibc_proto::ibc::core::connection::v1::ConnectionEnd as RawConnectionEnd;
use tracing::trace;

use crate::hosts::{MockHost, MockHostBlock};

pub type MockStore = MainStore<InMemoryStore>;

pub const DEFAULT_COMMITMENT_PREFIX: &[u8] = b"ibc";

pub const DEFAULT_MAX_EXPECTED_TIME_PER_BLOCK: Duration = Duration::from_secs(30);

/// Sequences are stored the way counterparties prove them: 8 bytes,
/// big-endian.
#[derive(Clone, Debug)]
pub struct SequenceCodec;

impl Codec for SequenceCodec {
    type Type = Sequence;
    type Encoded = Vec<u8>;

    fn encode(d: &Self::Type) -> Option<Self::Encoded> {
        Some(d.to_vec())
    }

    fn decode(bytes: &[u8]) -> Option<Self::Type> {
        let bytes: [u8; 8] = bytes.try_into().ok()?;
        Some(Sequence::from(u64::from_be_bytes(bytes)))
    }
}

pub type SequenceStore<K> = TypedStore<MockStore, K, SequenceCodec>;

/// An object that stores all IBC related data.
#[derive(Debug)]
pub struct MockIbcStore {
    /// Backing store shared by every typed view below.
    pub(crate) store: MockStore,
    pub(crate) host: MockHost,
    pub(crate) client_registry: ClientRegistry,
    pub(crate) commitment_prefix: CommitmentPrefix,
    pub(crate) max_expected_time_per_block: Duration,

    pub(crate) client_counter: JsonStore<MockStore, NextClientSequencePath, u64>,
    pub(crate) client_state_store: ProtobufStore<MockStore, ClientStatePath, ClientState, Any>,
    pub(crate) consensus_state_store:
        ProtobufStore<MockStore, ClientConsensusStatePath, ConsensusState, Any>,
    /// Host time, in nanoseconds, at which each consensus state was stored
    pub(crate) client_processed_times: JsonStore<MockStore, ClientUpdateTimePath, u64>,
    /// Host height at which each consensus state was stored
    pub(crate) client_processed_heights:
        ProtobufStore<MockStore, ClientUpdateHeightPath, Height, RawHeight>,

    pub(crate) conn_counter: JsonStore<MockStore, NextConnectionSequencePath, u64>,
    pub(crate) connection_end_store:
        ProtobufStore<MockStore, ConnectionPath, ConnectionEnd, RawConnectionEnd>,

    pub(crate) channel_counter: JsonStore<MockStore, NextChannelSequencePath, u64>,
    pub(crate) channel_end_store: ProtobufStore<MockStore, ChannelEndPath, ChannelEnd, RawChannelEnd>,
    pub(crate) send_sequence_store: SequenceStore<SeqSendPath>,
    pub(crate) recv_sequence_store: SequenceStore<SeqRecvPath>,
    pub(crate) ack_sequence_store: SequenceStore<SeqAckPath>,
    pub(crate) packet_commitment_store: BinStore<MockStore, CommitmentPath, PacketCommitment>,
    /// Used by unordered channels
    pub(crate) packet_receipt_store: TypedSet<MockStore, ReceiptPath>,
    pub(crate) packet_ack_store: BinStore<MockStore, AckPath, AcknowledgementCommitment>,

    /// Emitted IBC events in order
    pub events: Vec<IbcEvent>,
    /// Logs of the IBC handlers
    pub logs: Vec<String>,
}

impl MockIbcStore {
    pub fn new(
        host: MockHost,
        client_registry: ClientRegistry,
        commitment_prefix: CommitmentPrefix,
        max_expected_time_per_block: Duration,
    ) -> Self {
        let store = MockStore::default();

        Self {
            client_counter: TypedStore::new(store.clone()),
            client_state_store: TypedStore::new(store.clone()),
            consensus_state_store: TypedStore::new(store.clone()),
            client_processed_times: TypedStore::new(store.clone()),
            client_processed_heights: TypedStore::new(store.clone()),
            conn_counter: TypedStore::new(store.clone()),
            connection_end_store: TypedStore::new(store.clone()),
            channel_counter: TypedStore::new(store.clone()),
            channel_end_store: TypedStore::new(store.clone()),
            send_sequence_store: TypedStore::new(store.clone()),
            recv_sequence_store: TypedStore::new(store.clone()),
            ack_sequence_store: TypedStore::new(store.clone()),
            packet_commitment_store: TypedStore::new(store.clone()),
            packet_receipt_store: TypedStore::new(store.clone()),
            packet_ack_store: TypedStore::new(store.clone()),
            store,
            host,
            client_registry,
            commitment_prefix,
            max_expected_time_per_block,
            events: Vec::new(),
            logs: Vec::new(),
        }
    }

    pub fn host(&self) -> &MockHost {
        &self.host
    }

    pub fn client_registry(&self) -> &ClientRegistry {
        &self.client_registry
    }

    pub fn latest_block(&self) -> Result<&MockHostBlock, HostError> {
        self.host
            .latest_block()
            .ok_or_else(|| HostError::missing_data("host has not produced any block"))
    }

    /// Commits the pending state as the next block.
    pub fn commit_block(&mut self) -> Result<MockHostBlock, HostError> {
        let root = self.store.commit().map_err(store_error)?;
        let revision_height = self.store.current_height();

        self.host.push_block(revision_height, root).cloned()
    }

    /// Accepts the writes of the transaction in flight.
    pub fn apply(&mut self) -> Result<(), HostError> {
        self.store.apply().map_err(store_error)
    }

    /// Rolls back the writes of the transaction in flight.
    pub fn reset(&mut self) {
        trace!("rolling back pending transaction");
        self.store.reset();
    }

    /// Proof of the whole state committed at `height`, valid for both
    /// membership and non-membership of any path.
    pub fn state_proof(&self, height: &Height) -> Option<StateProof> {
        if height.revision_number() != self.host.revision_number() {
            return None;
        }
        self.store.get_proof(height.revision_height().into())
    }
}

pub(crate) fn store_error(e: StoreError) -> HostError {
    match e {
        StoreError::UnknownHeight { .. } => HostError::FailedToRetrieveFromStore {
            description: e.to_string(),
        },
        _ => HostError::FailedToStoreData {
            description: e.to_string(),
        },
    }
}
