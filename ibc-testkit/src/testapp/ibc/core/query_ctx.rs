//! Query services of the mock store. Listings scan the keys of the pending
//! state, proofs come from committed blocks.

use core::str::FromStr;

use ibc::core::channel::types::channel::IdentifiedChannelEnd;
use ibc::core::channel::types::packet::PacketState;
use ibc::core::client::context::ClientValidationContext;
use ibc::core::client::types::{ClientState, Height};
use ibc::core::connection::types::IdentifiedConnectionEnd;
use ibc::core::handler::types::error::ContextError;
use ibc::core::host::store::types::{Height as StoreHeight, Path as StorePath};
use ibc::core::host::store::Store;
use ibc::core::host::types::identifiers::{ChannelId, ClientId, ConnectionId, PortId, Sequence};
use ibc::core::host::types::path::{
    ChannelEndPath, ClientStatePath, CommitmentPath, ConnectionPath, Path, ReceiptPath,
    CLIENT_STATE,
};
use ibc::core::host::ValidationContext;
use ibc_query::core::context::{ProvableContext, QueryContext};
use prost::Message;

use super::types::MockIbcStore;

impl MockIbcStore {
    /// Pending keys under `prefix` made of exactly `segments` segments.
    fn keys_under(&self, prefix: String, segments: usize) -> Vec<StorePath> {
        self.store
            .get_keys(&StorePath::from(prefix))
            .into_iter()
            .filter(|key| key.get(segments - 1).is_some() && key.get(segments).is_none())
            .collect()
    }
}

/// Parses the key segment at `index`, skipping keys that do not hold a
/// valid identifier there.
fn segment<T: FromStr>(key: &StorePath, index: usize) -> Option<T> {
    key.get(index).and_then(|segment| segment.parse().ok())
}

impl ProvableContext for MockIbcStore {
    fn get_proof(&self, height: Height, path: &Path) -> Option<Vec<u8>> {
        tracing::trace!(%path, %height, "building state proof");
        self.state_proof(&height).map(|proof| proof.encode_to_vec())
    }
}

impl QueryContext for MockIbcStore {
    fn client_states(&self) -> Result<Vec<(ClientId, ClientState)>, ContextError> {
        self.keys_under(ClientStatePath::prefix(), 3)
            .iter()
            .filter(|key| key.get(2).map(|s| s.as_str()) == Some(CLIENT_STATE))
            .filter_map(|key| segment::<ClientId>(key, 1))
            .map(|client_id| {
                let client_state = self.client_state(&client_id)?;
                Ok((client_id, client_state))
            })
            .collect()
    }

    fn connection_ends(&self) -> Result<Vec<IdentifiedConnectionEnd>, ContextError> {
        self.keys_under(ConnectionPath::prefix(), 2)
            .iter()
            .filter_map(|key| segment::<ConnectionId>(key, 1))
            .map(|connection_id| {
                let connection_end = self.connection_end(&connection_id)?;
                Ok(IdentifiedConnectionEnd::new(connection_id, connection_end))
            })
            .collect()
    }

    fn channel_ends(&self) -> Result<Vec<IdentifiedChannelEnd>, ContextError> {
        self.keys_under(ChannelEndPath::prefix(), 5)
            .iter()
            .filter_map(|key| Some((segment::<PortId>(key, 2)?, segment::<ChannelId>(key, 4)?)))
            .map(|(port_id, channel_id)| {
                let channel_end = self.channel_end(&ChannelEndPath::new(&port_id, &channel_id))?;
                Ok(IdentifiedChannelEnd::new(port_id, channel_id, channel_end))
            })
            .collect()
    }

    fn packet_commitments(
        &self,
        channel_end_path: &ChannelEndPath,
    ) -> Result<Vec<PacketState>, ContextError> {
        let ChannelEndPath(port_id, channel_id) = channel_end_path;

        self.keys_under(CommitmentPath::prefix(port_id, channel_id), 7)
            .iter()
            .filter_map(|key| segment::<Sequence>(key, 6))
            .map(|seq| {
                let commitment =
                    self.packet_commitment(&CommitmentPath::new(port_id, channel_id, seq))?;
                Ok(PacketState {
                    port_id: port_id.clone(),
                    chan_id: channel_id.clone(),
                    seq,
                    data: commitment.into_vec(),
                })
            })
            .collect()
    }

    fn unreceived_packets(
        &self,
        channel_end_path: &ChannelEndPath,
        sequences: impl ExactSizeIterator<Item = Sequence>,
    ) -> Result<Vec<Sequence>, ContextError> {
        let ChannelEndPath(port_id, channel_id) = channel_end_path;

        let mut unreceived = Vec::with_capacity(sequences.len());
        for seq in sequences {
            let receipt = self.packet_receipt(&ReceiptPath::new(port_id, channel_id, seq))?;
            if !receipt.is_ok() {
                unreceived.push(seq);
            }
        }

        Ok(unreceived)
    }

    fn unreceived_acks(
        &self,
        channel_end_path: &ChannelEndPath,
        sequences: impl ExactSizeIterator<Item = Sequence>,
    ) -> Result<Vec<Sequence>, ContextError> {
        let ChannelEndPath(port_id, channel_id) = channel_end_path;

        if sequences.len() == 0 {
            return Ok(self
                .packet_commitments(channel_end_path)?
                .into_iter()
                .map(|state| state.seq)
                .collect());
        }

        Ok(sequences
            .filter(|seq| {
                self.packet_commitment_store.get(
                    StoreHeight::Pending,
                    &CommitmentPath::new(port_id, channel_id, *seq),
                )
                .is_some()
            })
            .collect())
    }
}
