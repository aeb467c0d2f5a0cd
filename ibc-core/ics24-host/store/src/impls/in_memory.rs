use tracing::trace;

use crate::context::{ProvableStore, Store};
use crate::error::StoreError;
use crate::proof::{leaf_hash, root_from_leaves, StateProof};
use crate::types::{Height, Path, RawHeight, State};

/// An in-memory store keeping a snapshot of every committed block.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    /// collection of states corresponding to every committed block height
    store: Vec<State>,
    /// pending block state
    pending: State,
}

impl InMemoryStore {
    #[inline]
    fn get_state(&self, height: Height) -> Option<&State> {
        match height {
            Height::Pending => Some(&self.pending),
            Height::Latest => self.store.last(),
            Height::Stable(0) => None,
            Height::Stable(height) => self.store.get(height as usize - 1),
        }
    }

    fn leaves(state: &State) -> Vec<Vec<u8>> {
        state
            .iter()
            .map(|(path, value)| leaf_hash(&path.to_bytes(), value))
            .collect()
    }
}

impl Store for InMemoryStore {
    fn set(&mut self, path: Path, value: Vec<u8>) -> Result<Option<Vec<u8>>, StoreError> {
        trace!("set at path = {path}");
        Ok(self.pending.insert(path, value))
    }

    fn get(&self, height: Height, path: &Path) -> Option<Vec<u8>> {
        trace!("get at path = {path} at height = {height}");
        self.get_state(height).and_then(|v| v.get(path).cloned())
    }

    fn delete(&mut self, path: &Path) -> Result<Option<Vec<u8>>, StoreError> {
        trace!("delete at path = {path}");
        Ok(self.pending.remove(path))
    }

    fn commit(&mut self) -> Result<Vec<u8>, StoreError> {
        trace!("committing height: {}", self.store.len() + 1);
        self.store.push(self.pending.clone());
        Ok(self.root_hash())
    }

    fn current_height(&self) -> RawHeight {
        self.store.len() as RawHeight
    }

    fn get_keys(&self, key_prefix: &Path) -> Vec<Path> {
        self.pending
            .keys()
            .filter(|key| key.starts_with(key_prefix))
            .cloned()
            .collect()
    }
}

impl ProvableStore for InMemoryStore {
    fn root_hash(&self) -> Vec<u8> {
        root_from_leaves(Self::leaves(&self.pending).iter())
    }

    fn get_proof(&self, height: Height) -> Option<StateProof> {
        trace!("get proof at height = {height}");
        self.get_state(height).map(|state| StateProof {
            leaves: Self::leaves(state),
        })
    }
}
