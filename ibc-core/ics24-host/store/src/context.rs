use crate::error::StoreError;
use crate::proof::StateProof;
use crate::types::{Height, Path, RawHeight};
use crate::utils::Async;

/// Versioned key/value store. Writes go to the pending state, reads pick a
/// committed snapshot or the pending state through [`Height`].
pub trait Store: Async + Clone {
    /// Set `value` for `path`, returning the value it replaced.
    fn set(&mut self, path: Path, value: Vec<u8>) -> Result<Option<Vec<u8>>, StoreError>;

    /// Get associated `value` for `path` at specified `height`
    fn get(&self, height: Height, path: &Path) -> Option<Vec<u8>>;

    /// Delete specified `path`, returning the value it held.
    fn delete(&mut self, path: &Path) -> Result<Option<Vec<u8>>, StoreError>;

    /// Commit the pending state as a new block and return its root hash.
    fn commit(&mut self) -> Result<Vec<u8>, StoreError>;

    /// Accept every change made since the last `apply` or `reset`.
    fn apply(&mut self) -> Result<(), StoreError> {
        Ok(())
    }

    /// Roll back every change made since the last `apply` or `reset`.
    fn reset(&mut self) {}

    /// Return the current height of the chain
    fn current_height(&self) -> RawHeight;

    /// Return all pending keys that start with the segments of `key_prefix`
    fn get_keys(&self, key_prefix: &Path) -> Vec<Path>;
}

/// A store that commits to its content with a root hash.
pub trait ProvableStore: Store {
    /// Root hash of the pending state
    fn root_hash(&self) -> Vec<u8>;

    /// Proof against the root of the state committed at `height`, valid for
    /// both the presence and the absence of any key.
    fn get_proof(&self, height: Height) -> Option<StateProof>;
}
