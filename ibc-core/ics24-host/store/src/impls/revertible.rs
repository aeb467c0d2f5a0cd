use tracing::{error, trace};

use crate::context::{ProvableStore, Store};
use crate::error::StoreError;
use crate::proof::StateProof;
use crate::types::{Height, Path, RawHeight};

/// A wrapper store that implements rudimentary `apply()`/`reset()` support for other stores
#[derive(Clone, Debug)]
pub struct RevertibleStore<S> {
    /// backing store
    store: S,
    /// operation log for recording rollback operations in preserved order
    op_log: Vec<RevertOp>,
}

#[derive(Clone, Debug)]
enum RevertOp {
    Delete(Path),
    Set(Path, Vec<u8>),
}

impl<S> RevertibleStore<S>
where
    S: Store,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            op_log: vec![],
        }
    }

    fn record(&mut self, path: Path, old_value: Option<Vec<u8>>) {
        match old_value {
            // the path did not exist before, undo by deleting it
            None => self.op_log.push(RevertOp::Delete(path)),
            Some(old_value) => self.op_log.push(RevertOp::Set(path, old_value)),
        }
    }
}

impl<S> Default for RevertibleStore<S>
where
    S: Default + Store,
{
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S> Store for RevertibleStore<S>
where
    S: Store,
{
    #[inline]
    fn set(&mut self, path: Path, value: Vec<u8>) -> Result<Option<Vec<u8>>, StoreError> {
        let old_value = self.store.set(path.clone(), value)?;
        self.record(path, old_value.clone());
        Ok(old_value)
    }

    #[inline]
    fn get(&self, height: Height, path: &Path) -> Option<Vec<u8>> {
        self.store.get(height, path)
    }

    #[inline]
    fn delete(&mut self, path: &Path) -> Result<Option<Vec<u8>>, StoreError> {
        let old_value = self.store.delete(path)?;
        // deleting an absent key changes nothing
        if let Some(ref value) = old_value {
            self.op_log.push(RevertOp::Set(path.clone(), value.clone()));
        }
        Ok(old_value)
    }

    #[inline]
    fn commit(&mut self) -> Result<Vec<u8>, StoreError> {
        self.apply()?;
        self.store.commit()
    }

    #[inline]
    fn apply(&mut self) -> Result<(), StoreError> {
        // the backing store's apply is not called so that revertible stores can be layered
        self.op_log.clear();
        Ok(())
    }

    #[inline]
    fn reset(&mut self) {
        trace!("rollback {} operation log changes", self.op_log.len());
        while let Some(op) = self.op_log.pop() {
            // undo ops write to the backing store so they are not logged again
            let undone = match op {
                RevertOp::Delete(path) => self.store.delete(&path).map(|_| ()),
                RevertOp::Set(path, value) => self.store.set(path, value).map(|_| ()),
            };
            if let Err(e) = undone {
                error!("failed to roll back store operation: {e}");
            }
        }
    }

    #[inline]
    fn current_height(&self) -> RawHeight {
        self.store.current_height()
    }

    #[inline]
    fn get_keys(&self, key_prefix: &Path) -> Vec<Path> {
        self.store.get_keys(key_prefix)
    }
}

impl<S> ProvableStore for RevertibleStore<S>
where
    S: ProvableStore,
{
    #[inline]
    fn root_hash(&self) -> Vec<u8> {
        self.store.root_hash()
    }

    #[inline]
    fn get_proof(&self, height: Height) -> Option<StateProof> {
        self.store.get_proof(height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::InMemoryStore;

    #[test]
    fn reset_restores_state_before_the_transaction() {
        let mut store = RevertibleStore::new(InMemoryStore::default());
        let kept = Path::from("connections/connection-0");
        let updated = Path::from("channelEnds/ports/transfer/channels/channel-0");
        store.set(kept.clone(), vec![1]).unwrap();
        store.set(updated.clone(), vec![1]).unwrap();
        store.apply().unwrap();
        let root_before = store.root_hash();

        let inserted = Path::from("commitments/ports/transfer/channels/channel-0/sequences/1");
        store.set(inserted.clone(), vec![9]).unwrap();
        store.set(updated.clone(), vec![2]).unwrap();
        store.delete(&kept).unwrap();
        store.reset();

        assert_eq!(store.get(Height::Pending, &kept), Some(vec![1]));
        assert_eq!(store.get(Height::Pending, &updated), Some(vec![1]));
        assert_eq!(store.get(Height::Pending, &inserted), None);
        assert_eq!(store.root_hash(), root_before);
    }

    #[test]
    fn applied_changes_survive_reset() {
        let mut store = RevertibleStore::new(InMemoryStore::default());
        let path = Path::from("nextConnectionSequence");
        store.set(path.clone(), vec![1]).unwrap();
        store.apply().unwrap();
        store.reset();

        assert_eq!(store.get(Height::Pending, &path), Some(vec![1]));
    }
}
