use std::collections::BTreeMap;
use std::fmt::Debug;
use std::marker::PhantomData;

use crate::context::Store;
use crate::error::StoreError;
use crate::impls::{RevertibleStore, SharedStore};
use crate::types::{Height, Path, RawHeight};
use crate::utils::codec::{BinCodec, JsonCodec, NullCodec, ProtobufCodec};
use crate::utils::Codec;

/// A snapshot of the store at one block. Values are raw bytes so each typed
/// view picks its own encoding.
pub type State = BTreeMap<Path, Vec<u8>>;

pub type MainStore<S> = SharedStore<RevertibleStore<S>>;

/// A `TypedStore` that uses the `JsonCodec`
pub type JsonStore<S, K, V> = TypedStore<S, K, JsonCodec<V>>;

/// A `TypedStore` that uses the `ProtobufCodec`
pub type ProtobufStore<S, K, V, R> = TypedStore<S, K, ProtobufCodec<V, R>>;

/// A `TypedSet` that stores only paths and no values
pub type TypedSet<S, K> = TypedStore<S, K, NullCodec>;

/// A `TypedStore` that uses the `BinCodec`
pub type BinStore<S, K, V> = TypedStore<S, K, BinCodec<V>>;

/// View of a store restricted to keys of type `K` and values encoded by `C`.
#[derive(Clone, Debug)]
pub struct TypedStore<S, K, C> {
    store: S,
    _key: PhantomData<K>,
    _codec: PhantomData<C>,
}

impl<S, K, C, V> TypedStore<S, K, C>
where
    S: Store,
    C: Codec<Type = V>,
    K: Into<Path> + Clone,
{
    #[inline]
    pub fn new(store: S) -> Self {
        Self {
            store,
            _codec: PhantomData,
            _key: PhantomData,
        }
    }

    #[inline]
    pub fn set(&mut self, path: K, value: V) -> Result<Option<V>, StoreError> {
        let path: Path = path.into();
        let encoded = C::encode(&value).ok_or_else(|| StoreError::FailedToEncode {
            path: path.to_string(),
        })?;

        self.store
            .set(path, encoded.as_ref().to_vec())
            .map(|prev_val| prev_val.and_then(|v| C::decode(&v)))
    }

    #[inline]
    pub fn delete(&mut self, path: K) -> Result<(), StoreError> {
        self.store.delete(&path.into()).map(|_| ())
    }

    #[inline]
    pub fn get(&self, height: Height, path: &K) -> Option<V> {
        self.store
            .get(height, &path.clone().into())
            .and_then(|v| C::decode(&v))
    }

    #[inline]
    pub fn get_keys(&self, key_prefix: &Path) -> Vec<Path> {
        self.store.get_keys(key_prefix)
    }

    #[inline]
    pub fn current_height(&self) -> RawHeight {
        self.store.current_height()
    }
}

impl<S, K> TypedStore<S, K, NullCodec>
where
    S: Store,
    K: Into<Path> + Clone,
{
    #[inline]
    pub fn set_path(&mut self, path: K) -> Result<(), StoreError> {
        self.store
            .set(path.into(), NullCodec::ENCODED.to_vec())
            .map(|_| ())
    }

    #[inline]
    pub fn is_path_set(&self, height: Height, path: &K) -> bool {
        self.store.get(height, &path.clone().into()).is_some()
    }
}

#[cfg(test)]
mod tests {
    use ibc_core_host_types::identifiers::{ChannelId, PortId};
    use ibc_core_host_types::path::SeqSendPath;

    use super::*;
    use crate::impls::InMemoryStore;

    #[test]
    fn typed_views_share_the_backing_store() {
        let shared = MainStore::<InMemoryStore>::default();
        let path = SeqSendPath::new(&PortId::transfer(), &ChannelId::new(0));

        let mut writer: JsonStore<_, SeqSendPath, u64> = TypedStore::new(shared.clone());
        let reader: JsonStore<_, SeqSendPath, u64> = TypedStore::new(shared);

        writer.set(path.clone(), 7).unwrap();
        assert_eq!(reader.get(Height::Pending, &path), Some(7));
        assert_eq!(reader.get(Height::Latest, &path), None);
    }

    #[test]
    fn typed_set_only_tracks_presence() {
        let mut set: TypedSet<InMemoryStore, Path> = TypedStore::new(InMemoryStore::default());
        let path = Path::from("receipts/ports/transfer/channels/channel-0/sequences/1");

        assert!(!set.is_path_set(Height::Pending, &path));
        set.set_path(path.clone()).unwrap();
        assert!(set.is_path_set(Height::Pending, &path));
    }
}
