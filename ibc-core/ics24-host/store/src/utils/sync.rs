use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub trait Async: Send + Sync + 'static {}

impl<A> Async for A where A: Send + Sync + 'static {}

pub type SharedRw<T> = Arc<RwLock<T>>;

pub trait SharedRwExt<T> {
    fn read_access(&self) -> RwLockReadGuard<'_, T>;
    fn write_access(&self) -> RwLockWriteGuard<'_, T>;
}

/// A poisoned lock still hands out the store: a panicking writer leaves
/// at most an unapplied transaction, which the operation log rolls back.
impl<T> SharedRwExt<T> for SharedRw<T> {
    fn read_access(&self) -> RwLockReadGuard<'_, T> {
        self.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_access(&self) -> RwLockWriteGuard<'_, T> {
        self.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
