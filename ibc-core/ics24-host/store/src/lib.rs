//! In-memory commitment store used by IBC hosts.
//!
//! [`InMemoryStore`] keeps one snapshot per committed block plus a pending
//! state that transactions write to. [`RevertibleStore`] records an undo log
//! so a failed transaction can be rolled back with [`Store::reset`], and
//! [`SharedStore`] lets several [`TypedStore`] views write to the same
//! backing store.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

pub mod context;
pub mod error;
pub mod impls;
pub mod proof;
pub mod types;
pub mod utils;

pub use context::{ProvableStore, Store};
pub use error::StoreError;
pub use impls::{InMemoryStore, RevertibleStore, SharedStore};
pub use proof::StateProof;
