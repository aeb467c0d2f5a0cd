//! This crate functions as an intermediary layer between the storage of host
//! chains and the pluggable light-client verifiers. It provides the
//! [`ClientVerifier`] trait every verification backend implements, the
//! [`ClientRegistry`] selecting a backend by client type, and the contexts
//! through which the handlers read and write client state.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

mod context;
mod registry;
mod verifier;

pub use context::*;
pub use registry::*;
pub use verifier::*;

pub mod types {
    #[doc(inline)]
    pub use ibc_core_client_types::*;
}
