//! ICS-03: Connection Semantics implementation to process connection open
//! handshake. Exports data structures and implementations of IBC core
//! connection module.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

pub mod delay;
pub mod handler;

/// Re-exports ICS-03 data structures from the `ibc-core-connection-types` crate
pub mod types {
    #[doc(inline)]
    pub use ibc_core_connection_types::*;
}
