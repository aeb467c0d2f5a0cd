//! ICS-23: Commitment types shared between the handlers and the light client
//! verifiers. Proofs stay opaque: their scheme belongs to the verifier.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

pub mod commitment;
pub mod error;

/// Re-exports commitment proto types from the `ibc-proto` crate.
pub mod proto {
    pub use ibc_proto::ibc::core::commitment::*;
}
