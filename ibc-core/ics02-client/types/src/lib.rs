//! Implementation of the Client Semantics (ICS-02) data structures.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

mod client_state;
mod consensus_state;
pub mod error;
pub mod events;
mod height;
pub mod msgs;
mod status;

pub use client_state::*;
pub use consensus_state::*;
pub use height::*;
pub use status::*;

/// Re-exports ICS-02 proto types from the `ibc-proto` crate for added convenience.
pub mod proto {
    pub use ibc_proto::ibc::core::client::*;
}
