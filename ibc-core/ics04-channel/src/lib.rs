//! ICS-04: Channel and Packet Semantics implementation. Processes the channel
//! open handshake and the packet lifecycle, and exports the data structures
//! of the IBC core channel module.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

pub mod handler;

/// Re-exports ICS-04 data structures from the `ibc-core-channel-types` crate
pub mod types {
    #[doc(inline)]
    pub use ibc_core_channel_types::*;
}
