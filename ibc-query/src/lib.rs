//! Read-only queries over the IBC state of a host chain.
//!
//! A host exposes its state to relayers and other off-chain readers by
//! implementing two traits on top of its
//! [`ValidationContext`](ibc::core::host::ValidationContext):
//! - [`ProvableContext`](crate::core::context::ProvableContext) hands out
//!   proofs for store paths at a given height,
//! - [`QueryContext`](crate::core::context::QueryContext) enumerates the
//!   stored clients, connections, channels and packet state.
//!
//! The query functions under [`core`] then answer the client, connection and
//! channel queries, attaching a proof to every single-object response.
//!
//! ```rust,ignore
//! use ibc_query::core::channel::{query_channel, QueryChannelRequest};
//!
//! let response = query_channel(&host, &QueryChannelRequest {
//!     port_id: PortId::transfer(),
//!     channel_id: ChannelId::new(0),
//!     query_height: None,
//! })?;
//! relayer.submit_chan_open_try(response.channel, response.proof, response.proof_height);
//! ```
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

pub mod core;
pub mod error;
pub mod types;
