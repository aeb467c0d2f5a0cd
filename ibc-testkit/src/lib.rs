//! Test harness for the IBC handlers.
//!
//! [`MockContext`](context::MockContext) is a complete host chain kept in
//! memory: it runs messages through the handler entrypoint, rolls back the
//! ones that fail and commits one block per message. Two contexts connected
//! by a [`RelayerContext`](relayer::context::RelayerContext) exchange
//! headers and proofs the way a relayer would.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    rust_2018_idioms
)]

pub mod context;
pub mod hosts;
pub mod relayer;
pub mod testapp;
pub mod utils;
