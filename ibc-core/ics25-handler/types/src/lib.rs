//! Exposes the data structures shared by the IBC handlers and their callers.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

pub mod error;
pub mod events;
pub mod msgs;
