//! Implementation of the ICS-26 Routing Module data structures.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

pub mod error;
pub mod event;
pub mod module;
