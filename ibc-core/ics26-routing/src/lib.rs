//! ICS-26: Routing Module connects IBC applications to the core handlers.
//!
//! Applications implement [`module::Module`]. A [`router::Router`] resolves
//! the module bound to a port, and [`router::PortRouter`] is the
//! map-backed router hosts can use as is.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

pub mod module;
pub mod router;

/// Re-exports router data structures from the `ibc-core-router-types` crate
pub mod types {
    #[doc(inline)]
    pub use ibc_core_router_types::*;
}
