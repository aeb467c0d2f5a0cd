//! Exposes the traits a host chain implements to run the IBC handlers: one
//! read-only context used during validation and one read-write context used
//! during execution.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

mod context;
pub mod utils;

pub use context::*;

pub mod types {
    #[doc(inline)]
    pub use ibc_core_host_types::*;
}
