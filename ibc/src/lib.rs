#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
//! This library re-exports the Inter-Blockchain Communication (IBC) core
//! modules and applications of this workspace. IBC is a distributed protocol
//! that enables communication between distinct sovereign blockchains.
//!
//! The layout of this crate mirrors the organization of the [IBC
//! Standard][ibc-standard]:
//!
//! + [Core](core) implements the transport, authentication, and ordering layers
//!   of the IBC protocol. Light client verification plugs into it through the
//!   verifier registry.
//!
//! + [Applications](apps) consists of implementations of some IBC applications.
//!   This is the part of the protocol that abstracts away the core protocol and
//!   focuses solely on business logic.
//!
//! [ibc-standard]: https://github.com/cosmos/ibc

/// Re-exports primitive types and traits from the `ibc-primitives` crate.
pub mod primitives {
    pub use ibc_primitives::*;
}

/// Re-exports implementations of all the IBC core modules.
pub mod core {
    #[doc(inline)]
    pub use ibc_core::*;
}

/// Re-exports implementations of various IBC applications.
pub mod apps {
    #[doc(inline)]
    pub use ibc_apps::*;
}
