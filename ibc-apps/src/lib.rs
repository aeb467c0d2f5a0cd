//! Re-exports implementations and data structures of different IBC applications.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

/// Re-exports the implementation of the IBC [fungible token
/// transfer](https://github.com/cosmos/ibc/blob/main/spec/app/ics-020-fungible-token-transfer/README.md)
/// (ICS-20) application logic.
pub mod transfer {
    #[doc(inline)]
    pub use ibc_app_transfer::*;
}
