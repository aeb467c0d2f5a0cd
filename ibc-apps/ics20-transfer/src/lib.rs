//! Implementation of the [fungible token transfer module](https://github.com/cosmos/ibc/blob/main/spec/app/ics-020-fungible-token-transfer/README.md)
//! (ICS-20) application logic.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

pub mod allow_list;
pub mod context;
pub mod handler;
pub mod module;
pub mod voucher;

/// Re-exports the implementation of the IBC [fungible token
/// transfer](https://github.com/cosmos/ibc/blob/main/spec/app/ics-020-fungible-token-transfer/README.md)
/// (ICS-20) data structures.
pub mod types {
    #[doc(inline)]
    pub use ibc_app_transfer_types::*;
}
