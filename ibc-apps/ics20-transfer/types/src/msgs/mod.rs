//! Messages handled by the token transfer application.
mod transfer;

pub use transfer::*;
