//! Queries over the clients a host keeps of its counterparties.

mod query;
mod types;

pub use query::*;
pub use types::*;
