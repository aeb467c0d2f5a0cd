//! Queries over connection ends and the clients they run over.

mod query;
mod types;

pub use query::*;
pub use types::*;
