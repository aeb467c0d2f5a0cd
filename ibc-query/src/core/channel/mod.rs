//! Queries over channel ends, sequences and packet state.

mod query;
mod types;

pub use query::*;
pub use types::*;
