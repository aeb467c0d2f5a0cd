//! Packet timeouts, expressed on the counterparty's clock and height.
mod height;
mod timestamp;

pub use height::*;
pub use timestamp::*;
