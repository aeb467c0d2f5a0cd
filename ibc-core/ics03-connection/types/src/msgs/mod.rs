//! Message definitions for the connection handshake datagrams.
//!
//! Each of the four handshake messages is a `struct` carrying the fields of
//! the corresponding datagram. The three counterparty fields (connection id,
//! prefix and client id) of `MsgConnectionOpenInit` and
//! `MsgConnectionOpenTry` are grouped into a single `Counterparty`.

mod conn_open_ack;
mod conn_open_confirm;
mod conn_open_init;
mod conn_open_try;

pub use conn_open_ack::*;
pub use conn_open_confirm::*;
pub use conn_open_init::*;
pub use conn_open_try::*;
use ibc_core_client_types::Height;
use ibc_core_commitment_types::commitment::CommitmentProofBytes;
use ibc_proto::ibc::core::client::v1::Height as RawHeight;

use crate::error::ConnectionError;

/// Enumeration of all possible messages that the ICS3 protocol processes.
#[derive(Clone, Debug, PartialEq, Eq, derive_more::From)]
pub enum ConnectionMsg {
    OpenInit(MsgConnectionOpenInit),
    OpenTry(MsgConnectionOpenTry),
    OpenAck(MsgConnectionOpenAck),
    OpenConfirm(MsgConnectionOpenConfirm),
}

fn proof(bytes: Vec<u8>) -> Result<CommitmentProofBytes, ConnectionError> {
    CommitmentProofBytes::try_from(bytes).map_err(|_| ConnectionError::InvalidProof)
}

/// A zero or absent height fails with `missing`.
fn height(raw: Option<RawHeight>, missing: ConnectionError) -> Result<Height, ConnectionError> {
    raw.and_then(|raw| Height::try_from(raw).ok()).ok_or(missing)
}
