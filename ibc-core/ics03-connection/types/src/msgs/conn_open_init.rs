use core::time::Duration;

use ibc_core_host_types::identifiers::ClientId;
use ibc_primitives::Signer;
use ibc_proto::ibc::core::connection::v1::MsgConnectionOpenInit as RawMsgConnectionOpenInit;
use ibc_proto::Protobuf;

use crate::connection::{delay_nanos, Counterparty};
use crate::error::ConnectionError;
use crate::version::Version;

pub const CONN_OPEN_INIT_TYPE_URL: &str = "/ibc.core.connection.v1.MsgConnectionOpenInit";

/// Starts a handshake on chain A. Nothing is proven yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgConnectionOpenInit {
    pub client_id_on_a: ClientId,
    pub counterparty: Counterparty,
    /// Left out to offer every version the host supports.
    pub version: Option<Version>,
    pub delay_period: Duration,
    pub signer: Signer,
}

impl Protobuf<RawMsgConnectionOpenInit> for MsgConnectionOpenInit {}

impl TryFrom<RawMsgConnectionOpenInit> for MsgConnectionOpenInit {
    type Error = ConnectionError;

    fn try_from(raw: RawMsgConnectionOpenInit) -> Result<Self, Self::Error> {
        let counterparty = Counterparty::try_from(
            raw.counterparty
                .ok_or(ConnectionError::MissingCounterparty)?,
        )?;
        counterparty.verify_empty_connection_id()?;

        Ok(Self {
            client_id_on_a: raw.client_id.parse()?,
            counterparty,
            version: raw.version.map(Version::try_from).transpose()?,
            delay_period: Duration::from_nanos(raw.delay_period),
            signer: raw.signer.into(),
        })
    }
}

impl From<MsgConnectionOpenInit> for RawMsgConnectionOpenInit {
    fn from(msg: MsgConnectionOpenInit) -> Self {
        Self {
            client_id: msg.client_id_on_a.to_string(),
            counterparty: Some(msg.counterparty.into()),
            version: msg.version.map(Into::into),
            delay_period: delay_nanos(msg.delay_period),
            signer: msg.signer.to_string(),
        }
    }
}
