//! The connection end a chain stores for each connection it takes part in.

use core::fmt::{Display, Error as FmtError, Formatter};
use core::time::Duration;

use ibc_core_commitment_types::commitment::CommitmentPrefix;
use ibc_core_host_types::identifiers::{ClientId, ConnectionId};
use ibc_proto::ibc::core::connection::v1::{
    ConnectionEnd as RawConnectionEnd, Counterparty as RawCounterparty,
};
use ibc_proto::Protobuf;

use crate::error::ConnectionError;
use crate::version::Version;

/// A stored [`ConnectionEnd`] with the identifier it is stored under.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IdentifiedConnectionEnd {
    pub connection_id: ConnectionId,
    pub connection_end: ConnectionEnd,
}

impl IdentifiedConnectionEnd {
    pub fn new(connection_id: ConnectionId, connection_end: ConnectionEnd) -> Self {
        Self {
            connection_id,
            connection_end,
        }
    }
}

/// The local end of a connection.
///
/// Its protobuf encoding is what the counterparty proves membership of
/// during the handshake.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConnectionEnd {
    state: State,
    client_id: ClientId,
    counterparty: Counterparty,
    versions: Vec<Version>,
    delay_period: Duration,
}

impl Protobuf<RawConnectionEnd> for ConnectionEnd {}

impl TryFrom<RawConnectionEnd> for ConnectionEnd {
    type Error = ConnectionError;

    fn try_from(raw: RawConnectionEnd) -> Result<Self, Self::Error> {
        if raw.client_id.is_empty() {
            return Err(ConnectionError::EmptyProtoConnectionEnd);
        }
        let counterparty = raw
            .counterparty
            .ok_or(ConnectionError::MissingCounterparty)?;

        Self::new(
            State::try_from(raw.state)?,
            raw.client_id.parse()?,
            counterparty.try_into()?,
            Version::decode_list(raw.versions)?,
            Duration::from_nanos(raw.delay_period),
        )
    }
}

impl From<ConnectionEnd> for RawConnectionEnd {
    fn from(end: ConnectionEnd) -> Self {
        let delay_period = delay_nanos(end.delay_period);

        Self {
            client_id: end.client_id.to_string(),
            versions: end.versions.into_iter().map(Into::into).collect(),
            state: end.state.into(),
            counterparty: Some(end.counterparty.into()),
            delay_period,
        }
    }
}

/// Delays are carried as nanoseconds, saturating past `u64::MAX`.
pub(crate) fn delay_nanos(delay: Duration) -> u64 {
    u64::try_from(delay.as_nanos()).unwrap_or(u64::MAX)
}

impl ConnectionEnd {
    /// Past INIT an end holds exactly the negotiated version. An INIT end
    /// holds every version it would accept.
    pub fn new(
        state: State,
        client_id: ClientId,
        counterparty: Counterparty,
        versions: Vec<Version>,
        delay_period: Duration,
    ) -> Result<Self, ConnectionError> {
        let settled = versions.len() == 1;
        if state != State::Init && !settled {
            return Err(ConnectionError::InvalidVersionLength);
        }

        Ok(Self {
            state,
            client_id,
            counterparty,
            versions,
            delay_period,
        })
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == State::Open
    }

    pub fn ensure_state(&self, expected: State) -> Result<(), ConnectionError> {
        if self.state != expected {
            return Err(ConnectionError::InvalidState {
                expected: expected.to_string(),
                actual: self.state.to_string(),
            });
        }
        Ok(())
    }

    pub fn with_state(self, state: State) -> Self {
        Self { state, ..self }
    }

    /// The INIT end once the counterparty's TRYOPEN end has been proven:
    /// OPEN, pointing at `remote_conn_id`, on the version the counterparty
    /// picked.
    pub fn acknowledged(self, remote_conn_id: ConnectionId, version: Version) -> Self {
        Self {
            state: State::Open,
            counterparty: Counterparty {
                connection_id: Some(remote_conn_id),
                ..self.counterparty
            },
            versions: vec![version],
            ..self
        }
    }

    /// The client on this chain that tracks the counterparty.
    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    /// The single negotiated version of a connection past INIT.
    pub fn version(&self) -> Result<&Version, ConnectionError> {
        match &self.versions[..] {
            [only] => Ok(only),
            _ => Err(ConnectionError::InvalidVersionLength),
        }
    }

    pub fn counterparty(&self) -> &Counterparty {
        &self.counterparty
    }

    /// How long a proof must sit on the client before packets may use it.
    pub fn delay_period(&self) -> Duration {
        self.delay_period
    }
}

/// The remote end of a connection, as far as this chain knows it.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Counterparty {
    pub client_id: ClientId,
    pub connection_id: Option<ConnectionId>,
    pub prefix: CommitmentPrefix,
}

impl Protobuf<RawCounterparty> for Counterparty {}

impl TryFrom<RawCounterparty> for Counterparty {
    type Error = ConnectionError;

    fn try_from(raw: RawCounterparty) -> Result<Self, Self::Error> {
        let connection_id = if raw.connection_id.is_empty() {
            None
        } else {
            Some(raw.connection_id.parse()?)
        };
        let prefix = CommitmentPrefix::try_from(
            raw.prefix.ok_or(ConnectionError::MissingCounterparty)?,
        )
        .map_err(|_| ConnectionError::InvalidCounterparty)?;

        Ok(Self::new(raw.client_id.parse()?, connection_id, prefix))
    }
}

impl From<Counterparty> for RawCounterparty {
    fn from(counterparty: Counterparty) -> Self {
        Self {
            client_id: counterparty.client_id.to_string(),
            connection_id: counterparty
                .connection_id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            prefix: Some(counterparty.prefix.into()),
        }
    }
}

impl Counterparty {
    pub fn new(
        client_id: ClientId,
        connection_id: Option<ConnectionId>,
        prefix: CommitmentPrefix,
    ) -> Self {
        Self {
            client_id,
            connection_id,
            prefix,
        }
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Unset until the counterparty has created its end.
    pub fn connection_id(&self) -> Option<&ConnectionId> {
        self.connection_id.as_ref()
    }

    pub fn prefix(&self) -> &CommitmentPrefix {
        &self.prefix
    }

    /// A handshake starts before the counterparty end exists.
    pub(crate) fn verify_empty_connection_id(&self) -> Result<(), ConnectionError> {
        match self.connection_id {
            None => Ok(()),
            Some(_) => Err(ConnectionError::InvalidCounterparty),
        }
    }
}

/// How far the handshake got on this end. Stored ends are never
/// uninitialized, so the protobuf zero value does not decode.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum State {
    Init = 1,
    TryOpen = 2,
    Open = 3,
}

impl State {
    const ALL: [State; 3] = [State::Init, State::TryOpen, State::Open];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "INIT",
            Self::TryOpen => "TRYOPEN",
            Self::Open => "OPEN",
        }
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        f.write_str(self.as_str())
    }
}

impl TryFrom<i32> for State {
    type Error = ConnectionError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|state| i32::from(*state) == value)
            .ok_or_else(|| ConnectionError::InvalidState {
                expected: "INIT, TRYOPEN or OPEN".to_string(),
                actual: value.to_string(),
            })
    }
}

impl From<State> for i32 {
    fn from(state: State) -> Self {
        state as i32
    }
}
