//! Channel ends and the values they move through during the handshake.

use core::fmt::{Display, Formatter, Result as FmtResult};
use core::str::FromStr;

use ibc_core_host_types::identifiers::{ChannelId, ConnectionId, PortId};
use ibc_proto::ibc::core::channel::v1::{Channel as RawChannel, Counterparty as RawCounterparty};
use ibc_proto::Protobuf;

use crate::error::ChannelError;
use crate::Version;

/// A stored [`ChannelEnd`] together with the port and channel it lives
/// under, as returned by channel listings.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentifiedChannelEnd {
    pub port_id: PortId,
    pub channel_id: ChannelId,
    pub channel_end: ChannelEnd,
}

impl IdentifiedChannelEnd {
    pub fn new(port_id: PortId, channel_id: ChannelId, channel_end: ChannelEnd) -> Self {
        Self {
            port_id,
            channel_id,
            channel_end,
        }
    }
}

/// One end of a channel.
///
/// A channel end is bound to exactly one connection. Its ordering is fixed
/// when the end is created; the handshake only moves the state, the version
/// and the counterparty channel id.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelEnd {
    state: State,
    ordering: Order,
    counterparty: Counterparty,
    connection_id: ConnectionId,
    version: Version,
}

impl ChannelEnd {
    /// Fails on [`State::Uninitialized`] and [`Order::None`], neither of
    /// which is ever stored.
    pub fn new(
        state: State,
        ordering: Order,
        counterparty: Counterparty,
        connection_id: ConnectionId,
        version: Version,
    ) -> Result<Self, ChannelError> {
        if state == State::Uninitialized {
            return Err(ChannelError::InvalidState {
                expected: "an initialized channel".to_string(),
                actual: state.to_string(),
            });
        }
        if ordering == Order::None {
            return Err(ChannelError::InvalidOrderType {
                expected: format!("{} or {}", Order::Unordered, Order::Ordered),
                actual: ordering.to_string(),
            });
        }

        Ok(Self {
            state,
            ordering,
            counterparty,
            connection_id,
            version,
        })
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn ordering(&self) -> Order {
        self.ordering
    }

    pub fn counterparty(&self) -> &Counterparty {
        &self.counterparty
    }

    /// The connection this channel runs over.
    pub fn connection_id(&self) -> &ConnectionId {
        &self.connection_id
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Returns `true` if the remote end is `port_id`/`channel_id`.
    pub fn connects_to(&self, port_id: &PortId, channel_id: &ChannelId) -> bool {
        self.counterparty.port_id == *port_id
            && self.counterparty.channel_id.as_ref() == Some(channel_id)
    }

    pub fn ensure_state(&self, expected: State) -> Result<(), ChannelError> {
        self.ensure_state_in(&[expected])
    }

    pub fn ensure_state_in(&self, allowed: &[State]) -> Result<(), ChannelError> {
        if allowed.contains(&self.state) {
            return Ok(());
        }
        let expected: Vec<&str> = allowed.iter().map(|s| s.as_str()).collect();
        Err(ChannelError::InvalidState {
            expected: expected.join(" or "),
            actual: self.state.to_string(),
        })
    }

    pub fn with_state(mut self, state: State) -> Self {
        self.state = state;
        self
    }

    /// The INIT end once the counterparty's TRYOPEN end has been proven:
    /// OPEN, pointing at `remote_channel_id`, on the counterparty's version.
    pub fn acknowledged(mut self, remote_channel_id: ChannelId, version: Version) -> Self {
        self.state = State::Open;
        self.counterparty.channel_id = Some(remote_channel_id);
        self.version = version;
        self
    }
}

impl Display for ChannelEnd {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{} {} channel over {} to {} (version `{}`)",
            self.state, self.ordering, self.connection_id, self.counterparty, self.version
        )
    }
}

impl Protobuf<RawChannel> for ChannelEnd {}

impl TryFrom<RawChannel> for ChannelEnd {
    type Error = ChannelError;

    fn try_from(raw: RawChannel) -> Result<Self, Self::Error> {
        let counterparty = raw
            .counterparty
            .ok_or(ChannelError::MissingCounterparty)?
            .try_into()?;

        let [connection_id] = <[String; 1]>::try_from(raw.connection_hops).map_err(|hops| {
            ChannelError::InvalidConnectionHopsLength {
                expected: 1,
                actual: hops.len() as u64,
            }
        })?;

        Self::new(
            raw.state.try_into()?,
            raw.ordering.try_into()?,
            counterparty,
            connection_id.parse()?,
            raw.version.into(),
        )
    }
}

impl From<ChannelEnd> for RawChannel {
    fn from(end: ChannelEnd) -> Self {
        Self {
            state: end.state as i32,
            ordering: end.ordering as i32,
            counterparty: Some(end.counterparty.into()),
            connection_hops: vec![end.connection_id.to_string()],
            version: end.version.to_string(),
            upgrade_sequence: 0,
        }
    }
}

/// The remote end of a channel. The channel id is unknown until the
/// counterparty has executed its own half of the handshake.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Counterparty {
    pub port_id: PortId,
    pub channel_id: Option<ChannelId>,
}

impl Counterparty {
    pub fn new(port_id: PortId, channel_id: Option<ChannelId>) -> Self {
        Self {
            port_id,
            channel_id,
        }
    }

    pub fn port_id(&self) -> &PortId {
        &self.port_id
    }

    pub fn channel_id(&self) -> Option<&ChannelId> {
        self.channel_id.as_ref()
    }
}

impl Display for Counterparty {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match &self.channel_id {
            Some(channel_id) => write!(f, "{}/{}", self.port_id, channel_id),
            None => write!(f, "{}/<pending>", self.port_id),
        }
    }
}

impl Protobuf<RawCounterparty> for Counterparty {}

impl TryFrom<RawCounterparty> for Counterparty {
    type Error = ChannelError;

    fn try_from(raw: RawCounterparty) -> Result<Self, Self::Error> {
        let channel_id = match raw.channel_id.as_str() {
            "" => None,
            id => Some(id.parse()?),
        };

        Ok(Self::new(raw.port_id.parse()?, channel_id))
    }
}

impl From<Counterparty> for RawCounterparty {
    fn from(counterparty: Counterparty) -> Self {
        Self {
            port_id: counterparty.port_id.to_string(),
            channel_id: counterparty
                .channel_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
        }
    }
}

/// Delivery guarantee of a channel.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    None = 0,
    Unordered = 1,
    Ordered = 2,
}

impl Order {
    /// The feature name connection versions advertise for this ordering.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "ORDER_NONE_UNSPECIFIED",
            Self::Unordered => "ORDER_UNORDERED",
            Self::Ordered => "ORDER_ORDERED",
        }
    }

    /// The other delivery guarantee; `None` has no counterpart.
    pub fn opposite(self) -> Option<Self> {
        match self {
            Self::Ordered => Some(Self::Unordered),
            Self::Unordered => Some(Self::Ordered),
            Self::None => None,
        }
    }
}

impl Display for Order {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl TryFrom<i32> for Order {
    type Error = ChannelError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        [Self::None, Self::Unordered, Self::Ordered]
            .into_iter()
            .find(|order| *order as i32 == value)
            .ok_or_else(|| ChannelError::InvalidOrderType {
                expected: "0, 1 or 2".to_string(),
                actual: value.to_string(),
            })
    }
}

impl FromStr for Order {
    type Err = ChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.to_ascii_uppercase();
        let name = name.strip_prefix("ORDER_").unwrap_or(&name);
        match name {
            "NONE_UNSPECIFIED" => Ok(Self::None),
            "UNORDERED" => Ok(Self::Unordered),
            "ORDERED" => Ok(Self::Ordered),
            _ => Err(ChannelError::InvalidOrderType {
                expected: "`ordered` or `unordered`".to_string(),
                actual: s.to_string(),
            }),
        }
    }
}

/// Handshake state of a [`ChannelEnd`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum State {
    Uninitialized = 0,
    Init = 1,
    TryOpen = 2,
    Open = 3,
    Closed = 4,
}

impl State {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "UNINITIALIZED",
            Self::Init => "INIT",
            Self::TryOpen => "TRYOPEN",
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
        }
    }

    pub fn is_open(self) -> bool {
        self == Self::Open
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl TryFrom<i32> for State {
    type Error = ChannelError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        [
            Self::Uninitialized,
            Self::Init,
            Self::TryOpen,
            Self::Open,
            Self::Closed,
        ]
        .into_iter()
        .find(|state| *state as i32 == value)
        .ok_or_else(|| ChannelError::InvalidState {
            expected: "0 to 4".to_string(),
            actual: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn raw_channel(state: i32, ordering: i32, hops: &[&str]) -> RawChannel {
        RawChannel {
            state,
            ordering,
            counterparty: Some(RawCounterparty {
                port_id: "port-1".to_string(),
                channel_id: String::new(),
            }),
            connection_hops: hops.iter().map(|h| h.to_string()).collect(),
            version: "ics20-1".to_string(),
            upgrade_sequence: 0,
        }
    }

    #[rstest]
    #[case::init_unordered(1, 1, &["connection-0"], true)]
    #[case::open_ordered(3, 2, &["connection-0"], true)]
    #[case::uninitialized(0, 1, &["connection-0"], false)]
    #[case::unspecified_order(1, 0, &["connection-0"], false)]
    #[case::unknown_state(7, 1, &["connection-0"], false)]
    #[case::unknown_order(1, 3, &["connection-0"], false)]
    #[case::no_hops(1, 1, &[], false)]
    #[case::two_hops(1, 1, &["connection-0", "connection-1"], false)]
    fn raw_channel_end_is_validated(
        #[case] state: i32,
        #[case] ordering: i32,
        #[case] hops: &[&str],
        #[case] valid: bool,
    ) {
        assert_eq!(
            ChannelEnd::try_from(raw_channel(state, ordering, hops)).is_ok(),
            valid
        );
    }

    #[test]
    fn acknowledged_end_is_open_towards_the_remote_channel() {
        let end = ChannelEnd::try_from(raw_channel(1, 2, &["connection-0"])).unwrap();
        let remote: ChannelId = "channel-4".parse().unwrap();

        assert!(!end.connects_to(&"port-1".parse().unwrap(), &remote));

        let end = end.acknowledged(remote.clone(), Version::new("ics20-2".to_string()));

        assert!(end.is_open());
        assert!(end.connects_to(&"port-1".parse().unwrap(), &remote));
        assert_eq!(end.connection_id().as_str(), "connection-0");
        assert!(end.ensure_state_in(&[State::Init, State::TryOpen]).is_err());
    }

    #[test]
    fn orderings_are_each_others_opposite() {
        assert_eq!(Order::Ordered.opposite(), Some(Order::Unordered));
        assert_eq!(Order::Unordered.opposite(), Some(Order::Ordered));
        assert_eq!(Order::None.opposite(), None);
    }

    #[rstest]
    #[case("ORDER_ORDERED", Order::Ordered)]
    #[case("unordered", Order::Unordered)]
    #[case("ORDER_NONE_UNSPECIFIED", Order::None)]
    fn order_parses_from_its_names(#[case] name: &str, #[case] expected: Order) {
        assert_eq!(Order::from_str(name).unwrap(), expected);
    }
}
