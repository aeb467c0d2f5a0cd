//! Token denominations and the channel hops they carry.
use core::fmt::{Display, Error as FmtError, Formatter};
use core::str::FromStr;

use derive_more::Display;
use ibc_core_host_types::identifiers::{ChannelId, PortId};
use ibc_primitives::serializers;
use ibc_proto::ibc::applications::transfer::v1::DenomTrace as RawDenomTrace;

use super::error::TokenTransferError;

/// What is left of a denomination once every hop is stripped, such as `uatom`
/// in `transfer/channel-0/uatom`. It may itself contain slashes.
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Display)]
pub struct BaseDenom(String);

impl BaseDenom {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for BaseDenom {
    type Err = TokenTransferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Err(TokenTransferError::EmptyBaseDenom),
            _ => Ok(BaseDenom(s.to_owned())),
        }
    }
}

/// A `{port}/{channel}` hop a token crossed on its way in.
#[derive(serde::Serialize, serde::Deserialize)]
#[derive(Clone, Debug, Ord, PartialOrd, Eq, PartialEq)]
pub struct TracePrefix {
    port_id: PortId,
    channel_id: ChannelId,
}

impl TracePrefix {
    pub fn new(port_id: PortId, channel_id: ChannelId) -> Self {
        Self {
            port_id,
            channel_id,
        }
    }

    fn parse(port_id: &str, channel_id: &str) -> Option<Self> {
        Some(Self::new(port_id.parse().ok()?, channel_id.parse().ok()?))
    }
}

impl Display for TracePrefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}/{}", self.port_id, self.channel_id)
    }
}

/// The hops of a denomination, outermost first: the hop the token crossed
/// last is at index 0.
#[derive(serde::Serialize, serde::Deserialize)]
#[derive(Clone, Debug, Default, Eq, PartialEq, PartialOrd, Ord)]
pub struct TracePath(Vec<TracePrefix>);

impl TracePath {
    /// The hop the token crossed last, if any.
    pub fn outermost(&self) -> Option<&TracePrefix> {
        self.0.first()
    }

    /// Drops the outermost hop when it is `hop`. Returns whether it was.
    pub fn unwrap_hop(&mut self, hop: &TracePrefix) -> bool {
        let matched = self.outermost() == Some(hop);
        if matched {
            self.0.remove(0);
        }
        matched
    }

    /// Records `hop` as the newest outermost hop.
    pub fn wrap_hop(&mut self, hop: TracePrefix) {
        self.0.insert(0, hop)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for TracePath {
    type Err = TokenTransferError;

    /// Parses a strict `port/channel(/port/channel)*` list. Unlike a full
    /// denomination, every segment here must be a hop.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(Self::default());
        }

        let segments: Vec<&str> = s.split('/').collect();
        if segments.len() % 2 != 0 {
            return Err(TokenTransferError::InvalidTraceLength {
                len: segments.len() as u64,
            });
        }

        segments
            .chunks_exact(2)
            .enumerate()
            .map(|(pos, pair)| {
                let pos = pos as u64;
                let port_id = pair[0].parse().map_err(|e| {
                    TokenTransferError::InvalidTracePortId {
                        pos,
                        validation_error: e,
                    }
                })?;
                let channel_id = pair[1].parse().map_err(|e| {
                    TokenTransferError::InvalidTraceChannelId {
                        pos,
                        validation_error: e,
                    }
                })?;
                Ok(TracePrefix::new(port_id, channel_id))
            })
            .collect::<Result<_, _>>()
            .map(Self)
    }
}

impl Display for TracePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        for (i, hop) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{hop}")?;
        }
        Ok(())
    }
}

/// A denomination as a chain holds it: the hops it came through, then its
/// base.
#[derive(serde::Serialize, serde::Deserialize)]
#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub struct PrefixedDenom {
    #[serde(with = "serializers")]
    pub trace_path: TracePath,
    pub base_denom: BaseDenom,
}

impl PrefixedDenom {
    /// Strips `hop` when the token last crossed it, which on the receiving
    /// side means the token is coming home.
    pub fn unwrap_hop(&mut self, hop: &TracePrefix) -> bool {
        self.trace_path.unwrap_hop(hop)
    }

    pub fn wrap_hop(&mut self, hop: TracePrefix) {
        self.trace_path.wrap_hop(hop)
    }
}

impl FromStr for PrefixedDenom {
    type Err = TokenTransferError;

    /// Peels leading `port/channel` pairs for as long as both halves are
    /// valid identifiers. The remainder is the base, slashes included.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut hops = Vec::new();
        let mut rest = s;

        while let Some((port_id, tail)) = rest.split_once('/') {
            let Some((channel_id, tail)) = tail.split_once('/') else {
                break;
            };
            let Some(hop) = TracePrefix::parse(port_id, channel_id) else {
                break;
            };
            hops.push(hop);
            rest = tail;
        }

        Ok(Self {
            trace_path: TracePath(hops),
            base_denom: rest.parse()?,
        })
    }
}

impl TryFrom<RawDenomTrace> for PrefixedDenom {
    type Error = TokenTransferError;

    fn try_from(value: RawDenomTrace) -> Result<Self, Self::Error> {
        Ok(Self {
            trace_path: value.path.parse()?,
            base_denom: value.base_denom.parse()?,
        })
    }
}

impl From<PrefixedDenom> for RawDenomTrace {
    fn from(value: PrefixedDenom) -> Self {
        Self {
            path: value.trace_path.to_string(),
            base_denom: value.base_denom.to_string(),
        }
    }
}

impl From<BaseDenom> for PrefixedDenom {
    fn from(base_denom: BaseDenom) -> Self {
        Self {
            trace_path: TracePath::default(),
            base_denom,
        }
    }
}

impl Display for PrefixedDenom {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        if !self.trace_path.is_empty() {
            write!(f, "{}/", self.trace_path)?;
        }
        write!(f, "{}", self.base_denom)
    }
}
