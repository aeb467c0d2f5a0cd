use ibc::core::client::types::Height;
use ibc::core::host::types::identifiers::ClientId;
use ibc::primitives::proto::Protobuf;
use ibc::primitives::DecodingError;

use super::header::{MockHeader, RawMockHeader};

pub const MOCK_MISBEHAVIOUR_TYPE_URL: &str = "/ibc.mock.Misbehavior";

#[derive(Clone, PartialEq, prost::Message)]
pub struct RawMockMisbehaviour {
    #[prost(string, tag = "1")]
    pub client_id: String,
    #[prost(message, optional, tag = "2")]
    pub header1: Option<RawMockHeader>,
    #[prost(message, optional, tag = "3")]
    pub header2: Option<RawMockHeader>,
}

/// Two headers for the same height that commit to different roots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Misbehaviour {
    pub client_id: ClientId,
    pub header1: MockHeader,
    pub header2: MockHeader,
}

impl Misbehaviour {
    /// Height the evidence is about, once it checks out.
    pub fn conflicting_height(&self) -> Option<Height> {
        let same_height = self.header1.height == self.header2.height;
        let diverging = self.header1.root != self.header2.root;

        (same_height && diverging).then_some(self.header1.height)
    }
}

impl Protobuf<RawMockMisbehaviour> for Misbehaviour {}

impl TryFrom<RawMockMisbehaviour> for Misbehaviour {
    type Error = DecodingError;

    fn try_from(raw: RawMockMisbehaviour) -> Result<Self, Self::Error> {
        Ok(Self {
            client_id: raw
                .client_id
                .parse()
                .map_err(|e| DecodingError::InvalidIdentifier(format!("{e}")))?,
            header1: raw
                .header1
                .ok_or(DecodingError::missing_field("header1"))?
                .try_into()?,
            header2: raw
                .header2
                .ok_or(DecodingError::missing_field("header2"))?
                .try_into()?,
        })
    }
}

impl From<Misbehaviour> for RawMockMisbehaviour {
    fn from(value: Misbehaviour) -> Self {
        RawMockMisbehaviour {
            client_id: value.client_id.to_string(),
            header1: Some(value.header1.into()),
            header2: Some(value.header2.into()),
        }
    }
}

any_under_type_url!(Misbehaviour, RawMockMisbehaviour, MOCK_MISBEHAVIOUR_TYPE_URL);
