use ibc::core::client::types::{ConsensusState, Height};
use ibc::core::commitment_types::commitment::CommitmentRoot;
use ibc::primitives::proto::Protobuf;
use ibc::primitives::{DecodingError, Timestamp};
use ibc_proto::ibc::core::client::v1::Height as RawHeight;

use crate::utils::year_2023;

pub const MOCK_HEADER_TYPE_URL: &str = "/ibc.mock.Header";

#[derive(Clone, PartialEq, prost::Message)]
pub struct RawMockHeader {
    #[prost(message, optional, tag = "1")]
    pub height: Option<RawHeight>,
    #[prost(uint64, tag = "2")]
    pub timestamp: u64,
    #[prost(bytes = "vec", tag = "3")]
    pub root: Vec<u8>,
}

/// A block header of a mock host: its height, its time and the root of the
/// state committed at that height.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockHeader {
    pub height: Height,
    pub timestamp: Timestamp,
    pub root: CommitmentRoot,
}

impl MockHeader {
    /// A header at `height` stamped with the mock hosts' genesis time and
    /// an empty root.
    pub fn new(height: Height) -> Self {
        Self {
            height,
            timestamp: year_2023(),
            root: CommitmentRoot::default(),
        }
    }

    pub fn height(&self) -> Height {
        self.height
    }

    pub fn with_root(self, root: CommitmentRoot) -> Self {
        Self { root, ..self }
    }

    /// The consensus state a client stores after accepting this header.
    pub fn into_consensus_state(self) -> ConsensusState {
        ConsensusState::new(self.timestamp, self.root, Vec::new())
    }
}

impl Protobuf<RawMockHeader> for MockHeader {}

impl TryFrom<RawMockHeader> for MockHeader {
    type Error = DecodingError;

    fn try_from(raw: RawMockHeader) -> Result<Self, Self::Error> {
        let RawMockHeader {
            height,
            timestamp,
            root,
        } = raw;
        let invalid = |field: &str, e: &dyn core::fmt::Display| {
            DecodingError::InvalidField(format!("{field}: {e}"))
        };

        let height = height.ok_or(DecodingError::missing_field("height"))?;
        Ok(Self {
            height: Height::try_from(height).map_err(|e| invalid("height", &e))?,
            timestamp: Timestamp::from_nanoseconds(timestamp)
                .map_err(|e| invalid("timestamp", &e))?,
            root: root.into(),
        })
    }
}

impl From<MockHeader> for RawMockHeader {
    fn from(header: MockHeader) -> Self {
        let MockHeader {
            height,
            timestamp,
            root,
        } = header;
        Self {
            height: Some(height.into()),
            timestamp: timestamp.nanoseconds(),
            root: root.into_vec(),
        }
    }
}

any_under_type_url!(MockHeader, RawMockHeader, MOCK_HEADER_TYPE_URL);
