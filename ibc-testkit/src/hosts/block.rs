//! Blocks of a mock host chain.

use ibc::core::client::types::{ConsensusState, Height};
use ibc::core::commitment_types::commitment::CommitmentRoot;
use ibc::primitives::proto::Any;
use ibc::primitives::Timestamp;

use crate::testapp::ibc::clients::mock::header::MockHeader;

/// One committed block: the height it was committed at, the host time of
/// that block and the root of the store state it committed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockHostBlock {
    pub height: Height,
    pub timestamp: Timestamp,
    pub root: CommitmentRoot,
}

impl MockHostBlock {
    pub fn height(&self) -> Height {
        self.height
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// The header a counterparty client is updated with to track this
    /// block.
    pub fn into_header(self) -> MockHeader {
        MockHeader {
            height: self.height,
            timestamp: self.timestamp,
            root: self.root,
        }
    }

    pub fn into_consensus_state(self) -> ConsensusState {
        self.into_header().into_consensus_state()
    }
}

impl From<MockHostBlock> for Any {
    fn from(block: MockHostBlock) -> Self {
        block.into_header().into()
    }
}
