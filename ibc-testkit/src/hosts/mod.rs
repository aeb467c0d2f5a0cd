use core::time::Duration;

use ibc::core::client::types::Height;
use ibc::core::commitment_types::commitment::CommitmentRoot;
use ibc::core::host::types::error::HostError;
use ibc::primitives::Timestamp;
use typed_builder::TypedBuilder;

use crate::utils::year_2023;

pub mod block;

pub use block::MockHostBlock;

pub const DEFAULT_BLOCK_TIME_SECS: u64 = 3;

#[derive(Clone, Debug, TypedBuilder)]
pub struct HostParams {
    #[builder(default = String::from("mock-axon"), setter(into))]
    pub host_id: String,
    #[builder(default = 0)]
    pub revision_number: u64,
    #[builder(default = Duration::from_secs(DEFAULT_BLOCK_TIME_SECS))]
    pub block_time: Duration,
    #[builder(default = year_2023())]
    pub genesis_timestamp: Timestamp,
}

/// The block log of a mock host chain. Block `n` is produced
/// `(n - 1) * block_time` after genesis.
#[derive(Clone, Debug)]
pub struct MockHost {
    params: HostParams,
    history: Vec<MockHostBlock>,
}

impl MockHost {
    pub fn new(params: HostParams) -> Self {
        Self {
            params,
            history: Vec::new(),
        }
    }

    pub fn host_id(&self) -> &str {
        &self.params.host_id
    }

    pub fn revision_number(&self) -> u64 {
        self.params.revision_number
    }

    pub fn block_time(&self) -> Duration {
        self.params.block_time
    }

    pub fn history(&self) -> &[MockHostBlock] {
        &self.history
    }

    pub fn latest_block(&self) -> Option<&MockHostBlock> {
        self.history.last()
    }

    pub fn latest_height(&self) -> Option<Height> {
        self.latest_block().map(MockHostBlock::height)
    }

    pub fn block(&self, height: &Height) -> Option<&MockHostBlock> {
        if height.revision_number() != self.revision_number() {
            return None;
        }
        let index = usize::try_from(height.revision_height()).ok()?.checked_sub(1)?;
        self.history.get(index)
    }

    /// Appends the block committing `root` at `revision_height`. Heights
    /// must follow each other without gaps.
    pub fn push_block(
        &mut self,
        revision_height: u64,
        root: Vec<u8>,
    ) -> Result<&MockHostBlock, HostError> {
        let expected = self.history.len() as u64 + 1;
        if revision_height != expected {
            return Err(HostError::InvalidData {
                description: format!(
                    "block {revision_height} does not follow the block log, expected {expected}"
                ),
            });
        }

        let height = Height::new(self.revision_number(), revision_height).map_err(|e| {
            HostError::InvalidData {
                description: e.to_string(),
            }
        })?;

        let timestamp = match self.history.last() {
            Some(parent) => {
                (parent.timestamp + self.params.block_time).map_err(|e| HostError::Other {
                    description: e.to_string(),
                })?
            }
            None => self.params.genesis_timestamp,
        };

        self.history.push(MockHostBlock {
            height,
            timestamp,
            root: CommitmentRoot::from(root),
        });

        self.history.last().ok_or_else(|| HostError::Other {
            description: "block log is empty".to_string(),
        })
    }
}
