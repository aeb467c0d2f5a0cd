use std::fmt::{Display, Formatter};
use std::ops::Deref;

use ibc_core_host_types::path::{
    AckPath, ChannelEndPath, ClientConsensusStatePath, ClientStatePath, ClientUpdateHeightPath,
    ClientUpdateTimePath, CommitmentPath, ConnectionPath, NextChannelSequencePath,
    NextClientSequencePath, NextConnectionSequencePath, Path as IbcPath, ReceiptPath, SeqAckPath,
    SeqRecvPath, SeqSendPath,
};

/// One `/`-separated segment of a store key.
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Hash)]
pub struct Identifier(String);

impl Deref for Identifier {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Store key, kept as its segments so that prefix queries match whole
/// segments only: `channels/channel-1` is not a prefix of
/// `channels/channel-10`.
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Hash)]
pub struct Path(Vec<Identifier>);

impl Path {
    pub fn get(&self, index: usize) -> Option<&Identifier> {
        self.0.get(index)
    }

    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// The key bytes a proof refers to.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}

impl From<String> for Path {
    fn from(s: String) -> Self {
        Self(s.split('/').map(|part| part.to_owned().into()).collect())
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        s.to_owned().into()
    }
}

impl From<Identifier> for Path {
    fn from(id: Identifier) -> Self {
        Self(vec![id])
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let segments: Vec<&str> = self.0.iter().map(|id| id.as_str()).collect();
        write!(f, "{}", segments.join("/"))
    }
}

impl From<IbcPath> for Path {
    fn from(ibc_path: IbcPath) -> Self {
        ibc_path.to_string().into()
    }
}

macro_rules! impl_into_path_for {
    ($($path:ty),+) => {
        $(impl From<$path> for Path {
            fn from(ibc_path: $path) -> Self {
                ibc_path.to_string().into()
            }
        })+
    };
}

impl_into_path_for!(
    NextClientSequencePath,
    NextConnectionSequencePath,
    NextChannelSequencePath,
    ClientStatePath,
    ClientConsensusStatePath,
    ClientUpdateTimePath,
    ClientUpdateHeightPath,
    ConnectionPath,
    ChannelEndPath,
    SeqSendPath,
    SeqRecvPath,
    SeqAckPath,
    CommitmentPath,
    ReceiptPath,
    AckPath
);
