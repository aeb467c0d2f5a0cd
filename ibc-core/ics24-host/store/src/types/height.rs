use std::fmt::{Display, Formatter};

/// Block height
pub type RawHeight = u64;

/// Store height to query
#[derive(Debug, Copy, Clone, Eq, Ord, PartialEq, PartialOrd)]
pub enum Height {
    Pending,
    Latest,
    Stable(RawHeight),
}

impl Display for Height {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Height::Pending => write!(f, "pending"),
            Height::Latest => write!(f, "latest"),
            Height::Stable(height) => write!(f, "{height}"),
        }
    }
}

impl From<RawHeight> for Height {
    /// Height zero stands for the latest committed block.
    fn from(value: RawHeight) -> Self {
        match value {
            0 => Height::Latest,
            _ => Height::Stable(value),
        }
    }
}
