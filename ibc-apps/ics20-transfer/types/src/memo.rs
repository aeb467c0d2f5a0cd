//! Defines the memo type, which represents the string that users can include
//! with a token transfer.

use core::convert::Infallible;
use core::fmt::{self, Display};
use core::str::FromStr;

/// Represents the token transfer memo
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Memo(String);

impl Memo {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for Memo {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Display for Memo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Memo {
    fn from(memo: String) -> Self {
        Self(memo)
    }
}

impl FromStr for Memo {
    type Err = Infallible;

    fn from_str(memo: &str) -> Result<Self, Infallible> {
        Ok(Self(memo.to_owned()))
    }
}
