//! Token amounts, up to 256 bits wide.
use core::str::FromStr;

use derive_more::{Display, From, Into};
use primitive_types::U256;

use super::error::TokenTransferError;

/// How many tokens a transfer moves.
///
/// Amounts travel as decimal strings, in packets and in JSON alike, so
/// nothing above `u64::MAX` is lost on the way.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    PartialOrd,
    Ord,
    Display,
    From,
    Into,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(U256);

impl Amount {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }
}

impl FromStr for Amount {
    type Err = TokenTransferError;

    /// Decimal digits only; `U256`'s own parser would read hex.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        U256::from_dec_str(s)
            .map(Self)
            .map_err(TokenTransferError::InvalidAmount)
    }
}

impl TryFrom<String> for Amount {
    type Error = TokenTransferError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        amount.to_string()
    }
}

impl From<u64> for Amount {
    fn from(v: u64) -> Self {
        Self(v.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_carries_a_decimal_string() {
        let amount = Amount::from(42u64);

        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, "\"42\"");
        assert_eq!(serde_json::from_str::<Amount>(&json).unwrap(), amount);
        assert!(serde_json::from_str::<Amount>("42").is_err());
        assert!(serde_json::from_str::<Amount>("\"0x2a\"").is_err());
    }

    #[test]
    fn amounts_above_u64_parse() {
        let max = "115792089237316195423570985008687907853269984665640564039457584007913129639935";
        let amount = Amount::from_str(max).unwrap();

        assert_eq!(amount.to_string(), max);
        assert!(amount.checked_add(Amount::from(1u64)).is_none());
        assert!(Amount::from_str("-1").is_err());
        assert!(Amount::from_str("12a").is_err());
    }

    #[test]
    fn checked_sub_stops_at_zero() {
        let a = Amount::from(51u64);
        assert_eq!(a.checked_sub(Amount::from(51u64)), Some(Amount::zero()));
        assert_eq!(a.checked_sub(Amount::from(52u64)), None);
        assert!(Amount::zero().is_zero());
    }
}
