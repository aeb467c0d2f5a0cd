//! Amounts of one denomination, the unit a transfer moves.
use core::fmt::{Display, Error as FmtError, Formatter};
use core::str::FromStr;

use ibc_proto::cosmos::base::v1beta1::Coin as ProtoCoin;

use super::amount::Amount;
use super::denom::{BaseDenom, PrefixedDenom};
use super::error::TokenTransferError;

/// A coin as transfers see it, its denomination carrying the trace.
pub type PrefixedCoin = Coin<PrefixedDenom>;

pub type BaseCoin = Coin<BaseDenom>;

/// A coin whose denomination is not interpreted.
pub type RawCoin = Coin<String>;

/// What a coin string's denomination may contain besides alphanumerics.
const DENOM_PUNCTUATION: &str = "/:._-";

#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct Coin<D> {
    pub denom: D,
    pub amount: Amount,
}

impl<D> Coin<D> {
    pub fn new(denom: D, amount: impl Into<Amount>) -> Self {
        Self {
            denom,
            amount: amount.into(),
        }
    }
}

impl<D: FromStr> FromStr for Coin<D>
where
    D::Err: Into<TokenTransferError>,
{
    type Err = TokenTransferError;

    /// `<digits><denom>`, e.g. `100uatom` or `5transfer/channel-0/uatom`.
    fn from_str(coin_str: &str) -> Result<Self, TokenTransferError> {
        let invalid = || TokenTransferError::InvalidCoin {
            coin: coin_str.to_string(),
        };

        let split = coin_str
            .find(|c: char| !c.is_ascii_digit())
            .filter(|&at| at > 0)
            .ok_or_else(invalid)?;
        let (amount, denom) = coin_str.split_at(split);
        if !denom.chars().all(is_denom_char) {
            return Err(invalid());
        }

        Ok(Coin {
            amount: amount.parse()?,
            denom: denom.parse().map_err(Into::into)?,
        })
    }
}

fn is_denom_char(c: char) -> bool {
    c.is_alphanumeric() || DENOM_PUNCTUATION.contains(c)
}

impl<D: FromStr> TryFrom<ProtoCoin> for Coin<D>
where
    D::Err: Into<TokenTransferError>,
{
    type Error = TokenTransferError;

    fn try_from(proto: ProtoCoin) -> Result<Coin<D>, Self::Error> {
        Ok(Self {
            denom: proto.denom.parse().map_err(Into::into)?,
            amount: proto.amount.parse()?,
        })
    }
}

impl<D: ToString> From<Coin<D>> for ProtoCoin {
    fn from(coin: Coin<D>) -> ProtoCoin {
        ProtoCoin {
            denom: coin.denom.to_string(),
            amount: coin.amount.to_string(),
        }
    }
}

impl From<BaseCoin> for PrefixedCoin {
    fn from(coin: BaseCoin) -> PrefixedCoin {
        PrefixedCoin {
            denom: coin.denom.into(),
            amount: coin.amount,
        }
    }
}

impl<D: Display> Display for Coin<D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

#[cfg(test)]
mod tests {
    use primitive_types::U256;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::plain("100stake", 100, "stake")]
    #[case::zero("0stake", 0, "stake")]
    #[case::u256_max(
        "115792089237316195423570985008687907853269984665640564039457584007913129639935stake",
        U256::MAX,
        "stake"
    )]
    #[case::digit_in_denom("7a7", 7, "a7")]
    #[case::separators_in_denom("51x1/:._-", 51, "x1/:._-")]
    #[case::voucher_denom("151IBC/A74473C8", 151, "IBC/A74473C8")]
    fn parses_coin_strings(
        #[case] coin_str: &str,
        #[case] amount: impl Into<Amount>,
        #[case] denom: &str,
    ) {
        assert_eq!(
            RawCoin::from_str(coin_str).unwrap(),
            RawCoin::new(denom.to_string(), amount)
        );
    }

    #[rstest]
    #[case::signed("+100stake")]
    #[case::negative("-100stake")]
    #[case::no_amount("stake")]
    #[case::no_denom("100")]
    #[case::u256_max_plus_1(
        "115792089237316195423570985008687907853269984665640564039457584007913129639936stake"
    )]
    #[case::bang_in_denom("0x!")]
    #[case::backslash_in_denom("0x1\\y")]
    fn rejects_malformed_coin_strings(#[case] coin_str: &str) {
        assert!(RawCoin::from_str(coin_str).is_err());
    }

    #[test]
    fn prefixed_coin_through_proto() {
        let coin: PrefixedCoin = "10transfer/channel-0/uatom".parse().unwrap();
        let proto = ProtoCoin::from(coin.clone());

        assert_eq!(proto.denom, "transfer/channel-0/uatom");
        assert_eq!(proto.amount, "10");
        assert_eq!(PrefixedCoin::try_from(proto).unwrap(), coin);
    }
}
