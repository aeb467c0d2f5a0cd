//! Bookkeeping of the voucher tokens minted for incoming denominations.
//!
//! Every prefixed denomination is backed by one token. The token is named
//! after the SHA-256 of the full denomination, so all chains derive the same
//! name for the same path.
use std::collections::BTreeMap;

use ibc_app_transfer_types::error::TokenTransferError;
use ibc_app_transfer_types::{Amount, PrefixedDenom, VOUCHER_NAME_PREFIX};
use sha2::{Digest, Sha256};
use subtle_encoding::hex;
use tracing::debug;

/// Returns `IBC/<HEX>`, HEX being the upper-case hex SHA-256 of `denom`.
pub fn voucher_name(denom: &PrefixedDenom) -> String {
    let hash = Sha256::digest(denom.to_string().as_bytes());
    let encoded = hex::encode_upper(hash);

    // hex output is always ASCII
    format!("{VOUCHER_NAME_PREFIX}{}", String::from_utf8_lossy(&encoded))
}

/// Supply and balances of a single voucher token.
#[derive(Clone, Debug)]
pub struct VoucherToken<A: Ord> {
    total_supply: Amount,
    balances: BTreeMap<A, Amount>,
}

impl<A: Ord> Default for VoucherToken<A> {
    fn default() -> Self {
        Self {
            total_supply: Amount::zero(),
            balances: BTreeMap::new(),
        }
    }
}

impl<A: Ord> VoucherToken<A> {
    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    pub fn balance_of(&self, account: &A) -> Amount {
        self.balances.get(account).copied().unwrap_or_default()
    }
}

/// Tokens keyed by name, and the binding from each denomination to its token.
#[derive(Clone, Debug)]
pub struct VoucherRegistry<A: Ord> {
    bindings: BTreeMap<PrefixedDenom, String>,
    tokens: BTreeMap<String, VoucherToken<A>>,
}

impl<A: Ord> Default for VoucherRegistry<A> {
    fn default() -> Self {
        Self {
            bindings: BTreeMap::new(),
            tokens: BTreeMap::new(),
        }
    }
}

impl<A: Ord + Clone> VoucherRegistry<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `denom` to `token`, creating the token if it does not exist yet.
    pub fn set_denom_token(&mut self, denom: PrefixedDenom, token: String) {
        debug!(%denom, %token, "binding denomination");

        self.tokens.entry(token.clone()).or_default();
        self.bindings.insert(denom, token);
    }

    pub fn denom_token(&self, denom: &PrefixedDenom) -> Option<&str> {
        self.bindings.get(denom).map(String::as_str)
    }

    pub fn token(&self, name: &str) -> Option<&VoucherToken<A>> {
        self.tokens.get(name)
    }

    /// Checks that `amount` of `denom` can be minted to `account`.
    pub fn can_mint(
        &self,
        account: &A,
        denom: &PrefixedDenom,
        amount: Amount,
    ) -> Result<(), TokenTransferError> {
        let Some(token) = self.denom_token(denom).and_then(|name| self.tokens.get(name)) else {
            // a fresh token starts from zero
            return Ok(());
        };

        let overflow = || TokenTransferError::AmountOverflow {
            denom: denom.to_string(),
        };
        token.total_supply.checked_add(amount).ok_or_else(overflow)?;
        token
            .balance_of(account)
            .checked_add(amount)
            .ok_or_else(overflow)?;

        Ok(())
    }

    /// Mints `amount` of `denom` to `account`. An unbound denomination gets a
    /// token named by [`voucher_name`].
    pub fn mint(
        &mut self,
        account: &A,
        denom: &PrefixedDenom,
        amount: Amount,
    ) -> Result<(), TokenTransferError> {
        self.can_mint(account, denom, amount)?;

        if self.denom_token(denom).is_none() {
            self.set_denom_token(denom.clone(), voucher_name(denom));
        }

        let token = self
            .bindings
            .get(denom)
            .and_then(|name| self.tokens.get_mut(name))
            .ok_or_else(|| TokenTransferError::UnknownDenom {
                denom: denom.to_string(),
            })?;

        let overflow = || TokenTransferError::AmountOverflow {
            denom: denom.to_string(),
        };
        token.total_supply = token.total_supply.checked_add(amount).ok_or_else(overflow)?;
        let balance = token.balances.entry(account.clone()).or_default();
        *balance = balance.checked_add(amount).ok_or_else(overflow)?;

        Ok(())
    }

    /// Checks that `account` holds at least `amount` of `denom`.
    pub fn can_burn(
        &self,
        account: &A,
        denom: &PrefixedDenom,
        amount: Amount,
    ) -> Result<(), TokenTransferError> {
        let token = self.bound_token(denom)?;
        let available = token.balance_of(account);

        if available < amount {
            return Err(TokenTransferError::InsufficientFunds {
                send_attempt: amount.to_string(),
                available_funds: available.to_string(),
            });
        }

        Ok(())
    }

    pub fn burn(
        &mut self,
        account: &A,
        denom: &PrefixedDenom,
        amount: Amount,
    ) -> Result<(), TokenTransferError> {
        self.can_burn(account, denom, amount)?;

        let insufficient = || TokenTransferError::InsufficientFunds {
            send_attempt: amount.to_string(),
            available_funds: Amount::zero().to_string(),
        };
        let token = self
            .bindings
            .get(denom)
            .and_then(|name| self.tokens.get_mut(name))
            .ok_or_else(|| TokenTransferError::UnknownDenom {
                denom: denom.to_string(),
            })?;

        let balance = token.balances.entry(account.clone()).or_default();
        *balance = balance.checked_sub(amount).ok_or_else(insufficient)?;
        token.total_supply = token
            .total_supply
            .checked_sub(amount)
            .ok_or_else(insufficient)?;

        Ok(())
    }

    pub fn balance_of(&self, account: &A, denom: &PrefixedDenom) -> Amount {
        self.bound_token(denom)
            .map(|token| token.balance_of(account))
            .unwrap_or_default()
    }

    pub fn total_supply(&self, denom: &PrefixedDenom) -> Amount {
        self.bound_token(denom)
            .map(|token| token.total_supply)
            .unwrap_or_default()
    }

    fn bound_token(&self, denom: &PrefixedDenom) -> Result<&VoucherToken<A>, TokenTransferError> {
        self.denom_token(denom)
            .and_then(|name| self.tokens.get(name))
            .ok_or_else(|| TokenTransferError::UnknownDenom {
                denom: denom.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(
        "/port-2/transfer-8/MY-TOKEN-TYPE-SCRIPT-HASH",
        "IBC/A74473C8545D36443C16874E2A336A00016EF1C0EA489CE552A76EE1709CE50D"
    )]
    #[case(
        "transfer/channel-0/TOKEN",
        "IBC/4E0ABD7D0931B6A832CBE96E09D965F5CD9D5A334963D70A54F3349A3A237DE4"
    )]
    fn names_vouchers_after_the_denom_hash(#[case] denom: &str, #[case] expected: &str) {
        let denom = PrefixedDenom::from_str(denom).unwrap();

        assert_eq!(voucher_name(&denom), expected);
    }

    #[test]
    fn successive_mints_accumulate() {
        let denom = PrefixedDenom::from_str("transfer/channel-0/TOKEN").unwrap();
        let mut registry = VoucherRegistry::<String>::new();
        let alice = "alice".to_string();

        registry.mint(&alice, &denom, 100u64.into()).unwrap();
        registry.mint(&alice, &denom, 51u64.into()).unwrap();

        assert_eq!(registry.balance_of(&alice, &denom), Amount::from(151u64));
        assert_eq!(registry.total_supply(&denom), Amount::from(151u64));
        assert_eq!(registry.denom_token(&denom), Some(voucher_name(&denom).as_str()));
    }

    #[test]
    fn burn_needs_a_token_and_a_balance() {
        let denom = PrefixedDenom::from_str("transfer/channel-0/TOKEN").unwrap();
        let mut registry = VoucherRegistry::<String>::new();
        let alice = "alice".to_string();
        let bob = "bob".to_string();

        assert!(matches!(
            registry.burn(&alice, &denom, 1u64.into()),
            Err(TokenTransferError::UnknownDenom { .. })
        ));

        registry.mint(&alice, &denom, 100u64.into()).unwrap();
        registry.burn(&alice, &denom, 49u64.into()).unwrap();

        assert_eq!(registry.balance_of(&alice, &denom), Amount::from(51u64));
        assert_eq!(registry.total_supply(&denom), Amount::from(51u64));
        assert!(matches!(
            registry.burn(&alice, &denom, 52u64.into()),
            Err(TokenTransferError::InsufficientFunds { .. })
        ));
        assert!(registry.burn(&bob, &denom, 1u64.into()).is_err());
    }

    #[test]
    fn explicit_binding_is_kept_on_mint() {
        let denom = PrefixedDenom::from_str("/port-2/transfer-8/MY-TOKEN-TYPE-SCRIPT-HASH").unwrap();
        let mut registry = VoucherRegistry::<String>::new();
        let alice = "alice".to_string();

        registry.set_denom_token(denom.clone(), "CKB-USDT".to_string());
        registry.mint(&alice, &denom, 100u64.into()).unwrap();

        assert_eq!(registry.denom_token(&denom), Some("CKB-USDT"));
        assert_eq!(
            registry.token("CKB-USDT").map(|t| t.balance_of(&alice)),
            Some(Amount::from(100u64))
        );
    }
}
