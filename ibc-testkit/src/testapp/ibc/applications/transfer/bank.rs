//! A token bank standing in for the host's asset ledger.
//!
//! Native assets are plain balances per account and denomination. Escrowed
//! amounts are kept per channel so that a returning token can only be
//! released from the channel it left by. Vouchers for incoming assets live in
//! a [`VoucherRegistry`].

use std::collections::BTreeMap;
use std::sync::Arc;

use ibc::apps::transfer::context::{
    DenomTokenContext, TokenMovement, TokenTransferExecutionContext,
    TokenTransferValidationContext,
};
use ibc::apps::transfer::types::error::TokenTransferError;
use ibc::apps::transfer::types::{Amount, PrefixedCoin, PrefixedDenom, TracePrefix};
use ibc::apps::transfer::voucher::{voucher_name, VoucherRegistry};
use ibc::core::host::types::identifiers::{ChannelId, PortId};
use ibc::primitives::Signer;
use parking_lot::Mutex;
use tracing::debug;

#[derive(Debug, Default)]
struct BankState {
    balances: BTreeMap<(Signer, PrefixedDenom), Amount>,
    escrow: BTreeMap<(TracePrefix, PrefixedDenom), Amount>,
    vouchers: VoucherRegistry<Signer>,
}

impl BankState {
    fn balance(&self, account: &Signer, denom: &PrefixedDenom) -> Amount {
        self.balances
            .get(&(account.clone(), denom.clone()))
            .copied()
            .unwrap_or_default()
    }

    fn escrowed(&self, channel: &TracePrefix, denom: &PrefixedDenom) -> Amount {
        self.escrow
            .get(&(channel.clone(), denom.clone()))
            .copied()
            .unwrap_or_default()
    }

    /// The account balance and channel escrow after `coin` moves between
    /// them, in the direction `into_escrow` says.
    fn escrow_change(
        &self,
        account: &Signer,
        channel: &TracePrefix,
        coin: &PrefixedCoin,
        into_escrow: bool,
    ) -> Result<(Amount, Amount), TokenTransferError> {
        let balance = self.balance(account, &coin.denom);
        let escrowed = self.escrowed(channel, &coin.denom);
        let (from, to) = if into_escrow {
            (balance, escrowed)
        } else {
            (escrowed, balance)
        };

        let from = from
            .checked_sub(coin.amount)
            .ok_or_else(|| insufficient(coin.amount, from))?;
        let to = to
            .checked_add(coin.amount)
            .ok_or_else(|| overflow(&coin.denom))?;

        Ok(if into_escrow { (from, to) } else { (to, from) })
    }
}

fn insufficient(send_attempt: Amount, available: Amount) -> TokenTransferError {
    TokenTransferError::InsufficientFunds {
        send_attempt: send_attempt.to_string(),
        available_funds: available.to_string(),
    }
}

fn overflow(denom: &PrefixedDenom) -> TokenTransferError {
    TokenTransferError::AmountOverflow {
        denom: denom.to_string(),
    }
}

/// The ICS-20 host context of a mock chain.
///
/// Clones share the same ledger, so a test keeps one handle while the
/// transfer module owns another.
#[derive(Clone, Debug, Default)]
pub struct MockBank {
    state: Arc<Mutex<BankState>>,
}

impl MockBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `amount` of a native `denom` to `account`.
    pub fn fund(
        &self,
        account: &Signer,
        denom: &PrefixedDenom,
        amount: Amount,
    ) -> Result<(), TokenTransferError> {
        let mut state = self.state.lock();
        let balance = state
            .balances
            .entry((account.clone(), denom.clone()))
            .or_default();
        *balance = balance.checked_add(amount).ok_or_else(|| overflow(denom))?;
        Ok(())
    }

    /// Native balance of `account` in `denom`.
    pub fn balance(&self, account: &Signer, denom: &PrefixedDenom) -> Amount {
        self.state.lock().balance(account, denom)
    }

    /// Amount of `denom` held in escrow for the channel `port_id/channel_id`.
    pub fn escrowed(&self, port_id: &PortId, channel_id: &ChannelId, denom: &PrefixedDenom) -> Amount {
        let channel = TracePrefix::new(port_id.clone(), channel_id.clone());
        self.state.lock().escrowed(&channel, denom)
    }

    /// Voucher balance of `account` for the incoming `denom`.
    pub fn voucher_balance(&self, account: &Signer, denom: &PrefixedDenom) -> Amount {
        self.state.lock().vouchers.balance_of(account, denom)
    }

    pub fn voucher_supply(&self, denom: &PrefixedDenom) -> Amount {
        self.state.lock().vouchers.total_supply(denom)
    }

    /// Name of the voucher token backing `denom`, if one is bound.
    pub fn voucher_token(&self, denom: &PrefixedDenom) -> Option<String> {
        self.state.lock().vouchers.denom_token(denom).map(String::from)
    }
}

impl TokenTransferValidationContext for MockBank {
    type AccountId = Signer;

    fn bound_port(&self) -> Result<PortId, TokenTransferError> {
        Ok(PortId::transfer())
    }

    fn sending_enabled(&self) -> Result<(), TokenTransferError> {
        Ok(())
    }

    fn receiving_enabled(&self) -> Result<(), TokenTransferError> {
        Ok(())
    }

    fn validate_movement(
        &self,
        movement: TokenMovement<'_, Signer>,
        coin: &PrefixedCoin,
    ) -> Result<(), TokenTransferError> {
        let state = self.state.lock();
        let vouchers = &state.vouchers;

        match movement {
            TokenMovement::Escrow {
                account, channel, ..
            } => state.escrow_change(account, channel, coin, true).map(drop),
            TokenMovement::Unescrow { account, channel } => {
                state.escrow_change(account, channel, coin, false).map(drop)
            }
            TokenMovement::Mint { account } => vouchers.can_mint(account, &coin.denom, coin.amount),
            TokenMovement::Burn { account, .. } => {
                vouchers.can_burn(account, &coin.denom, coin.amount)
            }
        }
    }

    fn denom_trace_hash(&self, denom: &PrefixedDenom) -> Option<String> {
        Some(voucher_name(denom))
    }
}

impl TokenTransferExecutionContext for MockBank {
    fn apply_movement(
        &mut self,
        movement: TokenMovement<'_, Signer>,
        coin: &PrefixedCoin,
    ) -> Result<(), TokenTransferError> {
        let mut state = self.state.lock();
        debug!(account = %movement.account(), %coin, ?movement, "moving tokens");

        let (account, channel, into_escrow) = match movement {
            TokenMovement::Escrow {
                account, channel, ..
            } => (account, channel, true),
            TokenMovement::Unescrow { account, channel } => (account, channel, false),
            TokenMovement::Mint { account } => {
                return state.vouchers.mint(account, &coin.denom, coin.amount)
            }
            TokenMovement::Burn { account, .. } => {
                return state.vouchers.burn(account, &coin.denom, coin.amount)
            }
        };

        let (balance, escrowed) = state.escrow_change(account, channel, coin, into_escrow)?;
        state
            .balances
            .insert((account.clone(), coin.denom.clone()), balance);
        state
            .escrow
            .insert((channel.clone(), coin.denom.clone()), escrowed);

        Ok(())
    }
}

impl DenomTokenContext for MockBank {
    fn denom_token(&self, denom: &PrefixedDenom) -> Option<String> {
        self.voucher_token(denom)
    }

    fn set_denom_token(
        &mut self,
        denom: PrefixedDenom,
        token: String,
    ) -> Result<(), TokenTransferError> {
        self.state.lock().vouchers.set_denom_token(denom, token);
        Ok(())
    }
}
