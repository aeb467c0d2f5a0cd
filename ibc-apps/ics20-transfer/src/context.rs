//! Host-side token bookkeeping the transfer handlers drive.

use ibc_app_transfer_types::error::TokenTransferError;
use ibc_app_transfer_types::{Memo, PrefixedCoin, PrefixedDenom, TracePrefix};
use ibc_core::host::types::identifiers::PortId;
use ibc_core::primitives::Signer;

/// One balance change of a transfer step.
///
/// Tokens sent from the chain they belong to sit in the escrow of the
/// channel they left through, keyed by that channel's local hop. Everything
/// else is a voucher that is minted on the way in and burned on the way
/// out.
#[derive(Debug)]
pub enum TokenMovement<'a, AccountId> {
    /// `account` hands the coin over to the escrow of `channel`.
    Escrow {
        account: &'a AccountId,
        channel: &'a TracePrefix,
        memo: &'a Memo,
    },
    /// The escrow of `channel` pays the coin out to `account`.
    Unescrow {
        account: &'a AccountId,
        channel: &'a TracePrefix,
    },
    /// A voucher for the coin is created in `account`.
    Mint { account: &'a AccountId },
    /// A voucher held by `account` is destroyed.
    Burn {
        account: &'a AccountId,
        memo: &'a Memo,
    },
}

impl<A> Clone for TokenMovement<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for TokenMovement<'_, A> {}

impl<'a, A> TokenMovement<'a, A> {
    /// Whether the coin enters circulation on this chain. Mints and escrows
    /// take a denomination in; unescrows and burns only settle earlier ones.
    pub fn admits_denom(&self) -> bool {
        matches!(self, Self::Escrow { .. } | Self::Mint { .. })
    }

    pub fn account(&self) -> &'a A {
        match *self {
            Self::Escrow { account, .. }
            | Self::Unescrow { account, .. }
            | Self::Mint { account }
            | Self::Burn { account, .. } => account,
        }
    }
}

/// Read access to the host's token ledger.
pub trait TokenTransferValidationContext {
    type AccountId: TryFrom<Signer>;

    /// The port the transfer module is bound to.
    fn bound_port(&self) -> Result<PortId, TokenTransferError>;

    /// Fails when the host has outgoing transfers switched off.
    fn sending_enabled(&self) -> Result<(), TokenTransferError>;

    /// Fails when the host has incoming transfers switched off.
    fn receiving_enabled(&self) -> Result<(), TokenTransferError>;

    /// Checks that `movement` of `coin` would succeed without applying it.
    fn validate_movement(
        &self,
        movement: TokenMovement<'_, Self::AccountId>,
        coin: &PrefixedCoin,
    ) -> Result<(), TokenTransferError>;

    /// The hash hosts with hashed denominations publish in denom trace
    /// events. `None` leaves the attribute out.
    fn denom_trace_hash(&self, _denom: &PrefixedDenom) -> Option<String> {
        None
    }
}

/// Write access to the host's token ledger.
pub trait TokenTransferExecutionContext: TokenTransferValidationContext {
    /// Applies `movement` of `coin`. Called only after
    /// [`validate_movement`](TokenTransferValidationContext::validate_movement)
    /// accepted the same movement.
    fn apply_movement(
        &mut self,
        movement: TokenMovement<'_, Self::AccountId>,
        coin: &PrefixedCoin,
    ) -> Result<(), TokenTransferError>;
}

/// Explicit bindings between denominations and the host tokens that back
/// them.
///
/// Hosts that only admit pre-approved assets record the approval here; see
/// [`AllowListTransferContext`](crate::allow_list::AllowListTransferContext).
pub trait DenomTokenContext {
    /// The token bound to `denom`, if any.
    fn denom_token(&self, denom: &PrefixedDenom) -> Option<String>;

    /// Binds `denom` to `token`, replacing an earlier binding.
    fn set_denom_token(
        &mut self,
        denom: PrefixedDenom,
        token: String,
    ) -> Result<(), TokenTransferError>;
}
