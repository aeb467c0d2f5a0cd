//! A token context that only moves pre-approved assets.
use ibc_app_transfer_types::error::TokenTransferError;
use ibc_app_transfer_types::{PrefixedCoin, PrefixedDenom};
use ibc_core::host::types::identifiers::PortId;

use crate::context::{
    DenomTokenContext, TokenMovement, TokenTransferExecutionContext,
    TokenTransferValidationContext,
};

/// Wraps a host token context so that a denomination must be bound through
/// [`DenomTokenContext::set_denom_token`] before it is escrowed or minted.
/// Burning an unbound denomination fails with `UnknownDenom`.
///
/// Unescrows pass through, since only approved assets reach the escrow.
#[derive(Clone, Debug)]
pub struct AllowListTransferContext<C> {
    inner: C,
}

impl<C> AllowListTransferContext<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C: DenomTokenContext> AllowListTransferContext<C> {
    fn screen<A>(
        &self,
        movement: &TokenMovement<'_, A>,
        denom: &PrefixedDenom,
    ) -> Result<(), TokenTransferError> {
        if self.inner.denom_token(denom).is_some() {
            return Ok(());
        }

        let denom = denom.to_string();
        match movement {
            TokenMovement::Unescrow { .. } => Ok(()),
            TokenMovement::Burn { .. } => Err(TokenTransferError::UnknownDenom { denom }),
            _ => Err(TokenTransferError::DenomNotAllowed { denom }),
        }
    }
}

impl<C: DenomTokenContext> DenomTokenContext for AllowListTransferContext<C> {
    fn denom_token(&self, denom: &PrefixedDenom) -> Option<String> {
        self.inner.denom_token(denom)
    }

    fn set_denom_token(
        &mut self,
        denom: PrefixedDenom,
        token: String,
    ) -> Result<(), TokenTransferError> {
        self.inner.set_denom_token(denom, token)
    }
}

impl<C> TokenTransferValidationContext for AllowListTransferContext<C>
where
    C: TokenTransferValidationContext + DenomTokenContext,
{
    type AccountId = C::AccountId;

    fn bound_port(&self) -> Result<PortId, TokenTransferError> {
        self.inner.bound_port()
    }

    fn sending_enabled(&self) -> Result<(), TokenTransferError> {
        self.inner.sending_enabled()
    }

    fn receiving_enabled(&self) -> Result<(), TokenTransferError> {
        self.inner.receiving_enabled()
    }

    fn validate_movement(
        &self,
        movement: TokenMovement<'_, Self::AccountId>,
        coin: &PrefixedCoin,
    ) -> Result<(), TokenTransferError> {
        self.screen(&movement, &coin.denom)?;
        self.inner.validate_movement(movement, coin)
    }

    fn denom_trace_hash(&self, denom: &PrefixedDenom) -> Option<String> {
        self.inner.denom_trace_hash(denom)
    }
}

impl<C> TokenTransferExecutionContext for AllowListTransferContext<C>
where
    C: TokenTransferExecutionContext + DenomTokenContext,
{
    fn apply_movement(
        &mut self,
        movement: TokenMovement<'_, Self::AccountId>,
        coin: &PrefixedCoin,
    ) -> Result<(), TokenTransferError> {
        self.screen(&movement, &coin.denom)?;
        self.inner.apply_movement(movement, coin)
    }
}
