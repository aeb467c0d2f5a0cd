//! Why a transfer was refused.
use core::convert::Infallible;
use core::str::Utf8Error;

use displaydoc::Display;
use ibc_core_channel_types::acknowledgement::StatusValue;
use ibc_core_channel_types::channel::Order;
use ibc_core_channel_types::error::{ChannelError, PacketError};
use ibc_core_handler_types::error::ContextError;
use ibc_core_host_types::error::{ErrorKind, IdentifierError};
use ibc_core_host_types::identifiers::{ChannelId, PortId};
use uint::FromDecStrErr;

#[derive(Display, Debug, derive_more::From)]
pub enum TokenTransferError {
    /// `{0}`
    ContextError(ContextError),
    /// malformed identifier: `{0}`
    InvalidIdentifier(IdentifierError),

    /// `{send_attempt}` requested but only `{available_funds}` available
    #[from(ignore)]
    InsufficientFunds {
        send_attempt: String,
        available_funds: String,
    },
    /// crediting `{denom}` would overflow
    #[from(ignore)]
    AmountOverflow { denom: String },
    /// `{denom}` is not on the allow-list
    #[from(ignore)]
    DenomNotAllowed { denom: String },
    /// no voucher is registered for `{denom}`
    #[from(ignore)]
    UnknownDenom { denom: String },
    /// channel `{channel_id}` on port `{port_id}` has no counterparty channel yet
    DestinationChannelNotFound {
        port_id: PortId,
        channel_id: ChannelId,
    },

    /// transfer channels are `{expect_order}`, not `{got_order}`
    ChannelNotUnordered {
        expect_order: Order,
        got_order: Order,
    },
    /// transfer speaks version `{expected}`, not `{actual}`
    #[from(ignore)]
    InvalidVersion { expected: String, actual: String },
    /// transfer is bound to port `{exp_port_id}`, not `{port_id}`
    InvalidPort {
        port_id: PortId,
        exp_port_id: PortId,
    },

    /// denomination has no base
    EmptyBaseDenom,
    /// trace hop `{pos}` has a malformed port: `{validation_error}`
    #[from(ignore)]
    InvalidTracePortId {
        pos: u64,
        validation_error: IdentifierError,
    },
    /// trace hop `{pos}` has a malformed channel: `{validation_error}`
    #[from(ignore)]
    InvalidTraceChannelId {
        pos: u64,
        validation_error: IdentifierError,
    },
    /// a trace is made of port and channel pairs, got `{len}` segments
    InvalidTraceLength { len: u64 },
    /// amount is not a decimal number below 2^256: `{0}`
    InvalidAmount(FromDecStrErr),
    /// `{coin}` is not an amount followed by a denomination
    #[from(ignore)]
    InvalidCoin { coin: String },
    /// token is missing or malformed
    InvalidToken,
    /// account `{0}` is not valid on this chain
    #[from(ignore)]
    ParseAccountFailure(String),
    /// packet data is not transfer JSON
    PacketDataDeserialization,
    /// acknowledgement is not transfer JSON
    AckDeserialization,
    /// packet data is not UTF-8: `{0}`
    Utf8Decode(Utf8Error),
    /// cannot encode packet data: `{0}`
    #[from(ignore)]
    PacketDataEncoding(String),
    /// `{type_url}` is not a transfer message
    #[from(ignore)]
    UnknownMsgType { type_url: String },
    /// malformed transfer message: `{reason}`
    #[from(ignore)]
    DecodeRawMsg { reason: String },
}

impl TokenTransferError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ContextError(e) => e.kind(),
            Self::InsufficientFunds { .. }
            | Self::AmountOverflow { .. }
            | Self::DenomNotAllowed { .. } => ErrorKind::ApplicationRejected,
            Self::DestinationChannelNotFound { .. } | Self::UnknownDenom { .. } => {
                ErrorKind::NotFound
            }
            Self::ChannelNotUnordered { .. } | Self::InvalidVersion { .. } => {
                ErrorKind::InvalidState
            }
            _ => ErrorKind::Malformed,
        }
    }
}

impl std::error::Error for TokenTransferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ContextError(e) => Some(e),
            Self::InvalidIdentifier(e)
            | Self::InvalidTracePortId {
                validation_error: e,
                ..
            }
            | Self::InvalidTraceChannelId {
                validation_error: e,
                ..
            } => Some(e),
            Self::InvalidAmount(e) => Some(e),
            Self::Utf8Decode(e) => Some(e),
            _ => None,
        }
    }
}

/// Raw denominations parse without failing.
impl From<Infallible> for TokenTransferError {
    fn from(e: Infallible) -> Self {
        match e {}
    }
}

impl From<TokenTransferError> for ChannelError {
    fn from(err: TokenTransferError) -> Self {
        ChannelError::AppModule {
            description: err.to_string(),
        }
    }
}

impl From<TokenTransferError> for PacketError {
    fn from(err: TokenTransferError) -> Self {
        PacketError::AppModule {
            description: err.to_string(),
        }
    }
}

/// The error acknowledgement carries the message.
impl From<TokenTransferError> for StatusValue {
    fn from(err: TokenTransferError) -> Self {
        StatusValue::new(err.to_string()).expect("error messages are never empty")
    }
}
