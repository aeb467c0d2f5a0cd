//! Contains the `PacketData` type that defines the structure of token transfers' packet bytes

use core::str::FromStr;

use ibc_primitives::Signer;
use ibc_proto::ibc::applications::transfer::v2::FungibleTokenPacketData as RawPacketData;

use super::error::TokenTransferError;
use super::{Amount, Memo, PrefixedCoin, PrefixedDenom};

/// Defines the structure of token transfers' packet bytes
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawPacketData", into = "RawPacketData")]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PacketData {
    pub token: PrefixedCoin,
    pub sender: Signer,
    pub receiver: Signer,
    pub memo: Memo,
}

impl PacketData {
    /// Decodes the JSON carried in a packet's `data` field.
    pub fn from_json_bytes(data: &[u8]) -> Result<Self, TokenTransferError> {
        let data = core::str::from_utf8(data).map_err(TokenTransferError::Utf8Decode)?;
        serde_json::from_str(data).map_err(|_| TokenTransferError::PacketDataDeserialization)
    }

    /// The JSON written into a packet's `data` field.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, TokenTransferError> {
        serde_json::to_vec(self).map_err(|e| TokenTransferError::PacketDataEncoding(e.to_string()))
    }
}

impl TryFrom<RawPacketData> for PacketData {
    type Error = TokenTransferError;

    fn try_from(raw_pkt_data: RawPacketData) -> Result<Self, Self::Error> {
        // This denom may be prefixed or unprefixed.
        let denom = PrefixedDenom::from_str(&raw_pkt_data.denom)?;
        let amount = Amount::from_str(&raw_pkt_data.amount)?;
        Ok(Self {
            token: PrefixedCoin { denom, amount },
            sender: raw_pkt_data.sender.into(),
            receiver: raw_pkt_data.receiver.into(),
            memo: raw_pkt_data.memo.into(),
        })
    }
}

impl From<PacketData> for RawPacketData {
    fn from(pkt_data: PacketData) -> Self {
        Self {
            denom: pkt_data.token.denom.to_string(),
            amount: pkt_data.token.amount.to_string(),
            sender: pkt_data.sender.to_string(),
            receiver: pkt_data.receiver.to_string(),
            memo: pkt_data.memo.to_string(),
        }
    }
}
