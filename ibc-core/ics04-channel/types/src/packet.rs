//! Packets and the per-sequence state their lifecycle leaves behind.
use ibc_core_client_types::Height;
use ibc_core_host_types::identifiers::{ChannelId, PortId, Sequence};
use ibc_primitives::Timestamp;
use ibc_proto::ibc::core::channel::v1::Packet as RawPacket;

use crate::error::PacketError;
use crate::timeout::{TimeoutHeight, TimeoutTimestamp};

/// Whether an UNORDERED end has received a sequence. `None` is also what
/// a host reports for a sequence it has never seen.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Receipt {
    Ok,
    None,
}

impl Receipt {
    pub fn is_ok(&self) -> bool {
        *self == Receipt::Ok
    }
}

/// Opaque application data travelling from `(port_id_on_a, chan_id_on_a)`
/// to `(port_id_on_b, chan_id_on_b)`, bounded by at least one timeout on
/// chain B.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Packet {
    pub seq_on_a: Sequence,
    pub port_id_on_a: PortId,
    pub chan_id_on_a: ChannelId,
    pub port_id_on_b: PortId,
    pub chan_id_on_b: ChannelId,
    pub data: Vec<u8>,
    pub timeout_height_on_b: TimeoutHeight,
    pub timeout_timestamp_on_b: TimeoutTimestamp,
}

impl Packet {
    /// Whether chain B, at `height_on_b` and `time_on_b`, is past either
    /// timeout. Such a packet can no longer be received, only timed out on
    /// chain A.
    pub fn timed_out(&self, time_on_b: &Timestamp, height_on_b: Height) -> bool {
        let by_height = self.timeout_height_on_b.has_expired(height_on_b);
        by_height || self.timeout_timestamp_on_b.has_expired(time_on_b)
    }

    /// Whether at least one of the two timeouts bounds the packet.
    pub fn has_timeout(&self) -> bool {
        self.timeout_height_on_b.is_set() || self.timeout_timestamp_on_b.is_set()
    }
}

/// The bound is checked at send time, so unbounded packets still decode.
impl TryFrom<RawPacket> for Packet {
    type Error = PacketError;

    fn try_from(raw: RawPacket) -> Result<Self, Self::Error> {
        let seq_on_a = Sequence::from(raw.sequence);
        if seq_on_a.is_zero() {
            return Err(PacketError::ZeroPacketSequence);
        }

        Ok(Self {
            seq_on_a,
            port_id_on_a: raw.source_port.parse()?,
            chan_id_on_a: raw.source_channel.parse()?,
            port_id_on_b: raw.destination_port.parse()?,
            chan_id_on_b: raw.destination_channel.parse()?,
            data: raw.data,
            timeout_height_on_b: TimeoutHeight::try_from(raw.timeout_height)
                .map_err(PacketError::InvalidTimeoutHeight)?,
            timeout_timestamp_on_b: TimeoutTimestamp::from_nanoseconds(raw.timeout_timestamp)?,
        })
    }
}

impl From<Packet> for RawPacket {
    fn from(packet: Packet) -> Self {
        Self {
            sequence: packet.seq_on_a.value(),
            source_port: packet.port_id_on_a.to_string(),
            source_channel: packet.chan_id_on_a.to_string(),
            destination_port: packet.port_id_on_b.to_string(),
            destination_channel: packet.chan_id_on_b.to_string(),
            timeout_height: packet.timeout_height_on_b.into(),
            timeout_timestamp: packet.timeout_timestamp_on_b.nanoseconds(),
            data: packet.data,
        }
    }
}

/// A commitment, receipt or acknowledgement as stored under
/// `(port_id, chan_id, seq)`. Queries list packet state in this shape.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct PacketState {
    pub port_id: PortId,
    pub chan_id: ChannelId,
    pub seq: Sequence,
    pub data: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use ibc_proto::ibc::core::client::v1::Height as RawHeight;

    use super::*;

    fn raw_packet(sequence: u64, timeout_height: u64, timeout_timestamp: u64) -> RawPacket {
        RawPacket {
            sequence,
            source_port: "port-1".to_string(),
            source_channel: "channel-0".to_string(),
            destination_port: "port-1".to_string(),
            destination_channel: "channel-1".to_string(),
            data: vec![],
            timeout_height: Some(RawHeight {
                revision_number: 0,
                revision_height: timeout_height,
            }),
            timeout_timestamp,
        }
    }

    #[test]
    fn empty_data_and_unbounded_packets_decode() {
        let packet = Packet::try_from(raw_packet(1, 0, 0)).unwrap();

        assert!(packet.data.is_empty());
        assert!(!packet.has_timeout());
    }

    #[test]
    fn zero_sequence_is_rejected() {
        assert!(matches!(
            Packet::try_from(raw_packet(0, 10, 0)),
            Err(PacketError::ZeroPacketSequence)
        ));
    }

    #[test]
    fn packet_times_out_on_either_bound() {
        let packet = Packet::try_from(raw_packet(1, 10, 5_000)).unwrap();
        let early = Timestamp::from_nanoseconds(1_000).unwrap();
        let late = Timestamp::from_nanoseconds(6_000).unwrap();

        assert!(!packet.timed_out(&early, Height::new(0, 9).unwrap()));
        assert!(packet.timed_out(&early, Height::new(0, 10).unwrap()));
        assert!(packet.timed_out(&late, Height::new(0, 1).unwrap()));
    }
}
