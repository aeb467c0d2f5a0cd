//! Hashes the channel layer commits to instead of storing packets and
//! acknowledgements themselves.

use sha2::{Digest, Sha256};

use crate::acknowledgement::Acknowledgement;
use crate::timeout::{TimeoutHeight, TimeoutTimestamp};

/// Declares an opaque hash the channel layer stores under a packet path.
macro_rules! stored_hash {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[derive(Clone, Debug, PartialEq, Eq, derive_more::From, derive_more::Into)]
        pub struct $name(Vec<u8>);

        impl $name {
            pub fn into_vec(self) -> Vec<u8> {
                self.0
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }
    };
}

stored_hash!(
    /// What the sending chain keeps of a packet until it is acknowledged
    /// or timed out.
    PacketCommitment
);

stored_hash!(
    /// What the receiving chain keeps of the acknowledgement it wrote.
    AcknowledgementCommitment
);

/// `sha256(timeout timestamp ‖ timeout revision ‖ timeout height ‖ sha256(data))`
/// with each integer as 8 big-endian bytes. Unset timeouts count as zero.
pub fn compute_packet_commitment(
    packet_data: &[u8],
    timeout_height: &TimeoutHeight,
    timeout_timestamp: &TimeoutTimestamp,
) -> PacketCommitment {
    let mut hasher = Sha256::new();
    for word in [
        timeout_timestamp.nanoseconds(),
        timeout_height.commitment_revision_number(),
        timeout_height.commitment_revision_height(),
    ] {
        hasher.update(word.to_be_bytes());
    }
    hasher.update(hash(packet_data));

    hasher.finalize().to_vec().into()
}

pub fn compute_ack_commitment(ack: &Acknowledgement) -> AcknowledgementCommitment {
    hash(ack.as_ref()).to_vec().into()
}

fn hash(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

#[cfg(test)]
mod tests {
    use ibc_core_client_types::Height;

    use super::*;

    #[test]
    fn packet_commitment_binds_timeouts_and_data() {
        let expected: [u8; 32] = [
            0xa9, 0x28, 0xb5, 0x1f, 0x62, 0xbd, 0x54, 0x00, 0x91, 0xec, 0x45, 0x1f, 0x4e, 0xf3,
            0x45, 0x79, 0x4f, 0x05, 0x9e, 0x65, 0x91, 0x08, 0x16, 0x86, 0x61, 0x26, 0xdc, 0x36,
            0x4f, 0x84, 0xcc, 0x15,
        ];
        let actual = compute_packet_commitment(
            b"packet data",
            &TimeoutHeight::At(Height::new(42, 24).unwrap()),
            &TimeoutTimestamp::from_nanoseconds(0x42).unwrap(),
        );
        assert_eq!(&expected[..], actual.as_ref());
    }

    #[test]
    fn packet_commitment_changes_with_timeout() {
        let unbounded =
            compute_packet_commitment(b"1234", &TimeoutHeight::Never, &TimeoutTimestamp::Never);
        let bounded = compute_packet_commitment(
            b"1234",
            &TimeoutHeight::At(Height::new(0, 1).unwrap()),
            &TimeoutTimestamp::Never,
        );
        assert_ne!(unbounded, bounded);
    }

    #[test]
    fn ack_commitment_is_sha256_of_ack() {
        let expected: [u8; 32] = [
            0x05, 0x4e, 0xde, 0xc1, 0xd0, 0x21, 0x1f, 0x62, 0x4f, 0xed, 0x0c, 0xbc, 0xa9, 0xd4,
            0xf9, 0x40, 0x0b, 0x0e, 0x49, 0x1c, 0x43, 0x74, 0x2a, 0xf2, 0xc5, 0xb0, 0xab, 0xeb,
            0xf0, 0xc9, 0x90, 0xd8,
        ];
        let ack = Acknowledgement::try_from(vec![0, 1, 2, 3]).unwrap();
        assert_eq!(&expected[..], compute_ack_commitment(&ack).as_ref());
    }
}
