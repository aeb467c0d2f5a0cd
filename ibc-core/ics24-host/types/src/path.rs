//! Defines the store paths under which every IBC object is kept.
//!
//! The `Display` form of each path is the key that proofs refer to, so two
//! chains agree on where an object lives without sharing any code.

use core::fmt::{self, Formatter, Result as FmtResult};

use derive_more::{Display, From};

use crate::identifiers::{ChannelId, ClientId, ConnectionId, PortId, Sequence};

pub const CLIENT_PREFIX: &str = "clients";
pub const CLIENT_STATE: &str = "clientState";
pub const CONSENSUS_STATE_PREFIX: &str = "consensusStates";
pub const CONNECTION_PREFIX: &str = "connections";
pub const CHANNEL_PREFIX: &str = "channels";
pub const CHANNEL_END_PREFIX: &str = "channelEnds";
pub const PORT_PREFIX: &str = "ports";
pub const SEQUENCE_PREFIX: &str = "sequences";

/// Any key the IBC handlers read or write.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, From, Display)]
pub enum Path {
    NextClientSequence(NextClientSequencePath),
    NextConnectionSequence(NextConnectionSequencePath),
    NextChannelSequence(NextChannelSequencePath),
    ClientState(ClientStatePath),
    ClientConsensusState(ClientConsensusStatePath),
    ClientUpdateTime(ClientUpdateTimePath),
    ClientUpdateHeight(ClientUpdateHeightPath),
    Connection(ConnectionPath),
    ChannelEnd(ChannelEndPath),
    SeqSend(SeqSendPath),
    SeqRecv(SeqRecvPath),
    SeqAck(SeqAckPath),
    Commitment(CommitmentPath),
    Ack(AckPath),
    Receipt(ReceiptPath),
}

impl Path {
    /// The key bytes a membership proof commits to.
    pub fn into_bytes(self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}

/// Identifier counters, one fixed key each.
macro_rules! counter_path {
    ($(#[$doc:meta])* $name:ident => $key:literal) => {
        $(#[$doc])*
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name;

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
                f.write_str($key)
            }
        }
    };
}

counter_path!(NextClientSequencePath => "nextClientSequence");
counter_path!(NextConnectionSequencePath => "nextConnectionSequence");
counter_path!(NextChannelSequencePath => "nextChannelSequence");

/// Per-channel objects: `{root}/ports/{port}/channels/{channel}`.
macro_rules! channel_path {
    ($(#[$doc:meta])* $name:ident => $root:literal) => {
        $(#[$doc])*
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub PortId, pub ChannelId);

        impl $name {
            pub fn new(port_id: &PortId, channel_id: &ChannelId) -> Self {
                Self(port_id.clone(), channel_id.clone())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
                write!(
                    f,
                    "{}/{}/{}/{}/{}",
                    $root, PORT_PREFIX, self.0, CHANNEL_PREFIX, self.1
                )
            }
        }
    };
}

channel_path!(
    /// The channel end itself.
    ChannelEndPath => "channelEnds"
);
channel_path!(SeqSendPath => "nextSequenceSend");
channel_path!(SeqRecvPath => "nextSequenceRecv");
channel_path!(SeqAckPath => "nextSequenceAck");

impl ChannelEndPath {
    /// Root under which every channel end is kept.
    pub fn prefix() -> String {
        CHANNEL_END_PREFIX.to_string()
    }
}

/// Per-packet objects:
/// `{root}/ports/{port}/channels/{channel}/sequences/{sequence}`.
macro_rules! packet_path {
    ($(#[$doc:meta])* $name:ident => $root:literal) => {
        $(#[$doc])*
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name {
            pub port_id: PortId,
            pub channel_id: ChannelId,
            pub sequence: Sequence,
        }

        impl $name {
            pub fn new(port_id: &PortId, channel_id: &ChannelId, sequence: Sequence) -> Self {
                Self {
                    port_id: port_id.clone(),
                    channel_id: channel_id.clone(),
                    sequence,
                }
            }

            /// Root of every key of this kind for one channel end; the
            /// sequence is the last segment below it.
            pub fn prefix(port_id: &PortId, channel_id: &ChannelId) -> String {
                format!(
                    "{}/{}/{}/{}/{}/{}",
                    $root, PORT_PREFIX, port_id, CHANNEL_PREFIX, channel_id, SEQUENCE_PREFIX
                )
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
                write!(
                    f,
                    "{}/{}",
                    Self::prefix(&self.port_id, &self.channel_id),
                    self.sequence
                )
            }
        }
    };
}

packet_path!(
    /// Commitment to an in-flight packet, kept by the sender.
    CommitmentPath => "commitments"
);
packet_path!(
    /// Commitment to the acknowledgement written by the receiver.
    AckPath => "acks"
);
packet_path!(
    /// Proof of receipt on UNORDERED channels.
    ReceiptPath => "receipts"
);

/// Objects a client keeps per consensus height:
/// `clients/{client}/consensusStates/{revision}-{height}{suffix}`.
macro_rules! client_height_path {
    ($(#[$doc:meta])* $name:ident => $suffix:literal) => {
        $(#[$doc])*
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name {
            pub client_id: ClientId,
            pub revision_number: u64,
            pub revision_height: u64,
        }

        impl $name {
            pub fn new(client_id: ClientId, revision_number: u64, revision_height: u64) -> Self {
                Self {
                    client_id,
                    revision_number,
                    revision_height,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
                write!(
                    f,
                    "{}/{}/{}/{}-{}{}",
                    CLIENT_PREFIX,
                    self.client_id,
                    CONSENSUS_STATE_PREFIX,
                    self.revision_number,
                    self.revision_height,
                    $suffix
                )
            }
        }
    };
}

client_height_path!(ClientConsensusStatePath => "");
client_height_path!(
    /// Host time at which the consensus state of the same height was stored.
    ClientUpdateTimePath => "/processedTime"
);
client_height_path!(
    /// Host height at which the consensus state of the same height was stored.
    ClientUpdateHeightPath => "/processedHeight"
);

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From)]
#[display(fmt = "{CLIENT_PREFIX}/{_0}/{CLIENT_STATE}")]
pub struct ClientStatePath(pub ClientId);

impl ClientStatePath {
    pub fn new(client_id: ClientId) -> Self {
        Self(client_id)
    }

    pub fn prefix() -> String {
        CLIENT_PREFIX.to_string()
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From)]
#[display(fmt = "{CONNECTION_PREFIX}/{_0}")]
pub struct ConnectionPath(pub ConnectionId);

impl ConnectionPath {
    pub fn new(connection_id: &ConnectionId) -> Self {
        Self(connection_id.clone())
    }

    pub fn prefix() -> String {
        CONNECTION_PREFIX.to_string()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn port() -> PortId {
        "port-1".parse().unwrap()
    }

    #[rstest]
    #[case(NextChannelSequencePath.into(), "nextChannelSequence")]
    #[case(
        ClientStatePath::new("07-axon-1".parse().unwrap()).into(),
        "clients/07-axon-1/clientState"
    )]
    #[case(
        ClientConsensusStatePath::new("07-axon-1".parse().unwrap(), 0, 15).into(),
        "clients/07-axon-1/consensusStates/0-15"
    )]
    #[case(
        ClientUpdateTimePath::new("07-axon-1".parse().unwrap(), 0, 15).into(),
        "clients/07-axon-1/consensusStates/0-15/processedTime"
    )]
    #[case(ConnectionPath::new(&ConnectionId::new(0)).into(), "connections/connection-0")]
    #[case(
        ChannelEndPath::new(&port(), &ChannelId::new(0)).into(),
        "channelEnds/ports/port-1/channels/channel-0"
    )]
    #[case(
        SeqSendPath::new(&port(), &ChannelId::new(0)).into(),
        "nextSequenceSend/ports/port-1/channels/channel-0"
    )]
    #[case(
        CommitmentPath::new(&port(), &ChannelId::new(0), Sequence::from(1u64)).into(),
        "commitments/ports/port-1/channels/channel-0/sequences/1"
    )]
    #[case(
        AckPath::new(&port(), &ChannelId::new(0), Sequence::from(1u64)).into(),
        "acks/ports/port-1/channels/channel-0/sequences/1"
    )]
    #[case(
        ReceiptPath::new(&port(), &ChannelId::new(0), Sequence::from(1u64)).into(),
        "receipts/ports/port-1/channels/channel-0/sequences/1"
    )]
    fn paths_render_as_store_keys(#[case] path: Path, #[case] expected: &str) {
        assert_eq!(path.to_string(), expected);
    }

    #[test]
    fn commitment_prefix_contains_every_sequence() {
        let prefix = CommitmentPath::prefix(&port(), &ChannelId::new(3));
        let key = CommitmentPath::new(&port(), &ChannelId::new(3), Sequence::from(42u64)).to_string();
        assert!(key.starts_with(&prefix));
    }
}
