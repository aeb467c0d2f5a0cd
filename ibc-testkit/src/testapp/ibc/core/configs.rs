use core::time::Duration;

use ibc::core::channel::types::packet::Packet;
use ibc::core::channel::types::timeout::{TimeoutHeight, TimeoutTimestamp};
use ibc::core::client::context::ClientRegistry;
use ibc::core::client::types::Height;
use ibc::core::commitment_types::commitment::CommitmentPrefix;
use ibc::core::host::types::identifiers::{ChannelId, PortId, Sequence};
use ibc::primitives::Timestamp;
use typed_builder::TypedBuilder;

use super::types::{MockIbcStore, DEFAULT_COMMITMENT_PREFIX, DEFAULT_MAX_EXPECTED_TIME_PER_BLOCK};
use crate::context::MockContext;
use crate::hosts::{HostParams, MockHost, DEFAULT_BLOCK_TIME_SECS};
use crate::testapp::ibc::clients::mock::mock_client_registry;
use crate::utils::year_2023;

/// Configuration for a [`MockContext`].
///
/// The chain is built with one block per height up to `latest_height`, the
/// last one stamped `latest_timestamp`.
#[derive(Debug, TypedBuilder)]
#[builder(build_method(into = MockContext))]
pub struct MockContextConfig {
    #[builder(default = String::from("mock-axon"), setter(into))]
    host_id: String,

    #[builder(default = Height::new(0, 5).expect("Never fails"))]
    latest_height: Height,

    #[builder(default = Duration::from_secs(DEFAULT_BLOCK_TIME_SECS))]
    block_time: Duration,

    #[builder(default = year_2023())]
    latest_timestamp: Timestamp,

    #[builder(default = DEFAULT_MAX_EXPECTED_TIME_PER_BLOCK)]
    max_expected_time_per_block: Duration,

    #[builder(default = CommitmentPrefix::try_from(DEFAULT_COMMITMENT_PREFIX.to_vec()).expect("Never fails"))]
    commitment_prefix: CommitmentPrefix,

    /// Client types the host can track counterparties with.
    #[builder(default = mock_client_registry().expect("Never fails"))]
    client_registry: ClientRegistry,
}

impl From<MockContextConfig> for MockContext {
    fn from(params: MockContextConfig) -> Self {
        assert_ne!(
            params.latest_height.revision_height(),
            0,
            "The chain must have a non-zero revision_height"
        );

        let elapsed = params.block_time
            * u32::try_from(params.latest_height.revision_height() - 1).expect("no overflow");
        let genesis_timestamp = (params.latest_timestamp - elapsed).expect("no underflow");

        let host = MockHost::new(
            HostParams::builder()
                .host_id(params.host_id)
                .revision_number(params.latest_height.revision_number())
                .block_time(params.block_time)
                .genesis_timestamp(genesis_timestamp)
                .build(),
        );

        let ibc_store = MockIbcStore::new(
            host,
            params.client_registry,
            params.commitment_prefix,
            params.max_expected_time_per_block,
        );

        let mut context = MockContext::new(ibc_store);
        while context.host().history().len() < params.latest_height.revision_height() as usize {
            context.advance_block();
        }

        assert_eq!(
            context.latest_height(),
            params.latest_height,
            "The latest height in the host must match the configured latest height"
        );
        assert_eq!(
            context.latest_timestamp(),
            params.latest_timestamp,
            "The latest timestamp in the host must match the configured latest timestamp"
        );

        context
    }
}

/// Configuration for a [`Packet`]. Defaults describe sequence 1 on
/// `transfer/channel-0` at both ends, with neither timeout set.
#[derive(TypedBuilder, Debug)]
#[builder(build_method(into = Packet))]
pub struct PacketConfig {
    #[builder(default = Sequence::from(1))]
    pub seq_on_a: Sequence,
    #[builder(default = PortId::transfer())]
    pub port_id_on_a: PortId,
    #[builder(default = ChannelId::new(0))]
    pub chan_id_on_a: ChannelId,
    #[builder(default = PortId::transfer())]
    pub port_id_on_b: PortId,
    #[builder(default = ChannelId::new(0))]
    pub chan_id_on_b: ChannelId,
    #[builder(default)]
    pub data: Vec<u8>,
    #[builder(default)]
    pub timeout_height_on_b: TimeoutHeight,
    #[builder(default)]
    pub timeout_timestamp_on_b: TimeoutTimestamp,
}

impl From<PacketConfig> for Packet {
    fn from(config: PacketConfig) -> Self {
        Packet {
            seq_on_a: config.seq_on_a,
            port_id_on_a: config.port_id_on_a,
            chan_id_on_a: config.chan_id_on_a,
            port_id_on_b: config.port_id_on_b,
            chan_id_on_b: config.chan_id_on_b,
            data: config.data,
            timeout_height_on_b: config.timeout_height_on_b,
            timeout_timestamp_on_b: config.timeout_timestamp_on_b,
        }
    }
}
