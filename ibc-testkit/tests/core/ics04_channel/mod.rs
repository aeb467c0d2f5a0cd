pub mod chan_open;
pub mod packet;
pub mod timeout;

use ibc::core::channel::types::packet::Packet;
use ibc::core::handler::types::events::IbcEvent;
use ibc::core::host::types::identifiers::{ChannelId, Sequence};
use ibc_testkit::context::MockContext;
use ibc_testkit::testapp::ibc::core::configs::PacketConfig;

use crate::setup::{mock_port, timeout_after};

/// Packet `seq` from the mock port on `chan_id_on_a` to the mock port on
/// `chan_id_on_b`, timing out ten minutes after the latest block of `ctx_a`.
pub fn mock_packet(
    ctx_a: &MockContext,
    seq: u64,
    chan_id_on_a: &ChannelId,
    chan_id_on_b: &ChannelId,
) -> Packet {
    PacketConfig::builder()
        .seq_on_a(Sequence::from(seq))
        .port_id_on_a(mock_port())
        .chan_id_on_a(chan_id_on_a.clone())
        .port_id_on_b(mock_port())
        .chan_id_on_b(chan_id_on_b.clone())
        .data(format!("ping {seq}").into_bytes())
        .timeout_timestamp_on_b(timeout_after(ctx_a, 600))
        .build()
}

pub fn has_event(events: &[IbcEvent], pick: impl Fn(&IbcEvent) -> bool) -> bool {
    events.iter().any(pick)
}
