use ibc::core::channel::types::channel::{Order, State};
use ibc::core::channel::types::events::ChannelEventKind;
use ibc::core::handler::types::events::IbcEvent;
use ibc::core::host::types::error::ErrorKind;
use ibc::core::host::types::path::{ChannelEndPath, CommitmentPath};
use ibc::core::host::ValidationContext;
use ibc_testkit::testapp::ibc::applications::module::ModuleCall;
use ibc_testkit::testapp::ibc::core::configs::PacketConfig;
use rstest::*;

use super::has_event;
use crate::setup::{connected, error_kind, mock_port, signer, timeout_after, Connected};

#[rstest]
fn unordered_timeout_releases_the_commitment(mut connected: Connected) {
    let port_id = mock_port();
    let (module_a, module_b) = connected.bind_mock_modules(&port_id);
    let (chan_id_on_a, chan_id_on_b) = connected
        .open_channel(&port_id, Order::Unordered)
        .unwrap();

    let packet = PacketConfig::builder()
        .port_id_on_a(port_id.clone())
        .chan_id_on_a(chan_id_on_a.clone())
        .port_id_on_b(port_id.clone())
        .chan_id_on_b(chan_id_on_b)
        .data(b"never delivered".to_vec())
        .timeout_timestamp_on_b(timeout_after(connected.relayer.get_ctx_a(), 30))
        .build();
    connected
        .relayer
        .get_ctx_a_mut()
        .send_packet(packet.clone())
        .unwrap();

    connected
        .relayer
        .timeout_packet_on_a(packet.clone(), signer())
        .expect("timeout is proven");

    let ctx_a = connected.relayer.get_ctx_a();
    assert!(ctx_a
        .ibc_store()
        .packet_commitment(&CommitmentPath::new(&port_id, &chan_id_on_a, packet.seq_on_a))
        .is_err());
    assert_eq!(
        ctx_a
            .ibc_store()
            .channel_end(&ChannelEndPath::new(&port_id, &chan_id_on_a))
            .unwrap()
            .state(),
        State::Open
    );
    assert!(module_a
        .calls()
        .contains(&ModuleCall::TimeoutPacket(packet)));
    assert!(module_b.received_packets().is_empty());
}

#[rstest]
fn ordered_timeout_closes_the_channel(mut connected: Connected) {
    let port_id = mock_port();
    let (module_a, _) = connected.bind_mock_modules(&port_id);
    let (chan_id_on_a, chan_id_on_b) = connected
        .open_channel(&port_id, Order::Ordered)
        .unwrap();

    let packet = PacketConfig::builder()
        .port_id_on_a(port_id.clone())
        .chan_id_on_a(chan_id_on_a.clone())
        .port_id_on_b(port_id.clone())
        .chan_id_on_b(chan_id_on_b)
        .data(b"never delivered".to_vec())
        .timeout_timestamp_on_b(timeout_after(connected.relayer.get_ctx_a(), 30))
        .build();
    connected
        .relayer
        .get_ctx_a_mut()
        .send_packet(packet.clone())
        .unwrap();

    connected
        .relayer
        .timeout_packet_on_a(packet.clone(), signer())
        .expect("timeout is proven");

    let ctx_a = connected.relayer.get_ctx_a();
    assert_eq!(
        ctx_a
            .ibc_store()
            .channel_end(&ChannelEndPath::new(&port_id, &chan_id_on_a))
            .unwrap()
            .state(),
        State::Closed
    );
    assert!(has_event(&ctx_a.get_events(), |e| matches!(
        e,
        IbcEvent::Channel(c) if c.kind == ChannelEventKind::Closed
    )));
    assert!(module_a
        .calls()
        .contains(&ModuleCall::TimeoutPacket(packet.clone())));

    // nothing more can be sent on a closed channel
    let next = PacketConfig::builder()
        .seq_on_a(packet.seq_on_a.increment())
        .port_id_on_a(packet.port_id_on_a)
        .chan_id_on_a(packet.chan_id_on_a)
        .port_id_on_b(packet.port_id_on_b)
        .chan_id_on_b(packet.chan_id_on_b)
        .timeout_timestamp_on_b(timeout_after(ctx_a, 600))
        .build();
    let err = connected
        .relayer
        .get_ctx_a_mut()
        .send_packet(next)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);
}

#[rstest]
fn timeout_before_expiry_is_rejected(mut connected: Connected) {
    let port_id = mock_port();
    connected.bind_mock_modules(&port_id);
    let (chan_id_on_a, chan_id_on_b) = connected
        .open_channel(&port_id, Order::Unordered)
        .unwrap();

    let packet = PacketConfig::builder()
        .port_id_on_a(port_id.clone())
        .chan_id_on_a(chan_id_on_a)
        .port_id_on_b(port_id)
        .chan_id_on_b(chan_id_on_b)
        .timeout_timestamp_on_b(timeout_after(connected.relayer.get_ctx_a(), 600))
        .build();
    connected
        .relayer
        .get_ctx_a_mut()
        .send_packet(packet.clone())
        .unwrap();

    let ack = connected
        .relayer
        .relay_packet_on_a(packet.clone(), signer())
        .expect("packet arrives in time");
    assert!(!ack.as_ref().is_empty());

    // delivered and acknowledged, so there is no commitment left to time out
    let err = connected
        .relayer
        .timeout_packet_on_a(packet, signer())
        .unwrap_err();
    assert_eq!(error_kind(&err), Some(ErrorKind::NotFound));
}
