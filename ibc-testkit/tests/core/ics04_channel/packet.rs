use std::time::Duration;

use ibc::core::channel::types::channel::Order;
use ibc::core::channel::types::events::PacketEventKind;
use ibc::core::channel::types::packet::Receipt;
use ibc::core::channel::types::timeout::TimeoutHeight;
use ibc::core::handler::types::events::IbcEvent;
use ibc::core::host::types::error::ErrorKind;
use ibc::core::host::types::identifiers::{PortId, Sequence};
use ibc::core::connection::types::error::ConnectionError;
use ibc::core::handler::types::error::ContextError;
use ibc::core::host::types::path::{AckPath, CommitmentPath, ReceiptPath};
use ibc::core::host::{SequenceCounter, ValidationContext};
use ibc_testkit::context::MockContext;
use ibc_testkit::relayer::context::RelayerContext;
use ibc_testkit::relayer::error::RelayerError;
use ibc_testkit::relayer::utils::RelayerOps;
use ibc_testkit::testapp::ibc::applications::module::{ModuleCall, MOCK_ACK};
use ibc_testkit::testapp::ibc::core::configs::{MockContextConfig, PacketConfig};
use rstest::*;

use super::{has_event, mock_packet};
use crate::setup::{connected, error_kind, host, mock_port, signer, timeout_after, Connected};

#[rstest]
fn packet_is_received_and_acknowledged(mut connected: Connected) {
    let port_id = mock_port();
    let (module_a, module_b) = connected.bind_mock_modules(&port_id);
    let (chan_id_on_a, chan_id_on_b) = connected
        .open_channel(&port_id, Order::Unordered)
        .unwrap();

    let packet = mock_packet(connected.relayer.get_ctx_a(), 1, &chan_id_on_a, &chan_id_on_b);
    let commitment_path = CommitmentPath::new(&port_id, &chan_id_on_a, packet.seq_on_a);

    let events = connected
        .relayer
        .get_ctx_a_mut()
        .send_packet(packet.clone())
        .expect("packet is committed");
    assert!(has_event(&events, |e| matches!(e, IbcEvent::Packet(p) if p.kind == PacketEventKind::Send)));

    let ctx_a = connected.relayer.get_ctx_a();
    assert!(ctx_a
        .ibc_store()
        .packet_commitment(&commitment_path)
        .is_ok());
    assert_eq!(
        ctx_a
            .ibc_store()
            .packet_sequence(SequenceCounter::Send, &port_id, &chan_id_on_a)
            .unwrap(),
        Sequence::from(2)
    );

    let ack = connected
        .relayer
        .relay_packet_on_a(packet.clone(), signer())
        .expect("packet is relayed");
    assert_eq!(ack.as_ref(), MOCK_ACK);

    let ctx_b = connected.relayer.get_ctx_b();
    assert_eq!(
        ctx_b
            .ibc_store()
            .packet_receipt(&ReceiptPath::new(&port_id, &chan_id_on_b, packet.seq_on_a))
            .unwrap(),
        Receipt::Ok
    );
    assert!(ctx_b
        .ibc_store()
        .packet_acknowledgement(&AckPath::new(&port_id, &chan_id_on_b, packet.seq_on_a))
        .is_ok());
    assert_eq!(module_b.received_packets(), vec![packet.clone()]);

    // the acknowledgement releases the commitment on the sender
    assert!(connected
        .relayer
        .get_ctx_a()
        .ibc_store()
        .packet_commitment(&commitment_path)
        .is_err());
    assert!(module_a.calls().iter().any(|call| matches!(
        call,
        ModuleCall::AcknowledgePacket { packet: p, .. } if p == &packet
    )));
}

#[rstest]
#[case(Order::Unordered)]
#[case(Order::Ordered)]
fn received_packet_cannot_be_replayed(mut connected: Connected, #[case] ordering: Order) {
    let port_id = mock_port();
    let (_, module_b) = connected.bind_mock_modules(&port_id);
    let (chan_id_on_a, chan_id_on_b) = connected.open_channel(&port_id, ordering).unwrap();

    let packet = mock_packet(connected.relayer.get_ctx_a(), 1, &chan_id_on_a, &chan_id_on_b);
    connected
        .relayer
        .send_packet_on_a(packet.clone(), signer())
        .unwrap();

    let err = connected
        .relayer
        .relay_packet_on_a(packet, signer())
        .unwrap_err();

    assert_eq!(error_kind(&err), Some(ErrorKind::Conflict));
    assert_eq!(module_b.received_packets().len(), 1);
}

#[rstest]
fn ordered_channel_delivers_in_sequence(mut connected: Connected) {
    let port_id = mock_port();
    let (_, module_b) = connected.bind_mock_modules(&port_id);
    let (chan_id_on_a, chan_id_on_b) = connected
        .open_channel(&port_id, Order::Ordered)
        .unwrap();

    let first = mock_packet(connected.relayer.get_ctx_a(), 1, &chan_id_on_a, &chan_id_on_b);
    let second = mock_packet(connected.relayer.get_ctx_a(), 2, &chan_id_on_a, &chan_id_on_b);
    for packet in [&first, &second] {
        connected
            .relayer
            .get_ctx_a_mut()
            .send_packet(packet.clone())
            .unwrap();
    }

    let err = connected
        .relayer
        .relay_packet_on_a(second.clone(), signer())
        .unwrap_err();
    assert_eq!(error_kind(&err), Some(ErrorKind::Conflict));
    assert!(module_b.received_packets().is_empty());

    connected
        .relayer
        .relay_packet_on_a(first.clone(), signer())
        .unwrap();
    connected
        .relayer
        .relay_packet_on_a(second.clone(), signer())
        .unwrap();

    assert_eq!(module_b.received_packets(), vec![first, second]);
    assert_eq!(
        connected
            .relayer
            .get_ctx_a()
            .ibc_store()
            .packet_sequence(SequenceCounter::Ack, &port_id, &chan_id_on_a)
            .unwrap(),
        Sequence::from(3)
    );
}

#[rstest]
fn unordered_channel_accepts_any_order(mut connected: Connected) {
    let port_id = mock_port();
    let (_, module_b) = connected.bind_mock_modules(&port_id);
    let (chan_id_on_a, chan_id_on_b) = connected
        .open_channel(&port_id, Order::Unordered)
        .unwrap();

    let first = mock_packet(connected.relayer.get_ctx_a(), 1, &chan_id_on_a, &chan_id_on_b);
    let second = mock_packet(connected.relayer.get_ctx_a(), 2, &chan_id_on_a, &chan_id_on_b);
    for packet in [&first, &second] {
        connected
            .relayer
            .get_ctx_a_mut()
            .send_packet(packet.clone())
            .unwrap();
    }

    connected
        .relayer
        .relay_packet_on_a(second.clone(), signer())
        .unwrap();
    connected
        .relayer
        .relay_packet_on_a(first.clone(), signer())
        .unwrap();

    assert_eq!(module_b.received_packets(), vec![second, first]);
}

#[rstest]
fn send_requires_a_timeout(mut connected: Connected) {
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
        .data(b"no timeout".to_vec())
        .build();

    let ctx_a = connected.relayer.get_ctx_a_mut();
    let height_before = ctx_a.latest_height();
    let err = ctx_a.send_packet(packet).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Malformed);
    assert_eq!(ctx_a.latest_height(), height_before);
}

#[rstest]
fn send_requires_the_next_sequence(mut connected: Connected) {
    let port_id = mock_port();
    connected.bind_mock_modules(&port_id);
    let (chan_id_on_a, chan_id_on_b) = connected
        .open_channel(&port_id, Order::Unordered)
        .unwrap();

    let packet = mock_packet(connected.relayer.get_ctx_a(), 2, &chan_id_on_a, &chan_id_on_b);
    let err = connected
        .relayer
        .get_ctx_a_mut()
        .send_packet(packet)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[rstest]
fn elapsed_packet_is_not_receivable(mut connected: Connected) {
    let port_id = mock_port();
    let (_, module_b) = connected.bind_mock_modules(&port_id);
    let (chan_id_on_a, chan_id_on_b) = connected
        .open_channel(&port_id, Order::Unordered)
        .unwrap();

    let packet = PacketConfig::builder()
        .port_id_on_a(port_id.clone())
        .chan_id_on_a(chan_id_on_a)
        .port_id_on_b(port_id)
        .chan_id_on_b(chan_id_on_b)
        .data(b"late".to_vec())
        .timeout_timestamp_on_b(timeout_after(connected.relayer.get_ctx_a(), 30))
        .build();
    connected
        .relayer
        .get_ctx_a_mut()
        .send_packet(packet.clone())
        .unwrap();

    while !packet.timed_out(
        &connected.relayer.get_ctx_b().latest_timestamp(),
        connected.relayer.get_ctx_b().latest_height(),
    ) {
        connected.relayer.get_ctx_b_mut().advance_block();
    }

    let err = connected
        .relayer
        .relay_packet_on_a(packet, signer())
        .unwrap_err();

    assert_eq!(error_kind(&err), Some(ErrorKind::Expired));
    assert!(module_b.received_packets().is_empty());
}

/// Full lifecycle on `port-1` over a connection whose client on `A` is the
/// second one created there.
#[test_log::test]
fn port_one_round_trip_rejects_replay() {
    let mut relayer = RelayerContext::new(host("mock-a"), host("mock-b"));

    relayer.create_client_on_a(signer()).unwrap();
    let client_id_on_a = relayer.create_client_on_a(signer()).unwrap();
    assert_eq!(client_id_on_a.as_str(), "07-axon-1");
    let client_id_on_b = relayer.create_client_on_b(signer()).unwrap();

    let (conn_id_on_a, conn_id_on_b) = relayer
        .create_connection_on_a(
            client_id_on_a.clone(),
            client_id_on_b.clone(),
            Duration::ZERO,
            signer(),
        )
        .unwrap();

    let mut connected = Connected {
        relayer,
        client_id_on_a,
        client_id_on_b,
        conn_id_on_a,
        conn_id_on_b,
    };
    let port_id = PortId::new("port-1".to_string()).unwrap();
    let (_, module_b) = connected.bind_mock_modules(&port_id);
    let (chan_id_on_a, chan_id_on_b) = connected
        .open_channel(&port_id, Order::Unordered)
        .unwrap();

    // no height timeout, so the packet carries a timestamp one instead
    let packet = PacketConfig::builder()
        .seq_on_a(Sequence::from(1))
        .port_id_on_a(port_id.clone())
        .chan_id_on_a(chan_id_on_a)
        .port_id_on_b(port_id)
        .chan_id_on_b(chan_id_on_b)
        .data(b"1234".to_vec())
        .timeout_height_on_b(TimeoutHeight::no_timeout())
        .timeout_timestamp_on_b(timeout_after(connected.relayer.get_ctx_a(), 600))
        .build();

    let ack = connected
        .relayer
        .send_packet_on_a(packet.clone(), signer())
        .expect("packet is received");
    assert_eq!(ack.as_ref(), MOCK_ACK);
    assert_eq!(module_b.received_packets(), vec![packet.clone()]);

    let err = connected
        .relayer
        .relay_packet_on_a(packet, signer())
        .unwrap_err();
    assert_eq!(error_kind(&err), Some(ErrorKind::Conflict));
}

/// A host with 10s blocks that expects one every second, so that a delay
/// in time is also a delay of many more blocks.
fn fast_expecting_host(host_id: &str) -> MockContext {
    MockContextConfig::builder()
        .host_id(host_id)
        .block_time(Duration::from_secs(10))
        .max_expected_time_per_block(Duration::from_secs(1))
        .build()
}

fn advance_blocks(ctx: &mut MockContext, count: usize) {
    for _ in 0..count {
        ctx.advance_block();
    }
}

fn delay_not_elapsed(err: &RelayerError, blocks: bool) -> bool {
    match err {
        RelayerError::TransactionFailed(ContextError::ConnectionError(e)) => {
            if blocks {
                matches!(e, ConnectionError::NotEnoughBlocksElapsed { .. })
            } else {
                matches!(e, ConnectionError::NotEnoughTimeElapsed { .. })
            }
        }
        _ => false,
    }
}

/// A proof is unusable until the connection delay has passed since the
/// client update that brought it in.
///
/// Default hosts make 3s blocks and expect 30s ones: a 30s delay is one
/// expected block, so time is what runs short. The fast expecting hosts
/// make a 10s delay worth ten expected blocks, so height runs short.
#[rstest]
#[case::in_time(host("mock-a"), host("mock-b"), Duration::from_secs(30), false)]
#[case::in_blocks(
    fast_expecting_host("mock-a"),
    fast_expecting_host("mock-b"),
    Duration::from_secs(10),
    true
)]
fn packet_waits_out_the_connection_delay(
    #[case] ctx_a: MockContext,
    #[case] ctx_b: MockContext,
    #[case] delay_period: Duration,
    #[case] blocks: bool,
) {
    let mut connected = Connected::with_delay(ctx_a, ctx_b, delay_period).unwrap();
    let port_id = mock_port();
    let (module_a, module_b) = connected.bind_mock_modules(&port_id);
    let (chan_id_on_a, chan_id_on_b) = connected
        .open_channel(&port_id, Order::Unordered)
        .unwrap();

    let packet = mock_packet(connected.relayer.get_ctx_a(), 1, &chan_id_on_a, &chan_id_on_b);
    let (client_id_on_a, client_id_on_b) = (connected.client_id_on_a, connected.client_id_on_b);
    let (ctx_a, ctx_b) = connected.relayer.hosts_mut();
    ctx_a.send_packet(packet.clone()).unwrap();

    RelayerOps::sync_client_on_a(ctx_b, ctx_a, client_id_on_b, signer()).unwrap();
    let err = RelayerOps::packet_recv_on_b(ctx_b, ctx_a, packet.clone(), signer()).unwrap_err();
    assert!(delay_not_elapsed(&err, blocks), "unexpected error: {err}");
    assert!(module_b.received_packets().is_empty());

    advance_blocks(ctx_b, 9);
    let ack = RelayerOps::packet_recv_on_b(ctx_b, ctx_a, packet.clone(), signer()).unwrap();
    assert_eq!(module_b.received_packets(), vec![packet.clone()]);

    RelayerOps::sync_client_on_a(ctx_a, ctx_b, client_id_on_a, signer()).unwrap();
    let err = RelayerOps::packet_ack_on_a(ctx_a, ctx_b, packet.clone(), ack.clone(), signer())
        .unwrap_err();
    assert!(delay_not_elapsed(&err, blocks), "unexpected error: {err}");

    advance_blocks(ctx_a, 9);
    RelayerOps::packet_ack_on_a(ctx_a, ctx_b, packet.clone(), ack, signer()).unwrap();
    assert!(ctx_a
        .ibc_store()
        .packet_commitment(&CommitmentPath::new(&port_id, &chan_id_on_a, packet.seq_on_a))
        .is_err());
    assert!(module_a.calls().iter().any(|call| matches!(
        call,
        ModuleCall::AcknowledgePacket { packet: p, .. } if p == &packet
    )));
}
