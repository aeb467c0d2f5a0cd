//! Host state as seen through the query functions, and the atomicity of
//! failed transactions.

use ibc::core::channel::types::channel::Order;
use ibc::core::client::types::Status;
use ibc::core::connection::types::State as ConnectionState;
use ibc::core::handler::types::msgs::MsgEnvelope;
use ibc::core::host::types::error::ErrorKind;
use ibc::core::host::types::identifiers::{ChannelId, Sequence};
use ibc::core::host::types::path::{AckPath, ChannelEndPath, ClientStatePath, CommitmentPath, Path};
use ibc::core::host::{IdentifierCounter, ValidationContext};
use ibc_query::core::channel::{
    query_next_sequence_receive, query_next_sequence_send, query_packet_acknowledgement,
    query_packet_commitment, query_packet_commitment_sequences, query_packet_receipt,
    query_unreceived_acks, query_unreceived_packets, QueryChannelRequest, QueryPacketRequest,
    QueryPacketSequencesRequest,
};
use ibc_query::core::client::{query_client_state, query_client_status, QueryClientStateRequest};
use ibc_query::core::connection::{query_connection, QueryConnectionRequest};
use ibc_query::core::context::ProvableContext;
use ibc_testkit::testapp::ibc::clients::mock::client_state::MockClientConfig;
use rstest::*;
use test_log::test;

use crate::core::ics02_client::msg_create_client;
use crate::core::ics04_channel::mock_packet;
use crate::setup::{connected, error_kind, host, mock_port, signer, Connected};

/// A connected pair with an unordered channel on the mock port and three
/// packets committed on `A`, of which only the first was relayed.
fn with_packets_in_flight(connected: &mut Connected) -> (ChannelId, ChannelId) {
    let port_id = mock_port();
    connected.bind_mock_modules(&port_id);
    let (chan_id_on_a, chan_id_on_b) = connected
        .open_channel(&port_id, Order::Unordered)
        .unwrap();

    for seq in 1..=3 {
        let packet = mock_packet(connected.relayer.get_ctx_a(), seq, &chan_id_on_a, &chan_id_on_b);
        connected
            .relayer
            .get_ctx_a_mut()
            .send_packet(packet.clone())
            .unwrap();
        if seq == 1 {
            connected.relayer.relay_packet_on_a(packet, signer()).unwrap();
        }
    }

    (chan_id_on_a, chan_id_on_b)
}

#[rstest]
fn channel_queries_track_packets_in_flight(mut connected: Connected) {
    let (chan_id_on_a, chan_id_on_b) = with_packets_in_flight(&mut connected);
    let port_id = mock_port();
    let ctx_a = connected.relayer.get_ctx_a().ibc_store();
    let ctx_b = connected.relayer.get_ctx_b().ibc_store();

    assert_eq!(
        query_packet_commitment_sequences(ctx_a, &ChannelEndPath::new(&port_id, &chan_id_on_a))
            .unwrap(),
        vec![Sequence::from(2), Sequence::from(3)]
    );

    let next_send = query_next_sequence_send(
        ctx_a,
        &QueryChannelRequest {
            port_id: port_id.clone(),
            channel_id: chan_id_on_a.clone(),
            query_height: None,
        },
    )
    .unwrap();
    assert_eq!(next_send.next_sequence, Sequence::from(4));
    assert_eq!(
        next_send.proof_height,
        connected.relayer.get_ctx_a().latest_height()
    );

    for (seq, received) in [(1, true), (2, false)] {
        let receipt = query_packet_receipt(
            ctx_b,
            &QueryPacketRequest {
                port_id: port_id.clone(),
                channel_id: chan_id_on_b.clone(),
                sequence: Sequence::from(seq),
                query_height: None,
            },
        )
        .unwrap();
        assert_eq!(receipt.received, received);
    }

    let sequences: Vec<Sequence> = (1..=3).map(Sequence::from).collect();
    assert_eq!(
        query_unreceived_packets(
            ctx_b,
            &QueryPacketSequencesRequest {
                port_id: port_id.clone(),
                channel_id: chan_id_on_b,
                sequences: sequences.clone(),
            },
        )
        .unwrap(),
        vec![Sequence::from(2), Sequence::from(3)]
    );
    assert_eq!(
        query_unreceived_acks(
            ctx_a,
            &QueryPacketSequencesRequest {
                port_id,
                channel_id: chan_id_on_a,
                sequences,
            },
        )
        .unwrap(),
        vec![Sequence::from(2), Sequence::from(3)]
    );
}

#[rstest]
fn packet_state_queries_prove_stored_values(mut connected: Connected) {
    let (chan_id_on_a, chan_id_on_b) = with_packets_in_flight(&mut connected);
    let port_id = mock_port();
    let ctx_a = connected.relayer.get_ctx_a().ibc_store();
    let ctx_b = connected.relayer.get_ctx_b().ibc_store();
    let request = |channel_id: &ChannelId, seq: u64| QueryPacketRequest {
        port_id: port_id.clone(),
        channel_id: channel_id.clone(),
        sequence: Sequence::from(seq),
        query_height: None,
    };

    let commitment = query_packet_commitment(ctx_a, &request(&chan_id_on_a, 2)).unwrap();
    assert_eq!(
        commitment.packet_commitment,
        ctx_a
            .packet_commitment(&CommitmentPath::new(&port_id, &chan_id_on_a, Sequence::from(2)))
            .unwrap()
    );
    assert!(!commitment.proof.is_empty());
    assert_eq!(
        commitment.proof_height,
        connected.relayer.get_ctx_a().latest_height()
    );

    // the first packet was acknowledged, which released its commitment
    let err = query_packet_commitment(ctx_a, &request(&chan_id_on_a, 1)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let ack = query_packet_acknowledgement(ctx_b, &request(&chan_id_on_b, 1)).unwrap();
    assert_eq!(
        ack.acknowledgement,
        ctx_b
            .packet_acknowledgement(&AckPath::new(&port_id, &chan_id_on_b, Sequence::from(1)))
            .unwrap()
    );
    assert!(!ack.proof.is_empty());
    assert!(query_packet_acknowledgement(ctx_b, &request(&chan_id_on_b, 2)).is_err());

    let next_recv = query_next_sequence_receive(
        ctx_b,
        &QueryChannelRequest {
            port_id: port_id.clone(),
            channel_id: chan_id_on_b,
            query_height: None,
        },
    )
    .unwrap();
    // receipts, not the counter, track deliveries on an unordered channel
    assert_eq!(next_recv.next_sequence, Sequence::from(1));
    assert_eq!(
        next_recv.proof_height,
        connected.relayer.get_ctx_b().latest_height()
    );
}

#[rstest]
fn client_and_connection_queries(connected: Connected) {
    let ctx_a = connected.relayer.get_ctx_a();

    let client_state = query_client_state(
        ctx_a.ibc_store(),
        &QueryClientStateRequest {
            client_id: connected.client_id_on_a.clone(),
            query_height: None,
        },
    )
    .unwrap();
    assert_eq!(
        client_state.client_state.latest_height(),
        connected.relayer.get_ctx_b().latest_height()
    );
    assert!(!client_state.proof.is_empty());

    assert_eq!(
        query_client_status(ctx_a.ibc_store(), &connected.client_id_on_a)
            .unwrap()
            .status,
        Status::Active
    );

    let connection = query_connection(
        ctx_a.ibc_store(),
        &QueryConnectionRequest {
            connection_id: connected.conn_id_on_a.clone(),
            query_height: None,
        },
    )
    .unwrap();
    assert_eq!(connection.connection.state(), ConnectionState::Open);
    assert_eq!(
        connection.connection.counterparty().connection_id(),
        Some(&connected.conn_id_on_b)
    );
}

#[rstest]
fn proofs_exist_only_for_committed_heights(connected: Connected) {
    let ctx_a = connected.relayer.get_ctx_a();
    let path = Path::ClientState(ClientStatePath::new(connected.client_id_on_a.clone()));

    assert!(ctx_a
        .ibc_store()
        .get_proof(ctx_a.latest_height(), &path)
        .is_some());
    assert!(ctx_a
        .ibc_store()
        .get_proof(ctx_a.latest_height().increment(), &path)
        .is_none());

    let err = query_client_state(
        ctx_a.ibc_store(),
        &QueryClientStateRequest {
            client_id: connected.client_id_on_a.clone(),
            query_height: Some(ctx_a.latest_height().increment()),
        },
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

/// Every successful delivery commits exactly one block; a failed one leaves
/// no trace.
#[test]
fn failed_delivery_leaves_the_store_untouched() {
    let mut ctx = host("mock-a");
    let counterparty = host("mock-b");
    let header = counterparty.latest_header();

    let height_before = ctx.latest_height();
    let events_before = ctx.get_events().len();

    let bad_msg: MsgEnvelope = msg_create_client(
        MockClientConfig::builder()
            .client_type("07-unknown".parse().unwrap())
            .latest_header(header.clone())
            .build(),
    );
    let err = ctx.deliver(bad_msg).unwrap_err();

    assert_eq!(error_kind(&err), Some(ErrorKind::NotFound));
    assert_eq!(ctx.latest_height(), height_before);
    assert_eq!(ctx.get_events().len(), events_before);
    assert_eq!(ctx.ibc_store().identifier_counter(IdentifierCounter::Client).unwrap(), 0);

    ctx.deliver(msg_create_client(
        MockClientConfig::builder().latest_header(header).build(),
    ))
    .unwrap();

    assert_eq!(ctx.latest_height(), height_before.increment());
    assert_eq!(ctx.ibc_store().identifier_counter(IdentifierCounter::Client).unwrap(), 1);
}
