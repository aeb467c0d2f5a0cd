use std::time::Duration;

use ibc::core::connection::types::State;
use ibc::core::host::types::error::ErrorKind;
use ibc::core::host::ValidationContext;
use ibc_testkit::relayer::utils::RelayerOps;
use test_log::test;

use crate::setup::{error_kind, host, signer};

#[test]
fn handshake_walks_both_ends_to_open() {
    let mut ctx_a = host("mock-a");
    let mut ctx_b = host("mock-b");

    let client_id_on_a = RelayerOps::create_client_on_a(&mut ctx_a, &ctx_b, signer()).unwrap();
    let client_id_on_b = RelayerOps::create_client_on_a(&mut ctx_b, &ctx_a, signer()).unwrap();

    let conn_id_on_a = RelayerOps::connection_open_init_on_a(
        &mut ctx_a,
        &ctx_b,
        client_id_on_a.clone(),
        client_id_on_b.clone(),
        Duration::from_secs(30),
        signer(),
    )
    .unwrap();

    RelayerOps::sync_client_on_a(&mut ctx_b, &ctx_a, client_id_on_b.clone(), signer()).unwrap();
    let conn_id_on_b = RelayerOps::connection_open_try_on_b(
        &mut ctx_b,
        &ctx_a,
        conn_id_on_a.clone(),
        client_id_on_a.clone(),
        client_id_on_b.clone(),
        signer(),
    )
    .unwrap();
    assert_eq!(
        ctx_b.ibc_store().connection_end(&conn_id_on_b).unwrap().state(),
        State::TryOpen
    );

    RelayerOps::sync_client_on_a(&mut ctx_a, &ctx_b, client_id_on_a.clone(), signer()).unwrap();
    RelayerOps::connection_open_ack_on_a(
        &mut ctx_a,
        &ctx_b,
        conn_id_on_a.clone(),
        conn_id_on_b.clone(),
        client_id_on_b.clone(),
        signer(),
    )
    .unwrap();

    let conn_end_on_a = ctx_a.ibc_store().connection_end(&conn_id_on_a).unwrap();
    assert_eq!(conn_end_on_a.state(), State::Open);
    assert_eq!(
        conn_end_on_a.counterparty().connection_id(),
        Some(&conn_id_on_b)
    );

    RelayerOps::sync_client_on_a(&mut ctx_b, &ctx_a, client_id_on_b, signer()).unwrap();
    RelayerOps::connection_open_confirm_on_b(
        &mut ctx_b,
        &ctx_a,
        conn_id_on_a.clone(),
        conn_id_on_b.clone(),
        signer(),
    )
    .unwrap();

    let conn_end_on_b = ctx_b.ibc_store().connection_end(&conn_id_on_b).unwrap();
    assert_eq!(conn_end_on_b.state(), State::Open);
    assert_eq!(
        conn_end_on_b.counterparty().connection_id(),
        Some(&conn_id_on_a)
    );
    assert_eq!(conn_end_on_a.version().unwrap(), conn_end_on_b.version().unwrap());
    assert_eq!(conn_end_on_a.delay_period(), Duration::from_secs(30));
    assert_eq!(conn_end_on_b.delay_period(), Duration::from_secs(30));
}

#[test]
fn second_ack_on_an_open_connection_is_rejected() {
    let mut ctx_a = host("mock-a");
    let mut ctx_b = host("mock-b");

    let client_id_on_a = RelayerOps::create_client_on_a(&mut ctx_a, &ctx_b, signer()).unwrap();
    let client_id_on_b = RelayerOps::create_client_on_a(&mut ctx_b, &ctx_a, signer()).unwrap();

    let (conn_id_on_a, conn_id_on_b) = RelayerOps::create_connection_on_a(
        &mut ctx_a,
        &mut ctx_b,
        client_id_on_a.clone(),
        client_id_on_b.clone(),
        Duration::ZERO,
        signer(),
    )
    .unwrap();

    RelayerOps::sync_client_on_a(&mut ctx_a, &ctx_b, client_id_on_a, signer()).unwrap();
    let height_before = ctx_a.latest_height();

    let err = RelayerOps::connection_open_ack_on_a(
        &mut ctx_a,
        &ctx_b,
        conn_id_on_a.clone(),
        conn_id_on_b,
        client_id_on_b,
        signer(),
    )
    .unwrap_err();

    assert_eq!(error_kind(&err), Some(ErrorKind::InvalidState));
    assert_eq!(ctx_a.latest_height(), height_before);
    assert_eq!(
        ctx_a.ibc_store().connection_end(&conn_id_on_a).unwrap().state(),
        State::Open
    );
}
