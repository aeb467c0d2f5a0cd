use std::time::Duration;

use ibc::core::connection::types::State;
use ibc::core::host::types::error::ErrorKind;
use ibc::core::host::types::identifiers::ClientId;
use ibc::core::host::ValidationContext;
use ibc_testkit::relayer::utils::RelayerOps;
use test_log::test;

use crate::setup::{error_kind, host, signer};

#[test]
fn open_init_stores_an_init_end() {
    let mut ctx_a = host("mock-a");
    let mut ctx_b = host("mock-b");

    let client_id_on_a = RelayerOps::create_client_on_a(&mut ctx_a, &ctx_b, signer()).unwrap();
    let client_id_on_b = RelayerOps::create_client_on_a(&mut ctx_b, &ctx_a, signer()).unwrap();

    let conn_id_on_a = RelayerOps::connection_open_init_on_a(
        &mut ctx_a,
        &ctx_b,
        client_id_on_a.clone(),
        client_id_on_b.clone(),
        Duration::ZERO,
        signer(),
    )
    .unwrap();

    assert_eq!(conn_id_on_a.as_str(), "connection-0");

    let conn_end_on_a = ctx_a.ibc_store().connection_end(&conn_id_on_a).unwrap();
    assert_eq!(conn_end_on_a.state(), State::Init);
    assert_eq!(conn_end_on_a.client_id(), &client_id_on_a);
    assert_eq!(conn_end_on_a.counterparty().client_id(), &client_id_on_b);
    assert_eq!(conn_end_on_a.counterparty().connection_id(), None);
}

#[test]
fn open_init_requires_an_existing_client() {
    let mut ctx_a = host("mock-a");
    let ctx_b = host("mock-b");
    let height_before = ctx_a.latest_height();

    let err = RelayerOps::connection_open_init_on_a(
        &mut ctx_a,
        &ctx_b,
        ClientId::new("07-axon", 0).unwrap(),
        ClientId::new("07-axon", 0).unwrap(),
        Duration::ZERO,
        signer(),
    )
    .unwrap_err();

    assert_eq!(error_kind(&err), Some(ErrorKind::NotFound));
    assert_eq!(ctx_a.latest_height(), height_before);
}
