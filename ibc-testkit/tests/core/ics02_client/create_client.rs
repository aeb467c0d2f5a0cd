use ibc::core::client::context::ClientValidationContext;
use ibc::core::client::types::events::ClientEventKind;
use ibc::core::client::types::Status;
use ibc::core::handler::types::events::IbcEvent;
use ibc::core::host::types::error::ErrorKind;
use ibc::core::host::types::identifiers::ClientType;
use ibc::core::host::types::path::ClientConsensusStatePath;
use ibc_testkit::context::MockContext;
use ibc_testkit::testapp::ibc::clients::mock::client_state::{
    axon_client_type, ckb4ibc_client_type, MockClientConfig,
};
use rstest::*;

use super::{create_client, msg_create_client};
use crate::setup::{error_kind, host};

#[test_log::test]
fn create_client_stores_both_states() {
    let mut ctx = MockContext::default();
    let counterparty = host("mock-b");
    let header = counterparty.latest_header();

    let events = ctx
        .deliver(msg_create_client(
            MockClientConfig::builder()
                .latest_header(header.clone())
                .build(),
        ))
        .expect("client is created");

    let Some(IbcEvent::Client(event)) = events
        .into_iter()
        .find(|event| matches!(event, IbcEvent::Client(e) if e.kind == ClientEventKind::Created))
    else {
        panic!("no create_client event")
    };
    assert_eq!(event.client_id.as_str(), "07-axon-0");
    assert_eq!(event.client_type, axon_client_type());
    assert_eq!(event.consensus_height, Some(header.height()));

    let client_state = ctx
        .ibc_store()
        .client_state(&event.client_id)
        .expect("client state is stored");
    assert_eq!(client_state.latest_height(), header.height());
    assert!(!client_state.is_frozen());

    let consensus_state = ctx
        .ibc_store()
        .consensus_state(&ClientConsensusStatePath::new(
            event.client_id.clone(),
            header.height().revision_number(),
            header.height().revision_height(),
        ))
        .expect("consensus state is stored");
    assert_eq!(consensus_state.root(), &header.root);

    assert_eq!(
        ctx.ibc_store().client_status(&event.client_id).unwrap(),
        Status::Active
    );
}

/// Both mock client types share one verifier and one identifier counter.
#[test_log::test]
fn one_verifier_serves_two_client_types() {
    let mut ctx = MockContext::default();
    let header = host("mock-b").latest_header();

    let axon = create_client(
        &mut ctx,
        MockClientConfig::builder()
            .latest_header(header.clone())
            .build(),
    )
    .unwrap();
    let ckb = create_client(
        &mut ctx,
        MockClientConfig::builder()
            .client_type(ckb4ibc_client_type())
            .latest_header(header)
            .build(),
    )
    .unwrap();

    assert_eq!(axon.as_str(), "07-axon-0");
    assert_eq!(ckb.as_str(), "07-ckb4ibc-1");

    for client_id in [axon, ckb] {
        assert_eq!(
            ctx.ibc_store().client_status(&client_id).unwrap(),
            Status::Active
        );
    }
}

#[rstest]
#[case("07-tendermint")]
#[case("08-wasm")]
fn unregistered_client_type_is_not_found(#[case] client_type: &str) {
    let mut ctx = MockContext::default();
    let height_before = ctx.latest_height();

    let err = create_client(
        &mut ctx,
        MockClientConfig::builder()
            .client_type(ClientType::new(client_type).unwrap())
            .latest_header(host("mock-b").latest_header())
            .build(),
    )
    .unwrap_err();

    assert_eq!(error_kind(&err), Some(ErrorKind::NotFound));
    assert_eq!(ctx.latest_height(), height_before);

    // the failed attempt did not consume an identifier
    let client_id = create_client(
        &mut ctx,
        MockClientConfig::builder()
            .latest_header(host("mock-b").latest_header())
            .build(),
    )
    .unwrap();
    assert_eq!(client_id.as_str(), "07-axon-0");
}
