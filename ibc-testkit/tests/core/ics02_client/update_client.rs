use std::time::Duration;

use ibc::core::client::context::ClientValidationContext;
use ibc::core::client::types::events::ClientEventKind;
use ibc::core::client::types::msgs::{ClientMsg, MsgSubmitMisbehaviour, MsgUpdateClient};
use ibc::core::client::types::Status;
use ibc::core::commitment_types::commitment::CommitmentRoot;
use ibc::core::handler::types::events::IbcEvent;
use ibc::core::handler::types::msgs::MsgEnvelope;
use ibc::core::host::types::error::ErrorKind;
use ibc::core::host::types::identifiers::ClientId;
use ibc_testkit::context::MockContext;
use ibc_testkit::testapp::ibc::clients::mock::client_state::MockClientConfig;
use ibc_testkit::testapp::ibc::clients::mock::header::MockHeader;
use ibc_testkit::testapp::ibc::clients::mock::misbehaviour::Misbehaviour;
use rstest::*;
use test_log::test;

use super::create_client;
use crate::setup::{error_kind, host, signer};

fn msg_update_client(client_id: &ClientId, header: MockHeader) -> MsgEnvelope {
    MsgEnvelope::Client(ClientMsg::UpdateClient(MsgUpdateClient {
        client_id: client_id.clone(),
        client_message: header.into(),
        signer: signer(),
    }))
}

fn msg_submit_misbehaviour(client_id: &ClientId, misbehaviour: Misbehaviour) -> MsgEnvelope {
    MsgEnvelope::Client(ClientMsg::Misbehaviour(MsgSubmitMisbehaviour {
        client_id: client_id.clone(),
        misbehaviour: misbehaviour.into(),
        signer: signer(),
    }))
}

fn has_update_event(events: &[IbcEvent]) -> bool {
    events
        .iter()
        .any(|event| matches!(event, IbcEvent::Client(e) if e.kind == ClientEventKind::Updated))
}

fn has_misbehaviour_event(events: &[IbcEvent]) -> bool {
    events
        .iter()
        .any(|event| matches!(event, IbcEvent::Client(e) if e.kind == ClientEventKind::Frozen))
}

/// Host `A` tracking host `B` with a client created from `B`'s latest
/// header.
struct Tracking {
    ctx_a: MockContext,
    ctx_b: MockContext,
    client_id: ClientId,
}

#[fixture]
fn tracking() -> Tracking {
    let mut ctx_a = host("mock-a");
    let ctx_b = host("mock-b");

    let client_id = create_client(
        &mut ctx_a,
        MockClientConfig::builder()
            .latest_header(ctx_b.latest_header())
            .build(),
    )
    .expect("client is created");

    Tracking {
        ctx_a,
        ctx_b,
        client_id,
    }
}

#[rstest]
fn update_client_moves_to_the_new_header(tracking: Tracking) {
    let Tracking {
        mut ctx_a,
        mut ctx_b,
        client_id,
    } = tracking;

    ctx_b.advance_block();
    ctx_b.advance_block();
    let header = ctx_b.latest_header();

    let events = ctx_a
        .deliver(msg_update_client(&client_id, header.clone()))
        .expect("update succeeds");

    assert!(has_update_event(&events));
    let client_state = ctx_a.ibc_store().client_state(&client_id).unwrap();
    assert_eq!(client_state.latest_height(), header.height());
    assert_eq!(
        ctx_a.ibc_store().client_status(&client_id).unwrap(),
        Status::Active
    );
}

#[rstest]
fn repeated_header_is_a_no_op(tracking: Tracking) {
    let Tracking {
        mut ctx_a,
        mut ctx_b,
        client_id,
    } = tracking;

    ctx_b.advance_block();
    let header = ctx_b.latest_header();

    ctx_a
        .deliver(msg_update_client(&client_id, header.clone()))
        .expect("first update succeeds");
    let events = ctx_a
        .deliver(msg_update_client(&client_id, header))
        .expect("repeating a header is accepted");

    assert!(!has_update_event(&events));
    assert!(!has_misbehaviour_event(&events));
    assert_eq!(
        ctx_a.ibc_store().client_status(&client_id).unwrap(),
        Status::Active
    );
}

#[rstest]
fn conflicting_header_freezes_the_client(tracking: Tracking) {
    let Tracking {
        mut ctx_a,
        mut ctx_b,
        client_id,
    } = tracking;

    // same height as the trusted consensus state, different root
    let forged = ctx_b
        .latest_header()
        .with_root(CommitmentRoot::from_bytes(&[7; 32]));

    let events = ctx_a
        .deliver(msg_update_client(&client_id, forged))
        .expect("evidence is accepted");

    assert!(has_misbehaviour_event(&events));
    assert_eq!(
        ctx_a.ibc_store().client_status(&client_id).unwrap(),
        Status::Frozen
    );

    ctx_b.advance_block();
    let err = ctx_a
        .deliver(msg_update_client(&client_id, ctx_b.latest_header()))
        .unwrap_err();
    assert_eq!(error_kind(&err), Some(ErrorKind::Expired));
}

#[rstest]
fn submitted_misbehaviour_freezes_the_client(tracking: Tracking) {
    let Tracking {
        mut ctx_a,
        ctx_b,
        client_id,
    } = tracking;

    let header = ctx_b.latest_header();
    let misbehaviour = Misbehaviour {
        client_id: client_id.clone(),
        header1: header.clone(),
        header2: header.with_root(CommitmentRoot::from_bytes(&[9; 32])),
    };

    let events = ctx_a
        .deliver(msg_submit_misbehaviour(&client_id, misbehaviour))
        .expect("misbehaviour is accepted");

    assert!(has_misbehaviour_event(&events));
    let client_state = ctx_a.ibc_store().client_state(&client_id).unwrap();
    assert!(client_state.is_frozen());
    assert_eq!(
        ctx_a.ibc_store().client_status(&client_id).unwrap(),
        Status::Frozen
    );
}

#[rstest]
fn agreeing_headers_are_not_misbehaviour(tracking: Tracking) {
    let Tracking {
        mut ctx_a,
        ctx_b,
        client_id,
    } = tracking;

    let header = ctx_b.latest_header();
    let misbehaviour = Misbehaviour {
        client_id: client_id.clone(),
        header1: header.clone(),
        header2: header,
    };

    let err = ctx_a
        .deliver(msg_submit_misbehaviour(&client_id, misbehaviour))
        .unwrap_err();

    assert_eq!(error_kind(&err), Some(ErrorKind::VerificationFailed));
    assert_eq!(
        ctx_a.ibc_store().client_status(&client_id).unwrap(),
        Status::Active
    );
}

#[test]
fn client_expires_after_its_trusting_period() {
    let mut ctx_a = host("mock-a");
    let mut ctx_b = host("mock-b");

    let client_id = create_client(
        &mut ctx_a,
        MockClientConfig::builder()
            .latest_header(ctx_b.latest_header())
            .trusting_period(Some(Duration::from_secs(10)))
            .build(),
    )
    .unwrap();

    // blocks are 3 seconds apart
    let target_height = ctx_a.latest_height().add(5);
    ctx_a = ctx_a.advance_block_up_to(target_height);

    assert_eq!(
        ctx_a.ibc_store().client_status(&client_id).unwrap(),
        Status::Expired
    );

    ctx_b.advance_block();
    let err = ctx_a
        .deliver(msg_update_client(&client_id, ctx_b.latest_header()))
        .unwrap_err();
    assert_eq!(error_kind(&err), Some(ErrorKind::Expired));
}

#[test]
fn unknown_client_is_not_found() {
    let mut ctx_a = host("mock-a");
    let ctx_b = host("mock-b");

    let err = ctx_a
        .deliver(msg_update_client(
            &ClientId::new("07-axon", 42).unwrap(),
            ctx_b.latest_header(),
        ))
        .unwrap_err();

    assert_eq!(error_kind(&err), Some(ErrorKind::NotFound));
}
