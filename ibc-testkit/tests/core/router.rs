use ibc::core::channel::types::channel::Order;
use ibc::core::host::types::error::ErrorKind;
use ibc::core::host::types::identifiers::PortId;
use ibc::core::router::types::error::RouterError;
use ibc::core::router::types::module::ModuleId;
use ibc_testkit::testapp::ibc::applications::module::{MockModule, MOCK_MODULE_ID};
use ibc_testkit::testapp::ibc::applications::transfer::MockBank;
use rstest::*;
use test_log::test;

use crate::setup::{connected, error_kind, host, mock_port, signer, Connected};

#[test]
fn a_port_is_bound_once() {
    let mut ctx = host("mock-a");
    ctx.add_module(
        ModuleId::new(MOCK_MODULE_ID.to_string()),
        mock_port(),
        MockModule::new(),
    )
    .unwrap();

    let err = ctx
        .add_module(ModuleId::new("other".to_string()), mock_port(), MockModule::new())
        .unwrap_err();

    assert!(matches!(err, RouterError::PortInUse { .. }));
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[test]
fn a_module_is_registered_once() {
    let mut ctx = host("mock-a");
    ctx.add_transfer_module(MockBank::new()).unwrap();

    let err = ctx.add_transfer_module(MockBank::new()).unwrap_err();

    assert!(matches!(err, RouterError::DuplicateModule { .. }));
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

/// Channels are routed by port, so each end reaches the module bound to its
/// own port.
#[rstest]
fn ends_route_to_their_own_ports(mut connected: Connected) {
    let port_id_on_a = mock_port();
    let port_id_on_b = PortId::new("port-b".to_string()).unwrap();

    let module_a = MockModule::new();
    let module_b = MockModule::new();
    connected
        .relayer
        .get_ctx_a_mut()
        .add_module(
            ModuleId::new(MOCK_MODULE_ID.to_string()),
            port_id_on_a.clone(),
            module_a.clone(),
        )
        .unwrap();
    connected
        .relayer
        .get_ctx_b_mut()
        .add_module(
            ModuleId::new(MOCK_MODULE_ID.to_string()),
            port_id_on_b.clone(),
            module_b.clone(),
        )
        .unwrap();

    let conn_id_on_a = connected.conn_id_on_a.clone();
    let conn_id_on_b = connected.conn_id_on_b.clone();

    // `B` has nothing bound to the mock port
    let err = connected
        .relayer
        .create_channel_on_a(
            conn_id_on_a.clone(),
            port_id_on_a.clone(),
            conn_id_on_b.clone(),
            port_id_on_a.clone(),
            Order::Unordered,
            signer(),
        )
        .unwrap_err();
    assert_eq!(error_kind(&err), Some(ErrorKind::NotFound));
    assert!(module_b.calls().is_empty());

    connected
        .relayer
        .create_channel_on_a(
            conn_id_on_a,
            port_id_on_a,
            conn_id_on_b,
            port_id_on_b,
            Order::Unordered,
            signer(),
        )
        .expect("both ports are bound");
    assert_eq!(module_b.calls().len(), 2);
    // the failed attempt left an initialized channel behind on `A`
    assert_eq!(module_a.calls().len(), 3);
}
