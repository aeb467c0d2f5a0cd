use ibc::core::channel::types::channel::{Order, State};
use ibc::core::channel::types::error::ChannelError;
use ibc::core::channel::types::msgs::{ChannelMsg, MsgChannelOpenTry};
use ibc::core::handler::types::error::ContextError;
use ibc::core::handler::types::msgs::MsgEnvelope;
use ibc::core::host::types::error::ErrorKind;
use ibc::core::host::types::identifiers::PortId;
use ibc::core::host::types::path::{ChannelEndPath, Path};
use ibc::core::host::ValidationContext;
use ibc::core::router::types::module::ModuleId;
use ibc_query::core::context::ProvableContext;
use ibc_testkit::relayer::error::RelayerError;
use ibc_testkit::relayer::utils::RelayerOps;
use ibc_testkit::testapp::ibc::applications::module::{
    MockModule, ModuleCall, MOCK_MODULE_ID, MOCK_VERSION,
};
use ibc_testkit::testapp::ibc::applications::transfer::bank::MockBank;
use rstest::*;

use crate::setup::{connected, error_kind, mock_port, signer, Connected};

#[rstest]
#[case(Order::Unordered)]
#[case(Order::Ordered)]
fn handshake_opens_both_ends(mut connected: Connected, #[case] ordering: Order) {
    let port_id = mock_port();
    let (module_a, module_b) = connected.bind_mock_modules(&port_id);

    let (chan_id_on_a, chan_id_on_b) = connected
        .open_channel(&port_id, ordering)
        .expect("handshake succeeds");

    let chan_end_on_a = connected
        .relayer
        .get_ctx_a()
        .ibc_store()
        .channel_end(&ChannelEndPath::new(&port_id, &chan_id_on_a))
        .unwrap();
    let chan_end_on_b = connected
        .relayer
        .get_ctx_b()
        .ibc_store()
        .channel_end(&ChannelEndPath::new(&port_id, &chan_id_on_b))
        .unwrap();

    for chan_end in [&chan_end_on_a, &chan_end_on_b] {
        assert_eq!(chan_end.state(), State::Open);
        assert_eq!(chan_end.ordering(), ordering);
        assert_eq!(chan_end.version().as_str(), MOCK_VERSION);
    }
    assert_eq!(
        chan_end_on_a.counterparty().channel_id(),
        Some(&chan_id_on_b)
    );
    assert_eq!(
        chan_end_on_b.counterparty().channel_id(),
        Some(&chan_id_on_a)
    );
    assert_eq!(chan_end_on_a.connection_id(), &connected.conn_id_on_a);
    assert_eq!(chan_end_on_b.connection_id(), &connected.conn_id_on_b);

    assert_eq!(
        module_a.calls(),
        vec![
            ModuleCall::ChanOpenInit {
                port_id: port_id.clone(),
                channel_id: chan_id_on_a.clone(),
                order: ordering,
            },
            ModuleCall::ChanOpenAck {
                port_id: port_id.clone(),
                channel_id: chan_id_on_a,
            },
        ]
    );
    assert_eq!(
        module_b.calls(),
        vec![
            ModuleCall::ChanOpenTry {
                port_id: port_id.clone(),
                channel_id: chan_id_on_b.clone(),
                order: ordering,
            },
            ModuleCall::ChanOpenConfirm {
                port_id,
                channel_id: chan_id_on_b,
            },
        ]
    );
}

#[rstest]
fn module_can_refuse_the_ordering(mut connected: Connected) {
    let port_id = mock_port();
    let module = MockModule::rejecting(Order::Ordered);
    connected
        .relayer
        .get_ctx_a_mut()
        .add_module(
            ModuleId::new(MOCK_MODULE_ID.to_string()),
            port_id.clone(),
            module.clone(),
        )
        .unwrap();
    let height_before = connected.relayer.get_ctx_a().latest_height();

    let err = connected
        .open_channel(&port_id, Order::Ordered)
        .unwrap_err();

    assert_eq!(error_kind(&err), Some(ErrorKind::ApplicationRejected));
    assert_eq!(connected.relayer.get_ctx_a().latest_height(), height_before);
    assert!(module.calls().is_empty());
}

#[rstest]
fn transfer_channels_must_be_unordered(mut connected: Connected) {
    connected
        .relayer
        .get_ctx_a_mut()
        .add_transfer_module(MockBank::new())
        .unwrap();
    connected
        .relayer
        .get_ctx_b_mut()
        .add_transfer_module(MockBank::new())
        .unwrap();

    let err = connected
        .open_channel(&PortId::transfer(), Order::Ordered)
        .unwrap_err();
    assert_eq!(error_kind(&err), Some(ErrorKind::ApplicationRejected));

    connected
        .open_channel(&PortId::transfer(), Order::Unordered)
        .expect("unordered transfer channel opens");
}

#[rstest]
fn channel_needs_a_bound_port(mut connected: Connected) {
    let err = connected
        .open_channel(&mock_port(), Order::Unordered)
        .unwrap_err();

    assert_eq!(error_kind(&err), Some(ErrorKind::NotFound));
}

/// `B` answers an ORDERED INIT end as if it were UNORDERED. The proof only
/// holds for the other ordering, which is reported as a conflict.
#[rstest]
fn try_against_the_other_ordering_is_a_conflict(mut connected: Connected) {
    let port_id = mock_port();
    let (_, module_b) = connected.bind_mock_modules(&port_id);
    let (client_id_on_b, conn_id_on_a, conn_id_on_b) = (
        connected.client_id_on_b.clone(),
        connected.conn_id_on_a.clone(),
        connected.conn_id_on_b.clone(),
    );
    let (ctx_a, ctx_b) = connected.relayer.hosts_mut();

    let chan_id_on_a = RelayerOps::channel_open_init_on_a(
        ctx_a,
        conn_id_on_a,
        port_id.clone(),
        port_id.clone(),
        Order::Ordered,
        signer(),
    )
    .unwrap();
    RelayerOps::sync_client_on_a(ctx_b, ctx_a, client_id_on_b, signer()).unwrap();

    let chan_end_path = ChannelEndPath::new(&port_id, &chan_id_on_a);
    let version_on_a = ctx_a
        .ibc_store()
        .channel_end(&chan_end_path)
        .unwrap()
        .version()
        .clone();
    let proof_height_on_a = ctx_a.latest_height();
    let proof_chan_end_on_a = ctx_a
        .ibc_store()
        .get_proof(proof_height_on_a, &Path::ChannelEnd(chan_end_path))
        .unwrap()
        .try_into()
        .unwrap();
    let height_before = ctx_b.latest_height();

    let err = ctx_b
        .deliver(MsgEnvelope::Channel(ChannelMsg::OpenTry(MsgChannelOpenTry {
            port_id_on_b: port_id.clone(),
            conn_id_on_b,
            port_id_on_a: port_id,
            chan_id_on_a,
            version_supported_on_a: version_on_a,
            proof_chan_end_on_a,
            proof_height_on_a,
            ordering: Order::Unordered,
            signer: signer(),
        })))
        .unwrap_err();

    assert!(matches!(
        err,
        RelayerError::TransactionFailed(ContextError::ChannelError(
            ChannelError::OrderingMismatch {
                expected: Order::Unordered,
                actual: Order::Ordered,
            }
        ))
    ));
    assert_eq!(error_kind(&err), Some(ErrorKind::Conflict));
    assert_eq!(ctx_b.latest_height(), height_before);
    assert!(module_b.calls().is_empty());
}
