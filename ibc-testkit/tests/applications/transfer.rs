use core::fmt::Debug;

use ibc::apps::transfer::allow_list::AllowListTransferContext;
use ibc::apps::transfer::context::{DenomTokenContext, TokenTransferExecutionContext};
use ibc::apps::transfer::types::error::TokenTransferError;
use ibc::apps::transfer::types::msgs::MsgTransfer;
use ibc::apps::transfer::types::packet::PacketData;
use ibc::apps::transfer::types::{ack_success_b64, Amount, Coin, Memo, PrefixedDenom};
use ibc::apps::transfer::voucher::voucher_name;
use ibc::core::channel::types::acknowledgement::{Acknowledgement, AcknowledgementStatus};
use ibc::core::channel::types::channel::Order;
use ibc::core::channel::types::events::PacketEventKind;
use ibc::core::channel::types::packet::Packet;
use ibc::core::channel::types::timeout::TimeoutHeight;
use ibc::core::handler::types::events::IbcEvent;
use ibc::core::host::types::error::ErrorKind;
use ibc::core::host::types::identifiers::{ChannelId, PortId};
use ibc::primitives::Signer;
use ibc_testkit::context::MockContext;
use ibc_testkit::testapp::ibc::applications::transfer::MockBank;
use rstest::*;

use crate::setup::{connected, signer, timeout_after, Connected};

fn alice() -> Signer {
    Signer::from("alice".to_string())
}

fn bob() -> Signer {
    Signer::from("bob".to_string())
}

fn denom(denom: &str) -> PrefixedDenom {
    denom.parse().expect("valid denom")
}

fn success_ack() -> Acknowledgement {
    AcknowledgementStatus::success(ack_success_b64()).into()
}

/// Two hosts with a transfer application on each end of an open `transfer`
/// channel.
struct TransferPath<A, B> {
    connected: Connected,
    bank_a: A,
    bank_b: B,
    chan_id_on_a: ChannelId,
    chan_id_on_b: ChannelId,
    /// Seconds past the sender's latest block at which transfers expire.
    timeout_secs: u64,
}

impl<A, B> TransferPath<A, B>
where
    A: TokenTransferExecutionContext + Clone + Debug + 'static,
    B: TokenTransferExecutionContext + Clone + Debug + 'static,
{
    fn open(mut connected: Connected, bank_a: A, bank_b: B) -> Self {
        connected
            .relayer
            .get_ctx_a_mut()
            .add_transfer_module(bank_a.clone())
            .unwrap();
        connected
            .relayer
            .get_ctx_b_mut()
            .add_transfer_module(bank_b.clone())
            .unwrap();

        let (chan_id_on_a, chan_id_on_b) = connected
            .open_channel(&PortId::transfer(), Order::Unordered)
            .expect("transfer channel opens");

        Self {
            connected,
            bank_a,
            bank_b,
            chan_id_on_a,
            chan_id_on_b,
            timeout_secs: 600,
        }
    }

    /// Denomination `base` takes on `B` when it arrives from `A`.
    fn voucher_on_b(&self, base: &str) -> PrefixedDenom {
        denom(&format!("{}/{}/{base}", PortId::transfer(), self.chan_id_on_b))
    }

    /// `sender` on `A` sends `amount` of `denom` to `receiver` on `B`.
    /// Returns the committed packet.
    fn send_from_a(
        &mut self,
        denom: &str,
        amount: u64,
        sender: Signer,
        receiver: Signer,
    ) -> Result<Packet, TokenTransferError> {
        let msg = msg_transfer(
            self.connected.relayer.get_ctx_a(),
            &self.chan_id_on_a,
            denom,
            amount,
            sender,
            receiver,
            self.timeout_secs,
        );
        let events = self
            .connected
            .relayer
            .get_ctx_a_mut()
            .send_transfer(&mut self.bank_a, msg)?;
        Ok(sent_packet(&events))
    }

    /// `sender` on `B` sends `amount` of `denom` back to `receiver` on `A`.
    fn send_from_b(&mut self, denom: &str, amount: u64, sender: Signer, receiver: Signer) -> Packet {
        let msg = msg_transfer(
            self.connected.relayer.get_ctx_b(),
            &self.chan_id_on_b,
            denom,
            amount,
            sender,
            receiver,
            self.timeout_secs,
        );
        let events = self
            .connected
            .relayer
            .get_ctx_b_mut()
            .send_transfer(&mut self.bank_b, msg)
            .expect("transfer is sent");
        sent_packet(&events)
    }
}

fn msg_transfer(
    ctx: &MockContext,
    chan_id_on_a: &ChannelId,
    denom_str: &str,
    amount: u64,
    sender: Signer,
    receiver: Signer,
    timeout_secs: u64,
) -> MsgTransfer {
    MsgTransfer {
        port_id_on_a: PortId::transfer(),
        chan_id_on_a: chan_id_on_a.clone(),
        packet_data: PacketData {
            token: Coin::new(denom(denom_str), amount),
            sender,
            receiver,
            memo: Memo::default(),
        },
        timeout_height_on_b: TimeoutHeight::no_timeout(),
        timeout_timestamp_on_b: timeout_after(ctx, timeout_secs),
    }
}

fn sent_packet(events: &[IbcEvent]) -> Packet {
    events
        .iter()
        .find_map(|event| match event {
            IbcEvent::Packet(e) if e.kind == PacketEventKind::Send => Some(e.packet.clone()),
            _ => None,
        })
        .expect("transfer sends a packet")
}

#[rstest]
fn tokens_travel_to_b_and_back(connected: Connected) {
    let mut path = TransferPath::open(connected, MockBank::new(), MockBank::new());
    let token = denom("TOKEN");
    path.bank_a.fund(&alice(), &token, 100u64.into()).unwrap();

    let packet = path.send_from_a("TOKEN", 60, alice(), bob()).unwrap();
    let voucher = path.voucher_on_b("TOKEN");

    // escrowed at send time, before anything is relayed
    assert_eq!(path.bank_a.balance(&alice(), &token), 40u64.into());
    assert_eq!(
        path.bank_a
            .escrowed(&PortId::transfer(), &path.chan_id_on_a, &token),
        60u64.into()
    );

    let ack = path
        .connected
        .relayer
        .relay_packet_on_a(packet, signer())
        .unwrap();
    assert_eq!(ack, success_ack());

    assert_eq!(path.bank_b.voucher_balance(&bob(), &voucher), 60u64.into());
    assert_eq!(
        path.bank_b.voucher_supply(&voucher),
        path.bank_a
            .escrowed(&PortId::transfer(), &path.chan_id_on_a, &token)
    );

    let packet = path.send_from_b(&voucher.to_string(), 25, bob(), alice());
    assert_eq!(path.bank_b.voucher_supply(&voucher), 35u64.into());

    let ack = path
        .connected
        .relayer
        .relay_packet_on_b(packet, signer())
        .unwrap();
    assert_eq!(ack, success_ack());

    assert_eq!(path.bank_a.balance(&alice(), &token), 65u64.into());
    assert_eq!(
        path.bank_a
            .escrowed(&PortId::transfer(), &path.chan_id_on_a, &token),
        35u64.into()
    );
    assert_eq!(path.bank_b.voucher_balance(&bob(), &voucher), 35u64.into());
}

#[rstest]
fn vouchers_accumulate_under_one_token(connected: Connected) {
    let mut path = TransferPath::open(connected, MockBank::new(), MockBank::new());
    path.bank_a
        .fund(&alice(), &denom("TOKEN"), 1000u64.into())
        .unwrap();

    for amount in [100, 51] {
        let packet = path.send_from_a("TOKEN", amount, alice(), bob()).unwrap();
        path.connected
            .relayer
            .relay_packet_on_a(packet, signer())
            .unwrap();
    }

    let voucher = path.voucher_on_b("TOKEN");
    assert_eq!(voucher.to_string(), "transfer/channel-0/TOKEN");
    assert_eq!(path.bank_b.voucher_balance(&bob(), &voucher), 151u64.into());
    assert_eq!(path.bank_b.voucher_supply(&voucher), 151u64.into());
    assert_eq!(
        path.bank_b.voucher_token(&voucher).as_deref(),
        Some("IBC/4E0ABD7D0931B6A832CBE96E09D965F5CD9D5A334963D70A54F3349A3A237DE4")
    );
    assert_eq!(
        path.bank_b.voucher_token(&voucher),
        Some(voucher_name(&voucher))
    );
}

#[rstest]
fn insufficient_funds_fail_without_a_block(connected: Connected) {
    let mut path = TransferPath::open(connected, MockBank::new(), MockBank::new());
    path.bank_a
        .fund(&alice(), &denom("TOKEN"), 10u64.into())
        .unwrap();
    let height_before = path.connected.relayer.get_ctx_a().latest_height();

    let err = path.send_from_a("TOKEN", 11, alice(), bob()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ApplicationRejected);
    assert_eq!(path.connected.relayer.get_ctx_a().latest_height(), height_before);
    assert_eq!(path.bank_a.balance(&alice(), &denom("TOKEN")), 10u64.into());
}

#[rstest]
fn allow_list_refuses_unbound_vouchers(connected: Connected) {
    let mut path = TransferPath::open(
        connected,
        MockBank::new(),
        AllowListTransferContext::new(MockBank::new()),
    );
    let token = denom("TOKEN");
    path.bank_a.fund(&alice(), &token, 100u64.into()).unwrap();

    let packet = path.send_from_a("TOKEN", 30, alice(), bob()).unwrap();
    assert_eq!(path.bank_a.balance(&alice(), &token), 70u64.into());

    let ack = path
        .connected
        .relayer
        .relay_packet_on_a(packet, signer())
        .unwrap();
    assert_ne!(ack, success_ack());
    assert!(String::from_utf8_lossy(ack.as_ref()).contains("error"));

    // the error acknowledgement refunds the sender
    assert_eq!(path.bank_a.balance(&alice(), &token), 100u64.into());
    assert_eq!(
        path.bank_a
            .escrowed(&PortId::transfer(), &path.chan_id_on_a, &token),
        Amount::zero()
    );
    let voucher = path.voucher_on_b("TOKEN");
    assert_eq!(path.bank_b.inner().voucher_supply(&voucher), Amount::zero());
}

#[rstest]
fn allow_list_mints_into_the_bound_token(connected: Connected) {
    let mut path = TransferPath::open(
        connected,
        MockBank::new(),
        AllowListTransferContext::new(MockBank::new()),
    );
    let voucher = path.voucher_on_b("TOKEN");
    path.bank_b
        .set_denom_token(voucher.clone(), "wrapped-token".to_string())
        .unwrap();
    path.bank_a
        .fund(&alice(), &denom("TOKEN"), 100u64.into())
        .unwrap();

    let packet = path.send_from_a("TOKEN", 30, alice(), bob()).unwrap();
    let ack = path
        .connected
        .relayer
        .relay_packet_on_a(packet, signer())
        .unwrap();
    assert_eq!(ack, success_ack());

    let bank_b = path.bank_b.inner();
    assert_eq!(bank_b.voucher_token(&voucher).as_deref(), Some("wrapped-token"));
    assert_eq!(bank_b.voucher_balance(&bob(), &voucher), 30u64.into());
    assert_eq!(bank_b.voucher_supply(&voucher), 30u64.into());
}

#[rstest]
fn allow_list_refuses_unbound_source_assets(connected: Connected) {
    let mut path = TransferPath::open(
        connected,
        AllowListTransferContext::new(MockBank::new()),
        MockBank::new(),
    );
    let token = denom("TOKEN");
    path.bank_a
        .inner()
        .fund(&alice(), &token, 100u64.into())
        .unwrap();
    let height_before = path.connected.relayer.get_ctx_a().latest_height();

    let err = path.send_from_a("TOKEN", 30, alice(), bob()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ApplicationRejected);
    assert_eq!(path.connected.relayer.get_ctx_a().latest_height(), height_before);
    assert_eq!(path.bank_a.inner().balance(&alice(), &token), 100u64.into());

    // binding the asset lets it through
    path.bank_a
        .set_denom_token(token.clone(), "TOKEN".to_string())
        .unwrap();
    path.send_from_a("TOKEN", 30, alice(), bob()).unwrap();
    assert_eq!(path.bank_a.inner().balance(&alice(), &token), 70u64.into());
}

#[rstest]
fn timed_out_transfer_is_unescrowed(connected: Connected) {
    let mut path = TransferPath::open(connected, MockBank::new(), MockBank::new());
    let token = denom("TOKEN");
    path.bank_a.fund(&alice(), &token, 100u64.into()).unwrap();
    path.timeout_secs = 30;

    let packet = path.send_from_a("TOKEN", 60, alice(), bob()).unwrap();
    assert_eq!(path.bank_a.balance(&alice(), &token), 40u64.into());

    path.connected
        .relayer
        .timeout_packet_on_a(packet, signer())
        .expect("timeout is proven");

    assert_eq!(path.bank_a.balance(&alice(), &token), 100u64.into());
    assert_eq!(
        path.bank_a
            .escrowed(&PortId::transfer(), &path.chan_id_on_a, &token),
        Amount::zero()
    );
    let voucher = path.voucher_on_b("TOKEN");
    assert_eq!(path.bank_b.voucher_supply(&voucher), Amount::zero());
}

#[rstest]
fn timed_out_return_is_minted_back(connected: Connected) {
    let mut path = TransferPath::open(connected, MockBank::new(), MockBank::new());
    let token = denom("TOKEN");
    path.bank_a.fund(&alice(), &token, 100u64.into()).unwrap();

    let packet = path.send_from_a("TOKEN", 60, alice(), bob()).unwrap();
    path.connected
        .relayer
        .relay_packet_on_a(packet, signer())
        .unwrap();

    let voucher = path.voucher_on_b("TOKEN");
    path.timeout_secs = 30;
    let packet = path.send_from_b(&voucher.to_string(), 25, bob(), alice());
    assert_eq!(path.bank_b.voucher_balance(&bob(), &voucher), 35u64.into());
    assert_eq!(path.bank_b.voucher_supply(&voucher), 35u64.into());

    path.connected
        .relayer
        .timeout_packet_on_b(packet, signer())
        .expect("timeout is proven");

    assert_eq!(path.bank_b.voucher_balance(&bob(), &voucher), 60u64.into());
    assert_eq!(
        path.bank_b.voucher_supply(&voucher),
        path.bank_a
            .escrowed(&PortId::transfer(), &path.chan_id_on_a, &token)
    );
    assert_eq!(path.bank_a.balance(&alice(), &token), 40u64.into());
}
