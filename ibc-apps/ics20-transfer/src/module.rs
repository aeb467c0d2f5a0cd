use ibc_app_transfer_types::error::TokenTransferError;
use ibc_app_transfer_types::events::TransferEvent;
use ibc_app_transfer_types::packet::PacketData;
use ibc_app_transfer_types::{ack_success_b64, VERSION};
use ibc_core::channel::types::acknowledgement::{Acknowledgement, AcknowledgementStatus};
use ibc_core::channel::types::channel::Order;
use ibc_core::channel::types::error::{ChannelError, PacketError};
use ibc_core::channel::types::packet::Packet;
use ibc_core::channel::types::Version;
use ibc_core::host::types::identifiers::{ChannelId, PortId};
use ibc_core::primitives::Signer;
use ibc_core::router::module::{ChannelOpening, Module};
use ibc_core::router::types::event::ModuleEvent;
use ibc_core::router::types::module::ModuleExtras;

use crate::context::{TokenTransferExecutionContext, TokenTransferValidationContext};
use crate::handler::{
    process_recv_packet_execute, refund_packet_token_execute, refund_packet_token_validate,
};

fn transfer_version() -> Version {
    Version::new(VERSION.to_string())
}

fn verify_transfer_version(version: &Version) -> Result<(), TokenTransferError> {
    version
        .verify_is_expected(transfer_version())
        .map_err(|_| TokenTransferError::InvalidVersion {
            expected: VERSION.to_string(),
            actual: version.to_string(),
        })
}

/// Transfer channels are UNORDERED and live on the port the host bound the
/// module to.
fn verify_opening(
    ctx: &impl TokenTransferValidationContext,
    opening: ChannelOpening<'_>,
) -> Result<(), TokenTransferError> {
    if opening.ordering != Order::Unordered {
        return Err(TokenTransferError::ChannelNotUnordered {
            expect_order: Order::Unordered,
            got_order: opening.ordering,
        });
    }

    let bound_port = ctx.bound_port()?;
    if opening.port_id != &bound_port {
        return Err(TokenTransferError::InvalidPort {
            port_id: opening.port_id.clone(),
            exp_port_id: bound_port,
        });
    }

    Ok(())
}

/// Returns the version of the new INIT end. An empty proposal is filled in
/// with `ics20-1`.
pub fn on_chan_open_init_validate(
    ctx: &impl TokenTransferValidationContext,
    opening: ChannelOpening<'_>,
    proposed_version: &Version,
) -> Result<Version, TokenTransferError> {
    verify_opening(ctx, opening)?;
    if !proposed_version.is_empty() {
        verify_transfer_version(proposed_version)?;
    }

    Ok(transfer_version())
}

pub fn on_chan_open_try_validate(
    ctx: &impl TokenTransferValidationContext,
    opening: ChannelOpening<'_>,
    counterparty_version: &Version,
) -> Result<Version, TokenTransferError> {
    verify_opening(ctx, opening)?;
    verify_transfer_version(counterparty_version)?;

    Ok(transfer_version())
}

fn decode_packet(packet: &Packet) -> Result<PacketData, TokenTransferError> {
    PacketData::from_json_bytes(&packet.data)
}

fn decode_ack(acknowledgement: &Acknowledgement) -> Result<AcknowledgementStatus, TokenTransferError> {
    serde_json::from_slice(acknowledgement.as_ref())
        .map_err(|_| TokenTransferError::AckDeserialization)
}

/// Credits the receiver and answers with the acknowledgement to write. Any
/// failure, undecodable data included, becomes an error acknowledgement.
pub fn on_recv_packet_execute(
    ctx_b: &mut impl TokenTransferExecutionContext,
    packet: &Packet,
) -> (ModuleExtras, Acknowledgement) {
    let data = match decode_packet(packet) {
        Ok(data) => data,
        Err(err) => {
            return (
                ModuleExtras::empty(),
                AcknowledgementStatus::error(err.into()).into(),
            )
        }
    };

    let (mut extras, ack) = match process_recv_packet_execute(ctx_b, packet, data.clone()) {
        Ok(extras) => (extras, AcknowledgementStatus::success(ack_success_b64())),
        Err((extras, err)) => (extras, AcknowledgementStatus::error(err.into())),
    };

    extras.events.push(
        TransferEvent::Received {
            data,
            credited: ack.is_successful(),
        }
        .into(),
    );

    (extras, ack.into())
}

/// Only an error acknowledgement moves tokens: the sender is refunded.
pub fn on_acknowledgement_packet_validate(
    ctx: &impl TokenTransferValidationContext,
    packet: &Packet,
    acknowledgement: &Acknowledgement,
) -> Result<(), TokenTransferError> {
    let data = decode_packet(packet)?;

    if decode_ack(acknowledgement)?.is_successful() {
        return Ok(());
    }
    refund_packet_token_validate(ctx, packet, &data)
}

pub fn on_acknowledgement_packet_execute(
    ctx: &mut impl TokenTransferExecutionContext,
    packet: &Packet,
    acknowledgement: &Acknowledgement,
) -> (ModuleExtras, Result<(), TokenTransferError>) {
    let settled = decode_packet(packet).and_then(|data| {
        let status = decode_ack(acknowledgement)?;
        if !status.is_successful() {
            refund_packet_token_execute(ctx, packet, &data)?;
        }
        Ok((data, status))
    });

    match settled {
        Ok((data, status)) => (
            extras_of(TransferEvent::Acknowledged { data, status }),
            Ok(()),
        ),
        Err(err) => (ModuleExtras::empty(), Err(err)),
    }
}

pub fn on_timeout_packet_validate(
    ctx: &impl TokenTransferValidationContext,
    packet: &Packet,
) -> Result<(), TokenTransferError> {
    refund_packet_token_validate(ctx, packet, &decode_packet(packet)?)
}

pub fn on_timeout_packet_execute(
    ctx: &mut impl TokenTransferExecutionContext,
    packet: &Packet,
) -> (ModuleExtras, Result<(), TokenTransferError>) {
    let refunded = decode_packet(packet)
        .and_then(|data| refund_packet_token_execute(ctx, packet, &data).map(|()| data));

    match refunded {
        Ok(data) => (extras_of(TransferEvent::Refunded(data)), Ok(())),
        Err(err) => (ModuleExtras::empty(), Err(err)),
    }
}

fn extras_of(event: TransferEvent) -> ModuleExtras {
    ModuleExtras {
        events: vec![ModuleEvent::from(event)],
        log: Vec::new(),
    }
}

/// The ICS-20 application as a port module, over the host token context `C`.
///
/// Transfer channels are UNORDERED and speak version `ics20-1`; an empty
/// proposed version is filled in with it.
#[derive(Debug)]
pub struct TransferModule<C> {
    ctx: C,
}

impl<C> TransferModule<C> {
    pub fn new(ctx: C) -> Self {
        Self { ctx }
    }

    pub fn ctx(&self) -> &C {
        &self.ctx
    }
}

impl<C> Module for TransferModule<C>
where
    C: TokenTransferExecutionContext + core::fmt::Debug,
{
    fn on_chan_open_init_validate(
        &self,
        opening: ChannelOpening<'_>,
        proposed_version: &Version,
    ) -> Result<Version, ChannelError> {
        Ok(on_chan_open_init_validate(&self.ctx, opening, proposed_version)?)
    }

    fn on_chan_open_init_execute(
        &mut self,
        _opening: ChannelOpening<'_>,
        _proposed_version: &Version,
    ) -> Result<(ModuleExtras, Version), ChannelError> {
        Ok((ModuleExtras::empty(), transfer_version()))
    }

    fn on_chan_open_try_validate(
        &self,
        opening: ChannelOpening<'_>,
        counterparty_version: &Version,
    ) -> Result<Version, ChannelError> {
        Ok(on_chan_open_try_validate(&self.ctx, opening, counterparty_version)?)
    }

    fn on_chan_open_try_execute(
        &mut self,
        _opening: ChannelOpening<'_>,
        _counterparty_version: &Version,
    ) -> Result<(ModuleExtras, Version), ChannelError> {
        Ok((ModuleExtras::empty(), transfer_version()))
    }

    fn on_chan_open_ack_validate(
        &self,
        _port_id: &PortId,
        _channel_id: &ChannelId,
        counterparty_version: &Version,
    ) -> Result<(), ChannelError> {
        Ok(verify_transfer_version(counterparty_version)?)
    }

    fn on_recv_packet_execute(
        &mut self,
        packet: &Packet,
        _relayer: &Signer,
    ) -> (ModuleExtras, Acknowledgement) {
        on_recv_packet_execute(&mut self.ctx, packet)
    }

    fn on_acknowledgement_packet_validate(
        &self,
        packet: &Packet,
        acknowledgement: &Acknowledgement,
        _relayer: &Signer,
    ) -> Result<(), PacketError> {
        Ok(on_acknowledgement_packet_validate(
            &self.ctx,
            packet,
            acknowledgement,
        )?)
    }

    fn on_acknowledgement_packet_execute(
        &mut self,
        packet: &Packet,
        acknowledgement: &Acknowledgement,
        _relayer: &Signer,
    ) -> (ModuleExtras, Result<(), PacketError>) {
        let (extras, res) = on_acknowledgement_packet_execute(&mut self.ctx, packet, acknowledgement);
        (extras, res.map_err(PacketError::from))
    }

    fn on_timeout_packet_validate(
        &self,
        packet: &Packet,
        _relayer: &Signer,
    ) -> Result<(), PacketError> {
        Ok(on_timeout_packet_validate(&self.ctx, packet)?)
    }

    fn on_timeout_packet_execute(
        &mut self,
        packet: &Packet,
        _relayer: &Signer,
    ) -> (ModuleExtras, Result<(), PacketError>) {
        let (extras, res) = on_timeout_packet_execute(&mut self.ctx, packet);
        (extras, res.map_err(PacketError::from))
    }
}
