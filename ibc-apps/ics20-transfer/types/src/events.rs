//! Events the transfer application attaches to the packets it handles.
use ibc_core_channel_types::acknowledgement::AcknowledgementStatus;
use ibc_core_router_types::event::{ModuleEvent, ModuleEventAttribute};
use ibc_core_router_types::module::ModuleId;

use crate::packet::PacketData;
use crate::{PrefixedDenom, MODULE_ID_STR};

const EVENT_TYPE_PACKET: &str = "fungible_token_packet";
const EVENT_TYPE_TIMEOUT: &str = "timeout";
const EVENT_TYPE_DENOM_TRACE: &str = "denomination_trace";
const EVENT_TYPE_TRANSFER: &str = "ibc_transfer";

/// One step in the life of a transfer, as seen by the chain reporting it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransferEvent {
    /// The tokens left this chain in a packet.
    Sent(PacketData),
    /// A packet arrived; `credited` is false when it was answered with an
    /// error acknowledgement.
    Received { data: PacketData, credited: bool },
    /// The counterparty acknowledged a sent packet. An error status means
    /// the sender was refunded.
    Acknowledged {
        data: PacketData,
        status: AcknowledgementStatus,
    },
    /// A sent packet timed out and the sender was refunded.
    Refunded(PacketData),
    /// Vouchers of `denom` were minted on this chain.
    VoucherMinted {
        denom: PrefixedDenom,
        trace_hash: Option<String>,
    },
}

impl TransferEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Sent(_) => EVENT_TYPE_TRANSFER,
            Self::Received { .. } | Self::Acknowledged { .. } => EVENT_TYPE_PACKET,
            Self::Refunded(_) => EVENT_TYPE_TIMEOUT,
            Self::VoucherMinted { .. } => EVENT_TYPE_DENOM_TRACE,
        }
    }
}

/// `sender` is left out of refunds, where it is the `refund_receiver`.
fn token_attributes(data: PacketData, prefix: &str) -> Vec<ModuleEventAttribute> {
    let mut attributes: Vec<ModuleEventAttribute> = Vec::with_capacity(5);
    if prefix.is_empty() {
        attributes.push(("sender", data.sender).into());
    }
    attributes.push((format!("{prefix}receiver"), data.receiver).into());
    attributes.push((format!("{prefix}denom"), data.token.denom).into());
    attributes.push((format!("{prefix}amount"), data.token.amount).into());
    attributes.push(("memo", data.memo).into());
    attributes
}

impl From<TransferEvent> for ModuleEvent {
    fn from(event: TransferEvent) -> Self {
        let kind = event.kind().to_string();
        let module_attr: ModuleEventAttribute = ("module", MODULE_ID_STR).into();

        let attributes = match event {
            TransferEvent::Sent(data) => token_attributes(data, ""),
            TransferEvent::Received { data, credited } => {
                let mut attrs = vec![module_attr];
                attrs.extend(token_attributes(data, ""));
                attrs.push(("success", credited).into());
                attrs
            }
            TransferEvent::Acknowledged { data, status } => {
                let outcome = if status.is_successful() { "success" } else { "error" };
                let mut attrs = vec![module_attr];
                attrs.extend(token_attributes(data, ""));
                attrs.push(("acknowledgement", &status).into());
                attrs.push((outcome, status).into());
                attrs
            }
            TransferEvent::Refunded(data) => {
                let refund = PacketData {
                    receiver: data.sender.clone(),
                    ..data
                };
                let mut attrs = vec![module_attr];
                attrs.extend(token_attributes(refund, "refund_"));
                attrs
            }
            TransferEvent::VoucherMinted { denom, trace_hash } => {
                let mut attrs: Vec<ModuleEventAttribute> = vec![("denom", denom).into()];
                attrs.extend(trace_hash.map(|hash| ("trace_hash", hash).into()));
                attrs
            }
        };

        ModuleEvent {
            kind,
            module_name: ModuleId::new(MODULE_ID_STR.to_string()),
            attributes,
        }
    }
}

#[cfg(test)]
mod tests {
    use ibc_primitives::Signer;

    use super::*;
    use crate::{Coin, Memo};

    fn data() -> PacketData {
        PacketData {
            token: Coin {
                denom: "transfer/channel-0/uatom".parse().unwrap(),
                amount: 100u64.into(),
            },
            sender: Signer::from("alice"),
            receiver: Signer::from("bob"),
            memo: Memo::default(),
        }
    }

    #[test]
    fn voucher_event_carries_trace_hash() {
        let ev = ModuleEvent::from(TransferEvent::VoucherMinted {
            denom: "transfer/channel-0/uatom".parse().unwrap(),
            trace_hash: Some("IBC/ABC".to_string()),
        });

        assert_eq!(ev.kind, EVENT_TYPE_DENOM_TRACE);
        assert_eq!(ev.module_name.as_str(), MODULE_ID_STR);
        assert_eq!(ev.attribute("denom"), Some("transfer/channel-0/uatom"));
        assert_eq!(ev.attribute("trace_hash"), Some("IBC/ABC"));
    }

    #[test]
    fn received_event_reports_whether_tokens_were_credited() {
        let ev = ModuleEvent::from(TransferEvent::Received {
            data: data(),
            credited: false,
        });

        assert_eq!(ev.kind, EVENT_TYPE_PACKET);
        assert_eq!(ev.attribute("amount"), Some("100"));
        assert_eq!(ev.attribute("success"), Some("false"));
    }

    #[test]
    fn refund_goes_back_to_the_sender() {
        let ev = ModuleEvent::from(TransferEvent::Refunded(data()));

        assert_eq!(ev.kind, EVENT_TYPE_TIMEOUT);
        assert_eq!(ev.attribute("refund_receiver"), Some("alice"));
        assert_eq!(ev.attribute("refund_amount"), Some("100"));
        assert_eq!(ev.attribute("sender"), None);
    }
}
