use core::time::Duration;

use ibc::core::client::types::{ClientState, ConsensusState, Height};
use ibc::core::host::types::identifiers::ClientType;

use super::header::MockHeader;

pub const AXON_CLIENT_TYPE: &str = "07-axon";
pub const CKB4IBC_CLIENT_TYPE: &str = "07-ckb4ibc";

pub fn axon_client_type() -> ClientType {
    ClientType::new(AXON_CLIENT_TYPE).expect("Never fails")
}

pub fn ckb4ibc_client_type() -> ClientType {
    ClientType::new(CKB4IBC_CLIENT_TYPE).expect("Never fails")
}

/// Client-specific data carried in the opaque client state: the trusting
/// period in nanoseconds, big-endian. Empty data means the client never
/// expires.
pub fn encode_trusting_period(trusting_period: Option<Duration>) -> Vec<u8> {
    trusting_period
        .map(|period| (period.as_nanos() as u64).to_be_bytes().to_vec())
        .unwrap_or_default()
}

pub fn decode_trusting_period(data: &[u8]) -> Option<Duration> {
    let bytes: [u8; 8] = data.try_into().ok()?;
    Some(Duration::from_nanos(u64::from_be_bytes(bytes)))
}

/// Parameters of a mock client, turned into the pair of states a
/// `MsgCreateClient` carries.
#[derive(typed_builder::TypedBuilder, Debug)]
pub struct MockClientConfig {
    #[builder(default = axon_client_type())]
    pub client_type: ClientType,
    /// Header of the counterparty block the client starts from.
    pub latest_header: MockHeader,
    #[builder(default = Some(Duration::from_secs(64000)))]
    pub trusting_period: Option<Duration>,
}

impl MockClientConfig {
    pub fn latest_height(&self) -> Height {
        self.latest_header.height
    }

    pub fn into_states(self) -> (ClientState, ConsensusState) {
        let client_state = ClientState::new(
            self.client_type,
            self.latest_header.height,
            encode_trusting_period(self.trusting_period),
        );

        (client_state, self.latest_header.into_consensus_state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trusting_period_survives_the_client_data() {
        let period = Duration::from_secs(3600);
        let data = encode_trusting_period(Some(period));

        assert_eq!(data.len(), 8);
        assert_eq!(decode_trusting_period(&data), Some(period));
        assert_eq!(decode_trusting_period(&encode_trusting_period(None)), None);
    }

    #[test]
    fn config_builds_states_at_header_height() {
        let header = MockHeader::new(Height::new(0, 7).expect("Never fails"));
        let (client_state, consensus_state) = MockClientConfig::builder()
            .client_type(ckb4ibc_client_type())
            .latest_header(header.clone())
            .build()
            .into_states();

        assert_eq!(client_state.latest_height(), header.height);
        assert_eq!(client_state.client_type(), &ckb4ibc_client_type());
        assert!(!client_state.is_frozen());
        assert_eq!(consensus_state.timestamp(), header.timestamp);
    }
}
