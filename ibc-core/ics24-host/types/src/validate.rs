use crate::error::IdentifierError as Error;
use crate::identifiers::{ChannelId, ConnectionId};

const VALID_SPECIAL_CHARS: &str = "._+-#[]<>";

/// Longest suffix appended to a prefix when allocating an identifier:
/// a dash followed by `u64::MAX`.
const MAX_COUNTER_SUFFIX_LEN: u64 = 21;

/// Identifiers are path segments of store keys, so `/` and anything outside
/// of the ICS-24 alphabet is rejected.
pub fn validate_identifier_chars(id: &str) -> Result<(), Error> {
    match id
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && !VALID_SPECIAL_CHARS.contains(*c))
    {
        Some(_) => Err(Error::InvalidCharacter { id: id.into() }),
        None => Ok(()),
    }
}

/// Inclusive length check. A zero `min` is raised to one so that empty
/// identifiers never pass.
pub fn validate_identifier_length(id: &str, min: u64, max: u64) -> Result<(), Error> {
    let min = min.max(1);
    let length = id.len() as u64;

    if length < min || length > max {
        return Err(Error::InvalidLength {
            id: id.into(),
            min,
            max,
        });
    }

    Ok(())
}

/// Checks that `{prefix}-{counter}` stays within `[min_id_length, max_id_length]`
/// for every possible counter.
pub fn validate_prefix_length(
    prefix: &str,
    min_id_length: u64,
    max_id_length: u64,
) -> Result<(), Error> {
    // `{prefix}-0` is the shortest id built from the prefix.
    let min = min_id_length.saturating_sub(2);
    let max = max_id_length.saturating_sub(MAX_COUNTER_SUFFIX_LEN);

    validate_identifier_length(prefix, min, max)
}

/// Checks that `id` has the shape `{name}-{u64}` without leading zeros,
/// e.g. `connection-0` or `channel-12`.
pub fn validate_named_u64_index(id: &str, name: &str) -> Result<(), Error> {
    let invalid = || Error::InvalidPrefix { prefix: id.into() };

    let counter = id
        .strip_prefix(name)
        .and_then(|rest| rest.strip_prefix('-'))
        .ok_or_else(invalid)?;

    if counter.len() > 1 && counter.starts_with('0') {
        return Err(invalid());
    }

    counter.parse::<u64>().map_err(|_| invalid())?;

    Ok(())
}

/// Client types become the prefix of client identifiers.
pub fn validate_client_type(id: &str) -> Result<(), Error> {
    validate_identifier_chars(id)?;
    validate_prefix_length(id, 9, 64)
}

/// A client identifier is between 9 and 64 characters long.
pub fn validate_client_identifier(id: &str) -> Result<(), Error> {
    validate_identifier_chars(id)?;
    validate_identifier_length(id, 9, 64)
}

/// A connection identifier is `connection-{n}`, between 10 and 64 characters.
pub fn validate_connection_identifier(id: &str) -> Result<(), Error> {
    validate_identifier_chars(id)?;
    validate_identifier_length(id, 10, 64)?;
    validate_named_u64_index(id, ConnectionId::prefix())
}

/// A port identifier is between 2 and 128 characters long.
pub fn validate_port_identifier(id: &str) -> Result<(), Error> {
    validate_identifier_chars(id)?;
    validate_identifier_length(id, 2, 128)
}

/// A channel identifier is `channel-{n}`, between 8 and 64 characters.
pub fn validate_channel_identifier(id: &str) -> Result<(), Error> {
    validate_identifier_chars(id)?;
    validate_identifier_length(id, 8, 64)?;
    validate_named_u64_index(id, ChannelId::prefix())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::shortest("p1", true)]
    #[case::spec_port("port-1", true)]
    #[case::transfer("transfer", true)]
    #[case::too_short("p", false)]
    #[case::separator("port/1", false)]
    #[case::at_sign("port@1", false)]
    #[case::too_long(&"p".repeat(129), false)]
    fn port_identifiers(#[case] id: &str, #[case] ok: bool) {
        assert_eq!(validate_port_identifier(id).is_ok(), ok);
    }

    #[rstest]
    #[case::zero("connection-0", true)]
    #[case::u64_max("connection-18446744073709551615", true)]
    #[case::leading_zero("connection-0123", false)]
    #[case::missing_dash("connection0", false)]
    #[case::overflow("connection-18446744073709551616", false)]
    #[case::wrong_name("connect-1", false)]
    fn connection_identifiers(#[case] id: &str, #[case] ok: bool) {
        assert_eq!(validate_connection_identifier(id).is_ok(), ok);
    }

    #[rstest]
    #[case::zero("channel-0", true)]
    #[case::large("channel-123", true)]
    #[case::too_short("channel", false)]
    #[case::leading_zero("channel-01", false)]
    #[case::wrong_name("chan-1", false)]
    fn channel_identifiers(#[case] id: &str, #[case] ok: bool) {
        assert_eq!(validate_channel_identifier(id).is_ok(), ok);
    }

    #[rstest]
    #[case::axon("07-axon", true)]
    #[case::ckb("07-ckb4ibc", true)]
    #[case::too_short("07-ax", false)]
    #[case::too_long("an-extremely-long-client-type-name-x-y-z-abc", false)]
    fn client_types(#[case] id: &str, #[case] ok: bool) {
        assert_eq!(validate_client_type(id).is_ok(), ok);
    }

    #[rstest]
    #[case::axon("07-axon-1", true)]
    #[case::too_short("client", false)]
    #[case::too_long(&"c".repeat(65), false)]
    fn client_identifiers(#[case] id: &str, #[case] ok: bool) {
        assert_eq!(validate_client_identifier(id).is_ok(), ok);
    }

    #[rstest]
    #[case::empty_prefix("", 1, 64, false)]
    #[case::max_is_low("a", 1, 10, false)]
    #[case::min_max_boundary("a", 3, 22, true)]
    #[case::chain("chainA", 1, 64, true)]
    fn prefix_lengths(
        #[case] prefix: &str,
        #[case] min: u64,
        #[case] max: u64,
        #[case] ok: bool,
    ) {
        assert_eq!(validate_prefix_length(prefix, min, max).is_ok(), ok);
    }

    #[test]
    fn empty_identifiers_only_fail_on_length() {
        assert!(validate_identifier_chars("").is_ok());
        assert!(validate_identifier_length("", 0, 64).is_err());
    }
}
