use ibc::primitives::{Signer, Timestamp};

/// Returns a `Timestamp` representation of beginning of year 2023.
///
/// Every [`MockContext`](crate::context::MockContext) dates its latest block
/// at this time by default, so that two contexts built one after the other
/// agree on the clock.
pub fn year_2023() -> Timestamp {
    // Sun Jan 01 2023 00:00:00 GMT+0000
    Timestamp::from_unix_timestamp(1_672_531_200, 0).expect("should be a valid time")
}

/// An account used as the signer of test messages.
pub fn dummy_account_id() -> Signer {
    "0CDA3F47EF3C4906693B170EF650EB968C5F4B2C".to_string().into()
}
