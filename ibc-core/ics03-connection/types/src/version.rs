//! Connection versions and the negotiation between two chains' offers.

use core::fmt::Display;

use ibc_proto::ibc::core::connection::v1::Version as RawVersion;
use ibc_proto::Protobuf;

use crate::error::ConnectionError;

/// A version identifier and the channel orderings it allows.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Version {
    identifier: String,
    features: Vec<String>,
}

impl Version {
    pub fn new(identifier: String, features: Vec<String>) -> Self {
        Self {
            identifier,
            features,
        }
    }

    /// The one version this implementation speaks: `1`, with both
    /// orderings.
    pub fn compatibles() -> Vec<Self> {
        vec![Self::new(
            "1".to_string(),
            vec!["ORDER_ORDERED".to_string(), "ORDER_UNORDERED".to_string()],
        )]
    }

    /// Decodes a version offer, which must not be empty.
    pub fn decode_list(raw: Vec<RawVersion>) -> Result<Vec<Self>, ConnectionError> {
        if raw.is_empty() {
            return Err(ConnectionError::EmptyVersions);
        }
        raw.into_iter().map(Self::try_from).collect()
    }

    /// The entry of `offer` with the same identifier.
    fn counterpart_in<'a>(&self, offer: &'a [Version]) -> Result<&'a Version, ConnectionError> {
        offer
            .iter()
            .find(|candidate| candidate.identifier == self.identifier)
            .ok_or_else(|| ConnectionError::VersionNotSupported {
                version: self.clone(),
            })
    }

    /// Accepts a version whose identifier is in `supported` and whose
    /// non-empty feature set is covered by the matching entry.
    pub fn verify_is_supported(&self, supported: &[Version]) -> Result<(), ConnectionError> {
        let known = self.counterpart_in(supported)?;
        if self.features.is_empty() {
            return Err(ConnectionError::EmptyFeatures);
        }
        self.features
            .iter()
            .try_for_each(|feature| known.verify_feature_supported(feature.clone()))
    }

    pub fn verify_feature_supported(&self, feature: String) -> Result<(), ConnectionError> {
        if self.features.contains(&feature) {
            Ok(())
        } else {
            Err(ConnectionError::FeatureNotSupported { feature })
        }
    }

    /// Both sides' view of this version: same identifier, the features
    /// they share. `None` when they share none.
    fn common_with(&self, theirs: &Version) -> Option<Version> {
        let features: Vec<String> = self
            .features
            .iter()
            .filter(|feature| theirs.features.contains(feature))
            .cloned()
            .collect();

        (!features.is_empty()).then(|| Version::new(self.identifier.clone(), features))
    }
}

impl Protobuf<RawVersion> for Version {}

impl TryFrom<RawVersion> for Version {
    type Error = ConnectionError;

    fn try_from(raw: RawVersion) -> Result<Self, Self::Error> {
        if raw.identifier.trim().is_empty() {
            return Err(ConnectionError::EmptyVersions);
        }
        if raw.features.iter().any(|feature| feature.trim().is_empty()) {
            return Err(ConnectionError::EmptyFeatures);
        }
        Ok(Self::new(raw.identifier, raw.features))
    }
}

impl From<Version> for RawVersion {
    fn from(version: Version) -> Self {
        Self {
            identifier: version.identifier,
            features: version.features,
        }
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}[{}]", self.identifier, self.features.join(","))
    }
}

/// The version chain B settles on in TRYOPEN: among the identifiers both
/// sides offer, the lowest one that leaves a non-empty common feature set.
pub fn pick_version(
    supported_versions: &[Version],
    counterparty_versions: &[Version],
) -> Result<Version, ConnectionError> {
    supported_versions
        .iter()
        .filter_map(|ours| {
            let theirs = ours.counterpart_in(counterparty_versions).ok()?;
            ours.common_with(theirs)
        })
        .min_by(|a, b| a.identifier.cmp(&b.identifier))
        .ok_or(ConnectionError::NoCommonVersion)
}
