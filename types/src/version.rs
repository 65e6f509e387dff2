//! The weight protocol version tag.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Version key attached to every weight submission.
///
/// The chain rejects submissions whose key is older than the subnet's
/// current minimum, so validators and miners on stale releases age out
/// naturally. Fixed at startup, immutable thereafter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionKey(u64);

impl VersionKey {
    pub fn new(key: u64) -> Self {
        Self(key)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Derive a version key from a `major.minor.patch` release string,
    /// packed so newer releases always compare higher.
    pub fn from_semver(version: &str) -> Option<Self> {
        let mut parts = version.split('.');
        let major: u64 = parts.next()?.parse().ok()?;
        let minor: u64 = parts.next()?.parse().ok()?;
        let patch: u64 = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self(major * 1_000_000 + minor * 1_000 + patch))
    }
}

impl fmt::Display for VersionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
