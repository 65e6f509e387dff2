//! Identifiers for neurons, subnets, and the local identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A neuron's stable index within the metagraph.
///
/// Assigned by the chain at registration and immutable for as long as the
/// neuron stays registered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Uid(u16);

impl Uid {
    pub fn new(index: u16) -> Self {
        Self(index)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// The uid as a vector index.
    pub fn as_index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The subnet identifier weights are submitted against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Netuid(u16);

impl Netuid {
    pub fn new(id: u16) -> Self {
        Self(id)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for Netuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The miner's public identity on the network (an SS58-encoded key).
///
/// Treated as an opaque string: this crate never derives or validates keys,
/// it only carries the identity to the access-policy and telemetry seams.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hotkey(String);

impl Hotkey {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uid_as_index_matches_value() {
        let uid = Uid::new(42);
        assert_eq!(uid.as_u16(), 42);
        assert_eq!(uid.as_index(), 42usize);
    }

    #[test]
    fn uid_display_is_bare_number() {
        assert_eq!(Uid::new(7).to_string(), "7");
    }

    #[test]
    fn hotkey_preserves_address() {
        let hk = Hotkey::new("5F3sa2TJAWMqDhXG6jhV4N8ko9SxwGy8TpaNS1repo5EYjQX");
        assert_eq!(hk.as_str(), "5F3sa2TJAWMqDhXG6jhV4N8ko9SxwGy8TpaNS1repo5EYjQX");
    }

    #[test]
    fn netuid_display() {
        assert_eq!(Netuid::new(14).to_string(), "14");
    }
}
