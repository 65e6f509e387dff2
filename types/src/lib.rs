//! Fundamental types for the Aegis miner.
//!
//! This crate defines the small newtypes shared across every other crate in
//! the workspace: neuron and subnet identifiers, the miner's hotkey, the
//! weight protocol version tag, and timestamps.

pub mod ids;
pub mod time;
pub mod version;

pub use ids::{Hotkey, Netuid, Uid};
pub use time::Timestamp;
pub use version::VersionKey;
