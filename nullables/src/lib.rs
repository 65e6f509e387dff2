//! Nullable chain clients for deterministic testing.
//!
//! Every external seam the participation loop consumes has a test-friendly
//! implementation here that:
//! - Returns deterministic, programmable values
//! - Records calls for assertions
//! - Never touches the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod ledger;
pub mod policy;
pub mod serving;
pub mod telemetry;

pub use ledger::{NullLedger, SubmittedWeights};
pub use policy::NullPolicy;
pub use serving::NullServing;
pub use telemetry::{EmittedMetric, NullTelemetry};
