//! The periodic sub-tasks the scheduler dispatches.
//!
//! Each task is a free function of `(&mut ParticipationState, &client)`:
//! it reads and mutates the state record, performs its I/O inline, and
//! returns a typed result inspected once at the tick boundary.

pub mod blacklist;
pub mod report;
pub mod sync;
pub mod weights;

pub use blacklist::refresh_blacklist;
pub use report::{report_status, StatusReport};
pub use sync::{refresh_snapshot, resync_metagraph};
pub use weights::{maybe_submit_weights, one_hot_weights, WeightOutcome, STALENESS_WINDOW};
