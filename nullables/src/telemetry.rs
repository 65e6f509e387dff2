//! Nullable telemetry sink — records metrics instead of shipping them.

use std::cell::{Cell, RefCell};

use aegis_chain::{ChainError, TelemetrySink};
use aegis_types::Timestamp;

/// A metric recorded by [`NullTelemetry`].
#[derive(Clone, Debug, PartialEq)]
pub struct EmittedMetric {
    pub tag: String,
    pub value: f64,
    pub at: Timestamp,
}

/// A test sink that records every emit and flush.
pub struct NullTelemetry {
    emitted: RefCell<Vec<EmittedMetric>>,
    flushes: Cell<u32>,
    fail_emits: Cell<bool>,
}

impl NullTelemetry {
    pub fn new() -> Self {
        Self {
            emitted: RefCell::new(Vec::new()),
            flushes: Cell::new(0),
            fail_emits: Cell::new(false),
        }
    }

    /// Make every subsequent `emit` fail with a transient error.
    pub fn fail_emits(&self, fail: bool) {
        self.fail_emits.set(fail);
    }

    /// All recorded metrics (for assertions).
    pub fn emitted(&self) -> Vec<EmittedMetric> {
        self.emitted.borrow().clone()
    }

    pub fn flush_count(&self) -> u32 {
        self.flushes.get()
    }
}

impl Default for NullTelemetry {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetrySink for NullTelemetry {
    fn emit(&self, tag: &str, value: f64, at: Timestamp) -> Result<(), ChainError> {
        if self.fail_emits.get() {
            return Err(ChainError::Transient("telemetry backend offline".into()));
        }
        self.emitted.borrow_mut().push(EmittedMetric {
            tag: tag.to_string(),
            value,
            at,
        });
        Ok(())
    }

    fn flush(&self) -> Result<(), ChainError> {
        self.flushes.set(self.flushes.get() + 1);
        Ok(())
    }
}
