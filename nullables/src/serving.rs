//! Nullable serving handle — tracks lifecycle calls without a transport.

use aegis_chain::{ChainError, ServingHandle};

/// A test serving handle that counts start/stop calls.
pub struct NullServing {
    started: bool,
    start_calls: u32,
    stop_calls: u32,
}

impl NullServing {
    pub fn new() -> Self {
        Self {
            started: false,
            start_calls: 0,
            stop_calls: 0,
        }
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn start_calls(&self) -> u32 {
        self.start_calls
    }

    pub fn stop_calls(&self) -> u32 {
        self.stop_calls
    }
}

impl Default for NullServing {
    fn default() -> Self {
        Self::new()
    }
}

impl ServingHandle for NullServing {
    fn start(&mut self) -> Result<(), ChainError> {
        self.start_calls += 1;
        self.started = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), ChainError> {
        self.stop_calls += 1;
        self.started = false;
        Ok(())
    }
}
