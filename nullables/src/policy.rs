//! Nullable access policy — scripted blacklist verdicts.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use aegis_chain::{AccessPolicyClient, ChainError};
use aegis_types::Hotkey;

/// A test access policy with a default verdict and an optional script of
/// responses consumed one per query.
pub struct NullPolicy {
    default_verdict: Cell<bool>,
    script: RefCell<VecDeque<Result<bool, ChainError>>>,
    queries: RefCell<Vec<Hotkey>>,
}

impl NullPolicy {
    /// A policy that never blacklists.
    pub fn allowing() -> Self {
        Self {
            default_verdict: Cell::new(false),
            script: RefCell::new(VecDeque::new()),
            queries: RefCell::new(Vec::new()),
        }
    }

    /// Change the verdict returned when no scripted response is queued.
    pub fn set_default_verdict(&self, blacklisted: bool) {
        self.default_verdict.set(blacklisted);
    }

    /// Queue a response for the next query.
    pub fn script_response(&self, response: Result<bool, ChainError>) {
        self.script.borrow_mut().push_back(response);
    }

    /// All hotkeys queried so far (for assertions).
    pub fn queries(&self) -> Vec<Hotkey> {
        self.queries.borrow().clone()
    }
}

impl AccessPolicyClient for NullPolicy {
    fn is_blacklisted(&self, hotkey: &Hotkey) -> Result<bool, ChainError> {
        self.queries.borrow_mut().push(hotkey.clone());
        self.script
            .borrow_mut()
            .pop_front()
            .unwrap_or(Ok(self.default_verdict.get()))
    }
}
