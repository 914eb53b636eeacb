//! Debounce Timer
//!
//! One pending callback at a time; scheduling replaces a callback that has
//! not fired yet.

use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone)]
pub struct Debouncer {
    delay_ms: u32,
    pending: Rc<RefCell<Option<Timeout>>>,
}

impl Debouncer {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            pending: Rc::new(RefCell::new(None)),
        }
    }

    pub fn schedule(&self, callback: impl FnOnce() + 'static) {
        let timeout = Timeout::new(self.delay_ms, callback);
        // Dropping a Timeout clears it.
        self.pending.borrow_mut().replace(timeout);
    }

    /// Drop the pending callback, if it has not fired
    pub fn cancel(&self) {
        self.pending.borrow_mut().take();
    }
}
