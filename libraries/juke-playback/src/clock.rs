//! Time source abstraction
//!
//! The sequencer compares elapsed playback time against a threshold;
//! injecting the clock keeps that comparison testable.

use std::time::Instant;

/// Source of the current instant
pub trait Clock: Send {
    /// The current instant
    fn now(&self) -> Instant;
}

/// Clock backed by `Instant::now`
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
