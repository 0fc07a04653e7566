//! Scoped timer handles for the widget's sequencing logic
//!
//! Every delayed action in the widget (phase advance, silence detection,
//! simulated processing, inactivity fallback) is owned by exactly one
//! `TimerSlot`. A slot holds at most one pending deadline; scheduling
//! replaces the previous one, so a category of timer can never fire twice.

use std::time::{Duration, Instant};

/// A single-deadline timer owned by a component instance.
///
/// Deadlines are plain `Instant`s checked from the poll loop, so dropping
/// the owning component is enough to guarantee the timer never fires.
#[derive(Debug, Default)]
pub struct TimerSlot {
    deadline: Option<Instant>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self { deadline: None }
    }

    /// Arm the slot, replacing any pending deadline.
    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    /// Disarm the slot.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Returns true exactly once when the deadline has passed, disarming
    /// the slot in the process.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time remaining until the deadline, if armed and still in the future.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }
}
