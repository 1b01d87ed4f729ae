//! Time-boxing for the diff search
//!
//! After every edit-distance wave the engine asks its continuation whether it
//! may keep searching. Returning `false` makes the engine stop and produce a
//! conservative result flagged with `quit_early`.

use std::time::{Duration, Instant};

pub trait ContinueProcessing {
    /// `furthest_original_index` is the furthest original position reached by the
    /// forward search, `match_length` the number of matched elements on that path.
    fn should_continue(&mut self, furthest_original_index: usize, match_length: usize) -> bool;
}

impl<F> ContinueProcessing for F
where
    F: FnMut(usize, usize) -> bool,
{
    fn should_continue(&mut self, furthest_original_index: usize, match_length: usize) -> bool {
        self(furthest_original_index, match_length)
    }
}

/// Wall-clock budget starting at construction. A zero budget never expires.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    budget: Duration,
}

impl Deadline {
    pub fn new(budget: Duration) -> Self {
        Self {
            started: Instant::now(),
            budget,
        }
    }

    pub fn unlimited() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn is_unlimited(&self) -> bool {
        self.budget.is_zero()
    }

    pub fn has_time_left(&self) -> bool {
        self.is_unlimited() || self.started.elapsed() < self.budget
    }
}

impl ContinueProcessing for Deadline {
    fn should_continue(&mut self, _furthest_original_index: usize, _match_length: usize) -> bool {
        self.has_time_left()
    }
}
