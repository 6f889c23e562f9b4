// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Time Limit Monitor
//!
//! Enforces a wall-clock budget on a solve. The clock is read only on steps
//! where `(steps & clock_check_mask) == 0`, so the default mask (`0x3FFF`)
//! costs one `Instant::elapsed` per 16,384 nodes. A mask of `0` checks on
//! every step, which suits searches whose nodes are expensive (each
//! branch-and-bound node solves a full LP).
//!
//! ```rust
//! use courtside_search::monitor::time_limit::TimeLimitMonitor;
//! use courtside_search::monitor::search_monitor::{SearchMonitor, SearchCommand};
//! use std::time::Duration;
//!
//! let mut mon = TimeLimitMonitor::new(Duration::from_secs(5));
//! mon.on_step();
//! assert_eq!(mon.search_command(), SearchCommand::Continue);
//! ```

use crate::{
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    program::BinaryProgram,
    solution::BinarySolution,
};
use std::time::{Duration, Instant};

/// The message carried by the termination command.
pub const TIME_LIMIT_REACHED: &str = "time limit reached";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLimitMonitor {
    clock_check_mask: u64,
    steps: u64,
    time_limit: Duration,
    start_time: Instant,
}

impl TimeLimitMonitor {
    /// Check every 16,384 steps (2^14).
    const DEFAULT_STEP_CLOCK_CHECK_MASK: u64 = 0x3FFF;

    #[inline]
    pub fn new(time_limit: Duration) -> Self {
        Self::with_clock_check_mask(time_limit, Self::DEFAULT_STEP_CLOCK_CHECK_MASK)
    }

    #[inline]
    pub fn with_clock_check_mask(time_limit: Duration, clock_check_mask: u64) -> Self {
        Self {
            clock_check_mask,
            steps: 0,
            time_limit,
            start_time: Instant::now(),
        }
    }

    #[inline]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }
}

impl SearchMonitor for TimeLimitMonitor {
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter_search(&mut self, _program: &BinaryProgram) {
        self.start_time = Instant::now();
        self.steps = 0;
    }

    fn on_exit_search(&mut self) {}

    fn on_solution_found(&mut self, _solution: &BinarySolution) {}

    #[inline(always)]
    fn on_step(&mut self) {
        self.steps = self.steps.wrapping_add(1);
    }

    #[inline(always)]
    fn search_command(&self) -> SearchCommand {
        if (self.steps & self.clock_check_mask) == 0 && self.start_time.elapsed() >= self.time_limit
        {
            return SearchCommand::Terminate(TIME_LIMIT_REACHED.to_string());
        }
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mask_is_power_of_two_minus_one() {
        assert_eq!(TimeLimitMonitor::DEFAULT_STEP_CLOCK_CHECK_MASK, 0x3FFF);
        let mon = TimeLimitMonitor::new(Duration::from_secs(1));
        assert_eq!(mon.clock_check_mask, 0x3FFF);
    }

    #[test]
    fn test_terminates_after_time_limit_when_mask_condition_met() {
        let mut mon = TimeLimitMonitor::new(Duration::from_millis(10));
        mon.start_time = Instant::now() - Duration::from_millis(50);
        mon.steps = 0;
        assert_eq!(
            mon.search_command(),
            SearchCommand::Terminate(TIME_LIMIT_REACHED.to_string())
        );
    }

    #[test]
    fn test_continues_when_mask_condition_not_met_even_if_time_exceeded() {
        let mut mon = TimeLimitMonitor::new(Duration::from_millis(1));
        mon.start_time = Instant::now() - Duration::from_millis(50);
        mon.steps = 1;
        assert_eq!(mon.search_command(), SearchCommand::Continue);
    }

    #[test]
    fn test_zero_mask_always_checks() {
        let mut mon = TimeLimitMonitor::with_clock_check_mask(Duration::from_millis(1), 0);
        mon.start_time = Instant::now() - Duration::from_millis(50);
        mon.steps = 12345;
        assert!(matches!(mon.search_command(), SearchCommand::Terminate(_)));
    }

    #[test]
    fn test_enter_search_restarts_the_clock() {
        let mut mon = TimeLimitMonitor::with_clock_check_mask(Duration::from_secs(3600), 0);
        mon.start_time = Instant::now() - Duration::from_secs(7200);
        mon.steps = 99;
        let program = crate::program::BinaryProgramBuilder::new(
            crate::program::ObjectiveSense::Maximize,
        )
        .build();
        mon.on_enter_search(&program);
        assert_eq!(mon.steps, 0);
        assert_eq!(mon.search_command(), SearchCommand::Continue);
    }

    #[test]
    fn test_on_step_increments_steps_wrapping() {
        let mut mon = TimeLimitMonitor::new(Duration::from_secs(1));
        mon.on_step();
        assert_eq!(mon.steps, 1);
        mon.steps = u64::MAX;
        mon.on_step();
        assert_eq!(mon.steps, 0);
    }

    #[test]
    fn test_mask_condition_triggers_every_2_pow_k_steps() {
        let mut mon = TimeLimitMonitor::with_clock_check_mask(Duration::ZERO, 0x3);
        for s in [0u64, 4, 8, 12] {
            mon.steps = s;
            assert!(
                matches!(mon.search_command(), SearchCommand::Terminate(_)),
                "expected a clock check at steps={s}"
            );
        }
        for s in [1u64, 2, 3, 5, 6, 7] {
            mon.steps = s;
            assert_eq!(mon.search_command(), SearchCommand::Continue, "steps={s}");
        }
    }
}
